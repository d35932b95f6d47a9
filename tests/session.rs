use tasklist::{
  projector::{Filter, View},
  storage::{FileStorage, Storage},
  store::{self, AlwaysConfirm, DEFAULT_STORAGE_KEY},
  task::Priority,
  traits::Indexable,
  Config, Session,
};

fn open(dir: &tempfile::TempDir) -> Session {
  let config = Config::with_storage_dir(dir.path().to_str().unwrap());
  Session::new(&config).unwrap()
}

#[test]
fn scenario_filters_and_search() {
  let dir = tempfile::tempdir().unwrap();
  let mut session = open(&dir);

  let b = session.add("Buy groceries", Priority::Medium).unwrap();
  session.toggle(b.id());
  let a = session.add("Finish report", Priority::High).unwrap();

  session.set_filter(Filter::Pending);
  assert_eq!(ids(&session.view()), vec![a.id()]);

  session.set_filter(Filter::High);
  assert_eq!(ids(&session.view()), vec![a.id()]);

  session.set_filter(Filter::All);
  session.set_search("b");
  assert_eq!(ids(&session.view()), vec![b.id()]);

  session.set_search("");
  assert_eq!(ids(&session.view()), vec![a.id(), b.id()]);

  let stats = session.stats();
  assert_eq!((stats.total, stats.completed, stats.pending), (2, 1, 1));
}

#[test]
fn reload_reproduces_sequence() {
  let dir = tempfile::tempdir().unwrap();
  let mut session = open(&dir);
  session.add("one", Priority::Low);
  session.add("two", Priority::High);
  let three = session.add("three", Priority::Medium).unwrap();
  session.toggle(three.id());

  let reloaded = open(&dir);
  assert_eq!(reloaded.store().tasks(), session.store().tasks());
  assert_eq!(reloaded.store().tasks()[0].text(), "three");
}

#[test]
fn deleted_task_stays_deleted_after_reload() {
  let dir = tempfile::tempdir().unwrap();
  let mut session = open(&dir);
  let task = session.add("temp", Priority::Low).unwrap();
  session.delete(task.id(), &mut AlwaysConfirm);

  let reloaded = open(&dir);
  assert!(reloaded.store().tasks().is_empty());
  assert_eq!(reloaded.view(), View::Empty { search_active: false });
}

#[test]
fn corrupted_slot_loads_empty() {
  let dir = tempfile::tempdir().unwrap();
  let mut storage = FileStorage::new(dir.path().to_str().unwrap()).unwrap();
  storage.write(DEFAULT_STORAGE_KEY, "[{\"id\": 1, \"text\": ").unwrap();

  assert!(store::load_all(&storage, DEFAULT_STORAGE_KEY).is_empty());
  assert!(open(&dir).store().tasks().is_empty());
}

#[test]
fn reads_slot_written_by_browser() {
  let dir = tempfile::tempdir().unwrap();
  let mut storage = FileStorage::new(dir.path().to_str().unwrap()).unwrap();
  storage
    .write(
      DEFAULT_STORAGE_KEY,
      r#"[
        {"id":1700000000002,"text":"Newer","priority":"high","completed":false,"createdAt":"2023-11-14T22:13:20.002Z"},
        {"id":1700000000001,"text":"Older","priority":"low","completed":true,"createdAt":"2023-11-14T22:13:20.001Z"}
      ]"#,
    )
    .unwrap();

  let mut session = open(&dir);
  assert_eq!(session.store().tasks().len(), 2);
  assert_eq!(session.store().tasks()[1].text(), "Older");

  let added = session.add("Newest", Priority::Medium).unwrap();
  assert!(added.id() > 1700000000002);
  assert_eq!(session.store().tasks()[0].id(), added.id());
}

fn ids(view: &View) -> Vec<u64> {
  view.tasks().iter().map(|t| t.id).collect()
}
