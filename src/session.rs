use log::debug;

use crate::{
  projector::{self, Filter, Stats, View},
  storage::{FileStorage, Storage},
  store::{Confirm, TaskStore},
  task::{Priority, Task, TaskId},
  Config,
};

/// Everything a running tasklist holds: the store plus the active filter and
/// search text.
pub struct Session {
  store: TaskStore,
  filter: Filter,
  search: String,
}

impl Session {
  pub fn new(config: &Config) -> std::io::Result<Self> {
    debug!("tasklist data folder: {}", config.storage_dir_path);
    let storage = FileStorage::new(&config.storage_dir_path)?;
    return Ok(Self::with_storage(Box::new(storage), &config.storage_key));
  }

  pub fn with_storage(storage: Box<dyn Storage>, key: &str) -> Self {
    Self {
      store: TaskStore::new(storage, key),
      filter: Filter::default(),
      search: String::new(),
    }
  }

  pub fn store(&self) -> &TaskStore {
    &self.store
  }

  pub fn filter(&self) -> Filter {
    self.filter
  }

  pub fn search(&self) -> &str {
    self.search.as_str()
  }

  pub fn add(&mut self, text: &str, priority: Priority) -> Option<Task> {
    self.store.create(text, priority)
  }

  pub fn begin_edit(&mut self, id: TaskId) -> Option<Task> {
    self.store.begin_edit(id).cloned()
  }

  pub fn cancel_edit(&mut self) {
    self.store.cancel_edit();
  }

  pub fn commit_edit(&mut self, text: &str, priority: Priority) -> Option<Task> {
    self.store.commit_edit(text, priority)
  }

  /// `begin_edit` and `commit_edit` in one go. `None` keeps the priority.
  pub fn edit(&mut self, id: TaskId, text: &str, priority: Option<Priority>) -> Option<Task> {
    let current = self.begin_edit(id)?;
    let edited = self.commit_edit(text, priority.unwrap_or(current.priority()));
    if edited.is_none() {
      self.cancel_edit();
    }
    return edited;
  }

  pub fn toggle(&mut self, id: TaskId) -> Option<Task> {
    self.store.toggle_completed(id).cloned()
  }

  pub fn delete(&mut self, id: TaskId, confirm: &mut dyn Confirm) -> Option<Task> {
    self.store.delete(id, confirm)
  }

  pub fn set_filter(&mut self, filter: Filter) {
    self.filter = filter;
  }

  pub fn set_search(&mut self, search: &str) {
    self.search = search.trim().to_owned();
  }

  pub fn view(&self) -> View {
    projector::project(self.store.tasks(), self.filter, &self.search)
  }

  pub fn stats(&self) -> Stats {
    projector::stats(self.store.tasks())
  }
}

#[cfg(test)]
mod tests {
  use super::Session;
  use crate::{
    projector::Filter,
    storage::MemoryStorage,
    store::{AlwaysConfirm, DEFAULT_STORAGE_KEY},
    task::Priority,
    traits::Indexable,
  };

  fn new_session() -> Session {
    Session::with_storage(Box::new(MemoryStorage::new()), DEFAULT_STORAGE_KEY)
  }

  #[test]
  fn filter_and_search_leave_data_alone() {
    let mut session = new_session();
    session.add("Book flights", Priority::Medium);
    let a = session.add("Alpha release", Priority::High).unwrap();
    session.toggle(a.id());

    session.set_filter(Filter::Completed);
    session.set_search("alpha");
    assert_eq!(session.view().tasks().len(), 1);

    session.set_filter(Filter::Pending);
    assert!(session.view().is_empty());
    assert_eq!(session.stats().total, 2);
    assert_eq!(session.store().tasks().len(), 2);
  }

  #[test]
  fn edit_keeps_priority_when_not_given() {
    let mut session = new_session();
    let task = session.add("draft", Priority::High).unwrap();

    let edited = session.edit(task.id(), "final", None).unwrap();
    assert_eq!(edited.text(), "final");
    assert_eq!(edited.priority(), Priority::High);
    assert_eq!(session.store().editing_id(), None);
  }

  #[test]
  fn edit_with_blank_text_does_not_leave_edit_open() {
    let mut session = new_session();
    let task = session.add("draft", Priority::High).unwrap();

    assert!(session.edit(task.id(), "  ", Some(Priority::Low)).is_none());
    assert_eq!(session.store().editing_id(), None);
    assert_eq!(session.store().tasks()[0].priority(), Priority::High);
  }

  #[test]
  fn blank_search_counts_as_no_search() {
    let mut session = new_session();
    session.add("Book flights", Priority::Medium);
    session.add("Alpha", Priority::High);

    session.set_search("   ");
    assert_eq!(session.search(), "");
    assert_eq!(session.view().tasks().len(), 2);

    session.set_search("  alpha ");
    assert_eq!(session.search(), "alpha");
    assert_eq!(session.view().tasks().len(), 1);
  }

  #[test]
  fn delete_updates_stats() {
    let mut session = new_session();
    let task = session.add("x", Priority::Low).unwrap();
    session.delete(task.id(), &mut AlwaysConfirm);

    let stats = session.stats();
    assert_eq!(stats.total, 0);
    assert_eq!(
      session.view(),
      crate::projector::View::Empty {
        search_active: false
      }
    );
  }
}
