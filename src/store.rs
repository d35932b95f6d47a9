use log::{debug, error, warn};

use crate::{
  storage::Storage,
  task::{normalize_text, Priority, Task, TaskId},
  traits::Indexable,
};

pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Asked before anything gets deleted.
pub trait Confirm {
  fn confirm(&mut self, prompt: &str) -> bool;
}

/// Says yes to everything, for `--yes` and scripted use.
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
  fn confirm(&mut self, _prompt: &str) -> bool {
    true
  }
}

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Reads the task list from `key`. Missing or malformed data is an empty list.
pub fn load_all(storage: &dyn Storage, key: &str) -> Vec<Task> {
  let raw = match storage.read(key) {
    Some(raw) => raw,
    None => {
      debug!("slot {} is empty, starting with no tasks", key);
      return Vec::new();
    }
  };

  match serde_json::from_str::<Vec<Task>>(&raw) {
    Ok(tasks) => {
      debug!("restored {} tasks from slot {}", tasks.len(), key);
      tasks
    }
    Err(err) => {
      warn!("slot {} is not a task list, ignoring it: {}", key, err);
      Vec::new()
    }
  }
}

/// Newest-first task list mirrored into one storage slot.
pub struct TaskStore {
  storage: Box<dyn Storage>,
  key: String,
  tasks: Vec<Task>,
  editing_id: Option<TaskId>,
}

impl TaskStore {
  pub fn new(storage: Box<dyn Storage>, key: &str) -> Self {
    let tasks = load_all(storage.as_ref(), key);
    Self {
      storage,
      key: key.to_owned(),
      tasks,
      editing_id: None,
    }
  }

  pub fn tasks(&self) -> &[Task] {
    self.tasks.as_slice()
  }

  pub fn task_by_id(&self, id: TaskId) -> Option<&Task> {
    self.tasks.iter().find(|t| t.id() == id)
  }

  pub fn editing_id(&self) -> Option<TaskId> {
    self.editing_id
  }

  pub fn editing_task(&self) -> Option<&Task> {
    self.editing_id.and_then(|id| self.task_by_id(id))
  }

  pub fn create(&mut self, text: &str, priority: Priority) -> Option<Task> {
    let text = normalize_text(text)?;
    let task = Task::new(self.next_id(), text, priority);
    self.tasks.insert(0, task.clone());
    self.persist();

    debug!("created task id: {} priority: {}", task.id(), task.priority());
    return Some(task);
  }

  pub fn begin_edit(&mut self, id: TaskId) -> Option<&Task> {
    let position = self.position_by_id(id)?;
    self.editing_id = Some(id);
    return self.tasks.get(position);
  }

  pub fn cancel_edit(&mut self) {
    self.editing_id = None;
  }

  /// Applies new text and priority to the task picked by `begin_edit`.
  ///
  /// Blank text keeps the edit pending. A target that disappeared meanwhile
  /// just ends the edit.
  pub fn commit_edit(&mut self, text: &str, priority: Priority) -> Option<Task> {
    let id = self.editing_id?;
    let text = normalize_text(text)?;

    self.editing_id = None;
    let position = match self.position_by_id(id) {
      Some(position) => position,
      None => {
        debug!("edit target {} is gone", id);
        return None;
      }
    };

    self.tasks[position].update(text, priority);
    self.persist();
    return Some(self.tasks[position].clone());
  }

  pub fn toggle_completed(&mut self, id: TaskId) -> Option<&Task> {
    let position = self.position_by_id(id)?;
    self.tasks[position].toggle();
    self.persist();
    return self.tasks.get(position);
  }

  pub fn delete(&mut self, id: TaskId, confirm: &mut dyn Confirm) -> Option<Task> {
    let position = self.position_by_id(id)?;
    if !confirm.confirm(DELETE_PROMPT) {
      debug!("delete of task {} not confirmed", id);
      return None;
    }

    let removed = self.tasks.remove(position);
    if self.editing_id == Some(id) {
      self.editing_id = None;
    }
    self.persist();
    return Some(removed);
  }

  fn position_by_id(&self, id: TaskId) -> Option<usize> {
    self.tasks.iter().position(|t| t.id() == id)
  }

  fn next_id(&self) -> TaskId {
    let now = chrono::Utc::now().timestamp_millis().max(0) as TaskId;
    let max_id = match self.tasks.iter().map(|t| t.id()).max() {
      Some(max_id) if max_id >= now => max_id,
      _ => return now,
    };

    match max_id.checked_add(1) {
      Some(id) => id,
      None => {
        warn!("task ids reached {}, reusing the smallest free id", max_id);
        self.smallest_unused_id()
      }
    }
  }

  fn smallest_unused_id(&self) -> TaskId {
    let mut ids: Vec<TaskId> = self.tasks.iter().map(|t| t.id()).collect();
    ids.sort_unstable();
    ids.dedup();

    let mut candidate: TaskId = 0;
    for id in ids {
      if id != candidate {
        break;
      }
      candidate += 1;
    }
    return candidate;
  }

  fn persist(&mut self) {
    let raw = match serde_json::to_string(&self.tasks) {
      Ok(raw) => raw,
      Err(err) => {
        error!("can't serialize tasks: {}", err);
        return;
      }
    };

    if let Err(err) = self.storage.write(&self.key, &raw) {
      error!("can't save tasks to slot {}: {}", self.key, err);
    }
  }
}
