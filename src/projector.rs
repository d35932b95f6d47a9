use crate::{
  task::{Priority, Task, TaskId},
  traits::Indexable,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
  #[default]
  All,
  Pending,
  Completed,
  High,
}

impl Filter {
  pub const ALL_NAMES: [&'static str; 4] = ["all", "pending", "completed", "high"];

  pub fn as_str(&self) -> &'static str {
    match self {
      Filter::All => "all",
      Filter::Pending => "pending",
      Filter::Completed => "completed",
      Filter::High => "high",
    }
  }

  pub fn matches(&self, task: &Task) -> bool {
    match self {
      Filter::All => true,
      Filter::Pending => !task.is_completed(),
      Filter::Completed => task.is_completed(),
      Filter::High => task.priority() == Priority::High,
    }
  }
}

impl std::fmt::Display for Filter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for Filter {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "all" => Ok(Filter::All),
      "pending" => Ok(Filter::Pending),
      "completed" => Ok(Filter::Completed),
      "high" => Ok(Filter::High),
      other => Err(format!(
        "unknown filter: {}, expected one of: {}",
        other,
        Filter::ALL_NAMES.join(", ")
      )),
    }
  }
}

/// A task as handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskView {
  pub id: TaskId,
  pub text: String,
  pub priority: Priority,
  pub priority_label: String,
  pub completed: bool,
  pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Task> for TaskView {
  fn from(task: &Task) -> Self {
    Self {
      id: task.id(),
      text: task.text().to_owned(),
      priority: task.priority(),
      priority_label: task.priority().label(),
      completed: task.is_completed(),
      created_at: task.created_at(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
  Tasks(Vec<TaskView>),
  /// Nothing to show; `search_active` picks the hint shown to the user.
  Empty { search_active: bool },
}

impl View {
  pub fn tasks(&self) -> &[TaskView] {
    match self {
      View::Tasks(tasks) => tasks.as_slice(),
      View::Empty { .. } => &[],
    }
  }

  pub fn is_empty(&self) -> bool {
    matches!(self, View::Empty { .. })
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
  pub total: usize,
  pub completed: usize,
  pub pending: usize,
}

pub fn matches_search(task: &Task, search: &str) -> bool {
  if search.is_empty() {
    return true;
  }
  return task.text().to_lowercase().contains(&search.to_lowercase());
}

/// Visible tasks in store order: search first, then the category filter.
pub fn project(tasks: &[Task], filter: Filter, search: &str) -> View {
  let visible: Vec<TaskView> = tasks
    .iter()
    .filter(|t| matches_search(t, search))
    .filter(|t| filter.matches(t))
    .map(TaskView::from)
    .collect();

  if visible.is_empty() {
    return View::Empty {
      search_active: !search.is_empty(),
    };
  }
  return View::Tasks(visible);
}

/// Counts over the whole list, whatever the filter or search is.
pub fn stats(tasks: &[Task]) -> Stats {
  let total = tasks.len();
  let completed = tasks.iter().filter(|t| t.is_completed()).count();
  Stats {
    total,
    completed,
    pending: total - completed,
  }
}
