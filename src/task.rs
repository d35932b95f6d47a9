use crate::traits::Indexable;

pub type TaskId = u64;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
}

impl Priority {
  pub fn as_str(&self) -> &'static str {
    match self {
      Priority::Low => "low",
      Priority::Medium => "medium",
      Priority::High => "high",
    }
  }

  /// Display-only label, e.g. `HIGH`.
  pub fn label(&self) -> String {
    self.as_str().to_uppercase()
  }
}

impl std::fmt::Display for Priority {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for Priority {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "low" => Ok(Priority::Low),
      "medium" => Ok(Priority::Medium),
      "high" => Ok(Priority::High),
      other => Err(format!("unknown priority: {}", other)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  id: TaskId,
  text: String,
  priority: Priority,
  completed: bool,
  created_at: chrono::DateTime<chrono::Utc>,
}

impl Indexable for Task {
  fn id(&self) -> TaskId {
    self.id
  }
}

impl Task {
  /// Builds a task from already trimmed, non-empty text.
  pub fn new(id: TaskId, text: &str, priority: Priority) -> Self {
    Self {
      id,
      text: text.to_owned(),
      priority,
      completed: false,
      created_at: chrono::Utc::now(),
    }
  }

  pub fn text(&self) -> &str {
    self.text.as_str()
  }

  pub fn priority(&self) -> Priority {
    self.priority
  }

  pub fn is_completed(&self) -> bool {
    self.completed
  }

  pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
    self.created_at
  }

  pub fn toggle(&mut self) {
    self.completed = !self.completed;
  }

  pub(crate) fn update(&mut self, text: &str, priority: Priority) {
    self.text = text.to_owned();
    self.priority = priority;
  }
}

/// Trims user input, `None` when nothing is left.
pub fn normalize_text(text: &str) -> Option<&str> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return None;
  }
  return Some(trimmed);
}

#[cfg(test)]
mod tests {
  use super::{normalize_text, Priority, Task};
  use crate::traits::Indexable;

  #[test]
  fn new_task_defaults() {
    let task = Task::new(7, "Buy milk", Priority::default());
    assert_eq!(task.id(), 7);
    assert_eq!(task.priority(), Priority::Medium);
    assert!(!task.is_completed());
  }

  #[test]
  fn serialized_field_names() {
    let task = Task::new(1, "Write report", Priority::High);
    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["text"], "Write report");
    assert_eq!(value["priority"], "high");
    assert_eq!(value["completed"], false);
    assert!(value["createdAt"].is_string());
  }

  #[test]
  fn reads_browser_shaped_record() {
    let raw = r#"{"id":1700000000000,"text":"Call mom","priority":"low","completed":true,"createdAt":"2023-11-14T22:13:20.000Z"}"#;
    let task: Task = serde_json::from_str(raw).unwrap();
    assert_eq!(task.id(), 1700000000000);
    assert_eq!(task.priority(), Priority::Low);
    assert!(task.is_completed());
    assert_eq!(
      task.created_at().format("%Y-%m-%d").to_string(),
      "2023-11-14"
    );
  }

  #[test]
  fn priority_parse_and_label() {
    assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
    assert!("urgent".parse::<Priority>().is_err());
    assert_eq!(Priority::Low.label(), "LOW");
  }

  #[test]
  fn normalize_rejects_blank() {
    assert_eq!(normalize_text("   "), None);
    assert_eq!(normalize_text(""), None);
    assert_eq!(normalize_text("  hi "), Some("hi"));
  }
}
