use colored::{ColoredString, Colorize};

use crate::{
  projector::{Stats, TaskView, View},
  task::Priority,
};

pub const EMPTY_TITLE: &str = "No tasks found!";
pub const EMPTY_SEARCH_HINT: &str = "Try a different search term";
pub const EMPTY_STORE_HINT: &str = "Add your first task to get started";

fn colored_priority(priority: Priority, label: &str) -> ColoredString {
  match priority {
    Priority::Low => label.green(),
    Priority::Medium => label.yellow(),
    Priority::High => label.red().bold(),
  }
}

pub fn render_task(task: &TaskView) -> String {
  let checkbox = match task.completed {
    true => "[x]".green(),
    false => "[ ]".normal(),
  };
  let text = match task.completed {
    true => task.text.dimmed().strikethrough(),
    false => task.text.normal(),
  };

  format!(
    "{padding}{checkbox} {id:>13}  {priority:6}  {text}",
    padding = " ".repeat(2),
    checkbox = checkbox,
    id = task.id.to_string().cyan(),
    priority = colored_priority(task.priority, &task.priority_label),
    text = text,
  )
}

pub fn render_stats(stats: &Stats) -> String {
  format!(
    "{} total, {} completed, {} pending",
    stats.total.to_string().bold(),
    stats.completed.to_string().green(),
    stats.pending.to_string().yellow()
  )
}

/// The whole list screen: tasks (or the empty hint) followed by the counters.
pub fn render(view: &View, stats: &Stats) -> String {
  let mut lines = Vec::new();
  match view {
    View::Tasks(tasks) => {
      for task in tasks.iter() {
        lines.push(render_task(task));
      }
    }
    View::Empty { search_active } => {
      lines.push(format!("  {}", EMPTY_TITLE.bold()));
      let hint = match *search_active {
        true => EMPTY_SEARCH_HINT,
        false => EMPTY_STORE_HINT,
      };
      lines.push(format!("  {}", hint.dimmed().italic()));
    }
  }
  lines.push(String::new());
  lines.push(render_stats(stats));
  return lines.join("\n");
}
