extern crate colored;
extern crate env_logger;
extern crate log;

use std::io::Write;

use colored::Colorize;
use log::debug;

use tasklist::{
  projector::Filter,
  store::{AlwaysConfirm, Confirm},
  task::{Priority, Task, TaskId},
  traits::Indexable,
  viewer, Config, Session,
};

struct StdinConfirm;

impl Confirm for StdinConfirm {
  fn confirm(&mut self, prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if let Err(err) = std::io::stdout().flush() {
      eprintln!("stdout flush err: {}", err);
    }

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
      return false;
    }
    return matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
  }
}

fn priority_arg() -> clap::Arg<'static> {
  clap::Arg::new("priority")
    .short('p')
    .long("priority")
    .takes_value(true)
    .possible_values(["low", "medium", "high"])
}

fn id_arg() -> clap::Arg<'static> {
  clap::Arg::new("id").required(true).index(1)
}

fn build_cli() -> clap::Command<'static> {
  clap::Command::new("tasklist")
    .about("Local task list: add, edit, complete, filter and search tasks")
    .arg_required_else_help(true)
    .subcommand(
      clap::Command::new("add").about("add a new task").args(&[
        clap::Arg::new("text")
          .required(true)
          .index(1)
          .multiple_values(true),
        priority_arg(),
      ]),
    )
    .subcommand(
      clap::Command::new("edit")
        .about("change text and priority of a task")
        .args(&[
          id_arg(),
          clap::Arg::new("text")
            .required(true)
            .index(2)
            .multiple_values(true),
          priority_arg(),
        ]),
    )
    .subcommand(
      clap::Command::new("toggle")
        .about("mark a task completed or pending")
        .arg(id_arg()),
    )
    .subcommand(
      clap::Command::new("rm").about("delete a task").args(&[
        id_arg(),
        clap::Arg::new("yes")
          .short('y')
          .long("yes")
          .help("don't ask for confirmation"),
      ]),
    )
    .subcommand(clap::Command::new("list").about("show tasks").args(&[
      clap::Arg::new("filter")
        .short('f')
        .long("filter")
        .takes_value(true)
        .possible_values(Filter::ALL_NAMES),
      clap::Arg::new("search")
        .short('s')
        .long("search")
        .takes_value(true),
    ]))
    .subcommand(clap::Command::new("stats").about("show task counters"))
    .subcommand(clap::Command::new("shell").about("interactive session"))
    .subcommand(
      clap::Command::new("completions")
        .about("print shell completions")
        .arg(
          clap::Arg::new("shell")
            .required(true)
            .index(1)
            .possible_values(["bash", "elvish", "fish", "powershell", "zsh"]),
        ),
    )
}

fn main() {
  env_logger::init();

  let matches = build_cli().get_matches();

  if let Some(("completions", sub_matches)) = matches.subcommand() {
    match sub_matches.value_of_t::<clap_complete::Shell>("shell") {
      Ok(shell) => {
        clap_complete::generate(shell, &mut build_cli(), "tasklist", &mut std::io::stdout())
      }
      Err(err) => err.exit(),
    }
    return;
  }

  let mut session = match Config::new().and_then(|config| Session::new(&config)) {
    Ok(session) => session,
    Err(err) => {
      eprintln!("can't open task list: {}", err);
      std::process::exit(1);
    }
  };

  match matches.subcommand() {
    Some(("add", sub_matches)) => {
      let text = joined_values(sub_matches, "text");
      let priority = priority_value(sub_matches).unwrap_or_default();
      match session.add(&text, priority) {
        Some(task) => report("task added:", &task),
        None => println!("task text can't be empty"),
      }
    }

    Some(("edit", sub_matches)) => {
      let id = parse_id(sub_matches.value_of("id"));
      let text = joined_values(sub_matches, "text");
      match id.and_then(|id| session.edit(id, &text, priority_value(sub_matches))) {
        Some(task) => report("task updated:", &task),
        None => println!("nothing to update"),
      }
    }

    Some(("toggle", sub_matches)) => {
      match parse_id(sub_matches.value_of("id")).and_then(|id| session.toggle(id)) {
        Some(task) => report("task toggled:", &task),
        None => println!("task not found"),
      }
    }

    Some(("rm", sub_matches)) => {
      let mut confirm: Box<dyn Confirm> = match sub_matches.is_present("yes") {
        true => Box::new(AlwaysConfirm),
        false => Box::new(StdinConfirm),
      };
      match parse_id(sub_matches.value_of("id")).and_then(|id| session.delete(id, confirm.as_mut())) {
        Some(task) => report("task deleted:", &task),
        None => println!("nothing deleted"),
      }
    }

    Some(("list", sub_matches)) => {
      if let Some(filter) = sub_matches.value_of("filter") {
        match filter.parse() {
          Ok(filter) => session.set_filter(filter),
          Err(err) => println!("{}", err),
        }
      }
      session.set_search(sub_matches.value_of("search").unwrap_or_default());
      print_view(&session);
    }

    Some(("stats", _)) => println!("{}", viewer::render_stats(&session.stats())),

    Some(("shell", _)) => run_shell(&mut session),

    Some((subcmd, _)) => println!("unknown subcommand {}", subcmd),
    None => println!("subcommand not found"),
  };
}

fn joined_values(matches: &clap::ArgMatches, name: &str) -> String {
  match matches.values_of(name) {
    Some(values) => values.collect::<Vec<&str>>().join(" "),
    None => String::new(),
  }
}

fn priority_value(matches: &clap::ArgMatches) -> Option<Priority> {
  matches.value_of("priority").and_then(|p| p.parse().ok())
}

fn parse_id(raw: Option<&str>) -> Option<TaskId> {
  let raw = raw?;
  match raw.trim().parse::<TaskId>() {
    Ok(id) => Some(id),
    Err(err) => {
      println!("bad task id {}: {}", raw, err);
      None
    }
  }
}

fn report(title: &str, task: &Task) {
  println!("{}", title);
  println!("{}", viewer::render_task(&task.into()));
}

fn print_view(session: &Session) {
  println!("{}", viewer::render(&session.view(), &session.stats()));
}

const SHELL_HELP: &str = "\
commands:
  add [-p low|medium|high] <text>   add a task
  edit <id>                         load a task for editing
  save [-p low|medium|high] <text>  save the task being edited
  cancel                            stop editing
  toggle <id>                       mark completed or pending
  rm <id>                           delete a task
  filter all|pending|completed|high switch the filter
  search <text>, / <text>           search tasks, empty text clears it
  list                              show tasks
  stats                             show counters
  help                              this text
  quit                              leave";

/// Splits a leading `-p <priority>` off the rest of the line.
fn split_priority(rest: &str) -> Result<(Option<Priority>, &str), String> {
  let rest = rest.trim();
  match rest.strip_prefix("-p ") {
    Some(tail) => {
      let tail = tail.trim_start();
      let (priority, text) = tail.split_once(' ').unwrap_or((tail, ""));
      Ok((Some(priority.parse()?), text))
    }
    None => Ok((None, rest)),
  }
}

fn run_shell(session: &mut Session) {
  println!("{}", "tasklist shell, type `help` for commands".bold());
  print_view(session);

  loop {
    let prompt = match session.store().editing_id() {
      Some(id) => format!("[{} / {}] edit {}> ", session.filter(), session.search(), id),
      None => format!("[{} / {}]> ", session.filter(), session.search()),
    };
    print!("{}", prompt.cyan());
    if let Err(err) = std::io::stdout().flush() {
      eprintln!("stdout flush err: {}", err);
    }

    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
      Ok(0) => break,
      Ok(_) => {}
      Err(err) => {
        println!("read err: {}", err);
        break;
      }
    }

    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    debug!("shell command: {} args: {}", command, rest);

    match command {
      "" => continue,
      "quit" | "exit" => break,
      "help" => {
        println!("{}", SHELL_HELP);
        continue;
      }
      "add" => match split_priority(rest) {
        Ok((priority, text)) => {
          if session.add(text, priority.unwrap_or_default()).is_none() {
            println!("task text can't be empty");
          }
        }
        Err(err) => println!("{}", err),
      },
      "edit" => match parse_id(Some(rest)).and_then(|id| session.begin_edit(id)) {
        Some(task) => {
          println!("editing: {} ({})", task.text(), task.priority());
          println!("use `save [-p priority] <text>` or `cancel`");
          continue;
        }
        None => println!("task not found"),
      },
      "save" => {
        let current = session.store().editing_task().map(|t| t.priority());
        match (current, split_priority(rest)) {
          (None, _) => println!("nothing is being edited"),
          (Some(_), Err(err)) => println!("{}", err),
          (Some(current), Ok((priority, text))) => {
            if session.commit_edit(text, priority.unwrap_or(current)).is_none() {
              println!("task text can't be empty");
            }
          }
        }
      }
      "cancel" => session.cancel_edit(),
      "toggle" => {
        if parse_id(Some(rest)).and_then(|id| session.toggle(id)).is_none() {
          println!("task not found");
        }
      }
      "rm" => {
        if let Some(id) = parse_id(Some(rest)) {
          if let Some(task) = session.delete(id, &mut StdinConfirm) {
            println!("deleted {}", task.id());
          }
        }
      }
      "filter" => match rest.parse() {
        Ok(filter) => session.set_filter(filter),
        Err(err) => println!("{}", err),
      },
      "search" | "/" => session.set_search(rest),
      "list" => {}
      "stats" => {
        println!("{}", viewer::render_stats(&session.stats()));
        continue;
      }
      other => {
        println!("unknown command {}, type `help`", other);
        continue;
      }
    }

    print_view(session);
  }
}
