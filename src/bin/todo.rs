//! A console front end for a task list
//!
//! Usage: `todo [settings.json]`. Set `RUST_LOG` for more or less details.

use std::path::Path;

use chrono::NaiveDate;

use todo_vault::codec::DATE_FORMAT;
use todo_vault::utils::{print_task_list, prompt};
use todo_vault::{Category, Settings, Task, TaskList};

const DEFAULT_SETTINGS_FILE: &str = "todo-settings.json";

fn main() {
    env_logger::init();

    let settings_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());
    let settings = match Settings::from_file(Path::new(&settings_path)) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("Unable to read settings from {}: {}. Using the default settings", settings_path, err);
            Settings::default()
        }
    };
    log::debug!("Using {:?}", settings);

    let service = settings.persistence();
    let mut tasks = service.load(settings.encryption_enabled, &settings.password);

    loop {
        println!("\n=== To-do list ===");
        print_task_list(&tasks);
        println!("\n1. Add a task");
        println!("2. Select a task");
        println!("3. Remove completed tasks");
        println!("0. Quit");

        let changed = match read_line("Choice:").as_deref() {
            None | Some("0") => break,
            Some("1") => add_task(&mut tasks),
            Some("2") => {
                act_on_task(&mut tasks, |tasks| service.save(tasks, settings.encryption_enabled, &settings.password));
                false
            },
            Some("3") => {
                tasks.remove_completed();
                true
            },
            Some(_) => {
                println!("Invalid option");
                false
            },
        };

        if changed {
            service.save(&tasks, settings.encryption_enabled, &settings.password);
        }
    }
}

fn read_line(message: &str) -> Option<String> {
    match prompt(message) {
        Ok(line) => line,
        Err(err) => {
            log::error!("Unable to read from stdin: {}", err);
            None
        }
    }
}

/// Returns whether a task has been added
fn add_task(tasks: &mut TaskList) -> bool {
    let name = match read_line("Name:") {
        Some(name) if name.trim().is_empty() == false => name,
        _ => {
            println!("A task needs a name");
            return false;
        }
    };

    let due_date = match read_line("Due date (YYYY-MM-DD):").map(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)) {
        Some(Ok(date)) => date,
        _ => {
            println!("Invalid date");
            return false;
        }
    };

    let identifiers: Vec<&str> = Category::ALL.iter().map(|c| c.identifier()).collect();
    let category = match read_line(&format!("Category ({}):", identifiers.join(", "))).map(|s| s.trim().to_uppercase().parse::<Category>()) {
        Some(Ok(category)) => category,
        _ => {
            println!("Invalid category");
            return false;
        }
    };

    tasks.add(Task::new(name, due_date, category));
    true
}

/// Apply actions to a task, until the user goes back to the main menu.
///
/// `save` is called after each change. Indices are stable, so `index` keeps designating the selected task even when
/// an action reorders the list.
fn act_on_task<F: Fn(&TaskList)>(tasks: &mut TaskList, save: F) {
    let index = match read_line("Task index:").and_then(|s| s.trim().parse::<usize>().ok()) {
        Some(index) => index,
        None => {
            println!("Invalid selection");
            return;
        }
    };

    loop {
        match tasks.get(index) {
            Ok(task) => println!("\nSelected: {}", task),
            Err(err) => {
                println!("Invalid selection: {}", err);
                return;
            }
        }

        println!("1. Mark as done");
        println!("2. Postpone");
        println!("3. Mark as urgent");
        println!("4. Remove");
        println!("0. Back to the main menu");
        let result = match read_line("Action:").as_deref() {
            None | Some("0") => return,
            Some("1") => tasks.mark_done(index),
            Some("2") => {
                match read_line("Days to postpone by:").and_then(|s| s.trim().parse::<i64>().ok()) {
                    Some(days) => tasks.postpone(index, days),
                    None => {
                        println!("Invalid number of days");
                        continue;
                    }
                }
            },
            Some("3") => tasks.mark_urgent(index),
            Some("4") => {
                let result = tasks.remove(index).map(|_| ());
                if result.is_ok() {
                    save(tasks);
                    println!("Task removed");
                    return;
                }
                result
            },
            Some(_) => {
                println!("Invalid action");
                continue;
            },
        };

        match result {
            Ok(()) => save(tasks),
            Err(err) => println!("Unable to update the task: {}", err),
        }
    }
}
