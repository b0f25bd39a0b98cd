//! Some utility functions

use std::io::{self, BufRead, Write};

use crate::Task;
use crate::TaskList;

const ANSI_RESET: &str = "\u{1b}[0m";

/// A debug utility that pretty-prints a task list, urgent tasks first, each with the index that addresses it
pub fn print_task_list(tasks: &TaskList) {
    for (index, task) in tasks.indexed_list() {
        print_task(index, task);
    }
}

pub fn print_task(index: usize, task: &Task) {
    let completion = if task.done() { "✓" } else { " " };
    println!("  {:>3} {} {}{}{}", index, completion, task.category().ansi_escape(), task, ANSI_RESET);
}

/// Print a prompt, and read a line from the user (without its line terminator).
///
/// Returns `None` at the end of the input.
pub fn prompt(message: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    stdout.write_all(message.as_bytes())?;
    stdout.write_all(b" ")?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
