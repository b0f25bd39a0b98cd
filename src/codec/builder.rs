//! A module to build task records

use crate::task::Task;
use super::DATE_FORMAT;

/// Encode a single task into a record
pub fn encode(task: &Task) -> String {
    let mut out = String::new();
    write_record(&mut out, task, "");
    out
}

/// Encode several tasks into a document, keeping their order
pub fn encode_list<'a, I>(tasks: I) -> String
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut out = String::from("[");
    let mut first = true;
    for task in tasks {
        out.push_str(if first { "\n" } else { ",\n" });
        write_record(&mut out, task, "  ");
        first = false;
    }
    if first == false {
        out.push('\n');
    }
    out.push(']');
    out
}

fn write_record(out: &mut String, task: &Task, indent: &str) {
    let fields = [
        ("name",     quoted(task.name())),
        ("dueDate",  quoted(&task.due_date().format(DATE_FORMAT).to_string())),
        ("category", quoted(task.category().identifier())),
        ("done",     task.done().to_string()),
        ("urgent",   task.urgent().to_string()),
    ];

    out.push_str(indent);
    out.push_str("{\n");
    for (i, (key, value)) in fields.iter().enumerate() {
        out.push_str(indent);
        out.push_str("  \"");
        out.push_str(key);
        out.push_str("\": ");
        out.push_str(value);
        if i + 1 < fields.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(indent);
    out.push('}');
}

fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    out.push_str(&escape(value));
    out.push('"');
    out
}

/// Only backslashes and double quotes are escaped
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
