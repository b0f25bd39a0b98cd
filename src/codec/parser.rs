//! A module to parse task records

use chrono::NaiveDate;

use crate::category::Category;
use crate::error::DecodeError;
use crate::task::Task;
use super::DATE_FORMAT;


/// Parse a whole document into tasks, in the order they appear.
///
/// A blank document is an empty list.
pub fn decode_list(document: &str) -> Result<Vec<Task>, DecodeError> {
    split_records(document)?
        .into_iter()
        .map(|(offset, record)| decode(record).map_err(|err| shift_position(err, offset)))
        .collect()
}

/// Parse a single record into a [`Task`]
///
/// Fields are looked up by key, in any order. Unknown keys are ignored, and when a key is repeated, its first value is used.
pub fn decode(record: &str) -> Result<Task, DecodeError> {
    let fields = parse_fields(record)?;

    let name = text_field(&fields, "name")?;

    let due_date = text_field(&fields, "dueDate")?;
    let due_date = parse_date(&due_date)?;

    let category: Category = text_field(&fields, "category")?.parse()?;

    let done = bool_field(&fields, "done")?;
    let urgent = bool_field(&fields, "urgent")?;

    Ok(Task::new_with_parameters(name, due_date, category, done, urgent))
}

/// Locate every record of a document, with its byte offset.
///
/// This tracks the brace depth and whether we are inside a string literal (and after an escape), so that a name such
/// as `}, {` never ends a record.
fn split_records(document: &str) -> Result<Vec<(usize, &str)>, DecodeError> {
    if document.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut record_start = 0;
    let mut opened = false;
    let mut closed = false;
    let mut expecting_record = true;

    for (pos, c) in document.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if depth > 0 {
            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        records.push((record_start, &document[record_start..=pos]));
                    }
                },
                _ => {},
            }
            continue;
        }

        match c {
            c if c.is_whitespace() => {},
            '[' if opened == false => opened = true,
            '{' if opened && !closed && expecting_record => {
                depth = 1;
                record_start = pos;
                expecting_record = false;
            },
            ',' if opened && !closed && !expecting_record => expecting_record = true,
            ']' if opened && !closed && (!expecting_record || records.is_empty()) => closed = true,
            other => return Err(syntax(pos, format!("unexpected character {:?}", other))),
        }
    }

    if depth > 0 || in_string {
        return Err(syntax(record_start, "unterminated record"));
    }
    if opened == false || closed == false {
        return Err(syntax(document.len(), "unterminated list"));
    }
    Ok(records)
}


enum Value {
    Text(String),
    /// A bare token, such as `true`, `false` or `null`
    Literal(String),
}

struct Field {
    key: String,
    value: Value,
    position: usize,
}

fn parse_fields(record: &str) -> Result<Vec<Field>, DecodeError> {
    let mut scanner = Scanner::new(record);
    let mut fields = Vec::new();

    scanner.skip_whitespace();
    scanner.expect('{')?;
    scanner.skip_whitespace();
    if scanner.peek() == Some('}') {
        scanner.bump();
    } else {
        loop {
            scanner.skip_whitespace();
            let key = scanner.string()?;
            scanner.skip_whitespace();
            scanner.expect(':')?;
            scanner.skip_whitespace();

            let position = scanner.pos;
            let value = match scanner.peek() {
                Some('"') => Value::Text(scanner.string()?),
                Some('{') | Some('[') => return Err(scanner.error("nested values are not supported")),
                _ => Value::Literal(scanner.literal()?.to_string()),
            };
            fields.push(Field { key, value, position });

            scanner.skip_whitespace();
            match scanner.bump() {
                Some(',') => continue,
                Some('}') => break,
                _ => return Err(syntax(scanner.pos, "expected `,` or `}`")),
            }
        }
    }

    scanner.skip_whitespace();
    if scanner.peek().is_some() {
        return Err(scanner.error("trailing characters after the record"));
    }
    Ok(fields)
}

fn find_field<'f>(fields: &'f [Field], key: &'static str) -> Result<&'f Field, DecodeError> {
    fields.iter()
        .find(|field| field.key == key)
        .ok_or(DecodeError::MissingField(key))
}

fn text_field(fields: &[Field], key: &'static str) -> Result<String, DecodeError> {
    let field = find_field(fields, key)?;
    match &field.value {
        Value::Text(text) => Ok(text.clone()),
        Value::Literal(lit) if lit == "null" => Err(DecodeError::MissingField(key)),
        Value::Literal(lit) => Err(syntax(field.position, format!("expected a string for `{}`, got {}", key, lit))),
    }
}

fn bool_field(fields: &[Field], key: &'static str) -> Result<bool, DecodeError> {
    let field = find_field(fields, key)?;
    match &field.value {
        Value::Literal(lit) if lit == "true" => Ok(true),
        Value::Literal(lit) if lit == "false" => Ok(false),
        Value::Literal(lit) if lit == "null" => Err(DecodeError::MissingField(key)),
        Value::Literal(other) | Value::Text(other) => Err(DecodeError::InvalidBool { field: key, value: other.clone() }),
    }
}

/// Parses `yyyy-MM-dd` and nothing else (e.g. `2025-3-1` is rejected)
fn parse_date(text: &str) -> Result<NaiveDate, DecodeError> {
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) if date.format(DATE_FORMAT).to_string() == text => Ok(date),
        _ => Err(DecodeError::InvalidDate(text.to_string())),
    }
}

fn syntax<S: Into<String>>(position: usize, message: S) -> DecodeError {
    DecodeError::Syntax { position, message: message.into() }
}

fn shift_position(err: DecodeError, offset: usize) -> DecodeError {
    match err {
        DecodeError::Syntax { position, message } => DecodeError::Syntax { position: position + offset, message },
        other => other,
    }
}


/// A cursor over a record. `pos` is a byte offset
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error<S: Into<String>>(&self, message: S) -> DecodeError {
        syntax(self.pos, message)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() == false {
                break;
            }
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), DecodeError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            },
            Some(c) => Err(self.error(format!("expected {:?}, found {:?}", expected, c))),
            None => Err(self.error(format!("expected {:?}, found the end of the record", expected))),
        }
    }

    fn literal(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '+' || c == '.' {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected a value"));
        }
        Ok(&self.text[start..self.pos])
    }

    /// Reads a quoted string, and unescapes it
    fn string(&mut self) -> Result<String, DecodeError> {
        let start = self.pos;
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(syntax(start, "unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') => {
                    let escape_pos = self.pos - 1;
                    let unescaped = match self.bump() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('u') => self.unicode_escape(escape_pos)?,
                        _ => return Err(syntax(escape_pos, "invalid escape sequence")),
                    };
                    out.push(unescaped);
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// The part of a `\uXXXX` escape after the `\u`, possibly followed by a low surrogate escape
    fn unicode_escape(&mut self, escape_pos: usize) -> Result<char, DecodeError> {
        let high = self.hex4(escape_pos)?;
        let code = if (0xD800..=0xDBFF).contains(&high) {
            if self.bump() != Some('\\') || self.bump() != Some('u') {
                return Err(syntax(escape_pos, "unpaired surrogate in escape sequence"));
            }
            let low = self.hex4(escape_pos)?;
            if (0xDC00..=0xDFFF).contains(&low) == false {
                return Err(syntax(escape_pos, "unpaired surrogate in escape sequence"));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };
        std::char::from_u32(code).ok_or_else(|| syntax(escape_pos, "invalid unicode escape"))
    }

    fn hex4(&mut self, escape_pos: usize) -> Result<u32, DecodeError> {
        let mut value = 0;
        for _ in 0..4 {
            let digit = self.bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| syntax(escape_pos, "invalid unicode escape"))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }
}


#[cfg(test)]
mod test {
    const EXAMPLE_DOCUMENT: &str = r#"[
  {
    "name": "Pay rent",
    "dueDate": "2025-03-01",
    "category": "BOULOT",
    "done": false,
    "urgent": false
  },
  {
    "name": "Call mom",
    "dueDate": "2025-02-20",
    "category": "FAMILLE",
    "done": false,
    "urgent": true
  }
]"#;

    // As written by earlier versions, that escaped more characters
    const EXAMPLE_LEGACY_RECORD: &str = r#"{
    "urgent": true,
    "name": "1 \u003d 1 \u0026 l\u0027été\nnext line \ud83d\ude00",
    "done": true,
    "category": "PERSO",
    "dueDate": "2024-07-14",
    "priority": 3
  }"#;

    use super::*;

    #[test]
    fn test_document_parsing() {
        let tasks = decode_list(EXAMPLE_DOCUMENT).unwrap();
        assert_eq!(tasks.len(), 2);

        assert_eq!(tasks[0].name(), "Pay rent");
        assert_eq!(tasks[0].due_date(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(tasks[0].category(), Category::Boulot);
        assert_eq!(tasks[0].urgent(), false);

        assert_eq!(tasks[1].name(), "Call mom");
        assert_eq!(tasks[1].category(), Category::Famille);
        assert_eq!(tasks[1].urgent(), true);
    }

    #[test]
    fn test_legacy_escapes_and_field_order() {
        let task = decode(EXAMPLE_LEGACY_RECORD).unwrap();
        assert_eq!(task.name(), "1 = 1 & l'été\nnext line 😀");
        assert_eq!(task.due_date(), NaiveDate::from_ymd_opt(2024, 7, 14).unwrap());
        assert_eq!(task.category(), Category::Perso);
        assert_eq!(task.done(), true);
        assert_eq!(task.urgent(), true);
    }

    #[test]
    fn test_empty_documents() {
        assert!(decode_list("[]").unwrap().is_empty());
        assert!(decode_list(" [ \n ] \n").unwrap().is_empty());
        assert!(decode_list("").unwrap().is_empty());
        assert!(decode_list("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_delimiters_inside_names() {
        let doc = r#"[{"name": "a}, {\"b\\", "dueDate": "2025-01-01", "category": "PERSO", "done": false, "urgent": false},{"name": "}]", "dueDate": "2025-01-02", "category": "PERSO", "done": true, "urgent": false}]"#;
        let tasks = decode_list(doc).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name(), "a}, {\"b\\");
        assert_eq!(tasks[1].name(), "}]");
        assert_eq!(tasks[1].done(), true);
    }

    #[test]
    fn test_missing_fields() {
        let record = r#"{"name": "x", "dueDate": "2025-01-01", "category": "PERSO", "done": false}"#;
        assert_eq!(decode(record), Err(DecodeError::MissingField("urgent")));

        let record = r#"{"name": null, "dueDate": "2025-01-01", "category": "PERSO", "done": false, "urgent": false}"#;
        assert_eq!(decode(record), Err(DecodeError::MissingField("name")));

        assert_eq!(decode("{}"), Err(DecodeError::MissingField("name")));
    }

    #[test]
    fn test_invalid_dates() {
        for date in &["2025-3-1", "01/03/2025", "2025-02-30", "2025-03-01 10:00", ""] {
            let record = format!(r#"{{"name": "x", "dueDate": "{}", "category": "PERSO", "done": false, "urgent": false}}"#, date);
            assert_eq!(decode(&record), Err(DecodeError::InvalidDate(date.to_string())));
        }
    }

    #[test]
    fn test_unknown_category() {
        let record = r#"{"name": "x", "dueDate": "2025-01-01", "category": "LOISIRS", "done": false, "urgent": false}"#;
        assert_eq!(decode(record), Err(DecodeError::UnknownCategory("LOISIRS".to_string())));
    }

    #[test]
    fn test_invalid_booleans() {
        let record = r#"{"name": "x", "dueDate": "2025-01-01", "category": "PERSO", "done": "yes", "urgent": false}"#;
        assert_eq!(decode(record), Err(DecodeError::InvalidBool { field: "done", value: "yes".to_string() }));
    }

    #[test]
    fn test_malformed_documents() {
        let record = r#"{"name": "x", "dueDate": "2025-01-01", "category": "PERSO", "done": false, "urgent": false}"#;

        let unterminated_list = format!("[{}", record);
        assert!(matches!(decode_list(&unterminated_list), Err(DecodeError::Syntax { .. })));

        let trailing_comma = format!("[{},]", record);
        assert!(matches!(decode_list(&trailing_comma), Err(DecodeError::Syntax { .. })));

        let missing_comma = format!("[{} {}]", record, record);
        assert!(matches!(decode_list(&missing_comma), Err(DecodeError::Syntax { .. })));

        assert!(matches!(decode_list(r#"[{"name": "never closed}]"#), Err(DecodeError::Syntax { position: 1, .. })));
        assert!(matches!(decode_list("not a list"), Err(DecodeError::Syntax { position: 0, .. })));
        assert!(matches!(decode_list(r#"[{"name": {"nested": 1}}]"#), Err(DecodeError::Syntax { position: 10, .. })));
        assert!(matches!(decode(r#"{"name": "bad \q escape"}"#), Err(DecodeError::Syntax { .. })));
    }
}
