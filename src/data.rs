use std::fmt;

use serde::{Serialize, Serializer, ser::Error as _};

/// A single non-null cell. Missing cells are modelled as `None` by the
/// containing column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    /// Integer literal outside the `i64` range, kept as written.
    #[serde(serialize_with = "serialize_wide_integer")]
    WideInteger(String),
}

fn serialize_wide_integer<S>(literal: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let number: serde_json::Number = literal.parse().map_err(S::Error::custom)?;
    number.serialize(serializer)
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) | Value::WideInteger(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Element type of a column, derived from the cells it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    String,
    Mixed,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "string",
            ColumnType::Mixed => "mixed",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infers the element type of a column from its non-null cells.
///
/// A column with no observed values is reported as `Float`: it is numeric,
/// there is simply nothing in it to round. Wide integers count as text since
/// they cannot be rounded without losing digits.
pub fn infer_column_type<'a, I>(cells: I) -> ColumnType
where
    I: IntoIterator<Item = &'a Option<Value>>,
{
    let mut seen_integer = false;
    let mut seen_float = false;
    let mut seen_boolean = false;
    let mut seen_string = false;
    for value in cells.into_iter().flatten() {
        match value {
            Value::Integer(_) => seen_integer = true,
            Value::Float(_) => seen_float = true,
            Value::Boolean(_) => seen_boolean = true,
            Value::String(_) | Value::WideInteger(_) => seen_string = true,
        }
    }
    match (seen_integer, seen_float, seen_boolean, seen_string) {
        (_, _, false, false) if seen_float => ColumnType::Float,
        (true, false, false, false) => ColumnType::Integer,
        (false, false, false, false) => ColumnType::Float,
        (false, false, true, false) => ColumnType::Boolean,
        (false, false, false, true) => ColumnType::String,
        _ => ColumnType::Mixed,
    }
}

/// Types a raw CSV field. Empty fields are missing values.
pub fn parse_cell(raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = raw.parse::<i64>() {
        // Leading zeros and explicit signs mark identifiers such as zip codes.
        return Some(if parsed.to_string() == raw {
            Value::Integer(parsed)
        } else {
            Value::String(raw.to_string())
        });
    }
    if is_integer_text(raw) {
        return Some(if is_integer_literal(raw) {
            Value::WideInteger(raw.to_string())
        } else {
            Value::String(raw.to_string())
        });
    }
    if raw.bytes().any(|b| b.is_ascii_digit())
        && let Ok(parsed) = raw.parse::<f64>()
    {
        return Some(Value::Float(parsed));
    }
    let parsed = match raw {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ => Value::String(raw.to_string()),
    };
    Some(parsed)
}

/// Digits with an optional sign, whatever their magnitude.
fn is_integer_text(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Canonical integer spelling: optional `-`, no leading zeros.
pub fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}

/// Renders a cell for text output; missing cells render empty.
pub fn render_cell(cell: Option<&Value>) -> String {
    cell.map(Value::as_display).unwrap_or_default()
}

/// Shortest round-trip representation that still reads back as a float.
pub fn format_float(value: f64) -> String {
    let mut rendered = value.to_string();
    if value.is_finite() && !rendered.contains(['.', 'e', 'E']) {
        rendered.push_str(".0");
    }
    rendered
}
