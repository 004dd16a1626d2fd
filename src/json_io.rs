//! JSON codec: an array of row objects, one key per column.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Value as JsonValue, ser::PrettyFormatter};

use crate::{
    data::{Value, is_integer_literal},
    frame::Table,
};

const INDENT: &[u8] = b"    ";

/// Parses a JSON array of objects into a table. Keys become columns in the
/// order they are first seen; a key absent from a row reads as null.
pub fn parse_table(text: &str) -> Result<Table> {
    let document: JsonValue = serde_json::from_str(text).context("Parsing JSON document")?;
    let JsonValue::Array(records) = document else {
        bail!("Expected a JSON array of row objects");
    };

    let mut headers: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Vec<Option<Value>>> = Vec::with_capacity(records.len());

    for (idx, record) in records.into_iter().enumerate() {
        let JsonValue::Object(fields) = record else {
            bail!("Row {} is not a JSON object", idx + 1);
        };
        let mut row = vec![None; headers.len()];
        for (key, raw) in fields {
            let cell = json_to_cell(raw)
                .with_context(|| format!("Reading '{key}' in row {}", idx + 1))?;
            let position = match positions.get(&key) {
                Some(position) => *position,
                None => {
                    let position = headers.len();
                    positions.insert(key.clone(), position);
                    headers.push(key);
                    row.push(None);
                    position
                }
            };
            row[position] = cell;
        }
        rows.push(row);
    }

    for row in &mut rows {
        row.resize(headers.len(), None);
    }
    Table::from_rows(headers, rows).context("Assembling JSON table")
}

fn json_to_cell(raw: JsonValue) -> Result<Option<Value>> {
    let cell = match raw {
        JsonValue::Null => None,
        JsonValue::Bool(b) => Some(Value::Boolean(b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Integer(i)),
            None => {
                let literal = n.to_string();
                if is_integer_literal(&literal) {
                    Some(Value::WideInteger(literal))
                } else {
                    match n.as_f64() {
                        Some(f) => Some(Value::Float(f)),
                        None => bail!("Number {n} cannot be represented"),
                    }
                }
            }
        },
        JsonValue::String(s) => Some(Value::String(s)),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            bail!("Nested arrays and objects are not supported")
        }
    };
    Ok(cell)
}

struct JsonRow<'a> {
    headers: &'a [String],
    cells: Vec<Option<&'a Value>>,
}

impl Serialize for JsonRow<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (name, cell) in self.headers.iter().zip(&self.cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// Renders a table as a pretty-printed array of row objects.
pub fn render_table(table: &Table) -> Result<String> {
    let headers = table.headers();
    let rows = table
        .rows()
        .map(|cells| JsonRow {
            headers: &headers,
            cells,
        })
        .collect::<Vec<_>>();

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    rows.serialize(&mut serializer)
        .context("Serializing JSON records")?;
    buffer.push(b'\n');
    String::from_utf8(buffer).context("JSON output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnType;

    #[test]
    fn parse_table_unions_keys_in_first_seen_order() {
        let table = parse_table(
            r#"[{"id": 1, "latitude": 12.34567}, {"id": 2, "city": "Oslo", "latitude": -8.1}]"#,
        )
        .unwrap();
        assert_eq!(table.headers(), vec!["id", "latitude", "city"]);
        assert_eq!(
            table.column("city").unwrap().values,
            vec![None, Some(Value::String("Oslo".into()))]
        );
        assert_eq!(table.column("latitude").unwrap().dtype(), ColumnType::Float);
        assert_eq!(table.column("id").unwrap().dtype(), ColumnType::Integer);
    }

    #[test]
    fn parse_table_rejects_non_record_documents() {
        assert!(parse_table(r#"{"a": [1, 2]}"#).is_err());
        assert!(parse_table("[1, 2]").is_err());
        let err = parse_table(r#"[{"a": {"b": 1}}]"#).unwrap_err();
        assert!(format!("{err:#}").contains("Reading 'a' in row 1"));
    }

    #[test]
    fn render_table_uses_four_space_indent() {
        let table = parse_table(r#"[{"name": "a", "v": 2.0, "n": null, "ok": true}]"#).unwrap();
        let rendered = render_table(&table).unwrap();
        let expected = "[\n    {\n        \"name\": \"a\",\n        \"v\": 2.0,\n        \"n\": null,\n        \"ok\": true\n    }\n]\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn wide_integers_round_trip_exactly() {
        let text = "[\n    {\n        \"id\": 12345678901234567890123,\n        \"price\": 1.26\n    }\n]\n";
        let table = parse_table(text).unwrap();
        assert_eq!(
            table.column("id").unwrap().values,
            vec![Some(Value::WideInteger("12345678901234567890123".into()))]
        );
        assert_eq!(render_table(&table).unwrap(), text);
    }

    #[test]
    fn render_table_writes_empty_array() {
        let table = parse_table("[]").unwrap();
        assert_eq!(table.column_count(), 0);
        assert_eq!(render_table(&table).unwrap(), "[]\n");
    }
}
