//! Minimal VOTable (TABLEDATA serialization) reader.
//!
//! Reads the first TABLE of a TAP response into an [`ObservationTable`].
//! FIELD datatypes drive cell typing; BINARY/FITS serializations are rejected.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::table::{ObservationTable, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldKind {
    Integer,
    Float,
    Text,
}

impl FieldKind {
    fn from_datatype(datatype: &str) -> Self {
        match datatype {
            "short" | "int" | "long" | "unsignedByte" => FieldKind::Integer,
            "float" | "double" => FieldKind::Float,
            _ => FieldKind::Text,
        }
    }

    fn convert(self, raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        match self {
            FieldKind::Integer => trimmed
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(raw.to_string())),
            FieldKind::Float => trimmed
                .parse::<f64>()
                .map(Value::Float)
                .unwrap_or_else(|_| Value::Text(raw.to_string())),
            FieldKind::Text => Value::Text(raw.to_string()),
        }
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| CatalogError::Malformed(err.to_string()))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|err| CatalogError::Malformed(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parse a VOTable document.
pub fn parse_votable(xml: &str) -> Result<ObservationTable> {
    let mut reader = Reader::from_str(xml);

    let mut names: Vec<String> = Vec::new();
    let mut kinds: Vec<FieldKind> = Vec::new();
    let mut rows: Vec<Vec<Value>> = Vec::new();

    let mut current_row: Option<Vec<Value>> = None;
    let mut cell: Option<String> = None;
    let mut status_error: Option<String> = None;
    let mut in_error_info = false;
    let mut saw_table = false;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| CatalogError::Malformed(format!("VOTable XML error: {}", e)))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"TABLE" => saw_table = true,
                    b"FIELD" => {
                        let name = attribute(e, b"name")?
                            .or(attribute(e, b"ID")?)
                            .unwrap_or_else(|| format!("col{}", names.len()));
                        let datatype = attribute(e, b"datatype")?.unwrap_or_default();
                        names.push(name);
                        kinds.push(FieldKind::from_datatype(&datatype));
                    }
                    b"TR" => {
                        current_row = Some(Vec::with_capacity(names.len()));
                        if is_empty {
                            rows.push(current_row.take().unwrap_or_default());
                        }
                    }
                    b"TD" => {
                        if is_empty {
                            if let Some(row) = current_row.as_mut() {
                                row.push(Value::Null);
                            }
                        } else {
                            cell = Some(String::new());
                        }
                    }
                    b"INFO" => {
                        let is_status = attribute(e, b"name")?.as_deref() == Some("QUERY_STATUS");
                        let value = attribute(e, b"value")?;
                        if is_status && value.as_deref() == Some("ERROR") {
                            status_error = Some(String::new());
                            in_error_info = !is_empty;
                        }
                    }
                    b"BINARY" | b"BINARY2" | b"FITS" => {
                        return Err(CatalogError::Malformed(
                            "only TABLEDATA serialization is supported".to_string(),
                        ));
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| CatalogError::Malformed(err.to_string()))?;
                if let Some(c) = cell.as_mut() {
                    c.push_str(&text);
                } else if in_error_info {
                    if let Some(msg) = status_error.as_mut() {
                        msg.push_str(text.trim());
                    }
                }
            }
            Event::CData(ref e) => {
                if let Some(c) = cell.as_mut() {
                    c.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"TD" => {
                    if let (Some(raw), Some(row)) = (cell.take(), current_row.as_mut()) {
                        let kind = kinds.get(row.len()).copied().unwrap_or(FieldKind::Text);
                        row.push(kind.convert(&raw));
                    }
                }
                b"TR" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                b"INFO" => in_error_info = false,
                b"TABLE" => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(msg) = status_error {
        let msg = if msg.is_empty() { "query failed".to_string() } else { msg };
        return Err(CatalogError::Malformed(format!("TAP QUERY_STATUS=ERROR: {}", msg)));
    }
    if !saw_table {
        return Err(CatalogError::Malformed("no TABLE element in VOTable".to_string()));
    }

    debug!(columns = names.len(), rows = rows.len(), "Parsed VOTable");
    Ok(ObservationTable::new(names, rows))
}
