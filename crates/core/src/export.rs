//! Collection export envelopes.
//!
//! Exports are self-describing JSON: every store-native timestamp is
//! rewritten as an ISO-8601 string so the file can be read without the
//! store's client library.

use serde_json::{Map, Value};

use crate::collection::{Collection, EXPORT_ALL};
use crate::timestamp::{normalize_timestamps, to_iso_string};
use crate::types::{RecordId, Timestamp};

/// A raw stored document ready for export.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub id: RecordId,
    pub data: Value,
}

/// Turn a stored document into its export form: `id` first, then every
/// document field with timestamps normalized.
fn export_record(doc: ExportDocument) -> Value {
    let mut out = Map::new();
    out.insert("id".into(), Value::String(doc.id.to_string()));
    match doc.data {
        Value::Object(fields) => {
            for (key, value) in fields {
                if key != "id" {
                    out.insert(key, value);
                }
            }
        }
        other => {
            out.insert("data".into(), other);
        }
    }
    let mut value = Value::Object(out);
    normalize_timestamps(&mut value);
    value
}

/// Envelope for one collection: `{exportedAt, exportedBy, collection, data}`.
pub fn export_collection(
    collection: Collection,
    exported_by: &str,
    now: &Timestamp,
    docs: Vec<ExportDocument>,
) -> Value {
    let mut out = Map::new();
    out.insert("exportedAt".into(), Value::String(to_iso_string(now)));
    out.insert("exportedBy".into(), Value::String(exported_by.to_string()));
    out.insert(
        "collection".into(),
        Value::String(collection.as_str().to_string()),
    );
    out.insert(
        "data".into(),
        Value::Array(docs.into_iter().map(export_record).collect()),
    );
    Value::Object(out)
}

/// Envelope for every collection, each nested under its own name.
pub fn export_all(
    exported_by: &str,
    now: &Timestamp,
    sections: Vec<(Collection, Vec<ExportDocument>)>,
) -> Value {
    let mut out = Map::new();
    out.insert("exportedAt".into(), Value::String(to_iso_string(now)));
    out.insert("exportedBy".into(), Value::String(exported_by.to_string()));
    for (collection, docs) in sections {
        out.insert(
            collection.as_str().to_string(),
            Value::Array(docs.into_iter().map(export_record).collect()),
        );
    }
    Value::Object(out)
}

/// Download file name: `export-{name}-{YYYY-MM-DD}.json`.
pub fn export_filename(collection: Option<Collection>, now: &Timestamp) -> String {
    let name = collection.map_or(EXPORT_ALL, Collection::as_str);
    format!("export-{name}-{}.json", now.format("%Y-%m-%d"))
}
