//! Wire format of the record server's HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub body: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRecordRequest {
    pub body: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRecordResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecordsQuery {
    pub order_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryWhereRequest {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceFieldRequest {
    pub value: Value,
}

// Route builders yield path segments; clients join and percent-encode them.

pub const HEALTH_ROUTE: [&str; 1] = ["healthz"];

pub fn records_route(collection: &str) -> [&str; 3] {
    ["collections", collection, "records"]
}

pub fn record_route<'a>(collection: &'a str, id: &'a str) -> [&'a str; 4] {
    ["collections", collection, "records", id]
}

pub fn record_field_route<'a>(collection: &'a str, id: &'a str, field: &'a str) -> [&'a str; 6] {
    ["collections", collection, "records", id, "fields", field]
}

pub fn query_route(collection: &str) -> [&str; 3] {
    ["collections", collection, "query"]
}

/// Collection and top-level field names: ASCII letters, digits and `_`, not
/// starting with a digit.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
