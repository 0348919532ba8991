//! Conversion between album documents and domain types.
//!
//! Records come back from the store as untyped JSON. Everything is checked
//! here so that a malformed document surfaces as a [`DecodeError`] instead of
//! half-populated albums.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::{
    domain::{Album, AlbumId, Image, ImageId, ALBUM_IMAGES_FIELD, ALBUM_NAME_FIELD},
    protocol::StoredRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("record {record_id} is not a JSON object")]
    NotAnObject { record_id: String },
    #[error("record {record_id} is missing field `{field}`")]
    MissingField { record_id: String, field: String },
    #[error("record {record_id} field `{field}` should be {expected}")]
    WrongType {
        record_id: String,
        field: String,
        expected: &'static str,
    },
    #[error("record {record_id} has invalid image id {value} at images[{index}]")]
    InvalidImageId {
        record_id: String,
        index: usize,
        value: String,
    },
}

/// Document inserted for a freshly created album.
pub fn new_album_body(name: &str) -> Value {
    let mut body = Map::new();
    body.insert(ALBUM_NAME_FIELD.to_string(), Value::String(name.to_string()));
    body.insert(ALBUM_IMAGES_FIELD.to_string(), Value::Array(Vec::new()));
    Value::Object(body)
}

/// JSON array written to an album's `images` field.
pub fn images_value(images: &[Image]) -> Value {
    Value::Array(
        images
            .iter()
            .map(|image| {
                json!({
                    "id": image.id.0,
                    "title": image.title,
                    "url": image.url,
                })
            })
            .collect(),
    )
}

pub fn decode_album(record: &StoredRecord) -> Result<Album, DecodeError> {
    let body = as_object(&record.id, &record.body)?;

    let name = match body.get(ALBUM_NAME_FIELD) {
        None | Some(Value::Null) => {
            return Err(DecodeError::MissingField {
                record_id: record.id.clone(),
                field: ALBUM_NAME_FIELD.to_string(),
            })
        }
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(DecodeError::WrongType {
                record_id: record.id.clone(),
                field: ALBUM_NAME_FIELD.to_string(),
                expected: "a string",
            })
        }
    };

    Ok(Album {
        id: AlbumId(record.id.clone()),
        name,
        images: decode_images(&record.id, body.get(ALBUM_IMAGES_FIELD))?,
    })
}

/// Decodes an album's `images` field. A missing or null field is an empty list.
pub fn decode_images(record_id: &str, value: Option<&Value>) -> Result<Vec<Image>, DecodeError> {
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(DecodeError::WrongType {
                record_id: record_id.to_string(),
                field: ALBUM_IMAGES_FIELD.to_string(),
                expected: "an array",
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_image(record_id, index, item))
        .collect()
}

fn decode_image(record_id: &str, index: usize, item: &Value) -> Result<Image, DecodeError> {
    let Value::Object(fields) = item else {
        return Err(DecodeError::WrongType {
            record_id: record_id.to_string(),
            field: format!("images[{index}]"),
            expected: "an object",
        });
    };

    let id = match fields.get("id") {
        Some(Value::Number(number)) => coerce_image_id(number).ok_or_else(|| {
            DecodeError::InvalidImageId {
                record_id: record_id.to_string(),
                index,
                value: number.to_string(),
            }
        })?,
        Some(other) if !other.is_null() => {
            return Err(DecodeError::InvalidImageId {
                record_id: record_id.to_string(),
                index,
                value: other.to_string(),
            })
        }
        _ => {
            return Err(DecodeError::MissingField {
                record_id: record_id.to_string(),
                field: format!("images[{index}].id"),
            })
        }
    };

    Ok(Image {
        id,
        title: string_field(record_id, index, fields, "title")?,
        url: string_field(record_id, index, fields, "url")?,
    })
}

fn string_field(
    record_id: &str,
    index: usize,
    fields: &Map<String, Value>,
    name: &str,
) -> Result<String, DecodeError> {
    match fields.get(name) {
        Some(Value::String(value)) => Ok(value.clone()),
        None | Some(Value::Null) => Err(DecodeError::MissingField {
            record_id: record_id.to_string(),
            field: format!("images[{index}].{name}"),
        }),
        Some(_) => Err(DecodeError::WrongType {
            record_id: record_id.to_string(),
            field: format!("images[{index}].{name}"),
            expected: "a string",
        }),
    }
}

// Integral floats (`2.0`) are accepted; negative or fractional ids are not.
fn coerce_image_id(number: &serde_json::Number) -> Option<ImageId> {
    if let Some(id) = number.as_u64() {
        return Some(ImageId(id));
    }
    let value = number.as_f64()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
        return Some(ImageId(value as u64));
    }
    None
}

fn as_object<'a>(record_id: &str, body: &'a Value) -> Result<&'a Map<String, Value>, DecodeError> {
    body.as_object().ok_or_else(|| DecodeError::NotAnObject {
        record_id: record_id.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
