use super::*;

fn record(body: Value) -> StoredRecord {
    StoredRecord {
        id: "album-1".to_string(),
        body,
    }
}

#[test]
fn decodes_album_with_images_in_stored_order() {
    let album = decode_album(&record(json!({
        "name": "Trip",
        "images": [
            {"id": 1, "title": "Hike", "url": "https://example.com/hike.jpg"},
            {"id": 0, "title": "Beach", "url": "https://example.com/beach.jpg"}
        ]
    })))
    .expect("album");

    assert_eq!(album.id, AlbumId("album-1".to_string()));
    assert_eq!(album.name, "Trip");
    let ids: Vec<u64> = album.images.iter().map(|image| image.id.0).collect();
    assert_eq!(ids, vec![1, 0]);
    assert_eq!(album.images[1].title, "Beach");
}

#[test]
fn missing_images_field_decodes_as_empty() {
    let album = decode_album(&record(json!({ "name": "Empty" }))).expect("album");
    assert!(album.images.is_empty());
}

#[test]
fn integral_float_ids_are_coerced() {
    let album = decode_album(&record(json!({
        "name": "Floats",
        "images": [{"id": 2.0, "title": "t", "url": "u"}]
    })))
    .expect("album");
    assert_eq!(album.images[0].id, ImageId(2));
}

#[test]
fn float_ids_past_the_u64_range_are_rejected() {
    let err = decode_album(&record(json!({
        "name": "Huge",
        "images": [{"id": 18_446_744_073_709_551_616.0_f64, "title": "t", "url": "u"}]
    })))
    .expect_err("2^64 does not fit an image id");
    assert!(matches!(err, DecodeError::InvalidImageId { index: 0, .. }));
}

#[test]
fn rejects_missing_name() {
    let err = decode_album(&record(json!({ "images": [] }))).expect_err("missing name");
    assert_eq!(
        err,
        DecodeError::MissingField {
            record_id: "album-1".to_string(),
            field: "name".to_string(),
        }
    );
}

#[test]
fn rejects_non_object_body() {
    let err = decode_album(&record(json!(["not", "an", "album"]))).expect_err("array body");
    assert!(matches!(err, DecodeError::NotAnObject { .. }));
}

#[test]
fn rejects_images_that_are_not_an_array() {
    let err = decode_album(&record(json!({ "name": "x", "images": "oops" })))
        .expect_err("string images");
    assert!(matches!(err, DecodeError::WrongType { ref field, .. } if field == "images"));
}

#[test]
fn rejects_negative_and_fractional_image_ids() {
    for bad in [json!(-1), json!(1.5), json!("3")] {
        let err = decode_album(&record(json!({
            "name": "x",
            "images": [{"id": bad, "title": "t", "url": "u"}]
        })))
        .expect_err("bad id");
        assert!(matches!(err, DecodeError::InvalidImageId { index: 0, .. }));
    }
}

#[test]
fn reports_the_offending_image_field() {
    let err = decode_album(&record(json!({
        "name": "x",
        "images": [
            {"id": 0, "title": "ok", "url": "u"},
            {"id": 1, "title": 7, "url": "u"}
        ]
    })))
    .expect_err("numeric title");
    assert_eq!(
        err,
        DecodeError::WrongType {
            record_id: "album-1".to_string(),
            field: "images[1].title".to_string(),
            expected: "a string",
        }
    );
}

#[test]
fn new_album_body_has_name_and_no_images() {
    let album = decode_album(&record(new_album_body("Fresh"))).expect("album");
    assert_eq!(album.name, "Fresh");
    assert!(album.images.is_empty());
}
