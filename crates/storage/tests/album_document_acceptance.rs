use serde_json::json;
use shared::{
    domain::{Image, ImageId, ALBUMS_COLLECTION, ALBUM_IMAGES_FIELD, ALBUM_NAME_FIELD},
    record::{decode_album, images_value, new_album_body},
};
use storage::{RecordStore, Storage};

#[tokio::test]
async fn album_document_survives_read_modify_write_cycle() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let store: &dyn RecordStore = &storage;

    let album_id = store
        .insert(ALBUMS_COLLECTION, new_album_body("Trip"))
        .await
        .expect("insert album");

    let matches = store
        .query_where(ALBUMS_COLLECTION, ALBUM_NAME_FIELD, &json!("Trip"))
        .await
        .expect("lookup by name");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, album_id);

    let images = vec![
        Image {
            id: ImageId(1),
            title: "Hike".to_string(),
            url: "https://example.com/hike.jpg".to_string(),
        },
        Image {
            id: ImageId(0),
            title: "Beach".to_string(),
            url: "https://example.com/beach.jpg".to_string(),
        },
    ];
    store
        .replace_field(
            ALBUMS_COLLECTION,
            &album_id,
            ALBUM_IMAGES_FIELD,
            images_value(&images),
        )
        .await
        .expect("write images");

    let listed = store
        .query_all(ALBUMS_COLLECTION, ALBUM_NAME_FIELD)
        .await
        .expect("list albums");
    assert_eq!(listed.len(), 1);
    let album = decode_album(&listed[0]).expect("decode");
    assert_eq!(album.name, "Trip");
    assert_eq!(album.images, images);
}
