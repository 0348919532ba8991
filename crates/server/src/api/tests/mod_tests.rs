use super::*;
use serde_json::json;
use storage::Storage;

async fn setup() -> ApiContext {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    ApiContext::new(Arc::new(storage))
}

#[tokio::test]
async fn inserted_record_can_be_fetched_back() {
    let ctx = setup().await;
    let inserted = insert_record(&ctx, "albums", json!({ "name": "Trip", "images": [] }))
        .await
        .expect("insert");

    let record = get_record(&ctx, "albums", &inserted.id).await.expect("get");
    assert_eq!(record.body["name"], json!("Trip"));
}

#[tokio::test]
async fn missing_record_maps_to_not_found() {
    let ctx = setup().await;
    let err = get_record(&ctx, "albums", "nope").await.expect_err("missing");
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = replace_record_field(&ctx, "albums", "nope", "images", json!([]))
        .await
        .expect_err("missing");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn invalid_requests_map_to_validation_errors() {
    let ctx = setup().await;

    let err = insert_record(&ctx, "albums", json!(42))
        .await
        .expect_err("non-object body");
    assert_eq!(err.code, ErrorCode::Validation);

    let err = list_records(&ctx, "albums", "images[0]")
        .await
        .expect_err("bad field");
    assert_eq!(err.code, ErrorCode::Validation);

    let err = query_records(&ctx, "albums", "name", &json!(null))
        .await
        .expect_err("null filter");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn query_returns_matches_only() {
    let ctx = setup().await;
    insert_record(&ctx, "albums", json!({ "name": "Trip" }))
        .await
        .expect("insert");
    insert_record(&ctx, "albums", json!({ "name": "Home" }))
        .await
        .expect("insert");

    let found = query_records(&ctx, "albums", "name", &json!("Home"))
        .await
        .expect("query");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].body["name"], json!("Home"));
}
