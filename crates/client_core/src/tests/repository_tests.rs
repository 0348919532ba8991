use super::*;
use crate::test_support::ScriptedStore;
use serde_json::json;

async fn repo() -> (Arc<ScriptedStore>, AlbumRepository) {
    let store = ScriptedStore::new().await;
    let repo = AlbumRepository::new(store.clone());
    (store, repo)
}

fn image(id: u64, title: &str) -> Image {
    Image {
        id: ImageId(id),
        title: title.to_string(),
        url: format!("https://example.com/{id}.jpg"),
    }
}

fn ids(images: &[Image]) -> Vec<u64> {
    images.iter().map(|image| image.id.0).collect()
}

#[tokio::test]
async fn created_albums_start_empty_and_list_by_name() {
    let (_store, repo) = repo().await;
    let zoo = repo.create_album("Zoo").await.expect("create");
    repo.create_album("Art").await.expect("create");

    let albums = repo.list_albums().await.expect("list");
    let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Art", "Zoo"]);
    assert!(albums.iter().all(|a| a.images.is_empty()));
    assert_eq!(albums[1].id, zoo);
}

#[tokio::test]
async fn name_lookup_returns_first_inserted_match() {
    let (store, repo) = repo().await;
    let first = store.seed_album("Trip", &[]).await;
    store.seed_album("Trip", &[]).await;

    assert_eq!(
        repo.find_album_id_by_name("Trip").await.expect("lookup"),
        Some(first)
    );
    assert_eq!(repo.find_album_id_by_name("Nope").await.expect("lookup"), None);
}

#[tokio::test]
async fn add_image_puts_new_image_first() {
    let (store, repo) = repo().await;
    let id = store.seed_album("Trip", &[(1, "Hike"), (0, "Beach")]).await;

    let written = repo.add_image(&id, image(2, "Lake")).await.expect("add");
    assert_eq!(ids(&written), vec![2, 1, 0]);
    assert_eq!(store.stored_images(&id).await[0]["title"], json!("Lake"));
}

#[tokio::test]
async fn add_image_to_unknown_album_is_album_missing() {
    let (_store, repo) = repo().await;
    let err = repo
        .add_image(&AlbumId("missing".into()), image(0, "Beach"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, RepositoryError::AlbumMissing(_)));
}

#[tokio::test]
async fn replace_image_changes_only_the_matching_image() {
    let (store, repo) = repo().await;
    let id = store.seed_album("Trip", &[(1, "Hike"), (0, "Beach")]).await;

    let mut edited = image(0, "Sunny beach");
    edited.url = "https://example.com/sunny.jpg".into();
    let written = repo.replace_image(&id, edited.clone()).await.expect("replace");

    assert_eq!(written[0], image(1, "Hike"));
    assert_eq!(written[1], edited);
}

#[tokio::test]
async fn replace_of_unknown_image_writes_nothing() {
    let (store, repo) = repo().await;
    let id = store.seed_album("Trip", &[(0, "Beach")]).await;
    let calls_before = store.calls();

    let err = repo
        .replace_image(&id, image(9, "Ghost"))
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        RepositoryError::ImageMissing { image_id: ImageId(9), .. }
    ));
    // Only the read happened.
    assert_eq!(store.calls(), calls_before + 1);
}

#[tokio::test]
async fn remove_image_keeps_remaining_ids() {
    let (store, repo) = repo().await;
    let id = store
        .seed_album("Trip", &[(2, "Lake"), (1, "Hike"), (0, "Beach")])
        .await;

    let written = repo.remove_image(&id, ImageId(1)).await.expect("remove");
    assert_eq!(ids(&written), vec![2, 0]);

    let written = repo.remove_image(&id, ImageId(7)).await.expect("remove");
    assert_eq!(ids(&written), vec![2, 0]);
}

#[tokio::test]
async fn malformed_records_fail_to_decode() {
    let (store, repo) = repo().await;
    store
        .seed_raw(json!({ "name": "Broken", "images": [{ "id": 0, "title": 5, "url": "u" }] }))
        .await;

    let err = repo.list_albums().await.expect_err("must fail");
    assert!(matches!(err, RepositoryError::Decode(DecodeError::WrongType { .. })));
}

#[tokio::test]
async fn store_failures_pass_through() {
    let (store, repo) = repo().await;
    store.fail_reads(true);
    let err = repo.list_albums().await.expect_err("must fail");
    assert!(matches!(err, RepositoryError::Store(_)));
}
