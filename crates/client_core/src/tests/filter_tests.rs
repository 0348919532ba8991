use super::*;
use shared::domain::ImageId;

fn image(id: u64, title: &str) -> Image {
    Image {
        id: ImageId(id),
        title: title.to_string(),
        url: format!("https://example.com/{id}.jpg"),
    }
}

fn titles<'a>(filtered: impl Iterator<Item = &'a Image>) -> Vec<&'a str> {
    filtered.map(|image| image.title.as_str()).collect()
}

#[test]
fn blank_query_keeps_every_image_in_order() {
    let images = vec![image(2, "Hike"), image(1, "Beach"), image(0, "Cat")];
    assert_eq!(titles(filter_images(&images, "")), vec!["Hike", "Beach", "Cat"]);
    assert_eq!(titles(filter_images(&images, "   ")), vec!["Hike", "Beach", "Cat"]);
}

#[test]
fn matching_ignores_case() {
    let images = vec![image(0, "Cat on a Mat"), image(1, "Dog"), image(2, "CATALOG")];
    assert_eq!(
        titles(filter_images(&images, "cat")),
        vec!["Cat on a Mat", "CATALOG"]
    );
}

#[test]
fn query_and_title_are_trimmed_before_matching() {
    let images = vec![image(0, "  sunset  "), image(1, "sunrise")];
    assert_eq!(titles(filter_images(&images, "  set ")), vec!["  sunset  "]);
}

#[test]
fn no_match_yields_nothing() {
    let images = vec![image(0, "Beach")];
    assert_eq!(filter_images(&images, "mountain").count(), 0);
    assert_eq!(filter_images(&[], "beach").count(), 0);
}

#[test]
fn cloned_iterator_restarts_from_its_position() {
    let images = vec![image(0, "a1"), image(1, "b"), image(2, "a2")];
    let mut filtered = filter_images(&images, "a");
    let replay = filtered.clone();
    assert_eq!(filtered.next().map(|i| i.id), Some(ImageId(0)));
    assert_eq!(titles(replay), vec!["a1", "a2"]);
    assert_eq!(titles(filtered), vec!["a2"]);
}
