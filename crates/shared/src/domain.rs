use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const ALBUMS_COLLECTION: &str = "albums";
pub const ALBUM_NAME_FIELD: &str = "name";
pub const ALBUM_IMAGES_FIELD: &str = "images";

/// Opaque identifier assigned by the record store when an album is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(pub String);

impl AlbumId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequence number of an image, unique only inside the album that embeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub title: String,
    pub url: String,
}

impl Image {
    pub fn from_draft(id: ImageId, draft: ImageDraft) -> Self {
        Self {
            id,
            title: draft.title,
            url: draft.url,
        }
    }

    /// Same image with surrounding whitespace stripped from title and url.
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id,
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
        }
    }
}

/// Title and url typed into the image form, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDraft {
    pub title: String,
    pub url: String,
}

impl ImageDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Trimmed copy, or `None` when either field is blank.
    pub fn trimmed(&self) -> Option<Self> {
        let title = self.title.trim();
        let url = self.url.trim();
        if title.is_empty() || url.is_empty() {
            return None;
        }
        Some(Self::new(title, url))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub images: Vec<Image>,
}

impl Album {
    pub fn empty(id: AlbumId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            images: Vec::new(),
        }
    }
}

/// How a new image's id is chosen from the album's current image list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageIdPolicy {
    /// Id is the number of images already in the album. Two clients adding at
    /// once, or an add after a delete, can produce duplicate ids.
    #[default]
    Count,
    /// Id is one past the largest id present, so ids never repeat within an
    /// album that is edited by a single client.
    NextAfterMax,
}

impl ImageIdPolicy {
    /// `None` when no id is left, i.e. an image already holds `u64::MAX`.
    pub fn next_id(self, images: &[Image]) -> Option<ImageId> {
        match self {
            Self::Count => u64::try_from(images.len()).ok().map(ImageId),
            Self::NextAfterMax => match images.iter().map(|image| image.id.0).max() {
                Some(max) => max.checked_add(1).map(ImageId),
                None => Some(ImageId(0)),
            },
        }
    }
}

impl FromStr for ImageIdPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "next-after-max" | "next_after_max" => Ok(Self::NextAfterMax),
            other => Err(format!(
                "unknown image id policy '{other}' (expected 'count' or 'next-after-max')"
            )),
        }
    }
}

impl fmt::Display for ImageIdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => f.write_str("count"),
            Self::NextAfterMax => f.write_str("next-after-max"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: u64) -> Image {
        Image {
            id: ImageId(id),
            title: format!("image-{id}"),
            url: format!("https://example.com/{id}.jpg"),
        }
    }

    #[test]
    fn count_policy_uses_current_length_even_after_gaps() {
        let images = vec![image(1), image(4)];
        assert_eq!(ImageIdPolicy::Count.next_id(&images), Some(ImageId(2)));
        assert_eq!(ImageIdPolicy::Count.next_id(&[]), Some(ImageId(0)));
    }

    #[test]
    fn next_after_max_policy_skips_past_existing_ids() {
        let images = vec![image(1), image(4)];
        assert_eq!(
            ImageIdPolicy::NextAfterMax.next_id(&images),
            Some(ImageId(5))
        );
        assert_eq!(ImageIdPolicy::NextAfterMax.next_id(&[]), Some(ImageId(0)));
    }

    #[test]
    fn next_after_max_policy_runs_out_at_the_largest_id() {
        let images = vec![image(3), image(u64::MAX)];
        assert_eq!(ImageIdPolicy::NextAfterMax.next_id(&images), None);
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("count".parse::<ImageIdPolicy>(), Ok(ImageIdPolicy::Count));
        assert_eq!(
            "Next-After-Max".parse::<ImageIdPolicy>(),
            Ok(ImageIdPolicy::NextAfterMax)
        );
        assert!("random".parse::<ImageIdPolicy>().is_err());
    }

    #[test]
    fn blank_draft_fields_are_rejected() {
        assert_eq!(ImageDraft::new("  ", "https://x").trimmed(), None);
        assert_eq!(ImageDraft::new("Beach", "\t").trimmed(), None);
        assert_eq!(
            ImageDraft::new(" Beach ", " https://x ").trimmed(),
            Some(ImageDraft::new("Beach", "https://x"))
        );
    }
}
