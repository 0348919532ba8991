use shared::domain::Image;

/// Images whose title contains `query`, ignoring case and surrounding
/// whitespace. A blank query keeps every image.
///
/// The iterator borrows `images` and can be cloned to walk the result again.
pub fn filter_images<'a>(images: &'a [Image], query: &str) -> FilteredImages<'a> {
    let needle = query.trim().to_lowercase();
    FilteredImages {
        images: images.iter(),
        needle: (!needle.is_empty()).then_some(needle),
    }
}

#[derive(Debug, Clone)]
pub struct FilteredImages<'a> {
    images: std::slice::Iter<'a, Image>,
    needle: Option<String>,
}

impl<'a> Iterator for FilteredImages<'a> {
    type Item = &'a Image;

    fn next(&mut self) -> Option<Self::Item> {
        match &self.needle {
            None => self.images.next(),
            Some(needle) => self.images.find(|image| title_matches(image, needle)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.images.size_hint();
        match self.needle {
            None => (lower, upper),
            Some(_) => (0, upper),
        }
    }
}

fn title_matches(image: &Image, needle: &str) -> bool {
    image.title.trim().to_lowercase().contains(needle)
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
