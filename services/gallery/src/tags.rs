//! Tag vocabulary and filtering

use common::models::Photo;

/// Unique trimmed tags across a set of photos, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagVocabulary {
    tags: Vec<String>,
}

impl TagVocabulary {
    pub fn from_photos(photos: &[Photo]) -> Self {
        let mut tags: Vec<String> = Vec::new();

        for tag in photos.iter().flat_map(|photo| photo.tags.iter()) {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|known| known == tag) {
                tags.push(tag.to_string());
            }
        }

        TagVocabulary { tags }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|known| known == tag.trim())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Active gallery filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// Parse a filter key as used on the filter buttons; `all` selects everything
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "" | "all" => TagFilter::All,
            tag => TagFilter::Tag(tag.to_string()),
        }
    }

    /// Key written to the filter button's `data-tag`
    pub fn key(&self) -> &str {
        match self {
            TagFilter::All => "all",
            TagFilter::Tag(tag) => tag,
        }
    }

    pub fn matches(&self, photo: &Photo) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => photo.has_tag(tag),
        }
    }

    pub fn apply<'a>(&self, photos: &'a [Photo]) -> Vec<&'a Photo> {
        photos.iter().filter(|photo| self.matches(photo)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(title: &str, tags: &[&str]) -> Photo {
        Photo {
            title: title.to_string(),
            description: None,
            image_url: format!("https://cdn.example.co/{}.jpg", title),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: None,
            user_id: None,
        }
    }

    #[test]
    fn test_vocabulary_is_trimmed_unique_first_seen() {
        let photos = vec![
            photo("one", &["sea", " sky "]),
            photo("two", &["sky", "forest", "  "]),
            photo("three", &[]),
        ];

        let vocabulary = TagVocabulary::from_photos(&photos);

        assert_eq!(vocabulary.tags(), ["sea", "sky", "forest"]);
        assert!(vocabulary.contains(" forest"));
        assert!(!vocabulary.contains("desert"));
    }

    #[test]
    fn test_empty_photos_have_empty_vocabulary() {
        let vocabulary = TagVocabulary::from_photos(&[]);
        assert!(vocabulary.is_empty());
        assert_eq!(vocabulary.len(), 0);
    }

    #[test]
    fn test_filter_apply() {
        let photos = vec![photo("one", &["a", "b"]), photo("two", &["b ", "c"])];

        assert_eq!(TagFilter::All.apply(&photos).len(), 2);
        assert_eq!(TagFilter::Tag("b".to_string()).apply(&photos).len(), 2);

        let only_c = TagFilter::Tag("c".to_string()).apply(&photos);
        assert_eq!(only_c.len(), 1);
        assert_eq!(only_c[0].title, "two");

        assert!(TagFilter::Tag("z".to_string()).apply(&photos).is_empty());
    }

    #[test]
    fn test_filter_keys() {
        assert_eq!(TagFilter::from_key("all"), TagFilter::All);
        assert_eq!(TagFilter::from_key(""), TagFilter::All);
        assert_eq!(
            TagFilter::from_key(" sea "),
            TagFilter::Tag("sea".to_string())
        );
        assert_eq!(TagFilter::Tag("sea".to_string()).key(), "sea");
        assert_eq!(TagFilter::All.key(), "all");
    }
}
