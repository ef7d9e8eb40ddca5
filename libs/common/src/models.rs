//! Photo models shared by the gallery and upload controllers

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Table holding photo metadata
pub const PHOTOS_TABLE: &str = "gallery_photos";

/// Photo row as returned by the backend; every field may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PhotoRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_uuid")]
    pub user_id: Option<Uuid>,
}

/// Tags that are not an array count as absent; non-string entries are dropped
fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(tag) => Some(tag),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// An owner id that is not a UUID string counts as absent
fn lenient_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Uuid::parse_str(&id).ok(),
        _ => None,
    })
}

/// Photo that can be displayed: it has a title and an image URL
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub user_id: Option<Uuid>,
}

impl Photo {
    /// Whether the photo carries `tag` (compared after trimming)
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|t| t.trim() == tag)
    }
}

impl TryFrom<PhotoRecord> for Photo {
    type Error = String;

    fn try_from(record: PhotoRecord) -> Result<Self, Self::Error> {
        let title = record
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| "photo has no title".to_string())?;
        let image_url = record
            .image_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| format!("photo '{}' has no image URL", title))?;

        Ok(Photo {
            title,
            description: record.description.filter(|d| !d.trim().is_empty()),
            image_url,
            tags: record.tags.unwrap_or_default(),
            created_at: record.created_at.as_deref().and_then(parse_timestamp),
            user_id: record.user_id,
        })
    }
}

/// Insert payload for a new photo row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPhoto {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub tags: Vec<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Parse a backend timestamp; zone-less values are taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
