use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_optional_date, deserialize_optional_id};
use crate::error::ParseError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Novel {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "novelName")]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imgLink", default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(rename = "rate", default)]
    pub rating: f32,
    #[serde(default)]
    pub status: NovelStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    /// Denormalized, never recomputed from the chapter collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_chapters: Option<u32>,
    #[serde(
        rename = "uploadBy",
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub uploader: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NovelStatus {
    #[default]
    Ongoing,
    Completed,
    Hiatus,
}

impl Display for NovelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            NovelStatus::Ongoing => "ongoing",
            NovelStatus::Completed => "completed",
            NovelStatus::Hiatus => "hiatus",
        };

        write!(f, "{value}")
    }
}

impl FromStr for NovelStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ongoing" => Ok(NovelStatus::Ongoing),
            "completed" => Ok(NovelStatus::Completed),
            "hiatus" => Ok(NovelStatus::Hiatus),
            _ => Err(ParseError::UnknownStatus(s.to_string())),
        }
    }
}

impl Novel {
    pub fn new(title: String, author: String) -> Self {
        Novel {
            id: String::new(),
            title,
            author,
            description: String::new(),
            cover: None,
            genres: vec![],
            rating: 0.0,
            status: NovelStatus::default(),
            views: Some(0),
            total_chapters: Some(0),
            uploader: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[inline]
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_deserialize_store_record() {
        let novel: Novel = serde_json::from_value(json!({
            "id": "n100",
            "novelId": "n100",
            "novelName": "The Long Road",
            "author": "A. Writer",
            "description": "A journey.",
            "imgLink": "covers/road.png",
            "genres": ["Fantasy", "Adventure"],
            "rate": 4.5,
            "status": "completed",
            "views": 1200,
            "totalChapters": 3,
            "uploadBy": "u002",
            "createdAt": "2024-03-01",
            "updatedAt": "2024-03-05T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(novel.title, "The Long Road");
        assert_eq!(novel.status, NovelStatus::Completed);
        assert_eq!(novel.uploader.as_deref(), Some("u002"));
        assert_eq!(novel.created_at, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(novel.updated_at, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert!(novel.has_genre("Fantasy"));
    }

    #[test]
    fn should_tolerate_missing_counters() {
        let novel: Novel = serde_json::from_value(json!({
            "id": 3,
            "novelName": "Bare"
        }))
        .unwrap();

        assert_eq!(novel.id, "3");
        assert_eq!(novel.views, None);
        assert_eq!(novel.total_chapters, None);
        assert_eq!(novel.status, NovelStatus::Ongoing);
    }
}
