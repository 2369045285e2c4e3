use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_optional_date, deserialize_optional_id};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub novel_id: String,
    pub chapter_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub views: u64,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDate>,
    #[serde(rename = "prevChapterId", default, deserialize_with = "deserialize_optional_id")]
    pub previous: Option<String>,
    #[serde(rename = "nextChapterId", default, deserialize_with = "deserialize_optional_id")]
    pub next: Option<String>,
}

/// A partial update of the stored link fields. Outer `None` leaves the
/// field untouched, `Some(None)` clears it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Links {
    #[serde(rename = "prevChapterId", skip_serializing_if = "Option::is_none")]
    pub previous: Option<Option<String>>,
    #[serde(rename = "nextChapterId", skip_serializing_if = "Option::is_none")]
    pub next: Option<Option<String>>,
}

impl Links {
    pub fn next(id: Option<String>) -> Self {
        Links {
            previous: None,
            next: Some(id),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }

    pub fn apply(&self, chapter: &mut Chapter) {
        if let Some(previous) = &self.previous {
            chapter.previous = previous.clone();
        }
        if let Some(next) = &self.next {
            chapter.next = next.clone();
        }
    }
}

impl Chapter {
    #[inline]
    pub fn has_title(&self, title: &str) -> bool {
        normalize_title(&self.title) == normalize_title(title)
    }
}

pub(crate) fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
