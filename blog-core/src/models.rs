use crate::error::BlogError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ==================== Модели постов ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub summary: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Post {
    /// Image shown for the post: its own `imageUrl` when set and non-empty,
    /// otherwise `fallback`.
    pub fn display_image<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => fallback,
        }
    }

    /// "By <author> on <date>" line shown under titles.
    pub fn byline(&self) -> String {
        format!("By {} on {}", self.author, self.date)
    }

    pub fn published_at(&self) -> Result<DateTime<Utc>, BlogError> {
        parse_post_date(&self.date).ok_or_else(|| BlogError::InvalidDate {
            id: self.id.clone(),
            date: self.date.clone(),
        })
    }
}

// ==================== Даты ====================

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d %Y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
    "%B %d %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
];

/// Parses the free-form `date` field of a post.
///
/// Zoned values (RFC 3339, RFC 2822) keep their offset; everything else is
/// read as UTC.
pub fn parse_post_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2024-05-01T00:00:00.000Z`.
pub fn iso_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
