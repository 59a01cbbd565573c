use rand::Rng;
use serde::{Deserialize, Serialize};

pub const BEST_RATING: &str = "5";

/// schema.org `AggregateRating` block embedded in the post's structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    #[serde(rename = "@type")]
    pub kind: String,
    pub rating_value: String,
    pub best_rating: String,
    pub rating_count: u32,
}

impl AggregateRating {
    pub fn new(value: f64, count: u32) -> Self {
        Self {
            kind: "AggregateRating".to_string(),
            rating_value: format!("{:.1}", value),
            best_rating: BEST_RATING.to_string(),
            rating_count: count,
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.rating_value.parse().ok()
    }
}

/// Bounds for generated ratings, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingRange {
    pub min_value: f64,
    pub max_value: f64,
    pub min_count: u32,
    pub max_count: u32,
}

impl Default for RatingRange {
    fn default() -> Self {
        Self {
            min_value: 4.5,
            max_value: 4.9,
            min_count: 1200,
            max_count: 2000,
        }
    }
}

/// Source of the aggregate rating attached to a rendered post.
pub trait RatingProvider {
    fn aggregate_rating(&self) -> AggregateRating;
}

/// Draws a fresh rating on every render. Nothing is stored.
#[derive(Debug, Clone, Default)]
pub struct RandomRating {
    range: RatingRange,
}

impl RandomRating {
    pub fn new(range: RatingRange) -> Self {
        Self { range }
    }
}

impl RatingProvider for RandomRating {
    fn aggregate_rating(&self) -> AggregateRating {
        let mut rng = rand::thread_rng();

        // Drawn in tenths so the one-decimal value never leaves the range.
        let low = (self.range.min_value * 10.0).round() as u32;
        let high = (self.range.max_value * 10.0).round() as u32;
        let tenths = rng.gen_range(low.min(high)..=low.max(high));

        let count = rng.gen_range(
            self.range.min_count.min(self.range.max_count)
                ..=self.range.min_count.max(self.range.max_count),
        );

        AggregateRating::new(f64::from(tenths) / 10.0, count)
    }
}

/// Always returns the same rating.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRating(pub AggregateRating);

impl FixedRating {
    pub fn new(value: f64, count: u32) -> Self {
        Self(AggregateRating::new(value, count))
    }
}

impl RatingProvider for FixedRating {
    fn aggregate_rating(&self) -> AggregateRating {
        self.0.clone()
    }
}
