use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "ReviewID")]
    pub review_id: i32,
    #[serde(rename = "CustomerID")]
    pub customer_id: i32,
    #[serde(rename = "ProductID")]
    pub product_id: i32,
    #[serde(rename = "ReviewDate")]
    pub review_date: NaiveDate,
    #[serde(rename = "Rating")]
    pub rating: i32,
    #[serde(rename = "ReviewText", default)]
    pub review_text: String,
}

/// A review with its derived sentiment fields. Built once by the enrichment
/// pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedReviewRecord {
    pub review: ReviewRecord,
    pub sentiment_score: f64,
    pub sentiment_category: SentimentCategory,
    pub sentiment_bucket: SentimentBucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentCategory {
    Positive,
    #[serde(rename = "Mixed Positive")]
    MixedPositive,
    Neutral,
    #[serde(rename = "Mixed Negative")]
    MixedNegative,
    Negative,
}

impl SentimentCategory {
    pub const ALL: [SentimentCategory; 5] = [
        SentimentCategory::Positive,
        SentimentCategory::MixedPositive,
        SentimentCategory::Neutral,
        SentimentCategory::MixedNegative,
        SentimentCategory::Negative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "Positive",
            SentimentCategory::MixedPositive => "Mixed Positive",
            SentimentCategory::Neutral => "Neutral",
            SentimentCategory::MixedNegative => "Mixed Negative",
            SentimentCategory::Negative => "Negative",
        }
    }

    /// Text sentiment and rating point in different directions.
    pub fn is_mixed(&self) -> bool {
        matches!(
            self,
            SentimentCategory::MixedPositive | SentimentCategory::MixedNegative
        )
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal score bands, declared from strongest positive to strongest negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentBucket {
    #[serde(rename = "0.5 to 1.0")]
    StrongPositive,
    #[serde(rename = "0.0 to 0.49")]
    MildPositive,
    #[serde(rename = "-0.49 to 0.0")]
    MildNegative,
    #[serde(rename = "-1.0 to -0.5")]
    StrongNegative,
}

impl SentimentBucket {
    pub const ALL: [SentimentBucket; 4] = [
        SentimentBucket::StrongPositive,
        SentimentBucket::MildPositive,
        SentimentBucket::MildNegative,
        SentimentBucket::StrongNegative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SentimentBucket::StrongPositive => "0.5 to 1.0",
            SentimentBucket::MildPositive => "0.0 to 0.49",
            SentimentBucket::MildNegative => "-0.49 to 0.0",
            SentimentBucket::StrongNegative => "-1.0 to -0.5",
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: SentimentCategory,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BucketCount {
    pub bucket: SentimentBucket,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentSummary {
    pub run_id: uuid::Uuid,
    pub total: usize,
    pub mean_score: f64,
    pub out_of_range_ratings: usize,
    pub categories: Vec<CategoryCount>,
    pub buckets: Vec<BucketCount>,
}

#[derive(Debug, Clone)]
pub struct RatingSummary {
    pub rating: i32,
    pub count: usize,
    pub avg_score: f64,
}
