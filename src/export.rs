use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::models::{EnrichedReviewRecord, ReviewRecord, SentimentBucket, SentimentCategory};

const HEADER: [&str; 9] = [
    "ReviewID",
    "CustomerID",
    "ProductID",
    "ReviewDate",
    "Rating",
    "ReviewText",
    "SentimentScore",
    "SentimentCategory",
    "SentimentBucket",
];

#[derive(Serialize)]
struct OutputRow<'a> {
    review_id: i32,
    customer_id: i32,
    product_id: i32,
    review_date: NaiveDate,
    rating: i32,
    review_text: &'a str,
    sentiment_score: f64,
    sentiment_category: SentimentCategory,
    sentiment_bucket: SentimentBucket,
}

impl<'a> From<&'a EnrichedReviewRecord> for OutputRow<'a> {
    fn from(record: &'a EnrichedReviewRecord) -> Self {
        Self {
            review_id: record.review.review_id,
            customer_id: record.review.customer_id,
            product_id: record.review.product_id,
            review_date: record.review.review_date,
            rating: record.review.rating,
            review_text: &record.review.review_text,
            sentiment_score: record.sentiment_score,
            sentiment_category: record.sentiment_category,
            sentiment_bucket: record.sentiment_bucket,
        }
    }
}

pub fn read_reviews_csv(path: &Path) -> anyhow::Result<Vec<ReviewRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut reviews = Vec::new();

    for (index, result) in reader.deserialize::<ReviewRecord>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let review = result
            .with_context(|| format!("failed to decode line {} of {}", index + 2, path.display()))?;
        reviews.push(review);
    }

    info!(path = %path.display(), rows = reviews.len(), "loaded reviews from csv");
    Ok(reviews)
}

/// Writes the enriched rows in input order. Rows are staged in a temporary
/// file beside `path` and renamed into place only once every row is flushed.
pub fn write_enriched_csv(path: &Path, records: &[EnrichedReviewRecord]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staging = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to stage output in {}", dir.display()))?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(staging.as_file());
        writer.write_record(HEADER)?;
        for record in records {
            writer
                .serialize(OutputRow::from(record))
                .with_context(|| format!("failed to write review {}", record.review.review_id))?;
        }
        writer.flush().context("failed to flush enriched rows")?;
    }

    staging
        .persist(path)
        .with_context(|| format!("failed to move output into {}", path.display()))?;
    info!(path = %path.display(), rows = records.len(), "wrote enriched reviews");
    Ok(())
}
