use std::collections::BTreeMap;

use anyhow::bail;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    BucketCount, CategoryCount, EnrichedReviewRecord, EnrichmentSummary, ReviewRecord,
    SentimentBucket, SentimentCategory,
};
use crate::scorer::PolarityScorer;
use crate::sentiment;

pub fn enrich_review<S: PolarityScorer + ?Sized>(
    scorer: &S,
    review: &ReviewRecord,
) -> anyhow::Result<EnrichedReviewRecord> {
    let score = scorer.score(&review.review_text);
    if !(-1.0..=1.0).contains(&score) {
        bail!(
            "scorer returned {score} for review {}, outside [-1, 1]",
            review.review_id
        );
    }

    Ok(EnrichedReviewRecord {
        review: review.clone(),
        sentiment_score: score,
        sentiment_category: sentiment::classify(score, review.rating),
        sentiment_bucket: sentiment::bucket(score),
    })
}

/// Scores, classifies and buckets every review in parallel. Output order
/// matches input order; the first scorer contract violation fails the batch.
pub fn enrich_reviews<S: PolarityScorer + ?Sized>(
    scorer: &S,
    reviews: &[ReviewRecord],
) -> anyhow::Result<(Vec<EnrichedReviewRecord>, EnrichmentSummary)> {
    let run_id = Uuid::new_v4();
    info!(%run_id, reviews = reviews.len(), "enriching reviews");

    let enriched = reviews
        .par_iter()
        .map(|review| enrich_review(scorer, review))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let summary = summarize(run_id, &enriched);
    if summary.out_of_range_ratings > 0 {
        warn!(
            %run_id,
            count = summary.out_of_range_ratings,
            "ratings outside 1-5 were classified by nearest branch"
        );
    }
    debug!(%run_id, mean_score = summary.mean_score, "enrichment finished");

    Ok((enriched, summary))
}

pub fn summarize(run_id: Uuid, enriched: &[EnrichedReviewRecord]) -> EnrichmentSummary {
    let mut categories: BTreeMap<SentimentCategory, usize> =
        SentimentCategory::ALL.iter().map(|c| (*c, 0)).collect();
    let mut buckets: BTreeMap<SentimentBucket, usize> =
        SentimentBucket::ALL.iter().map(|b| (*b, 0)).collect();
    let mut total_score = 0.0;
    let mut out_of_range_ratings = 0usize;

    for record in enriched {
        *categories.entry(record.sentiment_category).or_insert(0) += 1;
        *buckets.entry(record.sentiment_bucket).or_insert(0) += 1;
        total_score += record.sentiment_score;
        if !sentiment::rating_in_range(record.review.rating) {
            out_of_range_ratings += 1;
        }
    }

    EnrichmentSummary {
        run_id,
        total: enriched.len(),
        mean_score: if enriched.is_empty() {
            0.0
        } else {
            total_score / enriched.len() as f64
        },
        out_of_range_ratings,
        categories: categories
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        buckets: buckets
            .into_iter()
            .map(|(bucket, count)| BucketCount { bucket, count })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::scorer::LexiconScorer;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn score(&self, _text: &str) -> f64 {
            self.0
        }
    }

    fn sample_review(review_id: i32, rating: i32, text: &str) -> ReviewRecord {
        ReviewRecord {
            review_id,
            customer_id: 100 + review_id,
            product_id: 7,
            review_date: NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
            rating,
            review_text: text.to_string(),
        }
    }

    #[test]
    fn enriches_each_review_in_input_order() {
        let reviews: Vec<ReviewRecord> = (1..=500)
            .map(|id| {
                let text = if id % 2 == 0 { "great product" } else { "terrible product" };
                sample_review(id, (id % 5) + 1, text)
            })
            .collect();

        let scorer = LexiconScorer::default();
        let (enriched, summary) = enrich_reviews(&scorer, &reviews).expect("enrich");

        assert_eq!(enriched.len(), reviews.len());
        for (record, review) in enriched.iter().zip(&reviews) {
            assert_eq!(&record.review, review);
            assert_eq!(
                record.sentiment_category,
                sentiment::classify(record.sentiment_score, review.rating)
            );
            assert_eq!(record.sentiment_bucket, sentiment::bucket(record.sentiment_score));
        }
        assert_eq!(summary.total, 500);
        assert_eq!(summary.out_of_range_ratings, 0);
    }

    #[test]
    fn blends_score_and_rating() {
        let reviews = vec![
            sample_review(1, 5, "Absolutely love it, excellent quality"),
            sample_review(2, 1, "Awful. Broke on day one"),
            sample_review(3, 5, "Awful. Broke on day one"),
            sample_review(4, 3, ""),
        ];

        let (enriched, _) = enrich_reviews(&LexiconScorer::default(), &reviews).expect("enrich");
        let categories: Vec<SentimentCategory> =
            enriched.iter().map(|r| r.sentiment_category).collect();

        assert_eq!(
            categories,
            vec![
                SentimentCategory::Positive,
                SentimentCategory::Negative,
                SentimentCategory::MixedPositive,
                SentimentCategory::Neutral,
            ]
        );
        assert_eq!(enriched[3].sentiment_score, 0.0);
        assert_eq!(enriched[3].sentiment_bucket, SentimentBucket::MildPositive);
    }

    #[test]
    fn out_of_range_score_fails_the_batch() {
        let reviews = vec![sample_review(1, 4, "fine"), sample_review(2, 4, "fine")];

        let error = enrich_reviews(&FixedScorer(1.5), &reviews).unwrap_err();
        assert!(error.to_string().contains("outside [-1, 1]"));

        assert!(enrich_reviews(&FixedScorer(f64::NAN), &reviews).is_err());
    }

    #[test]
    fn summary_counts_every_category_and_bucket() {
        let reviews = vec![
            sample_review(1, 5, ""),
            sample_review(2, 3, ""),
            sample_review(3, 0, ""),
            sample_review(4, 9, ""),
        ];

        let (_, summary) = enrich_reviews(&FixedScorer(-0.6), &reviews).expect("enrich");

        assert_eq!(summary.total, 4);
        assert_eq!(summary.out_of_range_ratings, 2);
        assert!((summary.mean_score + 0.6).abs() < 1e-9);
        assert_eq!(summary.categories.len(), 5);
        assert_eq!(summary.buckets.len(), 4);

        let count = |category: SentimentCategory| {
            summary
                .categories
                .iter()
                .find(|c| c.category == category)
                .map(|c| c.count)
                .unwrap_or_default()
        };
        assert_eq!(count(SentimentCategory::MixedPositive), 2);
        assert_eq!(count(SentimentCategory::MixedNegative), 1);
        assert_eq!(count(SentimentCategory::Negative), 1);
        assert_eq!(count(SentimentCategory::Neutral), 0);

        assert_eq!(summary.buckets[3].bucket, SentimentBucket::StrongNegative);
        assert_eq!(summary.buckets[3].count, 4);
    }

    #[test]
    fn empty_batch_produces_empty_summary() {
        let (enriched, summary) =
            enrich_reviews(&LexiconScorer::default(), &[]).expect("enrich");
        assert!(enriched.is_empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.mean_score, 0.0);
    }
}
