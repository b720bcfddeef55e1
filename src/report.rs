use std::fmt::Write;

use crate::models::{EnrichedReviewRecord, EnrichmentSummary, RatingSummary};

pub fn summarize_by_rating(records: &[EnrichedReviewRecord]) -> Vec<RatingSummary> {
    let mut map: std::collections::BTreeMap<i32, (usize, f64)> =
        std::collections::BTreeMap::new();

    for record in records {
        let entry = map.entry(record.review.rating).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.sentiment_score;
    }

    map.into_iter()
        .rev()
        .map(|(rating, (count, total_score))| RatingSummary {
            rating,
            count,
            avg_score: if count == 0 {
                0.0
            } else {
                total_score / count as f64
            },
        })
        .collect()
}

/// Reviews whose text and rating disagree, strongest text signal first.
pub fn strongest_disagreements(records: &[EnrichedReviewRecord]) -> Vec<&EnrichedReviewRecord> {
    let mut mixed: Vec<&EnrichedReviewRecord> = records
        .iter()
        .filter(|r| r.sentiment_category.is_mixed())
        .collect();
    mixed.sort_by(|a, b| {
        b.sentiment_score
            .abs()
            .partial_cmp(&a.sentiment_score.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    mixed
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

pub fn build_report(
    source: &str,
    summary: &EnrichmentSummary,
    records: &[EnrichedReviewRecord],
) -> String {
    let ratings = summarize_by_rating(records);
    let disagreements = strongest_disagreements(records);

    let mut output = String::new();

    let _ = writeln!(output, "# Customer Review Sentiment Report");
    let _ = writeln!(
        output,
        "Generated from {} ({} reviews, mean score {:.3}, run {})",
        source, summary.total, summary.mean_score, summary.run_id
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Sentiment Categories");

    if summary.total == 0 {
        let _ = writeln!(output, "No reviews in this batch.");
    } else {
        for entry in summary.categories.iter() {
            let _ = writeln!(
                output,
                "- {}: {} reviews ({:.1}%)",
                entry.category,
                entry.count,
                share(entry.count, summary.total)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Score Buckets");

    if summary.total == 0 {
        let _ = writeln!(output, "No reviews in this batch.");
    } else {
        for entry in summary.buckets.iter() {
            let _ = writeln!(
                output,
                "- {}: {} reviews ({:.1}%)",
                entry.bucket,
                entry.count,
                share(entry.count, summary.total)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Average Score by Rating");

    if ratings.is_empty() {
        let _ = writeln!(output, "No ratings recorded.");
    } else {
        for entry in ratings.iter() {
            let _ = writeln!(
                output,
                "- {} stars: {} reviews, avg score {:.3}",
                entry.rating, entry.count, entry.avg_score
            );
        }
    }

    if summary.out_of_range_ratings > 0 {
        let _ = writeln!(
            output,
            "- {} reviews carried a rating outside 1-5",
            summary.out_of_range_ratings
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Text and Rating Disagreements");

    if disagreements.is_empty() {
        let _ = writeln!(output, "Text sentiment agreed with every rating.");
    } else {
        for record in disagreements.iter().take(5) {
            let _ = writeln!(
                output,
                "- Review {} (product {}, {} stars, score {:.3}, {}): {}",
                record.review.review_id,
                record.review.product_id,
                record.review.rating,
                record.sentiment_score,
                record.sentiment_category,
                record.review.review_text
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::enrich;
    use crate::models::ReviewRecord;
    use crate::sentiment;

    fn sample(review_id: i32, rating: i32, score: f64) -> EnrichedReviewRecord {
        EnrichedReviewRecord {
            review: ReviewRecord {
                review_id,
                customer_id: 1,
                product_id: 9,
                review_date: NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date"),
                rating,
                review_text: format!("review {review_id}"),
            },
            sentiment_score: score,
            sentiment_category: sentiment::classify(score, rating),
            sentiment_bucket: sentiment::bucket(score),
        }
    }

    #[test]
    fn averages_scores_per_rating_highest_first() {
        let records = vec![sample(1, 5, 0.8), sample(2, 5, 0.4), sample(3, 1, -0.6)];
        let ratings = summarize_by_rating(&records);

        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].rating, 5);
        assert_eq!(ratings[0].count, 2);
        assert!((ratings[0].avg_score - 0.6).abs() < 1e-9);
        assert_eq!(ratings[1].rating, 1);
    }

    #[test]
    fn disagreements_rank_by_score_magnitude() {
        let records = vec![
            sample(1, 5, 0.9),
            sample(2, 5, -0.3),
            sample(3, 1, 0.7),
            sample(4, 3, -0.95),
        ];
        let ids: Vec<i32> = strongest_disagreements(&records)
            .iter()
            .map(|r| r.review.review_id)
            .collect();

        assert_eq!(ids, vec![4, 3, 2]);
    }

    #[test]
    fn report_lists_every_section() {
        let records = vec![sample(1, 5, 0.8), sample(2, 1, 0.7), sample(3, 7, 0.0)];
        let summary = enrich::summarize(Uuid::new_v4(), &records);
        let report = build_report("reviews.csv", &summary, &records);

        assert!(report.contains("# Customer Review Sentiment Report"));
        assert!(report.contains("- Positive: 2 reviews (66.7%)"));
        assert!(report.contains("- 0.5 to 1.0: 2 reviews (66.7%)"));
        assert!(report.contains("- 7 stars: 1 reviews"));
        assert!(report.contains("1 reviews carried a rating outside 1-5"));
        assert!(report.contains("Review 2 (product 9, 1 stars, score 0.700, Mixed Negative)"));
    }

    #[test]
    fn empty_batch_report() {
        let summary = enrich::summarize(Uuid::new_v4(), &[]);
        let report = build_report("postgres", &summary, &[]);

        assert!(report.contains("No reviews in this batch."));
        assert!(report.contains("Text sentiment agreed with every rating."));
    }
}
