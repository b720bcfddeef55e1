use crate::models::{SentimentBucket, SentimentCategory};

pub const POSITIVE_TEXT_THRESHOLD: f64 = 0.05;
pub const NEGATIVE_TEXT_THRESHOLD: f64 = -0.05;

/// Blends the text polarity score with the star rating.
///
/// Ratings are not validated: anything above 3 is treated as high and
/// anything below 3 as low.
pub fn classify(score: f64, rating: i32) -> SentimentCategory {
    if score > POSITIVE_TEXT_THRESHOLD {
        match rating {
            r if r >= 4 => SentimentCategory::Positive,
            3 => SentimentCategory::MixedPositive,
            _ => SentimentCategory::MixedNegative,
        }
    } else if score < NEGATIVE_TEXT_THRESHOLD {
        match rating {
            r if r <= 2 => SentimentCategory::Negative,
            3 => SentimentCategory::MixedNegative,
            _ => SentimentCategory::MixedPositive,
        }
    } else {
        match rating {
            r if r >= 4 => SentimentCategory::Positive,
            r if r <= 2 => SentimentCategory::Negative,
            _ => SentimentCategory::Neutral,
        }
    }
}

pub fn bucket(score: f64) -> SentimentBucket {
    if score >= 0.5 {
        SentimentBucket::StrongPositive
    } else if score >= 0.0 {
        SentimentBucket::MildPositive
    } else if score >= -0.5 {
        SentimentBucket::MildNegative
    } else {
        SentimentBucket::StrongNegative
    }
}

pub fn rating_in_range(rating: i32) -> bool {
    (1..=5).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SentimentCategory::*;

    #[test]
    fn positive_text_follows_rating() {
        assert_eq!(classify(0.6, 5), Positive);
        assert_eq!(classify(0.6, 4), Positive);
        assert_eq!(classify(0.6, 3), MixedPositive);
        assert_eq!(classify(0.6, 2), MixedNegative);
        assert_eq!(classify(0.6, 1), MixedNegative);
    }

    #[test]
    fn negative_text_follows_rating() {
        assert_eq!(classify(-0.6, 1), Negative);
        assert_eq!(classify(-0.6, 2), Negative);
        assert_eq!(classify(-0.6, 3), MixedNegative);
        assert_eq!(classify(-0.6, 4), MixedPositive);
        assert_eq!(classify(-0.6, 5), MixedPositive);
    }

    #[test]
    fn neutral_text_defers_to_rating() {
        assert_eq!(classify(0.0, 5), Positive);
        assert_eq!(classify(0.0, 3), Neutral);
        assert_eq!(classify(0.0, 1), Negative);
    }

    #[test]
    fn thresholds_are_part_of_neutral_regime() {
        assert_eq!(classify(0.05, 3), Neutral);
        assert_eq!(classify(-0.05, 3), Neutral);
        assert_eq!(classify(0.0501, 3), MixedPositive);
        assert_eq!(classify(-0.0501, 3), MixedNegative);
    }

    #[test]
    fn out_of_range_ratings_fall_through() {
        assert_eq!(classify(0.6, 9), Positive);
        assert_eq!(classify(0.6, 0), MixedNegative);
        assert_eq!(classify(-0.6, -3), Negative);
        assert_eq!(classify(-0.6, 42), MixedPositive);
        assert_eq!(classify(0.0, i32::MAX), Positive);
        assert_eq!(classify(0.0, i32::MIN), Negative);
        assert!(!rating_in_range(0));
        assert!(!rating_in_range(6));
        assert!(rating_in_range(3));
    }

    #[test]
    fn classify_is_total_and_deterministic() {
        for step in 0..=200 {
            let score = -1.0 + step as f64 * 0.01;
            for rating in -2..=8 {
                let first = classify(score, rating);
                assert!(SentimentCategory::ALL.contains(&first));
                assert_eq!(first, classify(score, rating));
            }
        }
    }

    #[test]
    fn buckets_match_band_edges() {
        assert_eq!(bucket(1.0), SentimentBucket::StrongPositive);
        assert_eq!(bucket(0.5), SentimentBucket::StrongPositive);
        assert_eq!(bucket(0.49), SentimentBucket::MildPositive);
        assert_eq!(bucket(0.0), SentimentBucket::MildPositive);
        assert_eq!(bucket(-0.0001), SentimentBucket::MildNegative);
        assert_eq!(bucket(-0.5), SentimentBucket::MildNegative);
        assert_eq!(bucket(-0.5001), SentimentBucket::StrongNegative);
        assert_eq!(bucket(-1.0), SentimentBucket::StrongNegative);
    }

    #[test]
    fn bucket_labels_are_dashboard_strings() {
        assert_eq!(bucket(0.5).label(), "0.5 to 1.0");
        assert_eq!(bucket(0.49).label(), "0.0 to 0.49");
        assert_eq!(bucket(-0.0001).label(), "-0.49 to 0.0");
        assert_eq!(bucket(-0.75).label(), "-1.0 to -0.5");
    }

    #[test]
    fn buckets_are_ordered_and_gap_free() {
        let mut previous = bucket(1.0);
        for step in 0..=2000 {
            let score = 1.0 - step as f64 * 0.001;
            let current = bucket(score);
            assert!(current >= previous, "band went backwards at {score}");
            previous = current;
        }
        assert_eq!(previous, SentimentBucket::StrongNegative);
    }
}
