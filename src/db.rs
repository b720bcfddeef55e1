use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use crate::export;
use crate::models::ReviewRecord;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

async fn insert_review(pool: &PgPool, review: &ReviewRecord) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO marketing_analytics.fact_customer_reviews
        (review_id, customer_id, product_id, review_date, rating, review_text)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (review_id) DO NOTHING
        "#,
    )
    .bind(review.review_id)
    .bind(review.customer_id)
    .bind(review.product_id)
    .bind(review.review_date)
    .bind(review.rating)
    .bind(&review.review_text)
    .execute(pool)
    .await
    .with_context(|| format!("failed to insert review {}", review.review_id))?;

    Ok(result.rows_affected() > 0)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<usize> {
    let reviews = vec![
        (1, 77, 18, (2023, 12, 23), 3, "Average experience, nothing special."),
        (2, 80, 19, (2024, 12, 25), 5, "The quality is top-notch."),
        (3, 50, 13, (2025, 1, 26), 4, "Five stars for the quick delivery."),
        (4, 78, 15, (2025, 4, 21), 3, "Good quality, but could be cheaper."),
        (5, 64, 2, (2023, 7, 16), 3, "Average experience, nothing special."),
        (6, 11, 5, (2024, 3, 3), 1, "Terrible, it broke within a week. Total waste of money!"),
        (7, 34, 5, (2024, 5, 18), 5, "Not bad at all, I would buy again."),
        (8, 29, 11, (2024, 8, 9), 2, "Really disappointed with the fit."),
        (9, 42, 7, (2025, 2, 14), 4, "Honestly the worst customer service I have dealt with."),
        (10, 91, 9, (2025, 3, 1), 1, "Absolutely love it, works perfectly."),
    ];

    let mut inserted = 0usize;
    for (review_id, customer_id, product_id, (year, month, day), rating, text) in reviews {
        let review = ReviewRecord {
            review_id,
            customer_id,
            product_id,
            review_date: NaiveDate::from_ymd_opt(year, month, day).context("invalid date")?,
            rating,
            review_text: text.to_string(),
        };
        if insert_review(pool, &review).await? {
            inserted += 1;
        }
    }

    Ok(inserted)
}

/// Fetches reviews ordered by `review_id`, optionally narrowed to one product
/// and to reviews on or after `since`.
pub async fn fetch_reviews(
    pool: &PgPool,
    product_id: Option<i32>,
    since: Option<NaiveDate>,
) -> anyhow::Result<Vec<ReviewRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT review_id, customer_id, product_id, review_date, rating, review_text
        FROM marketing_analytics.fact_customer_reviews
        WHERE ($1::INTEGER IS NULL OR product_id = $1)
          AND ($2::DATE IS NULL OR review_date >= $2)
        ORDER BY review_id
        "#,
    )
    .bind(product_id)
    .bind(since)
    .fetch_all(pool)
    .await
    .context("failed to fetch reviews")?;

    let mut reviews = Vec::with_capacity(rows.len());
    for row in rows {
        reviews.push(ReviewRecord {
            review_id: row.try_get("review_id")?,
            customer_id: row.try_get("customer_id")?,
            product_id: row.try_get("product_id")?,
            review_date: row.try_get("review_date")?,
            rating: row.try_get("rating")?,
            review_text: row
                .try_get::<Option<String>, _>("review_text")?
                .unwrap_or_default(),
        });
    }

    debug!(rows = reviews.len(), "fetched reviews");
    Ok(reviews)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    let reviews = export::read_reviews_csv(csv_path)?;
    let mut inserted = 0usize;

    for review in &reviews {
        if insert_review(pool, review).await? {
            inserted += 1;
        }
    }

    info!(inserted, skipped = reviews.len() - inserted, "imported reviews");
    Ok(inserted)
}
