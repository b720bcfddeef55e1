use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod enrich;
mod export;
mod lexicon;
mod models;
mod report;
mod scorer;
mod sentiment;

use crate::lexicon::Lexicon;
use crate::models::ReviewRecord;
use crate::scorer::LexiconScorer;

#[derive(Parser)]
#[command(name = "review-sentiment")]
#[command(about = "Enrich customer reviews with blended sentiment labels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Read reviews from a CSV file instead of Postgres
    #[arg(long, conflicts_with_all = ["product", "since"])]
    input: Option<PathBuf>,
    /// Only reviews for this product
    #[arg(long)]
    product: Option<i32>,
    /// Only reviews on or after this date (YYYY-MM-DD)
    #[arg(long)]
    since: Option<NaiveDate>,
    /// VADER-format lexicon file replacing the built-in vocabulary
    #[arg(long)]
    lexicon: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load sample reviews
    Seed,
    /// Import reviews from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Score, classify and bucket reviews, writing the enriched CSV
    Enrich {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value = "fact_customer_reviews_with_sentiment.csv")]
        out: PathBuf,
        /// Also write the run summary as JSON
        #[arg(long)]
        summary_json: Option<PathBuf>,
        /// Enriched rows to print once the output is written
        #[arg(long, default_value_t = 5)]
        preview: usize,
    },
    /// Generate a markdown sentiment report
    Report {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value = "sentiment_report.md")]
        out: PathBuf,
    },
}

async fn connect() -> anyhow::Result<PgPool> {
    let config = config::DbConfig::from_env()?;
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to Postgres")
}

async fn load_reviews(source: &SourceArgs) -> anyhow::Result<(Vec<ReviewRecord>, String)> {
    match &source.input {
        Some(path) => Ok((export::read_reviews_csv(path)?, path.display().to_string())),
        None => {
            let pool = connect().await?;
            let reviews = db::fetch_reviews(&pool, source.product, source.since).await?;
            Ok((reviews, "marketing_analytics.fact_customer_reviews".to_string()))
        }
    }
}

fn build_scorer(path: Option<&Path>) -> anyhow::Result<LexiconScorer> {
    let lexicon = match path {
        Some(path) => Lexicon::from_path(path)?,
        None => Lexicon::default(),
    };
    info!(entries = lexicon.len(), "lexicon loaded");
    Ok(LexiconScorer::new(lexicon))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            let inserted = db::seed(&pool).await?;
            println!("Seeded {inserted} reviews.");
        }
        Commands::Import { csv } => {
            let pool = connect().await?;
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} reviews from {}.", csv.display());
        }
        Commands::Enrich {
            source,
            out,
            summary_json,
            preview,
        } => {
            let scorer = build_scorer(source.lexicon.as_deref())?;
            let (reviews, _) = load_reviews(&source).await?;
            let (enriched, summary) = enrich::enrich_reviews(&scorer, &reviews)?;

            export::write_enriched_csv(&out, &enriched)?;
            if let Some(path) = summary_json {
                let json = serde_json::to_string_pretty(&summary)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }

            for record in enriched.iter().take(preview) {
                println!(
                    "{} | {} stars | {:.4} | {} | {}",
                    record.review.review_id,
                    record.review.rating,
                    record.sentiment_score,
                    record.sentiment_category,
                    record.sentiment_bucket
                );
            }
            println!("Enriched {} reviews into {}.", summary.total, out.display());
        }
        Commands::Report { source, out } => {
            let scorer = build_scorer(source.lexicon.as_deref())?;
            let (reviews, label) = load_reviews(&source).await?;
            let (enriched, summary) = enrich::enrich_reviews(&scorer, &reviews)?;

            let report = report::build_report(&label, &summary, &enriched);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
