use anyhow::Context;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set to the reviews Postgres instance")?;
        let max_connections = parse_max_connections(
            std::env::var("REVIEWS_DB_MAX_CONNECTIONS").ok().as_deref(),
        )?;

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

fn parse_max_connections(raw: Option<&str>) -> anyhow::Result<u32> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_MAX_CONNECTIONS),
        Some(value) => {
            let parsed: u32 = value
                .parse()
                .with_context(|| format!("REVIEWS_DB_MAX_CONNECTIONS must be a number, got {value:?}"))?;
            anyhow::ensure!(parsed > 0, "REVIEWS_DB_MAX_CONNECTIONS must be at least 1");
            Ok(parsed)
        }
    }
}
