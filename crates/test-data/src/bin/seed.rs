//! Default seed script - inserts a semester and the sample school accounts
//!
//! Run with:
//! ```
//! DATABASE_URL=sqlite://school_records.db cargo run -p test-data --bin seed
//! ```
//!
//! Set `SEED_SHAPE=minimal` to write identity and name columns only.

use test_data::config::SeedConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;
    config.validate()?;
    let plan = config.plan()?;
    let mut rng = config.rng();

    // Store failures are reported, not propagated: the run still exits cleanly.
    let pool = match records::store::connect(&config.database_url, config.init_schema).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!("Error occurred: {err}");
            return Ok(());
        }
    };

    tracing::info!("Connected to database");

    match plan.build(&pool, &mut rng).await {
        Ok(outcome) => {
            let report = outcome.report;
            tracing::info!("Data inserted successfully.");
            if let Some(semester) = &report.semester {
                tracing::info!("  Semester: {} ({})", semester.label, semester.id);
            }
            tracing::info!("  Accounts inserted: {}", report.inserted);
            match report.totals {
                Some(totals) => {
                    tracing::info!("Verification:");
                    if let Some(semesters) = totals.semesters {
                        tracing::info!("- Semesters in database: {}", semesters);
                    }
                    tracing::info!("- School accounts in database: {}", totals.accounts);
                }
                None => tracing::warn!("Verification skipped: totals could not be read"),
            }
        }
        Err(err) => tracing::error!("Error occurred: {err}"),
    }

    pool.close().await;
    Ok(())
}
