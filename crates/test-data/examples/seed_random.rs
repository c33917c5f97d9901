//! Example: Seed a semester with a batch of random accounts.
//!
//! Creates the schema if needed, then inserts one semester and 50 accounts
//! with generated names, courses and year levels. Every run draws fresh
//! school codes, so the example can be repeated against the same store.
//!
//! Run with:
//! ```
//! DATABASE_URL=sqlite://school_records.db cargo run --example seed_random
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;
use test_data::builders::SeedPlan;
use test_data::config::DEFAULT_DATABASE_URL;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Connect to database
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let pool = records::store::connect(&database_url, true).await?;

    tracing::info!("Connected to database");

    let mut rng = StdRng::from_entropy();
    let outcome = SeedPlan::extended()
        .with_semester(format!("Random batch {}", uuid::Uuid::new_v4()))
        .with_sample_accounts(false)
        .with_random_accounts(50)
        .with_init_schema(true)
        .build(&pool, &mut rng)
        .await?;

    tracing::info!("Scenario seeded successfully!");
    tracing::info!("  Accounts: {}", outcome.accounts.len());

    let active = outcome
        .accounts
        .iter()
        .filter(|a| a.profile.is_active)
        .count();
    tracing::info!("  Active accounts: {}", active);
    if let Some(totals) = outcome.report.totals {
        tracing::info!("  Accounts in database: {}", totals.accounts);
    }

    pool.close().await;
    Ok(())
}
