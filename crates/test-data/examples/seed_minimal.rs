//! Example: Seed the four sample accounts with the minimal record shape.
//!
//! Writes only `id`, `school_id` and the name columns, with no semester,
//! into a fresh in-memory store and prints what the inspector sees.
//!
//! Run with:
//! ```
//! cargo run --example seed_minimal
//! ```

use test_data::builders::SeedPlan;
use test_data::db::Inspector;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pool = records::store::connect_in_memory().await?;

    let mut rng = rand::thread_rng();
    let outcome = SeedPlan::minimal()
        .with_init_schema(true)
        .build(&pool, &mut rng)
        .await?;

    tracing::info!("Seeded {} minimal accounts", outcome.report.inserted);

    print!("{}", Inspector::new(pool.clone()).report().await?);

    pool.close().await;
    Ok(())
}
