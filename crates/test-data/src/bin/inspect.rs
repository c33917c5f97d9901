//! Prints the tables, columns and school accounts of a store
//!
//! Run with:
//! ```
//! DATABASE_URL=sqlite://school_records.db cargo run -p test-data --bin inspect
//! ```

use test_data::config::SeedConfig;
use test_data::db::Inspector;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = SeedConfig::from_env()?;
    config.validate_database_url()?;

    // Inspection never creates the store.
    let pool = match records::store::connect(&config.database_url, false).await {
        Ok(pool) => pool,
        Err(err) => {
            println!("Error occurred: {err}");
            return Ok(());
        }
    };

    match Inspector::new(pool.clone()).report().await {
        Ok(report) => print!("{report}"),
        Err(err) => println!("Error occurred: {err}"),
    }

    pool.close().await;
    Ok(())
}
