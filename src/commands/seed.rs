//! Seed command - Loads the reference catalog.

use crate::cli::args::SeedArgs;
use crate::commands::wiring;
use crate::config::Config;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let wiring = wiring::connect(&config).await?;

    let report = wiring.services.seed().seed(args.force).await?;

    if report.skipped {
        println!("Catalog already present. Use --force to reload it.");
    } else {
        println!(
            "Seeded {} institution(s), {} failed.",
            report.seeded, report.failed
        );
    }

    Ok(())
}
