use anyhow::Context;
use clap::Parser;
use isic_prep::acquire::acquire;
use isic_prep::inventory;
use isic_prep::utils::http::HttpFetcher;
use isic_prep::DatasetLayout;

/// Download and extract the ISIC 2018 Task 3 archives into data/raw
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let _args = Args::parse();

    let layout = DatasetLayout::default();
    let fetcher = HttpFetcher::new();
    let mut stdin = std::io::stdin().lock();

    let outcome = acquire(&fetcher, &layout, &mut stdin)
        .await
        .context("could not prepare data directories")?;

    let summary = outcome.value();
    println!(
        "\nDownloaded {}, skipped {} existing, extracted {}, removed {}",
        summary.downloads.downloaded,
        summary.downloads.skipped_existing,
        summary.extracted,
        summary.removed
    );
    if outcome.is_degraded() {
        println!("Finished with {} problem(s):", outcome.warnings().len());
        for warning in outcome.warnings() {
            println!("  - {}", warning);
        }
    }

    inventory::report(&layout);
    Ok(())
}
