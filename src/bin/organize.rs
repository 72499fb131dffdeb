use clap::Parser;
use isic_prep::organize::organize;
use isic_prep::{DatasetLayout, PrepError};

/// Build the binary melanoma manifest from the ISIC 2018 training labels
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let _args = Args::parse();

    match organize(&DatasetLayout::default()) {
        Ok(outcome) => {
            for warning in outcome.warnings() {
                log::warn!("{}", warning);
            }
            println!("\nManifest rows: {}", outcome.value().manifest_rows);
        }
        Err(e) => {
            eprintln!("\nERROR: {}", e);
            if let PrepError::MissingInput { .. } = e {
                eprintln!("Please download the dataset first using isic-download");
            }
            std::process::exit(1);
        }
    }
}
