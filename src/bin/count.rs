use clap::Parser;
use isic_prep::inventory;
use isic_prep::DatasetLayout;

/// Report image and label counts for the extracted ISIC 2018 dataset
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let _args = Args::parse();

    inventory::report(&DatasetLayout::default());
}
