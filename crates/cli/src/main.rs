use std::io;

use anyhow::Context;
use storekeep_infra::{StoreConfig, open_file_stores};

fn main() -> anyhow::Result<()> {
    storekeep_observability::init();

    let config = StoreConfig::from_env();
    tracing::info!(
        products = %config.products_path().display(),
        sales = %config.sales_path().display(),
        "opening stores"
    );

    let (_products, sales) = open_file_stores(&config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    storekeep_cli::run(&sales, stdin.lock(), &mut stdout).context("terminal I/O failed")?;

    Ok(())
}
