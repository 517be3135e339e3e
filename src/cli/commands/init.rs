//! Initialize command.

use console::style;

use crate::config::Settings;
use crate::repository::util::redact_url_password;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let ctx = settings.create_db_context();
    ctx.init_schema().await?;
    let existing = ctx.orders().count().await?;

    println!(
        "{} Initialized orderscan in {}",
        style("✓").green(),
        settings.data_dir.display()
    );
    println!(
        "  {} Database: {}",
        style("→").dim(),
        redact_url_password(&settings.database_url())
    );
    if existing > 0 {
        println!("  {} {} existing orders", style("→").dim(), existing);
    }

    Ok(())
}
