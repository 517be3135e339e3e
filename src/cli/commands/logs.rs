//! Audit log command.

use console::style;

use super::open_service;
use crate::config::Settings;

/// Print audit entries, oldest first.
pub async fn cmd_logs(settings: &Settings, limit: usize) -> anyhow::Result<()> {
    let service = open_service(settings)?;
    let logs = service.logs().await?;

    let skip = if limit == 0 {
        0
    } else {
        logs.len().saturating_sub(limit)
    };

    for entry in logs.iter().skip(skip) {
        println!(
            "{}  {:<16} {}",
            style(entry.timestamp.format("%Y-%m-%d %H:%M:%S")).dim(),
            entry.user_id,
            entry.action
        );
    }
    Ok(())
}
