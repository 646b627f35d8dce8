use std::env;
use std::path::{Path, PathBuf};

use cardsync_core::snapshot::{load_snapshot, render_queue};
use cardsync_core::sync::CollectionComparison;
use cardsync_core::{CollectionCard, ConflictResolution, PendingChange};
use chrono::{TimeZone, Utc};

use crate::cli::SnapshotArgs;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub fn load_snapshot_pair(
    snapshots: &SnapshotArgs,
) -> Result<(Vec<CollectionCard>, Vec<CollectionCard>), CliError> {
    let server = load_snapshot(&snapshots.server)?;
    let client = load_snapshot(&snapshots.client)?;
    Ok((server, client))
}

pub fn resolve_queue_path(cli_queue_path: Option<PathBuf>) -> PathBuf {
    cli_queue_path
        .or_else(|| env::var_os("CARDSYNC_QUEUE_PATH").map(PathBuf::from))
        .unwrap_or_else(default_queue_path)
}

pub fn default_queue_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardsync")
        .join("pending-changes.json")
}

pub fn save_queue(path: &Path, changes: &[PendingChange]) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_queue(changes)?)?;
    Ok(())
}

/// Write to `output_path` when given, else print to stdout
pub fn write_output(rendered: &str, output_path: Option<&Path>) -> Result<(), CliError> {
    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }
    Ok(())
}

pub fn load_profile(global_profile: Option<&str>) -> Result<(String, CliProfile), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let name = config.resolve_profile_name(global_profile);
    let profile = config.profile(&name).cloned().unwrap_or_default();
    Ok((name, profile))
}

pub fn normalize_card_id(card_id: &str) -> Result<String, CliError> {
    let trimmed = card_id.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyCardId);
    }
    Ok(trimmed.to_string())
}

pub fn format_comparison_lines(comparison: &CollectionComparison) -> Vec<String> {
    let summary = comparison.summary;
    let mut lines = vec![format!(
        "in sync: {}  conflicts: {}  server only: {}  client only: {}",
        summary.in_sync, summary.conflicts, summary.only_on_server, summary.only_on_client
    )];

    for conflict in &comparison.conflicts {
        lines.push(format!(
            "~ {}: server {}, client {}",
            conflict.key(),
            conflict.server_quantity,
            conflict.client_quantity
        ));
    }
    for card in &comparison.only_on_server {
        lines.push(format!("- {}: {} (server only)", card.key(), card.quantity));
    }
    for card in &comparison.only_on_client {
        lines.push(format!("+ {}: {} (client only)", card.key(), card.quantity));
    }

    lines
}

pub fn format_resolution_lines(resolutions: &[ConflictResolution]) -> Vec<String> {
    resolutions
        .iter()
        .map(|resolution| {
            let outcome = if resolution.keeps_card() {
                resolution.resolved_quantity.to_string()
            } else {
                "removed".to_string()
            };
            format!(
                "{}: server {}, client {} -> {}",
                resolution.key(),
                resolution.server_quantity,
                resolution.client_quantity,
                outcome
            )
        })
        .collect()
}

pub fn format_change_lines(changes: &[PendingChange]) -> Vec<String> {
    changes
        .iter()
        .map(|change| {
            let expected = change
                .expected_server_quantity
                .map_or_else(String::new, |quantity| format!(" (expected {quantity})"));
            format!(
                "{}  {}  {}  {} {} {} ({}){}",
                change.id,
                format_timestamp(change.timestamp),
                change.device_id,
                change.action,
                change.quantity,
                change.card_id,
                change.variant,
                expected
            )
        })
        .collect()
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map_or_else(
            || timestamp_ms.to_string(),
            |datetime| datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        )
}
