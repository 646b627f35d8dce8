use std::path::Path;

use cardsync_core::snapshot::{load_queue, load_snapshot, render_snapshot};
use cardsync_core::sync::{
    apply_pending_changes, clear_applied_changes, create_pending_change, merge_pending_changes,
    sort_pending_changes,
};
use cardsync_core::{ChangeAction, ChangeId, PendingChange};

use crate::cli::{ChangeArgs, QueueCommands};
use crate::commands::common::{
    format_change_lines, load_profile, normalize_card_id, save_queue, write_output,
};
use crate::error::CliError;

pub fn run_queue(
    command: QueueCommands,
    queue_path: &Path,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    match command {
        QueueCommands::Add(change) => {
            run_queue_change(ChangeAction::Add, &change, queue_path, global_profile)
        }
        QueueCommands::Remove(change) => {
            run_queue_change(ChangeAction::Remove, &change, queue_path, global_profile)
        }
        QueueCommands::Update(change) => {
            run_queue_change(ChangeAction::Update, &change, queue_path, global_profile)
        }
        QueueCommands::List { json } => run_queue_list(json, queue_path),
        QueueCommands::Compact => run_queue_compact(queue_path),
        QueueCommands::Apply { snapshot, output } => {
            run_queue_apply(&snapshot, output.as_deref(), queue_path)
        }
        QueueCommands::Clear { ids } => run_queue_clear(&ids, queue_path),
    }
}

pub fn run_queue_change(
    action: ChangeAction,
    args: &ChangeArgs,
    queue_path: &Path,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let card_id = normalize_card_id(&args.card_id)?;
    let (_, profile) = load_profile(global_profile)?;
    let device_id = profile.device_id().ok_or(CliError::DeviceNotConfigured)?;

    let change = create_pending_change(
        card_id,
        args.variant,
        action,
        args.quantity,
        args.expected,
        device_id,
    );
    let id = change.id;

    let mut changes = load_queue(queue_path)?;
    changes.push(change);
    save_queue(queue_path, &changes)?;

    tracing::debug!(queued = changes.len(), "Queued pending change");
    println!("{id}");
    Ok(())
}

pub fn run_queue_list(as_json: bool, queue_path: &Path) -> Result<(), CliError> {
    let changes = sort_pending_changes(&load_queue(queue_path)?);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&changes)?);
    } else if changes.is_empty() {
        println!("No pending changes.");
    } else {
        for line in format_change_lines(&changes) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn run_queue_compact(queue_path: &Path) -> Result<(), CliError> {
    let changes = load_queue(queue_path)?;
    let compacted = merge_pending_changes(&changes);
    save_queue(queue_path, &compacted)?;
    println!(
        "Compacted {} changes into {}",
        changes.len(),
        compacted.len()
    );
    Ok(())
}

pub fn run_queue_apply(
    snapshot_path: &Path,
    output_path: Option<&Path>,
    queue_path: &Path,
) -> Result<(), CliError> {
    let snapshot = load_snapshot(snapshot_path)?;
    let changes = load_queue(queue_path)?;
    let local = apply_pending_changes(&snapshot, &changes)?;
    write_output(&render_snapshot(&local)?, output_path)
}

pub fn run_queue_clear(ids: &[String], queue_path: &Path) -> Result<(), CliError> {
    let changes = load_queue(queue_path)?;
    let remaining = if ids.is_empty() {
        Vec::new()
    } else {
        let applied = parse_change_ids(ids, &changes)?;
        clear_applied_changes(&changes, &applied)
    };

    save_queue(queue_path, &remaining)?;
    println!(
        "Cleared {} changes, {} remaining",
        changes.len() - remaining.len(),
        remaining.len()
    );
    Ok(())
}

/// Parse change ids, requiring each to be present in the queue
pub fn parse_change_ids(
    ids: &[String],
    changes: &[PendingChange],
) -> Result<Vec<ChangeId>, CliError> {
    ids.iter()
        .map(|raw| {
            let raw = raw.trim();
            raw.parse::<ChangeId>()
                .ok()
                .filter(|id| changes.iter().any(|change| change.id == *id))
                .ok_or_else(|| CliError::QueueChangeNotFound(raw.to_string()))
        })
        .collect()
}
