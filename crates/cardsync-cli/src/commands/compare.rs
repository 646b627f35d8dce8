use cardsync_core::sync::{compare_collections, get_recommended_strategy};

use crate::cli::SnapshotArgs;
use crate::commands::common::{format_comparison_lines, load_snapshot_pair};
use crate::error::CliError;

pub fn run_compare(snapshots: &SnapshotArgs, as_json: bool) -> Result<(), CliError> {
    let (server, client) = load_snapshot_pair(snapshots)?;
    let comparison = compare_collections(&server, &client)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    for line in format_comparison_lines(&comparison) {
        println!("{line}");
    }
    if comparison.has_conflicts {
        println!(
            "Recommended strategy: {}",
            get_recommended_strategy(&comparison)
        );
    }
    Ok(())
}
