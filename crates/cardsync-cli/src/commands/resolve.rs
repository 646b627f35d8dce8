use std::path::Path;

use cardsync_core::snapshot::render_snapshot;
use cardsync_core::sync::{compare_collections, get_recommended_strategy, reconcile};
use cardsync_core::ResolutionStrategy;

use crate::cli::SnapshotArgs;
use crate::commands::common::{
    format_resolution_lines, load_profile, load_snapshot_pair, write_output,
};
use crate::error::CliError;

pub struct ResolveOptions<'a> {
    pub strategy: Option<ResolutionStrategy>,
    pub accept_recommended: bool,
    pub output: Option<&'a Path>,
    pub as_json: bool,
}

pub fn run_resolve(
    snapshots: &SnapshotArgs,
    options: &ResolveOptions<'_>,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let (server, client) = load_snapshot_pair(snapshots)?;
    let recommended = get_recommended_strategy(&compare_collections(&server, &client)?);
    let (_, profile) = load_profile(global_profile)?;

    let strategy = select_strategy(
        options.strategy,
        options.accept_recommended,
        profile.default_strategy,
        recommended,
    )?;
    let outcome = reconcile(&server, &client, strategy)?;

    if options.as_json {
        return write_output(&serde_json::to_string_pretty(&outcome)?, options.output);
    }

    if options.output.is_some() {
        println!("Resolved with {strategy}");
        for line in format_resolution_lines(&outcome.resolutions) {
            println!("{line}");
        }
    }
    write_output(&render_snapshot(&outcome.merged)?, options.output)
}

/// Pick the strategy to resolve with.
///
/// The recommendation is only used when the caller accepts it explicitly;
/// a profile default counts as an explicit choice.
pub fn select_strategy(
    explicit: Option<ResolutionStrategy>,
    accept_recommended: bool,
    profile_default: Option<ResolutionStrategy>,
    recommended: ResolutionStrategy,
) -> Result<ResolutionStrategy, CliError> {
    if let Some(strategy) = explicit {
        return Ok(strategy);
    }
    if accept_recommended {
        return Ok(recommended);
    }
    profile_default.ok_or(CliError::StrategyRequired(recommended))
}
