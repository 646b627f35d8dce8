use std::path::PathBuf;

use cardsync_core::snapshot::load_snapshot;
use cardsync_core::sync::{calculate_checksum, checksums_match};

use crate::error::CliError;

pub fn run_checksum(paths: &[PathBuf]) -> Result<(), CliError> {
    let mut checksums = Vec::with_capacity(paths.len());
    for path in paths {
        let checksum = calculate_checksum(&load_snapshot(path)?);
        println!("{checksum:>11}  {}", path.display());
        checksums.push(checksum);
    }

    if let Some((first, rest)) = checksums.split_first() {
        if !rest.is_empty() {
            let all_match = rest.iter().all(|checksum| checksums_match(*first, *checksum));
            println!("{}", if all_match { "match" } else { "differ" });
        }
    }
    Ok(())
}
