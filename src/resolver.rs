//! Turning user-typed paths into remote entries.

use tracing::{debug, warn};

use crate::client::DriveClient;
use crate::error::{DriveError, Result};
use crate::models::FileEntity;
use crate::path;
use crate::session::Session;
use crate::wildcard;

/// Outcome of a batch lookup.
#[derive(Debug, Default)]
pub struct BatchLookup {
    /// Entries that exist on the drive, in input order.
    pub resolved: Vec<FileEntity>,
    /// Canonical paths that could not be looked up.
    pub failed: Vec<String>,
}

/// Look up every path on `drive_id`, resolved against that drive's
/// working directory.
///
/// A path that fails to resolve is recorded in `failed` and the batch
/// carries on. Only an empty input is an error.
pub async fn file_info_by_paths<S: AsRef<str>>(
    session: &Session,
    client: &dyn DriveClient,
    drive_id: &str,
    paths: &[S],
) -> Result<BatchLookup> {
    if paths.is_empty() {
        return Err(DriveError::NoPathsGiven);
    }

    let mut lookup = BatchLookup::default();

    for user_path in paths {
        let absolute = session.path_join(drive_id, user_path.as_ref());
        match client.lookup_by_path(drive_id, &absolute).await {
            Ok(entity) => lookup.resolved.push(entity),
            Err(e) => {
                debug!(path = %absolute, error = %e, "lookup failed");
                lookup.failed.push(absolute);
            }
        }
    }

    Ok(lookup)
}

/// Expand shell patterns into canonical paths on `drive_id`.
///
/// Only the final segment of a pattern is matched, against a listing of its
/// parent directory. Inputs without wildcards are passed through resolved
/// but unchecked. A listing failure drops that pattern.
pub async fn match_paths<S: AsRef<str>>(
    session: &Session,
    client: &dyn DriveClient,
    drive_id: &str,
    patterns: &[S],
) -> Vec<String> {
    let mut matched = Vec::new();

    for pattern in patterns {
        let absolute = session.path_join(drive_id, pattern.as_ref());
        let (parent, name) = path::split(&absolute);

        if !wildcard::is_pattern(&name) {
            matched.push(absolute);
            continue;
        }
        if wildcard::is_pattern(&parent) {
            warn!(pattern = %absolute, "wildcards are only supported in the last path segment");
            continue;
        }

        match client.list_by_path(drive_id, &parent).await {
            Ok(entries) => {
                matched.extend(
                    entries
                        .into_iter()
                        .filter(|entry| wildcard::matches(&name, &entry.name))
                        .map(|entry| path::join(&parent, &entry.name)),
                );
            }
            Err(e) => warn!(dir = %parent, error = %e, "could not list directory"),
        }
    }

    matched
}
