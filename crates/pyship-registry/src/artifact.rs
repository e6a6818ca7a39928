//! Built-distribution location.

use std::path::{Path, PathBuf};

use semver::Version;
use tracing::debug;

use crate::RegistryResult;

/// Finds the built distributions for `name`/`version` in `dist_dir`.
///
/// Matches sdists (`.tar.gz`) and wheels (`.whl`) whose file name starts
/// with the package name (PEP 503 normalization, so `zarr-checksum` and
/// `zarr_checksum` are the same package) followed by the exact version.
/// A missing dist directory yields an empty list, not an error; deciding
/// whether that is fatal is the caller's business.
///
/// # Errors
///
/// Returns an error if the dist directory cannot be read.
pub fn locate_artifacts(
    dist_dir: &Path,
    name: &str,
    version: &Version,
) -> RegistryResult<Vec<PathBuf>> {
    if !dist_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut artifacts = Vec::new();
    for entry in std::fs::read_dir(dist_dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if matches_distribution(file_name, name, version) {
            artifacts.push(entry.path());
        }
    }
    artifacts.sort();

    debug!(
        dist_dir = %dist_dir.display(),
        name,
        %version,
        count = artifacts.len(),
        "located artifacts"
    );
    Ok(artifacts)
}

/// Checks whether a dist file belongs to `name`/`version`.
fn matches_distribution(file_name: &str, name: &str, version: &Version) -> bool {
    let Some(stem) = file_name
        .strip_suffix(".tar.gz")
        .or_else(|| file_name.strip_suffix(".whl"))
    else {
        return false;
    };

    // Wheel stems carry compatibility tags after the version; legacy
    // sdist names may keep dashes inside the package name. Try every
    // name/rest split.
    let version = version.to_string();
    for (index, _) in stem.match_indices('-') {
        let (package, rest) = (&stem[..index], &stem[index + 1..]);
        if normalize(package) == normalize(name)
            && (rest == version || rest.strip_prefix(&version).is_some_and(|r| r.starts_with('-')))
        {
            return true;
        }
    }
    false
}

/// PEP 503 name normalization: lowercase, runs of `-`, `_`, `.` collapse
/// to a single `-`.
fn normalize(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut previous_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !previous_separator {
                normalized.push('-');
            }
            previous_separator = true;
        } else {
            normalized.extend(c.to_lowercase());
            previous_separator = false;
        }
    }
    normalized
}
