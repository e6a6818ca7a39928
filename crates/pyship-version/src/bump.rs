//! Bump decision and version increment.

use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The size of the next release, as resolved by the host.
///
/// `None` means no release is occurring this cycle. The `Pre*` variants
/// either introduce or increment a prerelease suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bump {
    /// No release this cycle.
    None,
    /// Patch version bump (bug fixes).
    Patch,
    /// Minor version bump (new features).
    Minor,
    /// Major version bump (breaking changes).
    Major,
    /// Major bump with a fresh prerelease suffix.
    Premajor,
    /// Minor bump with a fresh prerelease suffix.
    Preminor,
    /// Patch bump with a fresh prerelease suffix.
    Prepatch,
    /// Increment (or introduce) the prerelease suffix.
    Prerelease,
}

impl Bump {
    /// Returns true if no release is occurring this cycle.
    #[must_use]
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns true for the prerelease family of bumps.
    #[must_use]
    pub fn is_prerelease(self) -> bool {
        matches!(
            self,
            Self::Premajor | Self::Preminor | Self::Prepatch | Self::Prerelease
        )
    }
}

impl std::fmt::Display for Bump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Premajor => "premajor",
            Self::Preminor => "preminor",
            Self::Prepatch => "prepatch",
            Self::Prerelease => "prerelease",
        };
        write!(f, "{s}")
    }
}

/// Error returned when a bump decision string is not recognized.
#[derive(Debug, Error)]
#[error("unknown bump decision: {0}")]
pub struct ParseBumpError(String);

impl FromStr for Bump {
    type Err = ParseBumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "premajor" => Ok(Self::Premajor),
            "preminor" => Ok(Self::Preminor),
            "prepatch" => Ok(Self::Prepatch),
            "prerelease" => Ok(Self::Prerelease),
            other => Err(ParseBumpError(other.to_string())),
        }
    }
}

/// Computes the version that follows `current` under the given bump.
///
/// Plain bumps increment their component, zero the lower components and
/// clear any prerelease. The `pre*` bumps attach `<preid>.0` (or a bare
/// `0` without a preid); `prerelease` increments the last numeric
/// component of an existing suffix, restarting at `<preid>.0` when the
/// configured preid differs from the current one. Build metadata is
/// dropped by every bump except `none`.
///
/// # Errors
///
/// Returns an error if `preid` is not a valid prerelease identifier.
pub fn next_version(
    current: &Version,
    bump: Bump,
    preid: Option<&str>,
) -> Result<Version, semver::Error> {
    let mut next = current.clone();
    next.build = BuildMetadata::EMPTY;

    match bump {
        Bump::None => return Ok(current.clone()),
        Bump::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        Bump::Minor => {
            next.minor += 1;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        Bump::Patch => {
            next.patch += 1;
            next.pre = Prerelease::EMPTY;
        }
        Bump::Premajor => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
            next.pre = initial_prerelease(preid)?;
        }
        Bump::Preminor => {
            next.minor += 1;
            next.patch = 0;
            next.pre = initial_prerelease(preid)?;
        }
        Bump::Prepatch => {
            next.patch += 1;
            next.pre = initial_prerelease(preid)?;
        }
        Bump::Prerelease => {
            if current.pre.is_empty() {
                next.patch += 1;
                next.pre = initial_prerelease(preid)?;
            } else {
                next.pre = incremented_prerelease(&current.pre, preid)?;
            }
        }
    }

    Ok(next)
}

/// Builds the first prerelease suffix for a fresh `pre*` bump.
fn initial_prerelease(preid: Option<&str>) -> Result<Prerelease, semver::Error> {
    match preid {
        Some(id) => Prerelease::new(&format!("{id}.0")),
        None => Prerelease::new("0"),
    }
}

/// Increments the last numeric component of an existing prerelease.
fn incremented_prerelease(
    pre: &Prerelease,
    preid: Option<&str>,
) -> Result<Prerelease, semver::Error> {
    let mut parts: Vec<String> = pre.as_str().split('.').map(str::to_string).collect();

    // A different configured preid restarts the prerelease sequence.
    if let Some(id) = preid {
        if parts.first().map(String::as_str) != Some(id) {
            return Prerelease::new(&format!("{id}.0"));
        }
    }

    let numeric = parts
        .iter()
        .rposition(|part| part.parse::<u64>().is_ok());

    match numeric {
        Some(index) => {
            let value: u64 = parts[index].parse().unwrap_or(0);
            parts[index] = (value + 1).to_string();
        }
        None => parts.push("0".to_string()),
    }

    Prerelease::new(&parts.join("."))
}
