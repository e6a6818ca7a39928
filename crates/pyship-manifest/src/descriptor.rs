//! The on-disk project descriptor.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use semver::Version;
use tempfile::NamedTempFile;
use toml_edit::{DocumentMut, TableLike, value};
use tracing::debug;

use crate::{ManifestError, ManifestResult};

/// Default descriptor file name.
pub const DESCRIPTOR_FILE_NAME: &str = "pyproject.toml";

/// Where the name/version pair lives inside the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VersionSlot {
    /// PEP 621 `[project]` table.
    Project,
    /// Legacy `[tool.poetry]` table.
    ToolPoetry,
}

/// A parsed project descriptor.
///
/// Holds the full document so a version write changes nothing but the
/// version value. The descriptor is always re-read from disk via
/// [`ProjectDescriptor::load`] at the start of a phase, never cached
/// across phases.
#[derive(Debug)]
pub struct ProjectDescriptor {
    path: PathBuf,
    document: DocumentMut,
    slot: VersionSlot,
    name: String,
    version: Version,
}

impl ProjectDescriptor {
    /// Loads the descriptor from `<root>/pyproject.toml`.
    ///
    /// # Errors
    ///
    /// See [`ProjectDescriptor::load`].
    pub fn load_from_root(root: impl AsRef<Path>) -> ManifestResult<Self> {
        Self::load(root.as_ref().join(DESCRIPTOR_FILE_NAME))
    }

    /// Loads a descriptor from the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No file exists at `path`
    /// - The file is not valid TOML
    /// - Neither `[project]` nor `[tool.poetry]` carries a name and version
    /// - The version does not parse as semver
    pub fn load(path: impl Into<PathBuf>) -> ManifestResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(ManifestError::NotFound(path));
        }
        let file = path.display().to_string();

        let content = std::fs::read_to_string(&path)?;
        let document: DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
            ManifestError::Parse {
                file: file.clone(),
                reason: e.to_string(),
            }
        })?;

        let slot = [VersionSlot::Project, VersionSlot::ToolPoetry]
            .into_iter()
            .find(|slot| package_table(&document, *slot).is_some())
            .ok_or_else(|| ManifestError::VersionMissing(file.clone()))?;
        let table = package_table(&document, slot).ok_or_else(|| {
            ManifestError::VersionMissing(file.clone())
        })?;

        let name = table
            .get("name")
            .and_then(|item| item.as_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ManifestError::NameMissing(file.clone()))?
            .to_string();

        let version_str = table
            .get("version")
            .and_then(|item| item.as_str())
            .ok_or_else(|| ManifestError::VersionMissing(file.clone()))?;

        let version =
            Version::parse(version_str).map_err(|e| ManifestError::MalformedVersion {
                file: file.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            path,
            document,
            slot,
            name,
            version,
        })
    }

    /// Returns the descriptor path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current version.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Replaces the version value, leaving everything else untouched.
    pub fn set_version(&mut self, version: &Version) {
        if let Some(table) = package_table_mut(&mut self.document, self.slot) {
            if let Some(item) = table.get_mut("version") {
                *item = value(version.to_string());
            }
        }
        self.version = version.clone();
    }

    /// Persists the descriptor via atomic replace.
    ///
    /// The document is written to a temp file in the descriptor's
    /// directory and renamed over the original, so a failed write never
    /// leaves a partially written descriptor behind.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Write`] if the temp file cannot be
    /// created, written, or renamed into place.
    pub fn save(&self) -> ManifestResult<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let write_err = |source: std::io::Error| ManifestError::Write {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(self.document.to_string().as_bytes())
            .map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|e| write_err(e.error))?;

        debug!(path = %self.path.display(), version = %self.version, "persisted descriptor");
        Ok(())
    }
}

/// Returns the table holding the name/version pair, if present.
fn package_table(document: &DocumentMut, slot: VersionSlot) -> Option<&dyn TableLike> {
    match slot {
        VersionSlot::Project => document.get("project")?.as_table_like(),
        VersionSlot::ToolPoetry => document
            .get("tool")?
            .as_table_like()?
            .get("poetry")?
            .as_table_like(),
    }
}

/// Mutable counterpart of [`package_table`].
fn package_table_mut(
    document: &mut DocumentMut,
    slot: VersionSlot,
) -> Option<&mut dyn TableLike> {
    match slot {
        VersionSlot::Project => document.get_mut("project")?.as_table_like_mut(),
        VersionSlot::ToolPoetry => document
            .get_mut("tool")?
            .as_table_like_mut()?
            .get_mut("poetry")?
            .as_table_like_mut(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PEP621: &str = r#"# build configuration
[build-system]
requires = ["hatchling"]
build-backend = "hatchling.build"

[project]
name = "zarr-checksum"
version = "1.2.3"
description = "Checksum tooling"
dependencies = [
    "click >= 8",
]

[tool.ruff]
line-length = 100  # keep in sync with CI
"#;

    const POETRY: &str = r#"[tool.poetry]
name = "zarr-checksum"
version = "0.4.1"
description = "Checksum tooling"

[tool.poetry.dependencies]
python = "^3.9"
"#;

    fn write_descriptor(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(DESCRIPTOR_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_pep621() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, PEP621);

        let descriptor = ProjectDescriptor::load(&path).unwrap();
        assert_eq!(descriptor.name(), "zarr-checksum");
        assert_eq!(descriptor.version(), &Version::new(1, 2, 3));
        assert_eq!(descriptor.path(), path);
    }

    #[test]
    fn test_load_poetry() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, POETRY);

        let descriptor = ProjectDescriptor::load(path).unwrap();
        assert_eq!(descriptor.name(), "zarr-checksum");
        assert_eq!(descriptor.version(), &Version::new(0, 4, 1));
    }

    #[test]
    fn test_load_from_root() {
        let dir = TempDir::new().unwrap();
        write_descriptor(&dir, PEP621);

        let descriptor = ProjectDescriptor::load_from_root(dir.path()).unwrap();
        assert_eq!(descriptor.version(), &Version::new(1, 2, 3));
    }

    #[test]
    fn test_load_prefers_project_table() {
        let dir = TempDir::new().unwrap();
        let both = format!("{PEP621}\n{POETRY}");
        let path = write_descriptor(&dir, &both);

        let descriptor = ProjectDescriptor::load(path).unwrap();
        assert_eq!(descriptor.version(), &Version::new(1, 2, 3));
    }

    #[test]
    fn test_load_not_found() {
        let dir = TempDir::new().unwrap();
        let result = ProjectDescriptor::load_from_root(dir.path());
        assert!(matches!(result, Err(ManifestError::NotFound(_))));
        // No file may be created by a failed load.
        assert!(!dir.path().join(DESCRIPTOR_FILE_NAME).exists());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, "[project\nname = oops");
        let result = ProjectDescriptor::load(path);
        assert!(matches!(result, Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn test_load_version_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, "[project]\nname = \"pkg\"\n");
        let result = ProjectDescriptor::load(path);
        assert!(matches!(result, Err(ManifestError::VersionMissing(_))));
    }

    #[test]
    fn test_load_no_package_table() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, "[build-system]\nrequires = []\n");
        let result = ProjectDescriptor::load(path);
        assert!(matches!(result, Err(ManifestError::VersionMissing(_))));
    }

    #[test]
    fn test_load_name_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, "[project]\nversion = \"1.0.0\"\n");
        let result = ProjectDescriptor::load(path);
        assert!(matches!(result, Err(ManifestError::NameMissing(_))));
    }

    #[test]
    fn test_load_empty_name() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, "[project]\nname = \"\"\nversion = \"1.0.0\"\n");
        let result = ProjectDescriptor::load(path);
        assert!(matches!(result, Err(ManifestError::NameMissing(_))));
    }

    #[test]
    fn test_load_malformed_version() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, "[project]\nname = \"pkg\"\nversion = \"1.2\"\n");
        let result = ProjectDescriptor::load(path);
        assert!(matches!(result, Err(ManifestError::MalformedVersion { .. })));
    }

    #[test]
    fn test_set_version_and_save_changes_only_the_version() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, PEP621);

        let mut descriptor = ProjectDescriptor::load(&path).unwrap();
        descriptor.set_version(&Version::new(1, 3, 0));
        descriptor.save().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let expected = PEP621.replace("version = \"1.2.3\"", "version = \"1.3.0\"");
        assert_eq!(written, expected);
    }

    #[test]
    fn test_set_version_and_save_poetry() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, POETRY);

        let mut descriptor = ProjectDescriptor::load(&path).unwrap();
        descriptor.set_version(&Version::parse("0.5.0-beta.1").unwrap());
        descriptor.save().unwrap();

        let reloaded = ProjectDescriptor::load(path).unwrap();
        assert_eq!(reloaded.version(), &Version::parse("0.5.0-beta.1").unwrap());
        assert_eq!(reloaded.name(), "zarr-checksum");
    }

    #[test]
    fn test_save_without_set_version_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = write_descriptor(&dir, PEP621);

        let descriptor = ProjectDescriptor::load(&path).unwrap();
        descriptor.save().unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), PEP621);
    }
}
