//! Package manifest version bumps (package.json and its lock file).

use std::io::Write;
use std::path::{Path, PathBuf};

use semver::Version;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ManifestError;

/// A JSON manifest loaded into memory, keys in file order.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let json: Value =
            serde_json::from_str(&content).map_err(|source| ManifestError::InvalidJson {
                path: path.to_path_buf(),
                source,
            })?;

        match json {
            Value::Object(fields) => Ok(Self {
                path: path.to_path_buf(),
                fields,
            }),
            _ => Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// The `version` field parsed as `major.minor.patch`.
    pub fn version(&self) -> Result<Version, ManifestError> {
        let raw = self
            .fields
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| ManifestError::MissingVersion {
                path: self.path.clone(),
            })?;

        Version::parse(raw).map_err(|source| ManifestError::InvalidVersion {
            path: self.path.clone(),
            version: raw.to_string(),
            source,
        })
    }

    /// Replace the `version` field, keeping its position.
    pub fn set_version(&mut self, version: &Version) {
        self.fields
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Write back pretty-printed (two-space indent) with a trailing newline.
    ///
    /// The file is replaced atomically from a temp file in the same directory.
    pub fn save(&self) -> Result<(), ManifestError> {
        let write_err = |source: std::io::Error| ManifestError::Write {
            path: self.path.clone(),
            source,
        };

        let output = serde_json::to_string_pretty(&self.fields)
            .map_err(|e| write_err(std::io::Error::other(e)))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
        // Temp files are created owner-only; keep the manifest's mode.
        if let Ok(metadata) = std::fs::metadata(&self.path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }
        // npm uses trailing newline
        temp.write_all(format!("{}\n", output).as_bytes())
            .map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// Read the `version` field of a manifest.
pub fn read_version(path: &Path) -> Result<Version, ManifestError> {
    Manifest::load(path)?.version()
}

/// `major.minor.patch` -> `major.minor.(patch + 1)`, or `None` when the
/// patch number cannot be incremented.
///
/// Pre-release and build metadata are dropped.
pub fn bump_patch(version: &Version) -> Option<Version> {
    let patch = version.patch.checked_add(1)?;
    Some(Version::new(version.major, version.minor, patch))
}

/// Set the `version` field of a manifest, leaving every other field as is.
pub fn update_version(path: &Path, version: &Version) -> Result<(), ManifestError> {
    let mut manifest = Manifest::load(path)?;
    manifest.set_version(version);
    manifest.save()
}

/// Bump the patch version of `primary` and write the same version to `lock`.
///
/// Both files are loaded and validated before either is written.
pub fn bump_manifests(primary: &Path, lock: &Path) -> Result<Version, ManifestError> {
    let mut primary_manifest = Manifest::load(primary)?;
    let mut lock_manifest = Manifest::load(lock)?;

    let current = primary_manifest.version()?;
    let next = bump_patch(&current).ok_or_else(|| ManifestError::VersionOverflow {
        path: primary.to_path_buf(),
        version: current.to_string(),
    })?;
    debug!("Bumping {} -> {}", current, next);

    primary_manifest.set_version(&next);
    lock_manifest.set_version(&next);

    primary_manifest.save()?;
    lock_manifest.save()?;

    Ok(next)
}
