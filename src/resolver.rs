//! Locating VM files inside the datastore volume tree.
//!
//! The datastore is laid out as `volume-root/<volume-id>/<vm-name>/<files>`,
//! but nothing here assumes a fixed depth: every file under the root is
//! enumerated and matched on its full path string, with the VM name treated
//! as a literal substring. Names must already be filesystem-safe; no
//! escaping is performed.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CloneError;
use crate::image_name::{self, DiskRole};
use crate::paths;

/// Every file path under `root`, in unspecified traversal order.
fn volume_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

/// Find the single disk descriptor to clone for `name`.
///
/// With no snapshot this is the base descriptor; with `Some(n)` it is the
/// generation-`n` snapshot descriptor. Flat/delta extents are never
/// selected. `Ok(None)` means nothing matched, a normal negative result
/// rather than a fault. More than one match is a
/// [`CloneError::AmbiguousMatch`] instead of a traversal-order dependent
/// pick.
pub fn resolve_source_image(
    root: &Path,
    name: &str,
    snapshot: Option<u32>,
) -> Result<Option<PathBuf>, CloneError> {
    let wanted = match snapshot {
        Some(generation) => DiskRole::Snapshot(generation),
        None => DiskRole::Base,
    };
    select_unique(root, name, image_kind(snapshot), move |file_name| {
        image_name::classify(file_name, paths::DISK_EXT) == Some(wanted)
    })
}

/// Find the single `.vmx` configuration file for `name`.
///
/// Config files carry no snapshot or sidecar concept; a generation-suffixed
/// `.vmx` name is rejected just like a generation-suffixed disk name.
pub fn resolve_source_config(root: &Path, name: &str) -> Result<Option<PathBuf>, CloneError> {
    select_unique(root, name, "config file".to_string(), |file_name| {
        image_name::classify(file_name, paths::CONFIG_EXT) == Some(DiskRole::Base)
    })
}

/// Derive the destination disk path from a resolved source path.
///
/// Every occurrence of `name` in the containing directory is replaced with
/// `new_name`; the VM name typically appears as a directory segment, not
/// just in the file name. The fixed file name `disk.vmdk` is appended.
/// Existence of the result is not checked here.
pub fn resolve_destination_path(source_image: &Path, name: &str, new_name: &str) -> PathBuf {
    let directory = source_image.parent().unwrap_or_else(|| Path::new(""));
    let renamed = directory.to_string_lossy().replace(name, new_name);
    PathBuf::from(renamed).join(paths::CLONE_DISK_NAME)
}

/// Human-readable description of the disk being resolved, used in errors.
pub fn image_kind(snapshot: Option<u32>) -> String {
    match snapshot {
        Some(generation) => format!("snapshot {generation:06} disk image"),
        None => "base disk image".to_string(),
    }
}

/// Scan the tree and keep paths that contain `name` and whose file name
/// satisfies `matches`. Zero hits is `Ok(None)`, one is the answer, more
/// is ambiguous.
fn select_unique(
    root: &Path,
    name: &str,
    kind: String,
    matches: impl Fn(&str) -> bool,
) -> Result<Option<PathBuf>, CloneError> {
    let mut candidates: Vec<PathBuf> = volume_files(root)
        .into_iter()
        .filter(|path| path.to_string_lossy().contains(name))
        .filter(|path| {
            path.file_name()
                .and_then(|f| f.to_str())
                .is_some_and(|f| matches(f))
        })
        .collect();

    match candidates.len() {
        0 => Ok(None),
        1 => Ok(Some(candidates.remove(0))),
        _ => {
            candidates.sort();
            Err(CloneError::AmbiguousMatch {
                kind,
                name: name.to_string(),
                candidates: candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            })
        }
    }
}
