//! Clone orchestration: validate, prepare the destination, copy the disk,
//! rewrite the config.
//!
//! The steps run strictly in sequence and fail fast: any error aborts the
//! clone and work already done is not rolled back. The destination-must-
//! not-exist check is the only guard against concurrent clones; it is racy
//! between check and create (known limitation).

use std::fs;
use std::path::{Path, PathBuf};

use crate::copier::ImageCopier;
use crate::error::CloneError;
use crate::paths;
use crate::resolver;

/// Disk format handed to the copy tool when none is requested.
pub const DEFAULT_DISK_FORMAT: &str = "thin";

/// Options for one clone invocation. Construct a fresh value per call;
/// there is no shared default state.
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// Clone from this snapshot generation instead of the base disk.
    pub snapshot: Option<u32>,
    /// Disk format handed to the copy tool.
    pub disk_format: String,
    /// Also copy the `.vmx`, substituting the VM name throughout.
    pub rewrite_config: bool,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            snapshot: None,
            disk_format: DEFAULT_DISK_FORMAT.to_string(),
            rewrite_config: true,
        }
    }
}

/// Paths produced by a successful clone.
#[derive(Debug)]
pub struct CloneOutcome {
    pub disk: PathBuf,
    pub config: Option<PathBuf>,
}

/// Clone the VM named `source` under `root` to a new VM named
/// `destination`.
pub fn clone_vm(
    root: &Path,
    source: &str,
    destination: &str,
    opts: &CloneOptions,
    copier: &dyn ImageCopier,
) -> Result<CloneOutcome, CloneError> {
    // Validating: pick the one source disk, derive the destination, and
    // refuse a destination directory that already exists. The copy tool
    // does not fail cleanly on an existing target.
    let source_disk = resolver::resolve_source_image(root, source, opts.snapshot)?
        .ok_or_else(|| CloneError::SourceNotFound {
            kind: resolver::image_kind(opts.snapshot),
            name: source.to_string(),
            root: root.display().to_string(),
        })?;
    tracing::debug!(path = %source_disk.display(), "resolved source disk");

    let destination_disk = resolver::resolve_destination_path(&source_disk, source, destination);
    let destination_dir = destination_disk
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .to_path_buf();

    if destination_dir.exists() {
        return Err(CloneError::DestinationConflict {
            path: destination_dir.display().to_string(),
        });
    }

    // DirectoryPreparing: the copy tool does not create parents itself.
    fs::create_dir_all(&destination_dir).map_err(|e| CloneError::Io {
        context: format!("creating directory {}", destination_dir.display()),
        source: e,
    })?;

    // Copying: synchronous, no timeout; a hung tool hangs the clone.
    copier.copy(&source_disk, &destination_disk, &opts.disk_format)?;

    // ConfigRewriting: plain text substitution, no .vmx parsing.
    let config = if opts.rewrite_config {
        Some(rewrite_config(root, source, destination, &destination_dir)?)
    } else {
        None
    };

    tracing::info!(vm = destination, disk = %destination_disk.display(), "clone complete");
    Ok(CloneOutcome {
        disk: destination_disk,
        config,
    })
}

/// Copy the source `.vmx` into `destination_dir`, replacing every literal
/// occurrence of `source` with `destination` in its contents.
fn rewrite_config(
    root: &Path,
    source: &str,
    destination: &str,
    destination_dir: &Path,
) -> Result<PathBuf, CloneError> {
    let source_config =
        resolver::resolve_source_config(root, source)?.ok_or_else(|| CloneError::SourceNotFound {
            kind: "config file".to_string(),
            name: source.to_string(),
            root: root.display().to_string(),
        })?;

    let contents = fs::read_to_string(&source_config).map_err(|e| CloneError::Io {
        context: format!("reading {}", source_config.display()),
        source: e,
    })?;

    let destination_config = destination_dir.join(paths::config_file_name(destination));
    fs::write(&destination_config, contents.replace(source, destination)).map_err(|e| {
        CloneError::Io {
            context: format!("writing {}", destination_config.display()),
            source: e,
        }
    })?;

    tracing::info!(path = %destination_config.display(), "config rewritten");
    Ok(destination_config)
}
