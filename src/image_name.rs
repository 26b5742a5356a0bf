//! Disk file-name classification.
//!
//! ESXi keeps several `.vmdk` files per VM: the base descriptor
//! (`debian-9-x64.vmdk`), flat/delta extents holding the raw blocks
//! (`debian-9-x64-flat.vmdk`, `debian-9-x64-000002-delta.vmdk`), and
//! numbered snapshot descriptors (`debian-9-x64-000002.vmdk`). Only
//! descriptors are valid clone sources. Classification is a pure function
//! of the file name: the stem's trailing dash-separated token decides the
//! role, and every name gets exactly one role.

use std::path::Path;

/// Markers of flat/delta extent files. An extent stores raw data for a
/// base or snapshot descriptor and is never cloned directly.
const SIDECAR_MARKERS: [&str; 2] = ["flat", "delta"];

/// A generation suffix is a dash followed by exactly this many ASCII
/// digits at the end of the stem. A longer digit run is part of the VM
/// name, not a generation.
const GENERATION_DIGITS: usize = 6;

/// Role a disk file plays within a VM directory, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskRole {
    /// Primary disk descriptor; the clone source when no snapshot is
    /// requested.
    Base,
    /// Descriptor of a numbered snapshot generation.
    Snapshot(u32),
    /// Flat or delta extent; never a clone source.
    Sidecar,
}

/// Classify a file name carrying the given extension, or `None` if the
/// extension does not match.
///
/// The sidecar marker wins over the generation suffix: a snapshot delta
/// such as `vm-000002-delta.vmdk` is a sidecar, not a snapshot.
pub fn classify(file_name: &str, extension: &str) -> Option<DiskRole> {
    let path = Path::new(file_name);
    if path.extension().and_then(|e| e.to_str()) != Some(extension) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;

    if let Some((_, tail)) = stem.rsplit_once('-') {
        if SIDECAR_MARKERS.contains(&tail) {
            return Some(DiskRole::Sidecar);
        }
        if let Some(generation) = parse_generation(tail) {
            return Some(DiskRole::Snapshot(generation));
        }
    }

    Some(DiskRole::Base)
}

fn parse_generation(tail: &str) -> Option<u32> {
    if tail.len() != GENERATION_DIGITS || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Base descriptors ──

    #[test]
    fn plain_name_is_base() {
        assert_eq!(classify("debian-9-x64.vmdk", "vmdk"), Some(DiskRole::Base));
    }

    #[test]
    fn name_without_dashes_is_base() {
        assert_eq!(classify("disk.vmdk", "vmdk"), Some(DiskRole::Base));
    }

    #[test]
    fn seven_digit_tail_is_base() {
        // Only exactly six digits form a generation suffix
        assert_eq!(classify("vm-1000001.vmdk", "vmdk"), Some(DiskRole::Base));
    }

    #[test]
    fn five_digit_tail_is_base() {
        assert_eq!(classify("vm-00001.vmdk", "vmdk"), Some(DiskRole::Base));
    }

    // ── Snapshot descriptors ──

    #[test]
    fn six_digit_tail_is_snapshot() {
        assert_eq!(
            classify("debian-9-x64-000002.vmdk", "vmdk"),
            Some(DiskRole::Snapshot(2))
        );
    }

    #[test]
    fn snapshot_zero_parses() {
        assert_eq!(classify("vm-000000.vmdk", "vmdk"), Some(DiskRole::Snapshot(0)));
    }

    #[test]
    fn snapshot_max_generation_parses() {
        assert_eq!(
            classify("vm-999999.vmdk", "vmdk"),
            Some(DiskRole::Snapshot(999_999))
        );
    }

    // ── Sidecars ──

    #[test]
    fn flat_extent_is_sidecar() {
        assert_eq!(
            classify("debian-9-x64-flat.vmdk", "vmdk"),
            Some(DiskRole::Sidecar)
        );
    }

    #[test]
    fn snapshot_delta_is_sidecar() {
        // The delta marker wins over the generation suffix
        assert_eq!(
            classify("debian-9-x64-000002-delta.vmdk", "vmdk"),
            Some(DiskRole::Sidecar)
        );
    }

    // ── Extension filtering ──

    #[test]
    fn wrong_extension_is_none() {
        assert_eq!(classify("debian-9-x64.vmx", "vmdk"), None);
        assert_eq!(classify("debian-9-x64.vmdk", "vmx"), None);
        assert_eq!(classify("no-extension", "vmdk"), None);
    }

    #[test]
    fn config_names_classify_too() {
        assert_eq!(classify("debian-9-x64.vmx", "vmx"), Some(DiskRole::Base));
        assert_eq!(
            classify("debian-9-x64-000001.vmx", "vmx"),
            Some(DiskRole::Snapshot(1))
        );
    }
}
