//! Well-known datastore locations and derived file names.

/// Default volume store searched for VM files: `/vmfs/volumes`
pub const VOLUME_ROOT: &str = "/vmfs/volumes";

/// Extension of disk descriptor files.
pub const DISK_EXT: &str = "vmdk";

/// Extension of VM configuration files.
pub const CONFIG_EXT: &str = "vmx";

/// File name of every cloned disk. The clone never inherits the source's
/// file name.
pub const CLONE_DISK_NAME: &str = "disk.vmdk";

/// Configuration file name for a VM: `<name>.vmx`
pub fn config_file_name(name: &str) -> String {
    format!("{name}.vmx")
}
