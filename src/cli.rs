use clap::Parser;
use std::path::PathBuf;

use crate::clone::DEFAULT_DISK_FORMAT;
use crate::copier::DEFAULT_TOOL;
use crate::paths::VOLUME_ROOT;

#[derive(Parser, Debug)]
#[command(name = "clonevm", about = "Clone an ESXi virtual machine on the datastore")]
pub struct Cli {
    /// Name of the VM to clone
    pub source: String,

    /// Name for the new VM
    pub destination: String,

    /// Clone from a snapshot generation instead of the base disk (e.g.: 1)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(..=999_999))]
    pub snapshot: Option<u32>,

    /// Disk format type (e.g.: zeroedthick, thin)
    #[arg(short, long, default_value = DEFAULT_DISK_FORMAT)]
    pub disk_format: String,

    /// Do not copy and rewrite the .vmx config file
    #[arg(long)]
    pub skip_config: bool,

    /// Volume store searched for VM files
    #[arg(long, default_value = VOLUME_ROOT)]
    pub volume_root: PathBuf,

    /// Disk copy tool binary
    #[arg(long, default_value = DEFAULT_TOOL)]
    pub copy_tool: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
