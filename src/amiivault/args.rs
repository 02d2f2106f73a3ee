use std::path::PathBuf;
use std::sync::OnceLock;

use clap::{Parser, Subcommand};

fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{VERSION}")
        } else {
            format!("v{VERSION}\ndev: {GIT_HASH} {GIT_COMMIT_DATE}")
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "amiivault", version = get_version())]
#[command(about = "Virtual amiibo record store for NFC tag emulation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base directory override (default: $AMIIVAULT_HOME, then platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a record (created on first access)
    #[command(alias = "s")]
    Show {
        /// The amiibo identifier
        amiibo_id: String,
    },

    /// List every record in the store
    #[command(alias = "ls")]
    List,

    /// Print the record's tag UUID as hex, assigning one if needed
    Uuid {
        amiibo_id: String,

        /// Hand out a one-shot random UUID; nothing is persisted
        #[arg(long)]
        random: bool,
    },

    /// Print console registration info for a record
    Register {
        amiibo_id: String,

        /// Persona nickname (defaults to the configured one)
        #[arg(short, long)]
        nickname: Option<String>,
    },

    /// Create an application area on a record
    AreaCreate {
        amiibo_id: String,

        /// Area id, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_area_id)]
        area_id: u32,

        /// Payload as a hex string
        #[arg(long, value_name = "HEX", conflicts_with = "file")]
        data: Option<String>,

        /// Payload read from a file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Print an application area's payload as hex
    AreaRead {
        amiibo_id: String,

        /// Area id, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_area_id)]
        area_id: u32,

        /// Write the raw payload to a file instead of printing hex
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Replace an application area's payload
    AreaWrite {
        amiibo_id: String,

        /// Area id, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_area_id)]
        area_id: u32,

        /// Payload as a hex string
        #[arg(long, value_name = "HEX", conflicts_with = "file")]
        data: Option<String>,

        /// Payload read from a file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Print the record file path
    Path {
        amiibo_id: String,
    },

    /// Get or set configuration values
    Config {
        /// Configuration key (random-uuid, nickname)
        key: Option<String>,

        /// New value (omit to print the current one)
        value: Option<String>,
    },
}

fn parse_area_id(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("invalid area id '{s}' (expected decimal or 0x-prefixed hex)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_ids_parse_in_both_bases() {
        assert_eq!(parse_area_id("42"), Ok(42));
        assert_eq!(parse_area_id("0x10110E00"), Ok(0x10110E00));
        assert_eq!(parse_area_id("0X1f"), Ok(0x1f));
        assert!(parse_area_id("zz").is_err());
        assert!(parse_area_id("0x").is_err());
    }

    #[test]
    fn cli_parses_the_documented_surface() {
        Cli::try_parse_from(["amiivault", "show", "abc123"]).unwrap();
        Cli::try_parse_from(["amiivault", "s", "abc123"]).unwrap();
        Cli::try_parse_from(["amiivault", "ls"]).unwrap();
        Cli::try_parse_from(["amiivault", "uuid", "abc123", "--random"]).unwrap();
        Cli::try_parse_from(["amiivault", "register", "abc123", "-n", "Link"]).unwrap();
        Cli::try_parse_from([
            "amiivault",
            "area-create",
            "abc123",
            "0x1001",
            "--data",
            "deadbeef",
        ])
        .unwrap();
        Cli::try_parse_from(["amiivault", "area-read", "abc123", "4097"]).unwrap();
        Cli::try_parse_from(["amiivault", "path", "abc123", "--root", "/tmp/x"]).unwrap();
        Cli::try_parse_from(["amiivault", "config", "nickname", "Link"]).unwrap();
    }

    #[test]
    fn data_and_file_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "amiivault",
            "area-write",
            "abc123",
            "7",
            "--data",
            "00",
            "--file",
            "payload.bin",
        ]);
        assert!(result.is_err());
    }
}
