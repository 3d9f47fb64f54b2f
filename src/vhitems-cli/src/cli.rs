//! CLI argument definitions for vhitems

use clap::Parser;
use std::path::PathBuf;

use vhitems::{
    ExtractOptions, DEFAULT_LOCALIZATION_DUMP, DEFAULT_LOCALIZATION_PATH, DEFAULT_OUTPUT,
    DEFAULT_PATTERN, DEFAULT_PREFAB_DIR,
};

#[derive(Parser, Debug)]
#[command(name = "vhitems")]
#[command(version)]
#[command(
    about = "Extract Valheim item data from unpacked Unity assets within ASSET_ROOT and write them to OUTPUT"
)]
pub struct Cli {
    /// Root of the exported Unity project
    #[arg(default_value = ".", env = "VHITEMS_ASSET_ROOT")]
    pub asset_root: PathBuf,

    /// Destination CSV file
    #[arg(default_value = DEFAULT_OUTPUT, env = "VHITEMS_OUTPUT")]
    pub output: PathBuf,

    /// Show per-file results and resolved paths
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write the localization table as CSV
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_LOCALIZATION_DUMP
    )]
    pub dump_localization: Option<PathBuf>,

    /// Localization table, relative to ASSET_ROOT
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOCALIZATION_PATH)]
    pub localization: PathBuf,

    /// Prefab directory, relative to ASSET_ROOT
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PREFAB_DIR)]
    pub prefab_dir: PathBuf,

    /// File name pattern for item prefabs
    #[arg(long, value_name = "GLOB", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Skip items with malformed fields instead of aborting
    #[arg(long)]
    pub lenient: bool,
}

impl Cli {
    /// Parse arguments, treating a leading `/?` as `--help`
    pub fn parse_args() -> Self {
        let args = std::env::args_os().enumerate().map(|(i, arg)| {
            if i == 1 && arg == "/?" {
                "--help".into()
            } else {
                arg
            }
        });
        Self::parse_from(args)
    }

    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            asset_root: self.asset_root.clone(),
            localization_path: self.localization.clone(),
            prefab_dir: self.prefab_dir.clone(),
            pattern: self.pattern.clone(),
            output: self.output.clone(),
            localization_dump: self.dump_localization.clone(),
            lenient: self.lenient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["vhitems"]).unwrap();
        let options = cli.options();
        assert_eq!(options.asset_root, PathBuf::from("."));
        assert_eq!(options.output, PathBuf::from("SharedItemData.csv"));
        assert_eq!(options.pattern, "*.prefab");
        assert!(options.localization_dump.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_positional_paths() {
        let cli = Cli::try_parse_from(["vhitems", "/export", "out/items.csv", "-v"]).unwrap();
        assert_eq!(cli.asset_root, PathBuf::from("/export"));
        assert_eq!(cli.output, PathBuf::from("out/items.csv"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_dump_localization_flag() {
        let cli = Cli::try_parse_from(["vhitems", "--dump-localization"]).unwrap();
        assert_eq!(cli.dump_localization, Some(PathBuf::from("Localization.csv")));

        let cli = Cli::try_parse_from(["vhitems", "--dump-localization=loc.csv"]).unwrap();
        assert_eq!(cli.dump_localization, Some(PathBuf::from("loc.csv")));
    }

    #[test]
    fn test_help_is_not_an_error() {
        let err = Cli::try_parse_from(["vhitems", "--help"]).unwrap_err();
        assert_eq!(err.exit_code(), 0);
    }
}
