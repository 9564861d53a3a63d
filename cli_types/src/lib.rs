use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;

/// Command line of the benchmark post-processors.
///
/// Help and version flags are disabled: every flag other than the input
/// directory is rejected with a usage message and exit status 2.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Directory containing the `<variant>_<run>.txt` benchmark output files
    #[arg(short = 'd', long = "input-dir", visible_alias = "input_dir", value_name = "DIR")]
    pub input_dir: PathBuf,
}

impl Cli {
    /// Build the clap command under the given binary name.
    pub fn command_named(bin_name: &'static str) -> clap::Command {
        Self::command().name(bin_name).bin_name(bin_name)
    }

    /// Parse the process arguments, exiting with usage on any error.
    pub fn parse_named(bin_name: &'static str) -> Self {
        Self::parse_from_named(bin_name, std::env::args_os())
    }

    /// Parse the given arguments, exiting with usage on any error.
    pub fn parse_from_named<I, T>(bin_name: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from_named(bin_name, args).unwrap_or_else(|e| e.exit())
    }

    /// Parse the given arguments, returning the clap error instead of exiting.
    pub fn try_parse_from_named<I, T>(bin_name: &'static str, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut cmd = Self::command_named(bin_name);
        let matches = cmd.try_get_matches_from_mut(args)?;
        Self::from_arg_matches(&matches).map_err(|e| e.format(&mut cmd))
    }
}

#[cfg(test)]
mod test {
    use clap::error::ErrorKind;

    use super::*;

    const BIN: &str = "modbus-microbenchmark";

    #[test]
    fn verify_cli() {
        Cli::command_named(BIN).debug_assert()
    }

    #[test]
    fn short_flag() {
        let cli = Cli::try_parse_from_named(BIN, [BIN, "-d", "runs"]).unwrap();
        assert_eq!(cli.input_dir, PathBuf::from("runs"));
    }

    #[test]
    fn long_flag_and_alias() {
        let cli = Cli::try_parse_from_named(BIN, [BIN, "--input-dir", "runs"]).unwrap();
        assert_eq!(cli.input_dir, PathBuf::from("runs"));

        let cli = Cli::try_parse_from_named(BIN, [BIN, "--input_dir=runs"]).unwrap();
        assert_eq!(cli.input_dir, PathBuf::from("runs"));
    }

    #[test]
    fn missing_directory_is_usage_error() {
        let err = Cli::try_parse_from_named(BIN, [BIN]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn help_flag_is_rejected() {
        let err = Cli::try_parse_from_named(BIN, [BIN, "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Cli::try_parse_from_named(BIN, [BIN, "-d", "runs", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn stray_positional_is_rejected() {
        assert!(Cli::try_parse_from_named(BIN, [BIN, "-d", "runs", "extra"]).is_err());
    }
}
