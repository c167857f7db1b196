use clap::Parser;
use std::path::PathBuf;

/// Returns the version string, with the git hash appended for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "linedit", bin_name = "linedit", version = get_version())]
#[command(
    about = "Line-oriented multi-document text editor",
    long_about = "Reads editing commands from standard input, one per line. Type `help` at the prompt for the command list."
)]
pub struct Cli {
    /// Data directory holding config.json and the workspace state [env: LINEDIT_HOME]
    #[arg(long, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Workspace state file (default: <home>/workspace.json)
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Start with an empty workspace instead of restoring the last one
    #[arg(long)]
    pub no_restore: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "linedit",
            "--home",
            "/data",
            "--state",
            "/data/s.json",
            "--no-restore",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/data")));
        assert_eq!(cli.state, Some(PathBuf::from("/data/s.json")));
        assert!(cli.no_restore);
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["linedit", "file.txt"]).is_err());
    }
}
