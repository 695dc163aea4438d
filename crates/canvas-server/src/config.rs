//! Server configuration from CLI arguments and environment variables.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "canvas-server")]
#[command(about = "Local persistence API for the ai-canvas whiteboard")]
pub struct Args {
    /// Directory holding saved canvases (env: CANVAS_DATA_DIR)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Logseq pages directory to mirror summaries into, ~ expanded
    /// (env: LOGSEQ_PAGES_DIR). Sync is disabled when unset.
    #[arg(long)]
    pub logseq_pages: Option<String>,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3030")]
    pub listen: String,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub logseq_pages_dir: Option<PathBuf>,
    pub listen: String,
    pub verbose: bool,
}

impl Config {
    /// Merge CLI arguments with environment variables. Flags win over
    /// env vars; the data dir falls back to `./data`.
    pub fn resolve(args: Args) -> Self {
        let data_dir = args
            .data
            .or_else(|| std::env::var("CANVAS_DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("data"));

        let logseq_pages_dir = args
            .logseq_pages
            .or_else(|| std::env::var("LOGSEQ_PAGES_DIR").ok())
            .map(|raw| expand_tilde(&raw));

        Self {
            data_dir,
            logseq_pages_dir,
            listen: args.listen,
            verbose: args.verbose,
        }
    }
}

/// Expand ~ or ~/ prefix to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"))
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path))
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> Args {
        Args {
            data: None,
            logseq_pages: None,
            listen: "127.0.0.1:3030".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn test_data_flag_wins_over_default() {
        let mut args = bare_args();
        args.data = Some(PathBuf::from("/tmp/canvases"));
        assert_eq!(
            Config::resolve(args).data_dir,
            PathBuf::from("/tmp/canvases")
        );
    }

    #[test]
    fn test_logseq_flag_expands_tilde() {
        let mut args = bare_args();
        args.logseq_pages = Some("/graphs/main/pages".to_string());
        assert_eq!(
            Config::resolve(args).logseq_pages_dir,
            Some(PathBuf::from("/graphs/main/pages"))
        );
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/Logseq/pages"), home.join("Logseq/pages"));
            assert_eq!(expand_tilde("~"), home);
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
