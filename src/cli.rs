use crate::app::engine::ViewerEngine;
use crate::domain::policy::BuildPolicy;
use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

/// Show dependencies of a Go package
#[derive(Debug, Parser)]
#[command(name = "gopkgviewer", version, long_about = None)]
pub struct Cli {
    /// Path to go.mod file to detect the module and its root directory
    #[arg(long, env = "GO_PKGVIEWER_GOMOD", default_value = "go.mod")]
    pub gomod: PathBuf,

    /// Address to listen on
    #[arg(long, env = "GO_PKGVIEWER_ADDR", default_value = "127.0.0.1:0")]
    pub addr: String,

    /// Don't open browser on start
    #[arg(long, env = "GO_PKGVIEWER_SKIP_BROWSER")]
    pub skip_browser: bool,

    /// Keep sibling imports after a resolution failure and never repeat a node
    #[arg(long, env = "GO_PKGVIEWER_CORRECTED")]
    pub corrected: bool,

    /// Serve the front end from this directory instead of the bundled page
    #[arg(long, env = "GO_PKGVIEWER_ASSETS")]
    pub assets: Option<PathBuf>,

    /// Print the graph as JSON and exit without serving
    #[arg(long)]
    pub dump: bool,
}

impl Cli {
    pub fn build_policy(&self) -> BuildPolicy {
        if self.corrected {
            BuildPolicy::corrected()
        } else {
            BuildPolicy::literal()
        }
    }
}

/// Write the `/data` payload to `out`, followed by a newline.
pub fn dump_graph(engine: &ViewerEngine, out: &mut impl Write) -> Result<()> {
    let snapshot = engine.snapshot();
    out.write_all(&snapshot.json)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gopkgviewer"]).unwrap();
        assert_eq!(cli.gomod, PathBuf::from("go.mod"));
        assert_eq!(cli.addr, "127.0.0.1:0");
        assert!(!cli.skip_browser);
        assert!(!cli.dump);
        assert_eq!(cli.build_policy(), BuildPolicy::literal());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "gopkgviewer",
            "--gomod",
            "sub/go.mod",
            "--addr",
            "0.0.0.0:39261",
            "--skip-browser",
            "--corrected",
            "--assets",
            "frontend/dist",
        ])
        .unwrap();
        assert_eq!(cli.gomod, PathBuf::from("sub/go.mod"));
        assert_eq!(cli.addr, "0.0.0.0:39261");
        assert!(cli.skip_browser);
        assert_eq!(cli.build_policy(), BuildPolicy::corrected());
        assert_eq!(cli.assets, Some(PathBuf::from("frontend/dist")));
    }
}
