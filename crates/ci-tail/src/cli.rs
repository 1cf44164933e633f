//! Command line interface

use anyhow::{Context, Result};
use ci_tail_core::LineFragment;
use clap::{Parser, Subcommand};
use percent_encoding::percent_decode_str;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "ci-tail", version, about = "Follow CI build logs as they grow")]
pub struct Cli {
    /// Config file to use instead of .ci-tail.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CI server base URL (overrides config and CI_TAIL_SERVER)
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Watch the build list (default)
    Dashboard,

    /// Open the log viewer for one build
    View {
        /// Build ID, or a shared link such as http://ci/build/42/output#line17
        build: String,

        /// Line to select once it has streamed in
        #[arg(long)]
        line: Option<usize>,
    },

    /// Stream a build log to stdout without the viewer
    Tail {
        build: String,

        /// Byte offset to start from
        #[arg(long, default_value_t = 0)]
        from: u64,

        /// Strip ANSI colour codes
        #[arg(long)]
        plain: bool,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Dashboard)
    }
}

/// Build to open and the line to select in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReference {
    pub build_id: String,
    pub fragment: Option<LineFragment>,
}

impl BuildReference {
    /// Read a bare build ID or a shared link
    ///
    /// Links look like `{server}/build/{id}/output#line17`; `--line`
    /// wins over the link's fragment.
    pub fn parse(arg: &str, line: Option<usize>) -> Result<Self> {
        let fragment = LineFragment::from_url(arg)
            .with_context(|| format!("Invalid line reference in '{}'", arg))?;

        let build_id = match Url::parse(arg) {
            Ok(url) if url.has_host() => build_id_from_link(&url)
                .with_context(|| format!("Invalid build ID in '{}'", arg))?
                .unwrap_or_default(),
            _ => arg.split_once('#').map_or(arg, |(id, _)| id).to_string(),
        };
        if build_id.is_empty() {
            anyhow::bail!("No build ID in '{}'", arg);
        }

        Ok(Self {
            build_id,
            fragment: line.map(LineFragment::new).or(fragment),
        })
    }
}

/// The percent-decoded path segment after `build`, if the link has one
fn build_id_from_link(url: &Url) -> Result<Option<String>> {
    let Some(mut segments) = url.path_segments() else {
        return Ok(None);
    };
    if segments.find(|segment| *segment == "build").is_none() {
        return Ok(None);
    }
    match segments.next() {
        Some(segment) => Ok(Some(percent_decode_str(segment).decode_utf8()?.into_owned())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_dashboard() {
        let cli = Cli::parse_from(["ci-tail"]);
        assert_eq!(cli.command(), Command::Dashboard);
    }

    #[test]
    fn test_view_with_line() {
        let cli = Cli::parse_from(["ci-tail", "--server", "http://ci.test", "view", "42", "--line", "7"]);
        assert_eq!(cli.server.as_deref(), Some("http://ci.test"));
        assert_eq!(
            cli.command(),
            Command::View {
                build: "42".to_string(),
                line: Some(7)
            }
        );
    }

    #[test]
    fn test_tail_from_offset() {
        let cli = Cli::parse_from(["ci-tail", "tail", "42", "--from", "128", "--plain"]);
        assert_eq!(
            cli.command(),
            Command::Tail {
                build: "42".to_string(),
                from: 128,
                plain: true
            }
        );
    }

    #[test]
    fn test_build_reference_from_id() {
        let reference = BuildReference::parse("1700-abc", None).unwrap();
        assert_eq!(reference.build_id, "1700-abc");
        assert_eq!(reference.fragment, None);
    }

    #[test]
    fn test_build_reference_from_shared_link() {
        let reference =
            BuildReference::parse("http://ci.test/build/42/output#line17", None).unwrap();
        assert_eq!(reference.build_id, "42");
        assert_eq!(reference.fragment, Some(LineFragment::new(17)));

        let reference =
            BuildReference::parse("http://ci.test/build/42/output#line17", Some(3)).unwrap();
        assert_eq!(reference.fragment, Some(LineFragment::new(3)));
    }

    #[test]
    fn test_build_reference_decodes_escaped_id() {
        let reference =
            BuildReference::parse("http://ci.test/build/a%2Fb/output#line3", None).unwrap();
        assert_eq!(reference.build_id, "a/b");
        assert_eq!(reference.fragment, Some(LineFragment::new(3)));

        let reference =
            BuildReference::parse("https://ci.test/ci/build/nightly%20run/output", None).unwrap();
        assert_eq!(reference.build_id, "nightly run");

        // A bare ID is taken as typed
        let reference = BuildReference::parse("a%2Fb", None).unwrap();
        assert_eq!(reference.build_id, "a%2Fb");
        let reference = BuildReference::parse("nightly:42", None).unwrap();
        assert_eq!(reference.build_id, "nightly:42");
    }

    #[test]
    fn test_build_reference_errors() {
        assert!(BuildReference::parse("http://ci.test/build/42/output#top", None).is_err());
        assert!(BuildReference::parse("http://ci.test/build/", None).is_err());
        assert!(BuildReference::parse("http://ci.test/dashboard", None).is_err());
        assert!(BuildReference::parse("http://ci.test/build/%FF/output", None).is_err());
    }
}
