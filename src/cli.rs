//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use arxiv_saver_core::ReferenceFormat;

/// Save arXiv paper PDFs and reference lists with normalized filenames.
///
/// Filenames follow the pattern "{id} {title}.pdf"; reference lists are
/// saved alongside as "- references.csv" or "- references.json" artifacts.
#[derive(Parser, Debug)]
#[command(name = "arxiv-saver")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save the paper's PDF under a normalized filename
    Pdf(SaveArgs),
    /// Save the paper's reference list as CSV or JSON
    Refs(RefsArgs),
    /// Probe a paper's abstract page and print the extracted metadata
    Info(InfoArgs),
    /// Show the running download counter
    Stats(StatsArgs),
}

#[derive(clap::Args, Debug)]
pub struct SaveArgs {
    /// arXiv abs/pdf URL, or a bare identifier like 2508.14825
    pub url: String,

    /// Page title hint (for example the copied browser tab title)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Directory artifacts are saved into
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct RefsArgs {
    /// arXiv abs/pdf URL, or a bare identifier like 2508.14825
    pub url: String,

    /// Page title hint (for example the copied browser tab title)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Directory artifacts are saved into
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output format for the reference list
    #[arg(short, long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,
}

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    /// arXiv abs/pdf URL, or a bare identifier like 2508.14825
    pub url: String,
}

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Directory whose download counter to show
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Reference output format as a CLI value.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Json,
}

impl FormatArg {
    pub fn as_format(self) -> ReferenceFormat {
        match self {
            Self::Csv => ReferenceFormat::Csv,
            Self::Json => ReferenceFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_pdf_subcommand_parses() {
        let args = Args::try_parse_from(["arxiv-saver", "pdf", "https://arxiv.org/abs/2508.14825"])
            .unwrap();
        match args.command {
            Command::Pdf(cmd) => {
                assert_eq!(cmd.url, "https://arxiv.org/abs/2508.14825");
                assert_eq!(cmd.title, None);
                assert_eq!(cmd.output_dir, PathBuf::from("."));
            }
            other => panic!("expected pdf command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_pdf_title_hint_flag() {
        let args = Args::try_parse_from([
            "arxiv-saver",
            "pdf",
            "2508.14825",
            "--title",
            "[2508.14825] Some Title",
        ])
        .unwrap();
        match args.command {
            Command::Pdf(cmd) => assert_eq!(cmd.title.as_deref(), Some("[2508.14825] Some Title")),
            other => panic!("expected pdf command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_refs_default_format_is_csv() {
        let args = Args::try_parse_from(["arxiv-saver", "refs", "2508.14825"]).unwrap();
        match args.command {
            Command::Refs(cmd) => assert_eq!(cmd.format, FormatArg::Csv),
            other => panic!("expected refs command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_refs_json_format() {
        let args =
            Args::try_parse_from(["arxiv-saver", "refs", "2508.14825", "--format", "json"])
                .unwrap();
        match args.command {
            Command::Refs(cmd) => assert_eq!(cmd.format, FormatArg::Json),
            other => panic!("expected refs command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_verbose_flag_after_subcommand() {
        let args = Args::try_parse_from(["arxiv-saver", "stats", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);
    }

    #[test]
    fn test_cli_missing_url_rejected() {
        let result = Args::try_parse_from(["arxiv-saver", "pdf"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["arxiv-saver", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_format_rejected() {
        let result = Args::try_parse_from(["arxiv-saver", "refs", "x", "--format", "xml"]);
        assert!(result.is_err());
    }
}
