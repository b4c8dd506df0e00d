//! Command-line interface for the feed generator.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::formatter::Formatter;
use crate::manifest::FeedManifest;
use crate::xml::{inspect_feed, FeedSummary};

/// RSS feed generator - Render RSS 2.0 feeds from YAML manifests.
#[derive(Parser)]
#[command(name = "rss-feed-generator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a feed manifest to RSS 2.0 XML.
    Render {
        /// YAML feed manifest
        manifest: PathBuf,

        /// YAML file with the default filter table
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact XML regardless of the manifest
        #[arg(long)]
        compact: bool,
    },

    /// Check the structure of a rendered feed.
    Check {
        /// RSS file to inspect
        file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            manifest,
            config,
            output,
            compact,
        } => render_command(&manifest, config.as_deref(), output.as_deref(), compact),
        Commands::Check { file } => check_command(&file),
    }
}

/// Execute the render command.
fn render_command(
    manifest: &Path,
    config: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
) -> Result<()> {
    let config = match config {
        Some(path) => FeedConfig::load(path)?,
        None => FeedConfig::default(),
    };
    let formatter = Formatter::from_config(&config)?;

    let mut feed = FeedManifest::load(manifest)?.into_feed()?;
    if compact {
        feed.set_pretty_print(false);
    }
    let rendered = feed.render(&formatter)?;

    // Without an output file stdout carries only the XML
    let Some(output) = output else {
        print!("{rendered}");
        return Ok(());
    };

    let saved = rendered.save(output)?;
    let summary = inspect_feed(rendered.as_str())?;

    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        saved.display()
    );
    print_summary(&summary);
    Ok(())
}

/// Execute the check command.
fn check_command(file: &Path) -> Result<()> {
    let xml = fs::read_to_string(file)?;
    let summary = inspect_feed(&xml)?;

    println!(
        "{} {}",
        style("Valid RSS feed:").green().bold(),
        file.display()
    );
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &FeedSummary) {
    println!("  Version: {}", summary.version);
    match &summary.title {
        Some(title) => println!("  Title: {}", style(title).green()),
        None => println!("  Title: {}", style("(none)").yellow()),
    }
    println!("  Channel fields: {}", summary.channel_fields.join(", "));
    println!("  Items: {}", summary.item_count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_render() {
        let cli = Cli::parse_from(["rss-feed-generator", "render", "feed.yaml"]);

        let Commands::Render {
            manifest,
            config,
            output,
            compact,
        } = cli.command
        else {
            panic!("expected render");
        };
        assert_eq!(manifest, PathBuf::from("feed.yaml"));
        assert!(config.is_none());
        assert!(output.is_none());
        assert!(!compact);
    }

    #[test]
    fn test_cli_parse_render_with_options() {
        let cli = Cli::parse_from([
            "rss-feed-generator",
            "render",
            "feed.yaml",
            "--config",
            "filters.yaml",
            "-o",
            "feed.xml",
            "--compact",
        ]);

        let Commands::Render {
            config,
            output,
            compact,
            ..
        } = cli.command
        else {
            panic!("expected render");
        };
        assert_eq!(config, Some(PathBuf::from("filters.yaml")));
        assert_eq!(output, Some(PathBuf::from("feed.xml")));
        assert!(compact);
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["rss-feed-generator", "check", "feed.xml"]);
        assert!(matches!(cli.command, Commands::Check { file } if file == Path::new("feed.xml")));
    }
}
