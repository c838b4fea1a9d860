//! CLI for the qsutil desktop utilities.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use qsutil_core::config;
use qsutil_core::resolution::Resolution;
use std::path::PathBuf;

use commands::{
    run_completions, run_default_app, run_icons, run_man, run_wallpapers, WallpaperArgs,
};

/// Top-level CLI for qsutil.
#[derive(Debug, Parser)]
#[command(name = "qsutil")]
#[command(about = "Desktop utilities: Bing wallpapers, icon manifest, default apps", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download Bing wallpapers, falling back to available resolutions.
    Wallpapers {
        /// Target resolution: 1920x1080, 2560x1440, 3840x2160 or 1366x768.
        #[arg(default_value = "1920x1080")]
        resolution: Resolution,
        /// Number of wallpapers to download.
        #[arg(default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        /// Comma-separated markets (e.g. "en-US,en-GB"). Default: detected from the locale.
        regions: Option<String>,
        /// Download up to N wallpapers concurrently (default 1).
        #[arg(long, default_value = "1", value_name = "N")]
        jobs: usize,
        /// Save into DIR instead of the configured wallpaper directory.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Write a sorted listing of the icons directory.
    Icons {
        /// Directory to scan (default: ~/.config/quickshell/assets/icons).
        #[arg(long, value_name = "DIR")]
        icons_dir: Option<PathBuf>,
        /// Manifest file to write (default: ~/.local/state/Quickshell/Icons/icons.conf).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Set or inspect default applications via xdg-mime.
    DefaultApp {
        #[command(subcommand)]
        action: DefaultAppAction,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

#[derive(Debug, Subcommand)]
pub enum DefaultAppAction {
    /// Register DESKTOP_FILE for every MIME type in CATEGORY.
    Set {
        /// Category, e.g. web, mail, music, video, photos.
        category: String,
        /// Desktop entry, with or without the .desktop suffix.
        desktop_file: String,
    },
    /// Show the current default for CATEGORY.
    Query {
        category: String,
    },
    /// List installed .desktop entries.
    List,
    /// List known categories and their MIME types.
    Categories,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These only need the CLI definition.
        match &cli.command {
            CliCommand::Completions { shell } => return run_completions(*shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Wallpapers {
                resolution,
                count,
                regions,
                jobs,
                output_dir,
            } => run_wallpapers(
                &cfg,
                WallpaperArgs {
                    resolution,
                    count: count as usize,
                    regions,
                    jobs,
                    output_dir,
                },
            )?,
            CliCommand::Icons { icons_dir, output } => run_icons(&cfg, icons_dir, output)?,
            CliCommand::DefaultApp { action } => run_default_app(&cfg, action)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
