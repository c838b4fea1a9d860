//! CLI command handlers, one file per command.

mod completions;
mod default_app;
mod icons;
mod wallpapers;

pub use completions::{run_completions, run_man};
pub use default_app::run_default_app;
pub use icons::run_icons;
pub use wallpapers::{run_wallpapers, WallpaperArgs};
