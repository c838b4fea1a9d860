//! `qsutil default-app ...` – default applications via xdg-mime.

use crate::cli::DefaultAppAction;
use anyhow::{bail, Result};
use qsutil_core::config::QsConfig;
use qsutil_core::mime::{application_dirs, list_available_apps, DefaultAppSetter, MimeTable, SystemRunner};

pub fn run_default_app(cfg: &QsConfig, action: DefaultAppAction) -> Result<()> {
    let table = MimeTable::from_config(cfg.mime.as_ref());
    let setter = DefaultAppSetter::new(table, SystemRunner::default());

    match action {
        DefaultAppAction::Set {
            category,
            desktop_file,
        } => {
            let report = setter.set_default(&category, &desktop_file)?;
            println!("Setting {} default to: {}", report.category, report.desktop_file);
            for r in &report.results {
                match &r.error {
                    None => println!("  ✓ Set {} -> {}", r.mime_type, report.desktop_file),
                    Some(err) => println!("  ✗ Failed to set {}: {}", r.mime_type, err),
                }
            }
            println!(
                "Result: {}/{} MIME types set successfully",
                report.set_count(),
                report.total()
            );
            if !report.any_set() {
                bail!("no MIME types were set for '{}'", category);
            }
        }
        DefaultAppAction::Query { category } => match setter.current_default(&category)? {
            Some(app) => println!("{}", app),
            None => println!("No default set for {}", category),
        },
        DefaultAppAction::List => {
            for app in list_available_apps(&application_dirs()) {
                println!("{}", app);
            }
        }
        DefaultAppAction::Categories => {
            for category in setter.table().categories() {
                let types = setter.table().mime_types(category).unwrap_or_default();
                println!("{}: {}", category, types.join(", "));
            }
        }
    }
    Ok(())
}
