//! `qsutil icons` – regenerate the icon manifest.

use anyhow::Result;
use qsutil_core::config::QsConfig;
use qsutil_core::icons::generate_manifest;
use std::path::PathBuf;

pub fn run_icons(cfg: &QsConfig, icons_dir: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let icons_dir = match icons_dir {
        Some(d) => d,
        None => cfg.icons_dir()?,
    };
    let manifest = match output {
        Some(p) => p,
        None => cfg.icons_manifest()?,
    };

    let report = generate_manifest(&icons_dir, &manifest)?;
    println!("Generated icons config with {} icons", report.count());
    println!("Config file: {}", report.manifest.display());

    if report.count() > 0 {
        println!("\nFirst {} icons:", report.preview().len());
        for name in report.preview() {
            println!("  {}", name);
        }
        if report.remaining() > 0 {
            println!("  ... and {} more", report.remaining());
        }
    }
    Ok(())
}
