//! `qsutil wallpapers [RESOLUTION] [COUNT] [REGIONS]` – download Bing wallpapers.

use anyhow::{bail, Result};
use qsutil_core::batch::run_batch;
use qsutil_core::config::QsConfig;
use qsutil_core::fetch::Fetcher;
use qsutil_core::http::CurlTransport;
use qsutil_core::provider::collect_unique;
use qsutil_core::region::{detect_region, parse_region_list};
use qsutil_core::resolution::Resolution;
use qsutil_core::store::WallpaperStore;
use std::path::PathBuf;

#[derive(Debug)]
pub struct WallpaperArgs {
    pub resolution: Resolution,
    pub count: usize,
    pub regions: Option<String>,
    pub jobs: usize,
    pub output_dir: Option<PathBuf>,
}

pub fn run_wallpapers(cfg: &QsConfig, args: WallpaperArgs) -> Result<()> {
    let regions = match args.regions.as_deref() {
        Some(list) => parse_region_list(list),
        None => {
            let detected = detect_region(&cfg.default_region);
            println!("Auto-detected region: {}", detected);
            vec![detected]
        }
    };
    if regions.is_empty() {
        bail!("no regions given");
    }

    let dir = match args.output_dir {
        Some(d) => d,
        None => cfg.wallpaper_dir()?,
    };
    let store = WallpaperStore::open(&dir)?;

    println!(
        "Downloading {} Bing wallpapers at {} resolution...",
        args.count, args.resolution
    );
    println!("Regions: {}", regions.join(", "));
    println!("Output directory: {}", dir.display());

    let transport = CurlTransport::new(cfg.connect_timeout());
    let descriptors = collect_unique(&transport, cfg, args.count, &regions)
        .map_err(|e| anyhow::anyhow!("failed to fetch wallpaper data: {}", e))?;
    println!(
        "Found {} unique wallpapers from {} region(s)",
        descriptors.len(),
        regions.len()
    );

    let fetcher = Fetcher::new(&transport, &store, cfg);
    let total = descriptors.len();
    let summary = run_batch(
        &fetcher,
        &descriptors,
        args.resolution,
        args.jobs.max(1),
        |report| {
            println!(
                "[{}/{}] {} (Region: {})",
                report.index + 1,
                total,
                report.title,
                report.region
            );
            println!("  {}", report.message);
        },
    );

    println!(
        "\nDownload complete! {}/{} wallpapers downloaded successfully.",
        summary.succeeded, summary.total
    );
    println!("Files saved to: {}", dir.display());

    if summary.all_failed() {
        bail!("none of the {} wallpapers could be downloaded", summary.total);
    }
    Ok(())
}
