//! Batch runner: fetch and store every descriptor, sequentially or with a
//! bounded worker pool.
//!
//! Each descriptor's whole fallback chain (and its existing-file check) runs
//! on a single worker. A terminal failure for one descriptor is recorded and
//! the batch moves on.

use crate::descriptor::ImageDescriptor;
use crate::fetch::Fetcher;
use crate::resolution::Resolution;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Mutex;

/// What happened to one descriptor.
#[derive(Debug, Clone)]
pub struct Report {
    /// Position in the input list (0-based).
    pub index: usize,
    pub title: String,
    pub region: String,
    pub succeeded: bool,
    pub already_present: bool,
    pub resolved_resolution: String,
    pub path: Option<PathBuf>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
    /// In input order.
    pub reports: Vec<Report>,
}

impl BatchSummary {
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.succeeded == 0
    }
}

/// Fetch then persist one descriptor.
pub fn process_one(
    fetcher: &Fetcher<'_>,
    index: usize,
    descriptor: &ImageDescriptor,
    requested: Resolution,
) -> Report {
    let outcome = fetcher.fetch(descriptor, requested);
    let filename = outcome.filename(descriptor);
    let mut report = Report {
        index,
        title: descriptor.title().to_string(),
        region: descriptor.region().to_string(),
        succeeded: outcome.succeeded,
        already_present: outcome.already_present,
        resolved_resolution: outcome.resolved_resolution.clone(),
        path: None,
        message: String::new(),
    };

    if !outcome.succeeded {
        tracing::warn!(title = descriptor.title(), "fetch failed: {}", outcome.diagnostic);
        report.message = format!("Error downloading {}: {}", filename, outcome.diagnostic);
        return report;
    }

    if outcome.already_present {
        report.path = Some(fetcher.store().path_for(&filename));
        report.message = outcome.diagnostic;
        return report;
    }

    let bytes = outcome.bytes.unwrap_or_default();
    match fetcher.store().save(&filename, &bytes) {
        Ok(path) => {
            tracing::info!(file = %path.display(), bytes = bytes.len(), "saved wallpaper");
            report.path = Some(path);
            report.message = format!("Downloaded: {}", filename);
        }
        Err(e) => {
            tracing::warn!("save failed: {:#}", e);
            report.succeeded = false;
            report.message = format!("Error saving {}: {:#}", filename, e);
        }
    }
    report
}

/// Runs every descriptor through `fetcher`. At most `jobs` descriptors are in
/// flight; `jobs <= 1` is strictly sequential. `progress` is called as each
/// descriptor finishes (completion order when `jobs > 1`).
pub fn run_batch<P>(
    fetcher: &Fetcher<'_>,
    descriptors: &[ImageDescriptor],
    requested: Resolution,
    jobs: usize,
    progress: P,
) -> BatchSummary
where
    P: Fn(&Report),
{
    let total = descriptors.len();
    let mut reports: Vec<Report> = Vec::with_capacity(total);

    if jobs <= 1 || total <= 1 {
        for (index, d) in descriptors.iter().enumerate() {
            let report = process_one(fetcher, index, d, requested);
            progress(&report);
            reports.push(report);
        }
    } else {
        let work: Mutex<VecDeque<(usize, &ImageDescriptor)>> =
            Mutex::new(descriptors.iter().enumerate().collect());
        let (tx, rx) = mpsc::channel::<Report>();
        let num_workers = jobs.min(total);

        std::thread::scope(|scope| {
            for _ in 0..num_workers {
                let work = &work;
                let tx = tx.clone();
                scope.spawn(move || loop {
                    let next = match work.lock() {
                        Ok(mut q) => q.pop_front(),
                        Err(_) => None,
                    };
                    let Some((index, d)) = next else {
                        break;
                    };
                    if tx.send(process_one(fetcher, index, d, requested)).is_err() {
                        break;
                    }
                });
            }
            drop(tx);
            for report in rx {
                progress(&report);
                reports.push(report);
            }
        });
        reports.sort_by_key(|r| r.index);
    }

    let succeeded = reports.iter().filter(|r| r.succeeded).count();
    tracing::info!(succeeded, total, "batch finished");
    BatchSummary {
        succeeded,
        total,
        reports,
    }
}
