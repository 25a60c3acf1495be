// ABOUTME: Core sync logic tying watermark, page walk, and entry store together
// ABOUTME: Handles per-entry failure isolation and progress reporting

use crate::{
    api::FeedSource,
    model::Entry,
    storage::EntryStore,
    walker::{walk, SyncMode},
    watermark::{resolve_watermark, Watermark},
    Result,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub written: Vec<PathBuf>,
    pub failed: usize,
}

/// Picks the walk mode: `--all` ignores what is on disk.
pub fn plan(store: &EntryStore, all: bool) -> SyncMode {
    if all {
        return SyncMode::Full;
    }

    let watermark = resolve_watermark(store.entries_dir());
    match watermark {
        Watermark::Unset => info!("no previous export found; fetching everything"),
        Watermark::At(_) => info!(%watermark, "fetching entries newer than watermark"),
    }
    SyncMode::Incremental(watermark)
}

pub fn sync_blog<S: FeedSource + ?Sized>(
    source: &S,
    start_url: &str,
    store: &EntryStore,
    all: bool,
) -> Result<SyncReport> {
    let mode = plan(store, all);

    println!("Fetching entries...");
    let entries = walk(source, start_url, mode)?;
    println!("Found {} new entries", entries.len());

    let report = write_entries(store, &entries, progress_bar(entries.len()));

    println!(
        "synced {} entries ({} written, {} failed)",
        entries.len(),
        report.written.len(),
        report.failed
    );
    Ok(report)
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} entries") {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

/// Writes every entry; a failing entry is logged and the rest still go out.
pub fn write_entries(store: &EntryStore, entries: &[Entry], pb: ProgressBar) -> SyncReport {
    let mut report = SyncReport::default();

    for entry in entries {
        match store.write(entry) {
            Ok(path) => {
                pb.println(format!("saved {}", path.display()));
                report.written.push(path);
            }
            Err(e) => {
                warn!(id = %entry.id, title = %entry.title, error = %e, "failed to export entry");
                report.failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    report
}
