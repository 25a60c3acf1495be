// ABOUTME: Resolves the sync watermark from the exported entries tree
// ABOUTME: Walks year/month directories newest-first using lexicographic order

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Latest publish date already on disk, the boundary for incremental sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watermark {
    Unset,
    At(NaiveDate),
}

impl Watermark {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Watermark::Unset => None,
            Watermark::At(date) => Some(*date),
        }
    }

    /// Start of the watermark day in UTC; entries must be published after it.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.date()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Watermark::Unset => f.write_str("unset"),
            Watermark::At(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Scans `entries/<year>/<month>/<date>_<title>.md` for the newest date.
///
/// Unreadable or empty candidates fall through to the next-newest one; a
/// tree with nothing usable resolves to [`Watermark::Unset`].
pub fn resolve_watermark(entries_dir: &Path) -> Watermark {
    if !entries_dir.is_dir() {
        debug!(dir = %entries_dir.display(), "no entries directory; watermark unset");
        return Watermark::Unset;
    }

    let years = match child_names_desc(entries_dir, EntryKind::Dir) {
        Ok(years) => years,
        Err(e) => {
            warn!(dir = %entries_dir.display(), error = %e, "cannot read entries directory");
            return Watermark::Unset;
        }
    };

    years
        .iter()
        .find_map(|year| scan_candidate(&entries_dir.join(year), latest_in_year))
        .map(Watermark::At)
        .unwrap_or(Watermark::Unset)
}

fn latest_in_year(year_dir: &Path) -> io::Result<Option<NaiveDate>> {
    let months = child_names_desc(year_dir, EntryKind::Dir)?;
    Ok(months
        .iter()
        .find_map(|month| scan_candidate(&year_dir.join(month), latest_in_month)))
}

fn latest_in_month(month_dir: &Path) -> io::Result<Option<NaiveDate>> {
    let files = child_names_desc(month_dir, EntryKind::File)?;
    Ok(files.iter().find_map(|name| {
        let date = date_prefix(name);
        if date.is_none() {
            debug!(file = %name, "skipping file without a date prefix");
        }
        date
    }))
}

/// Runs one candidate scan, downgrading I/O failures to a warning.
fn scan_candidate(
    dir: &Path,
    scan: fn(&Path) -> io::Result<Option<NaiveDate>>,
) -> Option<NaiveDate> {
    match scan(dir) {
        Ok(found) => found,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            None
        }
    }
}

/// Leading `YYYY-MM-DD` of an exported `.md` file name.
pub fn date_prefix(file_name: &str) -> Option<NaiveDate> {
    if !file_name.ends_with(".md") {
        return None;
    }
    let prefix = file_name.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

fn child_names_desc(dir: &Path, kind: EntryKind) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let wanted = match kind {
            EntryKind::Dir => file_type.is_dir(),
            EntryKind::File => file_type.is_file(),
        };
        if !wanted {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort_unstable_by(|a, b| b.cmp(a));
    Ok(names)
}
