// ABOUTME: Entry store that lays exported posts out as dated Markdown files
// ABOUTME: Handles path derivation, front matter rendering, and collision checks

use crate::{
    model::{Entry, Frontmatter},
    util::{id_suffix, sanitize_title},
    Result,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct Paths {
    pub entries_dir: PathBuf,
}

impl Paths {
    pub fn new(root_override: Option<PathBuf>) -> Self {
        let root = root_override.unwrap_or_else(|| PathBuf::from("."));
        Paths {
            entries_dir: root.join("entries"),
        }
    }
}

/// `<year>/<month>/<date>_<title>.md`, relative to the entries directory.
pub fn relative_entry_path(entry: &Entry) -> Result<PathBuf> {
    let published = entry.published_date()?;
    let file_name = format!(
        "{}_{}.md",
        published.format("%Y-%m-%d"),
        sanitize_title(&entry.title)
    );

    Ok(PathBuf::from(published.format("%Y").to_string())
        .join(published.format("%m").to_string())
        .join(file_name))
}

pub fn render_entry(entry: &Entry) -> Result<String> {
    let frontmatter = Frontmatter::from_entry(entry)?;
    let yaml = serde_yaml::to_string(&frontmatter)?;
    Ok(format!("---\n{}---\n\n{}\n", yaml, entry.content))
}

pub struct EntryStore {
    entries_dir: PathBuf,
}

impl EntryStore {
    pub fn new(entries_dir: impl Into<PathBuf>) -> Self {
        EntryStore {
            entries_dir: entries_dir.into(),
        }
    }

    pub fn entries_dir(&self) -> &Path {
        &self.entries_dir
    }

    /// Path this entry will be written to.
    ///
    /// Another entry's file already sitting on the natural path pushes this
    /// one to a sibling carrying an id suffix.
    pub fn path_for(&self, entry: &Entry) -> Result<PathBuf> {
        let path = self.entries_dir.join(relative_entry_path(entry)?);

        match read_frontmatter(&path) {
            Ok(Some(existing)) if existing.entry_id != entry.id => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let alternate =
                    path.with_file_name(format!("{}_{}.md", stem, id_suffix(&entry.id)));
                debug!(
                    taken_by = %existing.entry_id,
                    path = %alternate.display(),
                    "path collision; using id-suffixed name"
                );
                Ok(alternate)
            }
            Ok(_) => Ok(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable front matter; overwriting");
                Ok(path)
            }
        }
    }

    /// Writes one entry, creating parent directories as needed.
    pub fn write(&self, entry: &Entry) -> Result<PathBuf> {
        let path = self.path_for(entry)?;
        let content = render_entry(entry)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;

        Ok(path)
    }
}

pub fn read_frontmatter(md_path: &Path) -> Result<Option<Frontmatter>> {
    if !md_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(md_path)?;

    // Look for YAML frontmatter (--- ... ---)
    let Some(rest) = content.strip_prefix("---\n") else {
        return Ok(None);
    };

    match rest.find("\n---\n") {
        Some(end_pos) => Ok(Some(serde_yaml::from_str(&rest[..end_pos])?)),
        None => Ok(None),
    }
}
