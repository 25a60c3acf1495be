// ABOUTME: Pagination walker that follows continuation links across feed pages
// ABOUTME: Stops lazily at the first entry not newer than the watermark

use crate::{api::FeedSource, model::Entry, watermark::Watermark, FeedPage, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Every page reachable through the continuation chain.
    Full,
    /// Only entries published after the watermark.
    Incremental(Watermark),
}

impl SyncMode {
    fn boundary(&self) -> Option<DateTime<Utc>> {
        match self {
            SyncMode::Full => None,
            SyncMode::Incremental(watermark) => watermark.instant(),
        }
    }
}

enum Admission {
    Keep,
    Skip,
    Stop,
}

fn admit(entry: &Entry, boundary: Option<DateTime<Utc>>) -> Admission {
    let Some(boundary) = boundary else {
        return Admission::Keep;
    };

    match entry.published_at() {
        Ok(published) if published.with_timezone(&Utc) > boundary => Admission::Keep,
        Ok(published) => {
            info!(
                title = %entry.title,
                published = %published,
                watermark = %boundary,
                "reached previously exported entries; stopping"
            );
            Admission::Stop
        }
        Err(e) => {
            warn!(id = %entry.id, error = %e, "skipping entry with unparsable publish date");
            Admission::Skip
        }
    }
}

/// Lazily fetches pages, one request per `next()`, until the chain ends.
pub struct Pages<'a, S: FeedSource + ?Sized> {
    source: &'a S,
    next_url: Option<String>,
}

impl<'a, S: FeedSource + ?Sized> Pages<'a, S> {
    pub fn new(source: &'a S, start_url: impl Into<String>) -> Self {
        Pages {
            source,
            next_url: Some(start_url.into()),
        }
    }
}

impl<S: FeedSource + ?Sized> Iterator for Pages<'_, S> {
    type Item = Result<FeedPage>;

    fn next(&mut self) -> Option<Self::Item> {
        let url = self.next_url.take()?;
        info!(%url, "fetching page");

        let page = self.source.fetch_page(&url);
        if let Ok(page) = &page {
            info!(entries = page.entries.len(), "page received");
            self.next_url = page.next.clone();
        }
        Some(page)
    }
}

/// Collects the entries to export, newest first, in source order.
///
/// Any page failure aborts the walk and discards what was gathered.
pub fn walk<S: FeedSource + ?Sized>(
    source: &S,
    start_url: &str,
    mode: SyncMode,
) -> Result<Vec<Entry>> {
    let boundary = mode.boundary();

    Pages::new(source, start_url)
        .flat_map(|page| match page {
            Ok(page) => page.entries.into_iter().map(Ok).collect::<Vec<_>>(),
            Err(e) => vec![Err(e)],
        })
        .map_while(|item| match item {
            Err(e) => Some(Some(Err(e))),
            Ok(entry) => match admit(&entry, boundary) {
                Admission::Keep => Some(Some(Ok(entry))),
                Admission::Skip => Some(None),
                Admission::Stop => None,
            },
        })
        .flatten()
        .collect()
}
