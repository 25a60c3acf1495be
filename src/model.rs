// ABOUTME: Data models for feed entries, pages, and exported front matter
// ABOUTME: Parses Atom XML into typed entries with explicit optional fields

use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One post as delivered by the feed.
///
/// Timestamps stay as the wire text so a single bad value only fails the
/// entry that carries it, not the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub published: String,
    pub updated: String,
    pub content: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub url: Option<String>,
    pub custom_url: Option<String>,
    pub edited: Option<String>,
    pub draft: bool,
    pub preview: bool,
}

impl Entry {
    pub fn published_at(&self) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.published.trim()).map_err(|source| Error::DateParse {
            value: self.published.clone(),
            source,
        })
    }

    /// Calendar date of publication in the entry's own UTC offset.
    pub fn published_date(&self) -> Result<NaiveDate> {
        Ok(self.published_at()?.date_naive())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    pub entries: Vec<Entry>,
    pub next: Option<String>,
}

impl FeedPage {
    pub fn from_xml(xml: &str) -> Result<Self> {
        let feed: AtomFeed = quick_xml::de::from_str(xml)?;

        let next = feed
            .links
            .iter()
            .find(|link| link.rel == "next")
            .map(|link| link.href.clone())
            .filter(|href| !href.is_empty());

        Ok(FeedPage {
            entries: feed.entries.into_iter().map(Entry::from).collect(),
            next,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@rel", default)]
    rel: String,
    #[serde(rename = "@href", default)]
    href: String,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    published: String,
    #[serde(default)]
    updated: String,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    #[serde(default)]
    author: Option<AtomAuthor>,
    #[serde(rename = "category", default)]
    categories: Vec<AtomCategory>,
    #[serde(default)]
    content: Option<AtomContent>,
    #[serde(default)]
    edited: Option<String>,
    #[serde(default)]
    control: Option<AtomControl>,
    #[serde(rename = "customurl", default)]
    custom_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct AtomCategory {
    #[serde(rename = "@term", default)]
    term: String,
}

#[derive(Debug, Deserialize)]
struct AtomContent {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct AtomControl {
    #[serde(default)]
    draft: Option<String>,
    #[serde(default)]
    preview: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<AtomEntry> for Entry {
    fn from(raw: AtomEntry) -> Self {
        let url = raw
            .links
            .iter()
            .find(|link| link.rel == "alternate")
            .map(|link| link.href.clone());
        let control = raw.control.unwrap_or(AtomControl {
            draft: None,
            preview: None,
        });
        let is_yes = |flag: &Option<String>| flag.as_deref().map(str::trim) == Some("yes");

        Entry {
            id: raw.id.trim().to_string(),
            title: raw.title,
            published: raw.published.trim().to_string(),
            updated: raw.updated.trim().to_string(),
            content: raw.content.map(|c| c.value).unwrap_or_default(),
            author: non_empty(raw.author.map(|a| a.name)),
            tags: raw
                .categories
                .into_iter()
                .map(|c| c.term)
                .filter(|term| !term.is_empty())
                .collect(),
            url: non_empty(url),
            custom_url: non_empty(raw.custom_url),
            edited: non_empty(raw.edited),
            draft: is_yes(&control.draft),
            preview: is_yes(&control.preview),
        }
    }
}

/// Metadata block written at the top of every exported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Frontmatter {
    pub title: String,
    pub published: NaiveDate,
    pub updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub entry_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub draft: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub preview: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Frontmatter {
    pub fn from_entry(entry: &Entry) -> Result<Self> {
        Ok(Frontmatter {
            title: entry.title.clone(),
            published: entry.published_date()?,
            updated: entry.updated.clone(),
            url: entry.url.clone(),
            entry_id: entry.id.clone(),
            author: entry.author.clone(),
            edited: entry.edited.clone(),
            draft: entry.draft,
            preview: entry.preview,
            custom_url: entry.custom_url.clone(),
            tags: entry.tags.clone(),
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_entry(id: &str, title: &str, published: &str) -> Entry {
    Entry {
        id: id.into(),
        title: title.into(),
        published: published.into(),
        updated: published.into(),
        content: format!("Body of {}", title),
        author: None,
        tags: vec![],
        url: None,
        custom_url: None,
        edited: None,
        draft: false,
        preview: false,
    }
}
