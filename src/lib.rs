// ABOUTME: Public library API for blogsync incremental blog export
// ABOUTME: Re-exports core modules for external use

pub mod api;
pub mod auth;
pub mod cli;
pub mod error;
pub mod model;
pub mod storage;
pub mod sync;
pub mod util;
pub mod walker;
pub mod watermark;

pub use error::{Error, Result};
pub use model::{Entry, FeedPage, Frontmatter};
pub use walker::SyncMode;
pub use watermark::Watermark;
