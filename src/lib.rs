//! `harvest-summarizer` — turn harvested package metadata and license scans
//! into definition fragments.
//!
//! # Flow
//! 1. Pick the summarizer for the tool that produced the document ([`summary::Tool`]).
//! 2. Summarize it against the package [`models::Coordinates`]:
//!    - [`summary::described`] dispatches on the package type to an
//!      [`summary::ecosystem`] handler;
//!    - [`summary::scancode`] buckets scanned files by [`models::Facets`].
//! 3. Hand the resulting [`models::Definition`] to whatever merges fragments
//!    from several tools.
//!
//! Summarizing is synchronous and side-effect free; input documents are only borrowed.

pub mod config;
pub mod dates;
pub mod error;
pub mod license;
pub mod models;
pub mod registry;
pub mod summary;

pub use error::{Result, SummaryError};
pub use summary::{summarize, Tool};
