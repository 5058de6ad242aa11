//! Report renderers for summarized definitions.
//!
//! - [`terminal`] — colored headline plus described-field and facet tables; respects `--quiet`.
//! - [`json`] — the definition fragments as pretty-printed JSON.

pub mod json;
pub mod terminal;
