//! License normalization helpers shared by the summarizers.
//!
//! - [`spdx`] — maps raw license strings, names and URLs to SPDX expressions.
//! - [`expression`] — SPDX expression parser used for normalization and validity checks.
//! - [`files`] — recognizes canonical license file paths per package type.

pub mod expression;
pub mod files;
pub mod spdx;
