//! Per-package-type extensions of the described summary.
//!
//! Each handler adds the release date, URLs and declared license a package
//! type's registry reports. [`handler_for`] is the closed table mapping
//! [`ComponentType`] to its handler.

pub mod crates;
pub mod gem;
pub mod maven;
pub mod npm;
pub mod nuget;
pub mod pod;
pub mod pypi;
pub mod source_archive;

use serde_json::Value;

use crate::dates::extract_date;
use crate::models::{ComponentType, Coordinates, Definition};
use crate::registry::build_urls;

use super::text;

pub trait EcosystemHandler {
    /// Add the fields specific to this package type. Absent source values
    /// leave the corresponding fields unset.
    fn extend(&self, result: &mut Definition, data: &Value, coordinates: &Coordinates);
}

pub fn handler_for(kind: &ComponentType) -> Option<&'static dyn EcosystemHandler> {
    let handler: &'static dyn EcosystemHandler = match kind {
        ComponentType::Npm => &npm::NpmHandler,
        ComponentType::Crate => &crates::CrateHandler,
        ComponentType::Maven => &maven::MavenHandler,
        ComponentType::SourceArchive => &source_archive::SourceArchiveHandler,
        ComponentType::NuGet => &nuget::NuGetHandler,
        ComponentType::Gem => &gem::GemHandler,
        ComponentType::Pod => &pod::PodHandler,
        ComponentType::PyPi => &pypi::PyPiHandler,
        ComponentType::Other(_) => return None,
    };
    Some(handler)
}

/// Set `described.releaseDate` from a raw timestamp, if it parses.
fn set_release_date(result: &mut Definition, raw: Option<&Value>) {
    if let Some(date) = text(raw).and_then(extract_date) {
        result.described_mut().release_date = Some(date);
    }
}

/// Set `described.urls` to the registry/version/download triple for the coordinates.
fn set_standard_urls(result: &mut Definition, coordinates: &Coordinates) {
    if let Some(urls) = build_urls(coordinates) {
        result.described_mut().urls = Some(urls);
    }
}

fn set_project_website(result: &mut Definition, raw: Option<&Value>) {
    if let Some(homepage) = text(raw) {
        result.described_mut().project_website = Some(homepage.to_string());
    }
}

/// A license given either as a string or as an object with a `type` field.
fn license_text(value: Option<&Value>) -> Option<&str> {
    let value = value?;
    text(Some(value)).or_else(|| text(value.get("type")))
}
