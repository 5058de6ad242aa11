use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::license::spdx::{lookup_by_url, normalize, NOASSERTION};
use crate::models::{Coordinates, Definition, FileEntry};
use crate::summary::merge::merge_into_definition;
use crate::summary::{items, text};

use super::{set_release_date, set_standard_urls, EcosystemHandler};

/// NuGet packages. The manifest is the parsed `.nuspec` plus the package's
/// zip entry listing.
pub struct NuGetHandler;

impl EcosystemHandler for NuGetHandler {
    fn extend(&self, result: &mut Definition, data: &Value, coordinates: &Coordinates) {
        set_release_date(result, data.get("releaseDate"));

        let expression = text(data.pointer("/manifest/licenseExpression")).and_then(normalize);
        match (expression, text(data.pointer("/manifest/licenseUrl"))) {
            (Some(expression), _) => result.set_declared(Some(expression)),
            (None, Some(url)) => {
                let declared = lookup_by_url(url).unwrap_or(NOASSERTION);
                result.set_declared(Some(declared.to_string()));
            }
            (None, None) => {}
        }

        set_standard_urls(result, coordinates);

        let Some(entries) = data
            .pointer("/manifest/packageEntries")
            .filter(|v| v.is_array())
        else {
            return;
        };
        let files = items(Some(entries))
            .iter()
            .filter_map(|entry| text(entry.get("fullName")))
            .map(|name| FileEntry::new(percent_decode_str(name).decode_utf8_lossy()))
            .collect();
        merge_into_definition(result, files);
    }
}
