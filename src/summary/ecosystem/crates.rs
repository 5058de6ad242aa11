use serde_json::Value;

use crate::license::spdx::normalize;
use crate::models::{Coordinates, Definition};
use crate::summary::text;

use super::{set_project_website, set_release_date, set_standard_urls, EcosystemHandler};

/// Rust crates from crates.io.
pub struct CrateHandler;

impl EcosystemHandler for CrateHandler {
    fn extend(&self, result: &mut Definition, data: &Value, coordinates: &Coordinates) {
        set_release_date(result, data.pointer("/registryData/created_at"));
        set_project_website(result, data.pointer("/manifest/homepage"));
        if let Some(license) = text(data.pointer("/registryData/license")) {
            // Older crates use `/` as an OR separator
            let expression = license.split('/').map(str::trim).collect::<Vec<_>>().join(" OR ");
            result.set_declared(normalize(&expression));
        }
        set_standard_urls(result, coordinates);
    }
}
