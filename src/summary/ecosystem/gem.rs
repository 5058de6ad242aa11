use serde_json::Value;

use crate::license::spdx::normalize;
use crate::models::{Coordinates, Definition};
use crate::summary::{items, text};

use super::{set_release_date, set_standard_urls, EcosystemHandler};

/// Ruby gems from rubygems.org.
pub struct GemHandler;

impl EcosystemHandler for GemHandler {
    fn extend(&self, result: &mut Definition, data: &Value, coordinates: &Coordinates) {
        set_release_date(result, data.get("releaseDate"));

        let declared = text(data.pointer("/registryData/license"))
            .and_then(normalize)
            .or_else(|| {
                let licenses: Vec<&str> = items(data.pointer("/registryData/licenses"))
                    .iter()
                    .filter_map(|l| text(Some(l)))
                    .collect();
                normalize(&licenses.join(" OR "))
            });
        result.set_declared(declared);

        set_standard_urls(result, coordinates);
    }
}
