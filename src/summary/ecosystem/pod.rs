use serde_json::Value;

use crate::license::spdx::normalize;
use crate::models::{Coordinates, Definition, Urls};
use crate::registry::build_registry_url;
use crate::summary::text;

use super::{license_text, set_project_website, set_release_date, EcosystemHandler};

/// CocoaPods. Version and download URLs point into the pod's home repository.
pub struct PodHandler;

impl EcosystemHandler for PodHandler {
    fn extend(&self, result: &mut Definition, data: &Value, coordinates: &Coordinates) {
        set_release_date(result, data.get("releaseDate"));
        set_project_website(result, data.pointer("/registryData/homepage"));
        result.set_declared(license_text(data.pointer("/registryData/license")).and_then(normalize));

        let homepage = text(data.pointer("/registryData/homepage"));
        let revision = text(data.pointer("/registryData/sourceInfo/revision"));
        let (version, download) = match (homepage, revision) {
            (Some(homepage), Some(revision)) => (
                Some(format!("{}/tree/{}", homepage, revision)),
                Some(format!("{}/archive/{}.zip", homepage, revision)),
            ),
            _ => (None, None),
        };
        if let Some(urls) = Urls::new(build_registry_url(coordinates), version, download) {
            result.described_mut().urls = Some(urls);
        }
    }
}
