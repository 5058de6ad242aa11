use serde_json::Value;
use tracing::debug;

use crate::models::{Coordinates, Definition, Urls};
use crate::registry::{build_registry_url, build_version_url};
use crate::summary::{items, text};

use super::{set_release_date, EcosystemHandler};

/// Python packages from PyPI. The declared license was already computed
/// by the harvester and is copied as-is.
pub struct PyPiHandler;

impl EcosystemHandler for PyPiHandler {
    fn extend(&self, result: &mut Definition, data: &Value, coordinates: &Coordinates) {
        set_release_date(result, data.get("releaseDate"));
        result.set_declared(text(data.get("declaredLicense")).map(str::to_string));

        let download = source_distribution_url(data, coordinates);
        if download.is_none() {
            debug!(
                coordinates = %coordinates,
                "no tar.gz release artifact; omitting download url"
            );
        }
        let urls = Urls::new(
            build_registry_url(coordinates),
            build_version_url(coordinates),
            download,
        );
        if let Some(urls) = urls {
            result.described_mut().urls = Some(urls);
        }
    }
}

/// URL of the first release file for the requested revision whose name contains
/// `tar.gz`. When a release lists several such files, the first in registry order wins.
fn source_distribution_url(data: &Value, coordinates: &Coordinates) -> Option<String> {
    let revision = coordinates.revision.as_deref()?;
    let releases = data.pointer("/registryData/releases")?.get(revision)?;
    items(Some(releases))
        .iter()
        .find(|file| {
            file.get("filename")
                .and_then(Value::as_str)
                .is_some_and(|name| name.contains("tar.gz"))
        })
        .and_then(|file| text(file.get("url")))
        .map(str::to_string)
}
