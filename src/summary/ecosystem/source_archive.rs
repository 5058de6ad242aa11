use serde_json::Value;

use crate::models::{Coordinates, Definition};

use super::{set_release_date, set_standard_urls, EcosystemHandler};

/// Plain source archives (e.g. Maven `-sources` jars). No declared license.
pub struct SourceArchiveHandler;

impl EcosystemHandler for SourceArchiveHandler {
    fn extend(&self, result: &mut Definition, data: &Value, coordinates: &Coordinates) {
        set_release_date(result, data.get("releaseDate"));
        set_standard_urls(result, coordinates);
    }
}
