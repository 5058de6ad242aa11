use crate::models::Coordinates;

use super::Registry;

/// crates.io (`cratesio`).
pub struct CratesIo;

impl Registry for CratesIo {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        Some(format!("https://crates.io/crates/{}", c.name))
    }

    fn version_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("https://crates.io/crates/{}/{}", c.name, revision))
    }

    fn download_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!(
            "https://crates.io/api/v1/crates/{}/{}/download",
            c.name, revision
        ))
    }
}
