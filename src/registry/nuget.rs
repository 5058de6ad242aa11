use crate::models::Coordinates;

use super::Registry;

/// nuget.org (`nuget`).
pub struct NuGet;

impl Registry for NuGet {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        Some(format!("https://nuget.org/packages/{}", c.name))
    }

    fn version_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("https://nuget.org/packages/{}/{}", c.name, revision))
    }

    fn download_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!(
            "https://nuget.org/api/v2/package/{}/{}",
            c.name, revision
        ))
    }
}
