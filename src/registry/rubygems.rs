use crate::models::Coordinates;

use super::Registry;

/// rubygems.org (`rubygems`).
pub struct RubyGems;

impl Registry for RubyGems {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        Some(format!("https://rubygems.org/gems/{}", c.name))
    }

    fn version_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("https://rubygems.org/gems/{}/versions/{}", c.name, revision))
    }

    fn download_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!(
            "https://rubygems.org/downloads/{}-{}.gem",
            c.name, revision
        ))
    }
}
