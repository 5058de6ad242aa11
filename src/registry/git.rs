use crate::models::Coordinates;

use super::Registry;

/// GitHub (`github`). The namespace is the owning user or organization.
pub struct GitHub;

/// GitLab (`gitlab`). The namespace may contain nested groups.
pub struct GitLab;

impl Registry for GitHub {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        let owner = c.namespace.as_deref()?;
        Some(format!("https://github.com/{}/{}", owner, c.name))
    }

    fn version_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("{}/tree/{}", self.registry_url(c)?, revision))
    }

    fn download_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("{}/archive/{}.zip", self.registry_url(c)?, revision))
    }

    fn source_url(&self, c: &Coordinates) -> Option<String> {
        self.version_url(c)
    }
}

impl Registry for GitLab {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        let group = c.namespace.as_deref()?;
        Some(format!("https://gitlab.com/{}/{}", group, c.name))
    }

    fn version_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("{}/-/tree/{}", self.registry_url(c)?, revision))
    }

    fn download_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!(
            "{}/-/archive/{}/{}-{}.zip",
            self.registry_url(c)?,
            revision,
            c.name,
            revision
        ))
    }

    fn source_url(&self, c: &Coordinates) -> Option<String> {
        self.version_url(c)
    }
}
