use crate::models::Coordinates;

use super::Registry;

/// The npm registry (`npmjs`). Scoped packages carry their `@scope` as the namespace.
pub struct Npmjs;

fn full_name(c: &Coordinates) -> String {
    match &c.namespace {
        Some(ns) => format!("{}/{}", ns, c.name),
        None => c.name.clone(),
    }
}

impl Registry for Npmjs {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        Some(format!("https://npmjs.com/package/{}", full_name(c)))
    }

    fn version_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("https://npmjs.com/package/{}/v/{}", full_name(c), revision))
    }

    fn download_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!(
            "https://registry.npmjs.com/{}/-/{}-{}.tgz",
            full_name(c),
            c.name,
            revision
        ))
    }
}
