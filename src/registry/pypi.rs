use crate::models::Coordinates;

use super::Registry;

/// The Python Package Index (`pypi`). Download URLs depend on the release
/// files of a version and are resolved by the summarizer, not here.
pub struct PyPi;

impl Registry for PyPi {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        Some(format!("https://pypi.org/project/{}", c.name))
    }

    fn version_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("https://pypi.org/project/{}/{}/", c.name, revision))
    }
}
