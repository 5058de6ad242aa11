use crate::models::{ComponentType, Coordinates};

use super::Registry;

/// Maven Central (`mavencentral`). The namespace is the `groupId`.
pub struct MavenCentral;

/// Google's Maven repository (`mavengoogle`).
pub struct MavenGoogle;

/// `org.apache.commons` → `org/apache/commons`
fn group_path(group_id: &str) -> String {
    group_id.replace('.', "/")
}

/// Relative path of the artifact jar; source archives point at the `-sources` jar.
fn artifact_path(c: &Coordinates) -> Option<String> {
    let group_id = c.namespace.as_deref()?;
    let revision = c.revision.as_deref()?;
    let classifier = if c.kind == ComponentType::SourceArchive {
        "-sources"
    } else {
        ""
    };
    Some(format!(
        "{}/{}/{}/{}-{}{}.jar",
        group_path(group_id),
        c.name,
        revision,
        c.name,
        revision,
        classifier
    ))
}

impl Registry for MavenCentral {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        let group_id = c.namespace.as_deref()?;
        Some(format!("https://mvnrepository.com/artifact/{}/{}", group_id, c.name))
    }

    fn version_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("{}/{}", self.registry_url(c)?, revision))
    }

    fn download_url(&self, c: &Coordinates) -> Option<String> {
        Some(format!(
            "https://search.maven.org/remotecontent?filepath={}",
            artifact_path(c)?
        ))
    }

    fn source_url(&self, c: &Coordinates) -> Option<String> {
        let sources = Coordinates {
            kind: ComponentType::SourceArchive,
            ..c.clone()
        };
        self.download_url(&sources)
    }
}

impl Registry for MavenGoogle {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        let group_id = c.namespace.as_deref()?;
        Some(format!("https://maven.google.com/web/index.html#{}:{}", group_id, c.name))
    }

    fn version_url(&self, c: &Coordinates) -> Option<String> {
        let revision = c.revision.as_deref()?;
        Some(format!("{}:{}", self.registry_url(c)?, revision))
    }

    fn source_url(&self, c: &Coordinates) -> Option<String> {
        let sources = Coordinates {
            kind: ComponentType::SourceArchive,
            ..c.clone()
        };
        Some(format!(
            "https://dl.google.com/android/maven2/{}",
            artifact_path(&sources)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maven_central_urls() {
        let c: Coordinates = "maven/mavencentral/org.apache.commons/commons-lang3/3.12.0"
            .parse()
            .unwrap();
        assert_eq!(
            MavenCentral.registry_url(&c).as_deref(),
            Some("https://mvnrepository.com/artifact/org.apache.commons/commons-lang3")
        );
        assert_eq!(
            MavenCentral.version_url(&c).as_deref(),
            Some("https://mvnrepository.com/artifact/org.apache.commons/commons-lang3/3.12.0")
        );
        assert_eq!(
            MavenCentral.download_url(&c).as_deref(),
            Some("https://search.maven.org/remotecontent?filepath=org/apache/commons/commons-lang3/3.12.0/commons-lang3-3.12.0.jar")
        );
        assert_eq!(
            MavenCentral.source_url(&c).as_deref(),
            Some("https://search.maven.org/remotecontent?filepath=org/apache/commons/commons-lang3/3.12.0/commons-lang3-3.12.0-sources.jar")
        );
    }

    #[test]
    fn test_maven_requires_group_id() {
        let c: Coordinates = "maven/mavencentral/-/orphan/1.0".parse().unwrap();
        assert_eq!(MavenCentral.registry_url(&c), None);
        assert_eq!(MavenCentral.download_url(&c), None);
    }
}
