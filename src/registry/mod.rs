//! URL builders for the package registries and source hosts a definition can point at.
//!
//! Each module implements [`Registry`] for one provider. Builders are pure
//! functions of the coordinates and return `None` whenever a URL cannot be
//! derived (unknown provider, missing namespace or revision).

pub mod cocoapods;
pub mod crates_io;
pub mod git;
pub mod maven;
pub mod npm;
pub mod nuget;
pub mod pypi;
pub mod rubygems;

use crate::models::{ComponentType, Coordinates, SourceLocation, Urls};

pub trait Registry {
    /// Landing page of the package.
    fn registry_url(&self, c: &Coordinates) -> Option<String>;

    /// Landing page of the specific version.
    fn version_url(&self, _c: &Coordinates) -> Option<String> {
        None
    }

    /// Direct download of the released artifact.
    fn download_url(&self, _c: &Coordinates) -> Option<String> {
        None
    }

    /// Browsable or downloadable source for the revision.
    fn source_url(&self, _c: &Coordinates) -> Option<String> {
        None
    }
}

fn registry_for(provider: &str) -> Option<&'static dyn Registry> {
    let registry: &'static dyn Registry = match provider {
        "npmjs" => &npm::Npmjs,
        "cratesio" => &crates_io::CratesIo,
        "mavencentral" => &maven::MavenCentral,
        "mavengoogle" => &maven::MavenGoogle,
        "nuget" => &nuget::NuGet,
        "rubygems" => &rubygems::RubyGems,
        "cocoapods" => &cocoapods::CocoaPods,
        "pypi" => &pypi::PyPi,
        "github" => &git::GitHub,
        "gitlab" => &git::GitLab,
        _ => return None,
    };
    Some(registry)
}

pub fn build_registry_url(c: &Coordinates) -> Option<String> {
    registry_for(&c.provider)?.registry_url(c)
}

pub fn build_version_url(c: &Coordinates) -> Option<String> {
    registry_for(&c.provider)?.version_url(c)
}

pub fn build_download_url(c: &Coordinates) -> Option<String> {
    registry_for(&c.provider)?.download_url(c)
}

/// The standard registry/version/download triple, or `None` when none of them resolves.
pub fn build_urls(c: &Coordinates) -> Option<Urls> {
    Urls::new(
        build_registry_url(c),
        build_version_url(c),
        build_download_url(c),
    )
}

/// Canonicalize a harvested source location in place: lower-case type and
/// provider, drop the `-` namespace placeholder, and classify git hosts as
/// `git` and Maven source jars as `sourcearchive`.
pub fn update_source_location(spec: &mut SourceLocation) {
    spec.kind = spec.kind.trim().to_lowercase();
    spec.provider = spec.provider.trim().to_lowercase();
    if spec.namespace.as_deref().is_some_and(|ns| ns == "-" || ns.is_empty()) {
        spec.namespace = None;
    }

    match spec.provider.as_str() {
        "github" | "gitlab" => spec.kind = "git".to_string(),
        "mavencentral" | "mavengoogle" if spec.kind == "maven" => {
            spec.kind = "sourcearchive".to_string()
        }
        _ => {}
    }
}

/// URL of the source described by `spec`. Git sources with a sub-path point into that path.
pub fn build_source_url(spec: &SourceLocation) -> Option<String> {
    let coordinates = Coordinates::new(
        ComponentType::from(spec.kind.as_str()),
        &spec.provider,
        spec.namespace.as_deref(),
        &spec.name,
        spec.revision.as_deref(),
    );
    let url = registry_for(&spec.provider)?.source_url(&coordinates)?;

    match spec.path.as_deref().map(|p| p.trim_matches('/')) {
        Some(path) if !path.is_empty() && spec.kind == "git" => Some(format!("{}/{}", url, path)),
        _ => Some(url),
    }
}
