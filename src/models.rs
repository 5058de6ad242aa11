use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SummaryError;

/// Facet that receives every file not claimed by a configured facet.
pub const CORE_FACET: &str = "core";

/// Package type from the coordinates; selects the ecosystem handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    Npm,
    Crate,
    Maven,
    SourceArchive,
    NuGet,
    Gem,
    Pod,
    PyPi,
    Other(String),
}

impl From<&str> for ComponentType {
    fn from(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "npm" => ComponentType::Npm,
            "crate" => ComponentType::Crate,
            "maven" => ComponentType::Maven,
            "sourcearchive" => ComponentType::SourceArchive,
            "nuget" => ComponentType::NuGet,
            "gem" => ComponentType::Gem,
            "pod" => ComponentType::Pod,
            "pypi" => ComponentType::PyPi,
            other => ComponentType::Other(other.to_string()),
        }
    }
}

impl From<String> for ComponentType {
    fn from(raw: String) -> Self {
        ComponentType::from(raw.as_str())
    }
}

impl From<ComponentType> for String {
    fn from(kind: ComponentType) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentType::Npm => write!(f, "npm"),
            ComponentType::Crate => write!(f, "crate"),
            ComponentType::Maven => write!(f, "maven"),
            ComponentType::SourceArchive => write!(f, "sourcearchive"),
            ComponentType::NuGet => write!(f, "nuget"),
            ComponentType::Gem => write!(f, "gem"),
            ComponentType::Pod => write!(f, "pod"),
            ComponentType::PyPi => write!(f, "pypi"),
            ComponentType::Other(other) => write!(f, "{}", other),
        }
    }
}

/// Identifies one version of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl Coordinates {
    pub fn new(
        kind: ComponentType,
        provider: &str,
        namespace: Option<&str>,
        name: &str,
        revision: Option<&str>,
    ) -> Self {
        Self {
            kind,
            provider: provider.to_string(),
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            revision: revision.map(str::to_string),
        }
    }
}

/// Parses the slash form `type/provider/namespace/name[/revision]`.
/// A namespace of `-` means "no namespace".
impl FromStr for Coordinates {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().trim_matches('/').splitn(5, '/').collect();
        if parts.len() < 4 || parts[..4].iter().any(|p| p.is_empty()) {
            return Err(SummaryError::InvalidCoordinates(s.to_string()));
        }

        let namespace = match parts[2] {
            "-" => None,
            ns => Some(ns),
        };
        let revision = parts.get(4).copied().filter(|r| !r.is_empty());

        Ok(Coordinates::new(
            ComponentType::from(parts[0]),
            &parts[1].to_lowercase(),
            namespace,
            parts[3],
            revision,
        ))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.kind,
            self.provider,
            self.namespace.as_deref().unwrap_or("-"),
            self.name
        )?;
        if let Some(revision) = &self.revision {
            write!(f, "/{}", revision)?;
        }
        Ok(())
    }
}

/// Ordered mapping of facet name to glob patterns.
///
/// Declaration order matters: a file belongs to the first facet that
/// matches it. Serialized as a plain map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets(Vec<(String, Vec<String>)>);

impl Facets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a facet, replacing the patterns of an existing facet with the same name
    /// without changing its position.
    pub fn insert(&mut self, name: impl Into<String>, patterns: Vec<String>) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = patterns,
            None => self.0.push((name, patterns)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, patterns)| patterns.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(n, p)| (n.as_str(), p.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, P: Into<String>> FromIterator<(N, Vec<P>)> for Facets {
    fn from_iter<I: IntoIterator<Item = (N, Vec<P>)>>(iter: I) -> Self {
        let mut facets = Facets::new();
        for (name, patterns) in iter {
            facets.insert(name, patterns.into_iter().map(Into::into).collect());
        }
        facets
    }
}

impl Serialize for Facets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, patterns) in &self.0 {
            map.serialize_entry(name, patterns)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Facets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FacetsVisitor;

        impl<'de> Visitor<'de> for FacetsVisitor {
            type Value = Facets;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of facet names to glob pattern lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Facets, A::Error> {
                let mut facets = Facets::new();
                while let Some((name, patterns)) = access.next_entry::<String, Vec<String>>()? {
                    facets.insert(name, patterns);
                }
                Ok(facets)
            }
        }

        deserializer.deserialize_map(FacetsVisitor)
    }
}

/// Partial definition produced by one summarizer for one harvested document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub described: Option<Described>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licensed: Option<Licensed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileEntry>>,
}

impl Definition {
    pub fn described_mut(&mut self) -> &mut Described {
        self.described.get_or_insert_with(Described::default)
    }

    pub fn licensed_mut(&mut self) -> &mut Licensed {
        self.licensed.get_or_insert_with(Licensed::default)
    }

    pub fn is_empty(&self) -> bool {
        self.described.is_none() && self.licensed.is_none() && self.files.is_none()
    }

    /// Declared license, if any summarizing step set one.
    pub fn declared(&self) -> Option<&str> {
        self.licensed.as_ref().and_then(|l| l.declared.as_deref())
    }

    /// Store `declared` as the declared license when it is non-empty.
    pub fn set_declared(&mut self, declared: Option<String>) {
        if let Some(declared) = declared.filter(|d| !d.trim().is_empty()) {
            self.licensed_mut().declared = Some(declared);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Described {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_location: Option<SourceLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Urls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_tracker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<Facets>,
}

/// Where the source code of a package lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Urls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
}

impl Urls {
    /// Returns `None` unless at least one of the three URLs is known.
    pub fn new(
        registry: Option<String>,
        version: Option<String>,
        download: Option<String>,
    ) -> Option<Urls> {
        if registry.is_none() && version.is_none() && download.is_none() {
            return None;
        }
        Some(Urls {
            registry,
            version,
            download,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Licensed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<BTreeMap<String, FacetSummary>>,
}

/// License and attribution roll-up for the files of one facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSummary {
    pub attribution: Attribution,
    pub discovered: Discovered,
    pub files: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub parties: Option<Vec<String>>,
    pub unknown: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovered {
    pub expressions: Option<Vec<String>>,
    pub unknown: u64,
}

/// One file of a package as it appears in a definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natures: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl FileEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn add_nature(&mut self, nature: &str) {
        self.natures
            .get_or_insert_with(BTreeSet::new)
            .insert(nature.to_string());
    }

    pub fn has_nature(&self, nature: &str) -> bool {
        self.natures.as_ref().is_some_and(|n| n.contains(nature))
    }
}
