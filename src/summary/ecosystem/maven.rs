use serde_json::Value;

use crate::license::spdx::{lookup_by_name, lookup_by_url, normalize};
use crate::models::{Coordinates, Definition};
use crate::summary::{one_or_many, text};

use super::{set_release_date, set_standard_urls, EcosystemHandler};

/// Maven artifacts. Licenses come from the POM summary the harvester extracted.
pub struct MavenHandler;

impl EcosystemHandler for MavenHandler {
    fn extend(&self, result: &mut Definition, data: &Value, coordinates: &Coordinates) {
        set_release_date(result, data.get("releaseDate"));
        set_standard_urls(result, coordinates);
        result.set_declared(declared_license(data));
    }
}

fn push_unique(target: &mut Vec<String>, value: String) {
    if !target.contains(&value) {
        target.push(value);
    }
}

/// License URLs are preferred; names are only consulted when no URL resolves.
fn declared_license(data: &Value) -> Option<String> {
    // Summaries before 1.2.0 nested the licenses under `project`
    let summaries = data
        .pointer("/manifest/summary/licenses")
        .filter(|v| !v.is_null())
        .or_else(|| data.pointer("/manifest/summary/project/licenses"))?;

    let licenses: Vec<&Value> = one_or_many(summaries)
        .into_iter()
        .filter_map(|summary| summary.get("license"))
        .flat_map(one_or_many)
        .collect();

    let mut urls: Vec<&str> = Vec::new();
    let mut names: Vec<&str> = Vec::new();
    for license in &licenses {
        for url in license.get("url").map(one_or_many).unwrap_or_default() {
            if let Some(url) = text(Some(url)).filter(|u| !urls.contains(u)) {
                urls.push(url);
            }
        }
        for name in license.get("name").map(one_or_many).unwrap_or_default() {
            if let Some(name) = text(Some(name)).filter(|n| !names.contains(n)) {
                names.push(name);
            }
        }
    }

    let mut resolved: Vec<String> = Vec::new();
    for id in urls.iter().filter_map(|url| lookup_by_url(url)) {
        push_unique(&mut resolved, id.to_string());
    }
    if resolved.is_empty() {
        for name in names.iter().copied() {
            let id = lookup_by_name(name).unwrap_or(name);
            push_unique(&mut resolved, id.to_string());
        }
    }
    if resolved.is_empty() {
        return None;
    }

    normalize(&resolved.join(" OR "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_resolution() {
        let data = json!({"manifest": {"summary": {"licenses": [{"license": [
            {"name": "Apache 2", "url": "http://www.apache.org/licenses/LICENSE-2.0.txt"},
            {"name": "MIT", "url": ["https://opensource.org/licenses/MIT"]}
        ]}]}}});
        assert_eq!(declared_license(&data).as_deref(), Some("Apache-2.0 OR MIT"));
    }

    #[test]
    fn test_legacy_project_layer_and_name_fallback() {
        let data = json!({"manifest": {"summary": {"project": {"licenses": [{"license": {
            "name": "The Apache Software License, Version 2.0",
            "url": "https://example.com/custom"
        }}]}}}});
        assert_eq!(declared_license(&data).as_deref(), Some("Apache-2.0"));
    }

    #[test]
    fn test_unresolvable_name_passes_through_normalization() {
        let data = json!({"manifest": {"summary": {"licenses": [{"license": {"name": "Acme EULA"}}]}}});
        assert_eq!(declared_license(&data).as_deref(), Some("NOASSERTION"));
    }

    #[test]
    fn test_no_license_summary() {
        assert_eq!(declared_license(&json!({"manifest": {"summary": {}}})), None);
        assert_eq!(declared_license(&json!({})), None);
    }

    #[test]
    fn test_handler_sets_release_date_and_urls() {
        let coords: Coordinates = "maven/mavencentral/junit/junit/4.12".parse().unwrap();
        let mut def = Definition::default();
        MavenHandler.extend(&mut def, &json!({"releaseDate": "2014-12-04"}), &coords);
        let described = def.described.unwrap();
        assert_eq!(described.release_date.as_deref(), Some("2014-12-04"));
        assert_eq!(
            described.urls.unwrap().registry.as_deref(),
            Some("https://mvnrepository.com/artifact/junit/junit")
        );
        assert!(def.licensed.is_none());
    }
}
