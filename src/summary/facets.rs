use glob::{MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::models::{Facets, CORE_FACET};

/// Shell-glob semantics: `*` stays within one path segment, `**` spans
/// directories, and wildcards do not match a leading `.`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

fn compile(facet: &str, patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|pattern| match Pattern::new(pattern) {
            Ok(compiled) => Some(compiled),
            Err(err) => {
                warn!(facet, pattern = %pattern, error = %err, "ignoring invalid facet pattern");
                None
            }
        })
        .collect()
}

/// Partition `files` into facet buckets.
///
/// Facets are visited in declaration order and each claims the files still
/// unclaimed whose path matches any of its patterns. A facet with no patterns
/// ends the walk: it and every facet after it get no bucket. Whatever is left
/// forms the [`CORE_FACET`] bucket, which is always last.
pub fn compute_file_buckets<T, F>(files: Vec<T>, facets: &Facets, path_of: F) -> Vec<(String, Vec<T>)>
where
    F: Fn(&T) -> &str,
{
    let mut buckets = Vec::with_capacity(facets.len() + 1);
    let mut remaining = files;

    for (name, patterns) in facets.iter().filter(|(name, _)| *name != CORE_FACET) {
        if patterns.is_empty() {
            debug!(facet = name, "facet has no patterns; later facets are not applied");
            break;
        }
        let matchers = compile(name, patterns);
        let (matched, rest): (Vec<T>, Vec<T>) = remaining.into_iter().partition(|file| {
            let path = path_of(file);
            matchers.iter().any(|m| m.matches_with(path, MATCH_OPTIONS))
        });
        buckets.push((name.to_string(), matched));
        remaining = rest;
    }

    buckets.push((CORE_FACET.to_string(), remaining));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket<'a>(files: &[&'a str], facets: &Facets) -> Vec<(String, Vec<&'a str>)> {
        compute_file_buckets(files.to_vec(), facets, |f| *f)
    }

    fn facets(entries: &[(&str, &[&str])]) -> Facets {
        entries
            .iter()
            .map(|(name, patterns)| (*name, patterns.to_vec()))
            .collect()
    }

    #[test]
    fn test_no_facets_everything_is_core() {
        let buckets = bucket(&["a.js", "tests/b.js"], &Facets::new());
        assert_eq!(buckets, vec![("core".to_string(), vec!["a.js", "tests/b.js"])]);
    }

    #[test]
    fn test_tests_facet() {
        let buckets = bucket(&["tests/a.js", "src/b.js"], &facets(&[("tests", &["tests/**"])]));
        assert_eq!(
            buckets,
            vec![
                ("tests".to_string(), vec!["tests/a.js"]),
                ("core".to_string(), vec!["src/b.js"]),
            ]
        );
    }

    #[test]
    fn test_first_facet_wins_and_buckets_are_disjoint() {
        let files = ["docs/a.md", "docs/test/b.md", "test/c.js", "src/d.js", "README.md"];
        let config = facets(&[("doc", &["docs/**", "*.md"]), ("tests", &["**/test/**"])]);
        let buckets = bucket(&files, &config);

        assert_eq!(buckets[0], ("doc".to_string(), vec!["docs/a.md", "docs/test/b.md", "README.md"]));
        assert_eq!(buckets[1], ("tests".to_string(), vec!["test/c.js"]));
        assert_eq!(buckets[2], ("core".to_string(), vec!["src/d.js"]));
        let total: usize = buckets.iter().map(|(_, f)| f.len()).sum();
        assert_eq!(total, files.len());
    }

    #[test]
    fn test_single_star_does_not_cross_directories() {
        let buckets = bucket(&["a.md", "docs/b.md"], &facets(&[("doc", &["*.md"])]));
        assert_eq!(buckets[0].1, vec!["a.md"]);
        assert_eq!(buckets[1].1, vec!["docs/b.md"]);
    }

    #[test]
    fn test_empty_pattern_list_stops_later_facets() {
        let config = facets(&[("data", &[]), ("tests", &["tests/**"])]);
        let buckets = bucket(&["tests/a.js", "b.js"], &config);
        assert_eq!(buckets, vec![("core".to_string(), vec!["tests/a.js", "b.js"])]);
    }

    #[test]
    fn test_configured_core_is_ignored() {
        let config = facets(&[("core", &["src/**"]), ("tests", &["tests/**"])]);
        let buckets = bucket(&["src/a.js", "tests/b.js"], &config);
        assert_eq!(
            buckets,
            vec![
                ("tests".to_string(), vec!["tests/b.js"]),
                ("core".to_string(), vec!["src/a.js"]),
            ]
        );
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let buckets = bucket(&["a/b.js"], &facets(&[("bad", &["a/***/["]), ("ok", &["a/**"])]));
        assert_eq!(buckets[0].1, Vec::<&str>::new());
        assert_eq!(buckets[1].1, vec!["a/b.js"]);
    }
}
