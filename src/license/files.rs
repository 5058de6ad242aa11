use crate::models::{ComponentType, Coordinates};

const LICENSE_FILE_STEMS: &[&str] = &[
    "license",
    "licence",
    "copying",
    "copyright",
    "unlicense",
    "unlicence",
];

const LICENSE_FILE_EXTENSIONS: &[&str] = &["", ".txt", ".md", ".html"];

fn is_license_file_name(name: &str) -> bool {
    LICENSE_FILE_STEMS.iter().any(|stem| {
        LICENSE_FILE_EXTENSIONS
            .iter()
            .any(|ext| name.strip_prefix(stem) == Some(*ext))
    })
}

/// Directory prefixes (lower-case) under which a package type keeps its
/// top-level files, e.g. npm tarballs unpack into `package/`.
fn license_locations(coordinates: &Coordinates) -> Vec<String> {
    match &coordinates.kind {
        ComponentType::Npm => vec!["package/".to_string()],
        ComponentType::Maven => vec!["meta-inf/".to_string()],
        ComponentType::PyPi => match &coordinates.revision {
            Some(revision) => vec![format!("{}-{}/", coordinates.name, revision).to_lowercase()],
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Whether `path` names a canonical license file for a package of this type:
/// a root-level `LICENSE`, `COPYING`, ... (optionally `.txt`, `.md`, `.html`),
/// or the same name under the type's package directory.
pub fn is_license_file(path: &str, coordinates: &Coordinates) -> bool {
    let lowered = path.to_lowercase();
    if is_license_file_name(&lowered) {
        return true;
    }

    license_locations(coordinates).iter().any(|prefix| {
        lowered
            .strip_prefix(prefix.as_str())
            .is_some_and(is_license_file_name)
    })
}
