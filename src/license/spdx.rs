use std::sync::LazyLock;

use regex::Regex;

use super::expression;

/// Placeholder for a license that is present but cannot be identified.
pub const NOASSERTION: &str = "NOASSERTION";
pub const NONE: &str = "NONE";

/// Canonical SPDX identifiers recognized by [`normalize`]. Matching is case-insensitive;
/// the spelling here is what ends up in definitions.
const SPDX_IDS: &[&str] = &[
    "0BSD",
    "AFL-3.0",
    "AGPL-3.0",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
    "Apache-1.1",
    "Apache-2.0",
    "APSL-2.0",
    "Artistic-2.0",
    "BlueOak-1.0.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSD-4-Clause",
    "BSL-1.0",
    "CC-BY-3.0",
    "CC-BY-4.0",
    "CC-BY-SA-4.0",
    "CC0-1.0",
    "CDDL-1.0",
    "CDDL-1.1",
    "EPL-1.0",
    "EPL-2.0",
    "EUPL-1.1",
    "EUPL-1.2",
    "GPL-2.0",
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "ISC",
    "LGPL-2.0",
    "LGPL-2.0-only",
    "LGPL-2.0-or-later",
    "LGPL-2.1",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "MIT",
    "MIT-0",
    "MPL-1.1",
    "MPL-2.0",
    "MS-PL",
    "MS-RL",
    "NCSA",
    "OFL-1.1",
    "OpenSSL",
    "OSL-3.0",
    "PostgreSQL",
    "PSF-2.0",
    "Python-2.0",
    "Ruby",
    "Unicode-DFS-2016",
    "Unlicense",
    "UPL-1.0",
    "WTFPL",
    "X11",
    "Zlib",
    "ZPL-2.1",
    NOASSERTION,
    NONE,
];

/// Well-known license names and their SPDX identifiers. Keys are lower-case.
const LICENSE_NAMES: &[(&str, &str)] = &[
    ("apache 2", "Apache-2.0"),
    ("apache 2.0", "Apache-2.0"),
    ("apache license 2.0", "Apache-2.0"),
    ("apache license, version 2.0", "Apache-2.0"),
    ("apache license version 2.0", "Apache-2.0"),
    ("the apache software license, version 2.0", "Apache-2.0"),
    ("the apache license, version 2.0", "Apache-2.0"),
    ("apache-2", "Apache-2.0"),
    ("mit license", "MIT"),
    ("the mit license", "MIT"),
    ("mit/x11", "MIT"),
    ("bsd", "BSD-3-Clause"),
    ("bsd license", "BSD-3-Clause"),
    ("bsd 2-clause", "BSD-2-Clause"),
    ("simplified bsd", "BSD-2-Clause"),
    ("bsd 3-clause", "BSD-3-Clause"),
    ("new bsd", "BSD-3-Clause"),
    ("new bsd license", "BSD-3-Clause"),
    ("modified bsd", "BSD-3-Clause"),
    ("gnu gpl v2", "GPL-2.0"),
    ("gnu general public license v2", "GPL-2.0"),
    ("gpl v2", "GPL-2.0"),
    ("gplv2", "GPL-2.0"),
    ("gnu gpl v3", "GPL-3.0"),
    ("gnu general public license v3", "GPL-3.0"),
    ("gpl v3", "GPL-3.0"),
    ("gplv3", "GPL-3.0"),
    ("gnu lgpl v2.1", "LGPL-2.1"),
    ("lgpl v2.1", "LGPL-2.1"),
    ("lgplv2.1", "LGPL-2.1"),
    ("gnu lesser general public license", "LGPL-2.1"),
    ("gnu lgpl v3", "LGPL-3.0"),
    ("lgpl v3", "LGPL-3.0"),
    ("lgplv3", "LGPL-3.0"),
    ("mozilla public license 2.0", "MPL-2.0"),
    ("mozilla public license, version 2.0", "MPL-2.0"),
    ("mpl 2.0", "MPL-2.0"),
    ("mplv2", "MPL-2.0"),
    ("eclipse public license 1.0", "EPL-1.0"),
    ("eclipse public license - v 1.0", "EPL-1.0"),
    ("eclipse public license 2.0", "EPL-2.0"),
    ("eclipse public license - v 2.0", "EPL-2.0"),
    ("common development and distribution license", "CDDL-1.0"),
    ("isc license", "ISC"),
    ("cc0", "CC0-1.0"),
    ("public domain", "CC0-1.0"),
    ("agpl v3", "AGPL-3.0"),
    ("agplv3", "AGPL-3.0"),
    ("gnu agpl v3", "AGPL-3.0"),
    ("boost software license 1.0", "BSL-1.0"),
    ("the unlicense", "Unlicense"),
    ("zlib license", "Zlib"),
];

/// License URLs (scheme, `www.`, trailing slash and file suffix removed; lower-case).
const LICENSE_URLS: &[(&str, &str)] = &[
    ("opensource.org/licenses/mit", "MIT"),
    ("opensource.org/licenses/mit-license", "MIT"),
    ("mit-license.org", "MIT"),
    ("opensource.org/licenses/apache-2.0", "Apache-2.0"),
    ("apache.org/licenses/license-2.0", "Apache-2.0"),
    ("opensource.org/licenses/bsd-license", "BSD-2-Clause"),
    ("opensource.org/licenses/bsd-2-clause", "BSD-2-Clause"),
    ("opensource.org/licenses/bsd-3-clause", "BSD-3-Clause"),
    ("opensource.org/licenses/isc", "ISC"),
    ("gnu.org/licenses/gpl-2.0", "GPL-2.0-only"),
    ("gnu.org/licenses/old-licenses/gpl-2.0", "GPL-2.0-only"),
    ("gnu.org/licenses/gpl-3.0", "GPL-3.0-only"),
    ("gnu.org/licenses/gpl", "GPL-3.0-only"),
    ("gnu.org/licenses/lgpl-2.1", "LGPL-2.1-only"),
    ("gnu.org/licenses/old-licenses/lgpl-2.1", "LGPL-2.1-only"),
    ("gnu.org/licenses/lgpl-3.0", "LGPL-3.0-only"),
    ("gnu.org/licenses/lgpl", "LGPL-3.0-only"),
    ("gnu.org/licenses/agpl-3.0", "AGPL-3.0-only"),
    ("eclipse.org/legal/epl-v10", "EPL-1.0"),
    ("eclipse.org/legal/epl-2.0", "EPL-2.0"),
    ("eclipse.org/legal/epl-v20", "EPL-2.0"),
    ("mozilla.org/mpl/2.0", "MPL-2.0"),
    ("mozilla.org/en-us/mpl/2.0", "MPL-2.0"),
    ("creativecommons.org/publicdomain/zero/1.0", "CC0-1.0"),
    ("unlicense.org", "Unlicense"),
    ("boost.org/license_1_0", "BSL-1.0"),
    ("github.com/dotnet/corefx/blob/master/license", "MIT"),
    ("go.microsoft.com/fwlink/?linkid=329770", "MIT"),
];

static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?(.+?)(?:\.(?:txt|html?|php|md))?/?$")
        .expect("static regex is valid")
});

/// Case-insensitive lookup of a canonical SPDX identifier.
fn canonical_id(id: &str) -> Option<&'static str> {
    SPDX_IDS
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(id.trim()))
}

fn normalize_id(id: &str) -> String {
    if let Some(canonical) = canonical_id(id) {
        return canonical.to_string();
    }
    if let Some(canonical) = id.strip_suffix('+').and_then(canonical_id) {
        return format!("{}+", canonical);
    }
    if id.starts_with("LicenseRef-") {
        return id.to_string();
    }
    lookup_by_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| NOASSERTION.to_string())
}

/// Normalize a raw license string to an SPDX expression.
///
/// Returns `None` for blank input. Whole-string license names are resolved first;
/// otherwise the string is parsed as an expression and each identifier is
/// canonicalized. Identifiers (or whole strings) that cannot be resolved become
/// [`NOASSERTION`].
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(id) = canonical_id(trimmed).or_else(|| lookup_by_name(trimmed)) {
        return Some(id.to_string());
    }

    let normalized = match expression::parse(trimmed) {
        Some(expr) => expr.map_ids(&normalize_id).to_string(),
        None => NOASSERTION.to_string(),
    };
    Some(normalized)
}

/// Resolve a human-readable license name (e.g. `"Apache License, Version 2.0"`).
pub fn lookup_by_name(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    LICENSE_NAMES
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, id)| *id)
}

/// Resolve a license URL to an SPDX identifier.
///
/// `spdx.org/licenses/<id>` and `licenses.nuget.org/<id>` URLs resolve to the
/// identifier they name.
pub fn lookup_by_url(url: &str) -> Option<&'static str> {
    let lowered = url.trim().to_lowercase();
    let key = URL_SHAPE.captures(&lowered)?.get(1)?.as_str();

    for host in ["spdx.org/licenses/", "licenses.nuget.org/"] {
        if let Some(id) = key.strip_prefix(host) {
            return canonical_id(id);
        }
    }

    LICENSE_URLS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, id)| *id)
}

/// Whether `license` can be used as a declared license: non-blank, not a
/// placeholder, and a syntactically valid license expression.
pub fn is_declared_license(license: &str) -> bool {
    let trimmed = license.trim();
    !trimmed.is_empty()
        && trimmed != NOASSERTION
        && trimmed != NONE
        && expression::parse(trimmed).is_some()
}
