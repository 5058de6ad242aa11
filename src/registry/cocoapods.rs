use crate::models::Coordinates;

use super::Registry;

/// cocoapods.org (`cocoapods`). Pods are versioned in their home repository,
/// so only the registry page is derivable from coordinates.
pub struct CocoaPods;

impl Registry for CocoaPods {
    fn registry_url(&self, c: &Coordinates) -> Option<String> {
        Some(format!("https://cocoapods.org/pods/{}", c.name))
    }
}
