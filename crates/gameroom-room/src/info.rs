//! The room's static description: names, prose, and doors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::SiteLookup;

/// Name used when the lookup service doesn't supply one.
pub const DEFAULT_NAME: &str = "Placeholder for jam sandwich.";

/// Full name used when the lookup service doesn't supply one.
pub const DEFAULT_FULL_NAME: &str =
    "A room with no full name, should be jam sandwich";

/// Description used when the lookup service doesn't supply one.
pub const DEFAULT_DESCRIPTION: &str = "You are in a room with a knife, some jam and some bread. There is a robot in the corner and a stack of papers on a desk.";

/// What the lookup service knows about a site. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    /// Direction → exit id.
    #[serde(default)]
    pub doors: BTreeMap<String, String>,
}

/// The room's exits, keyed by direction.
///
/// Directions are matched case-insensitively. A direction with no entry
/// has no door.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doors(BTreeMap<String, String>);

impl Doors {
    /// Returns the exit id behind the door in `direction`.
    pub fn exit_for(&self, direction: &str) -> Option<&str> {
        self.0.get(&direction.to_lowercase()).map(String::as_str)
    }

    /// Directions that have a door, lower-cased and sorted.
    pub fn directions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<D: AsRef<str>, E: Into<String>> FromIterator<(D, E)> for Doors {
    fn from_iter<I: IntoIterator<Item = (D, E)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(direction, exit)| {
                    (direction.as_ref().to_lowercase(), exit.into())
                })
                .collect(),
        )
    }
}

/// The room's static description.
///
/// Built once at startup and read-only afterwards, so every message
/// handler can share it without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub doors: Doors,
}

impl RoomInfo {
    /// Fills in whatever `site` lacks from the defaults, field by field.
    /// Doors only ever come from the site.
    pub fn from_site(site: Option<SiteInfo>) -> Self {
        let site = site.unwrap_or_default();
        Self {
            name: site.name.unwrap_or_else(|| DEFAULT_NAME.to_owned()),
            full_name: site
                .full_name
                .unwrap_or_else(|| DEFAULT_FULL_NAME.to_owned()),
            description: site
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned()),
            doors: site.doors.into_iter().collect(),
        }
    }

    /// Resolves the room's description through `lookup`.
    ///
    /// Never fails: a missing site id, an unknown site, or an unreachable
    /// lookup service all leave the defaults in place.
    pub async fn initialize(
        site_id: Option<&str>,
        lookup: &impl SiteLookup,
    ) -> Self {
        let site_id = site_id.map(str::trim).filter(|id| !id.is_empty());

        let Some(site_id) = site_id else {
            tracing::warn!(
                "room has no site id; set one so the room can describe itself"
            );
            return Self::default();
        };

        let site = match lookup.lookup_site(site_id).await {
            Ok(Some(site)) => {
                tracing::info!(site_id, "site resolved");
                Some(site)
            }
            Ok(None) => {
                tracing::warn!(site_id, "site not found, using defaults");
                None
            }
            Err(e) => {
                tracing::warn!(site_id, error = %e, "site lookup failed, using defaults");
                None
            }
        };
        Self::from_site(site)
    }
}

impl Default for RoomInfo {
    fn default() -> Self {
        Self::from_site(None)
    }
}
