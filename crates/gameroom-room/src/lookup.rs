//! The site lookup collaborator.
//!
//! A room learns its own name, description, and doors from the wider
//! game's map service. This crate only defines the seam; the room works
//! with whichever implementation it is given.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

use crate::{RoomError, SiteInfo};

/// Resolves a site id to what the map knows about it.
///
/// ```rust
/// use gameroom_room::{RoomError, SiteInfo, SiteLookup};
///
/// /// Every site is the same broom cupboard.
/// struct Cupboard;
///
/// impl SiteLookup for Cupboard {
///     async fn lookup_site(
///         &self,
///         _site_id: &str,
///     ) -> Result<Option<SiteInfo>, RoomError> {
///         Ok(Some(SiteInfo {
///             name: Some("Cupboard".into()),
///             ..SiteInfo::default()
///         }))
///     }
/// }
/// ```
pub trait SiteLookup: Send + Sync + 'static {
    /// Returns the site, `Ok(None)` if the map has no such site, or an
    /// error if the map could not be asked.
    fn lookup_site(
        &self,
        site_id: &str,
    ) -> impl Future<Output = Result<Option<SiteInfo>, RoomError>> + Send;
}

/// A lookup that knows no sites. The room keeps its defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSiteLookup;

impl SiteLookup for NoSiteLookup {
    async fn lookup_site(
        &self,
        _site_id: &str,
    ) -> Result<Option<SiteInfo>, RoomError> {
        Ok(None)
    }
}

/// An in-memory map of sites, optionally loaded from a JSON document of
/// the form `{"<site id>": {"name": .., "fullName": .., "description": ..,
/// "doors": {"<direction>": "<exit id>"}}}`.
#[derive(Debug, Clone, Default)]
pub struct StaticSiteLookup {
    sites: HashMap<String, SiteInfo>,
}

impl StaticSiteLookup {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) one site.
    pub fn with_site(mut self, site_id: impl Into<String>, site: SiteInfo) -> Self {
        self.sites.insert(site_id.into(), site);
        self
    }

    /// Parses a site document.
    pub fn from_json_str(json: &str) -> Result<Self, RoomError> {
        let sites = serde_json::from_str(json).map_err(RoomError::SiteDocument)?;
        Ok(Self { sites })
    }

    /// Reads and parses a site document from disk.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RoomError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|source| {
            RoomError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let lookup = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), sites = lookup.sites.len(), "site document loaded");
        Ok(lookup)
    }
}

impl SiteLookup for StaticSiteLookup {
    async fn lookup_site(
        &self,
        site_id: &str,
    ) -> Result<Option<SiteInfo>, RoomError> {
        Ok(self.sites.get(site_id).cloned())
    }
}
