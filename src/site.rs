//! Local site info collaborator
//!
//! When the detector is asked about "this running site" (an empty query) it
//! consults a [`SiteInfoProvider`] instead of the network. Embedders that
//! know their own site supply one; [`StaticSiteInfo`] covers the common case
//! of prebuilt values.

/// Descriptive metadata for the currently running site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteInfo {
    /// Site name
    pub name: String,
    /// Site tagline/description
    pub description: String,
    /// Site home URL
    pub site_url: String,
    /// REST API base URL for the site
    pub rest_api_url: String,
}

/// Provider of the current site's metadata
///
/// Must not perform network I/O and must always succeed.
pub trait SiteInfoProvider: Send + Sync {
    /// Return name, description, URL, and REST base for the running site
    fn current_site_info(&self) -> SiteInfo;
}

/// [`SiteInfoProvider`] that hands out a prebuilt [`SiteInfo`]
#[derive(Debug, Clone)]
pub struct StaticSiteInfo {
    info: SiteInfo,
}

impl StaticSiteInfo {
    /// Wrap prebuilt site metadata
    pub fn new(info: SiteInfo) -> Self {
        Self { info }
    }
}

impl SiteInfoProvider for StaticSiteInfo {
    fn current_site_info(&self) -> SiteInfo {
        self.info.clone()
    }
}
