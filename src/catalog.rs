//! Platform catalog
//!
//! Read-only lookup over the configured set of target platforms, including
//! the lowest-common-denominator character limit used by the composer.

use crate::types::Platform;

/// The configured, immutable set of target platforms.
#[derive(Debug, Clone)]
pub struct PlatformCatalog {
    platforms: Vec<Platform>,
}

impl PlatformCatalog {
    pub fn new(platforms: Vec<Platform>) -> Self {
        Self { platforms }
    }

    /// Look up a platform by id.
    pub fn get(&self, id: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Platforms in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Minimum character limit across the given ids.
    ///
    /// Ids that do not match any configured platform are ignored. Returns
    /// `None` when nothing matches; callers must treat that as blocking,
    /// not as "no limit".
    pub fn min_char_limit<'a, I>(&self, ids: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter_map(|id| self.get(id).map(|p| p.char_limit))
            .min()
    }
}

impl FromIterator<Platform> for PlatformCatalog {
    fn from_iter<T: IntoIterator<Item = Platform>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
