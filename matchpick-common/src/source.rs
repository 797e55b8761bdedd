//! Match data sources
//!
//! Two variants exist: a scraped live source and the fallback store. The
//! scraped source is a placeholder that never has data, so requests always
//! resolve to the fallback store today.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::Catalog;
use crate::store::FallbackStore;
use crate::Result;

/// Which source produced a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Scraped,
    Fallback,
}

/// Source trait - anything able to produce a catalog for a target day
#[async_trait]
pub trait MatchSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Fetch matches for the target date
    ///
    /// # Returns
    /// * `Ok(Some(catalog))` - source has data
    /// * `Ok(None)` - source has nothing for this date
    /// * `Err(_)` - source failed (logged, next source is tried)
    async fn fetch(&self, target: NaiveDate) -> Result<Option<Catalog>>;

    /// Check if the source can be queried at all
    fn is_available(&self) -> bool {
        true
    }
}

/// Live scrape of an external results site
///
/// Not implemented: external pages need a JS runtime and change structure
/// often. Always reports no data.
#[derive(Debug, Default, Clone)]
pub struct ScrapedSource;

#[async_trait]
impl MatchSource for ScrapedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Scraped
    }

    async fn fetch(&self, target: NaiveDate) -> Result<Option<Catalog>> {
        debug!("No scraper configured for {}", target);
        Ok(None)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Catalog read from the fallback store
#[derive(Debug, Clone)]
pub struct FallbackSource {
    store: FallbackStore,
}

impl FallbackSource {
    pub fn new(store: FallbackStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MatchSource for FallbackSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fallback
    }

    async fn fetch(&self, _target: NaiveDate) -> Result<Option<Catalog>> {
        Ok(Some(self.store.read().await))
    }
}

/// Scrape first, fall back to the store
#[derive(Clone)]
pub struct SourceChain {
    primary: Arc<dyn MatchSource>,
    fallback: Arc<dyn MatchSource>,
}

impl SourceChain {
    pub fn new(primary: Arc<dyn MatchSource>, fallback: Arc<dyn MatchSource>) -> Self {
        Self { primary, fallback }
    }

    /// Standard chain: placeholder scraper, then the given store
    pub fn with_store(store: FallbackStore) -> Self {
        Self::new(
            Arc::new(ScrapedSource),
            Arc::new(FallbackSource::new(store)),
        )
    }

    /// Resolve the catalog for a target date and report where it came from
    pub async fn resolve(&self, target: NaiveDate) -> Result<(SourceKind, Catalog)> {
        if self.primary.is_available() {
            match self.primary.fetch(target).await {
                Ok(Some(catalog)) => return Ok((self.primary.kind(), catalog)),
                Ok(None) => debug!("{:?} source had no data for {}", self.primary.kind(), target),
                Err(e) => warn!("{:?} source failed: {}", self.primary.kind(), e),
            }
        }

        let catalog = self.fallback.fetch(target).await?.unwrap_or_default();
        Ok((self.fallback.kind(), catalog))
    }
}
