mod celestrak;
mod element_set;
mod error;
mod parsing;
mod tle_dir;

pub use celestrak::{Celestrak, DEFAULT_CELESTRAK_URL};
pub use element_set::ElementSet;
pub use error::ElementSetError;
pub use tle_dir::TleDirectory;

use async_trait::async_trait;

/// Source of two-line element records, looked up by NORAD catalog number.
#[async_trait]
pub trait ElementSetProvider: Send + Sync {
    async fn fetch(&self, catalog_id: u32) -> Result<ElementSet, ElementSetError>;
}

#[cfg(test)]
pub(crate) use element_set::tests as fixtures;
