//! Song catalog: the persisted name -> path library.
//!
//! `CatalogStore` owns the mapping and its JSON document on disk; every
//! mutation is persisted before it is reported as successful. `meta` holds
//! the on-demand tag probe used by the metadata popup.

mod meta;
mod store;

pub use meta::*;
pub use store::*;

#[cfg(test)]
mod tests;
