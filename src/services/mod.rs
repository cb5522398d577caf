// Service exports
pub mod catalog;
pub mod remote;

pub use catalog::{
    validate_catalog, CatalogError, CatalogOrigin, CatalogProvider, CatalogSnapshot, CatalogSource,
    LocalCatalog,
};
pub use remote::RemoteCatalog;
