pub mod dataset;
pub mod filter;
pub mod handlers;
pub mod related;

pub use dataset::Catalog;
