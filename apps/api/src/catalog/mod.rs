// Catalog Store: the ordered entry collection, its grouped view, and the
// ingest flow that fills new entries from the enricher.

pub mod handlers;
pub mod ingest;
pub mod seed;
pub mod snapshot;
pub mod store;
pub mod view;

pub use store::Catalog;
