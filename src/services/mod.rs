//! Service layer: the query-store seam and the typed operations the
//! HTTP handlers and the CLI call into.

pub mod legco;
pub mod query_store;

pub use legco::LegcoService;
pub use query_store::{FakeStore, QueryStore};
