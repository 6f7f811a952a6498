//! Core types and traits for the quicklink URL store.
//!
//! This crate defines the validated domain values, the store contract and
//! its error taxonomy. Backends live in `quicklink-storage`.

pub mod alias;
pub mod deadline;
pub mod error;
pub mod record;
pub mod store;

pub use alias::Alias;
pub use deadline::{with_deadline, with_timeout};
pub use error::{CoreError, StoreError};
pub use record::{RecordId, TargetUrl, UrlRecord};
pub use store::{ReadStore, UrlStore};
