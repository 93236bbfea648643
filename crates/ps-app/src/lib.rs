//! # ps-app
//!
//! Use cases and the history service that ties the pasteboard, the history
//! store and the poll tick together.

pub mod error;
pub mod service;
pub mod usecases;

pub use error::ServiceError;
pub use service::HistoryService;
