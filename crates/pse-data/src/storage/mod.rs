//! 일별 거래 저장소.

mod backend;
pub mod postgres;
pub mod schema;
mod store;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{Backend, Connector};
pub use store::{DayTradeStore, ProvisionOptions};
