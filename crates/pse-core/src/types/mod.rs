//! 공통 타입.

mod decimal;

pub use decimal::*;
