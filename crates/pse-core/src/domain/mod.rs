//! 일별 거래 데이터의 도메인 모델.

mod connection;
mod record;

pub use connection::*;
pub use record::*;
