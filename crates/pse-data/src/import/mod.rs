//! 일별 거래 CSV 가져오기.
//!
//! 두 가지 CSV 방언을 하나의 파서 타입으로 처리합니다:
//! - `Dialect::HISTORICAL`: 배너 줄이 있는 과거 데이터 형식
//! - `Dialect::CONTEMPORARY`: 끝에 추가 숫자 필드가 붙는 최신 형식

mod dialect;
mod error;
mod parser;

pub use dialect::{Dialect, DialectKind, FieldCount, FieldMap};
pub use error::{ParseError, RecordField};
pub use parser::DialectParser;
