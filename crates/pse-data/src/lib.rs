//! 일별 거래 데이터 가져오기 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - 두 가지 CSV 방언을 처리하는 단일 패스 파서
//! - `day_trades` 테이블 스키마 생성 및 조회/삽입 저장소
//! - 파서 출력을 저장소로 옮기는 일괄 가져오기

pub mod error;
pub mod import;
pub mod storage;

pub use error::{DataError, Result};

// 가져오기 타입 재내보내기
pub use import::{Dialect, DialectKind, DialectParser, ParseError, RecordField};

// 저장소 타입 재내보내기
pub use storage::postgres::{PgBackend, PgConnector, PgDayTradeStore};
pub use storage::{Backend, Connector, DayTradeStore, ProvisionOptions};
