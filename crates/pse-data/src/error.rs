//! 데이터 모듈 오류 타입.

use crate::import::ParseError;
use chrono::NaiveDate;
use thiserror::Error;

/// 데이터 관련 오류.
///
/// 어떤 오류도 내부에서 재시도하지 않습니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// 입력 줄 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    /// 데이터베이스 연결 오류
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// 데이터베이스/테이블 생성 오류
    #[error("Provision error: {0}")]
    ProvisionError(String),

    /// 데이터 삽입 오류
    #[error("Write error: {0}")]
    WriteError(String),

    /// 레코드를 찾을 수 없음
    #[error("Record not found: {symbol} on {date}")]
    NotFound { symbol: String, date: NaiveDate },

    /// 쿼리 실행 오류
    #[error("Query error: {0}")]
    QueryError(String),

    /// 닫힌 저장소 사용
    #[error("Store is closed")]
    Closed,
}

impl DataError {
    /// 조회 결과가 없는 경우인지 확인합니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound { .. })
    }

    /// 닫힌 저장소를 사용한 경우인지 확인합니다.
    pub fn is_closed(&self) -> bool {
        matches!(self, DataError::Closed)
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
