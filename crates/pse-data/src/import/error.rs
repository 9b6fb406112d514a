//! 파싱 오류 타입.

use super::dialect::FieldCount;
use std::fmt;
use thiserror::Error;

/// 레코드 필드 이름.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Symbol,
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordField::Symbol => "symbol",
            RecordField::Date => "date",
            RecordField::Open => "open",
            RecordField::High => "high",
            RecordField::Low => "low",
            RecordField::Close => "close",
            RecordField::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// 한 입력 줄의 파싱 실패.
///
/// 항상 하나의 줄(1부터 시작)에 귀속되며, 해당 호출에만 치명적입니다.
#[derive(Debug, Error)]
pub enum ParseError {
    /// 필드 수 불일치
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: FieldCount,
        found: usize,
    },

    /// 필드 값 파싱 실패
    #[error("line {line}: invalid {field} value {value:?}: {reason}")]
    InvalidField {
        line: u64,
        field: RecordField,
        value: String,
        reason: String,
    },

    /// CSV 형식 오류 또는 입력 I/O 오류
    #[error("line {line}: malformed input: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

impl ParseError {
    pub(crate) fn invalid(
        line: u64,
        field: RecordField,
        value: &str,
        reason: impl fmt::Display,
    ) -> Self {
        ParseError::InvalidField {
            line,
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// 오류가 발생한 줄 번호.
    pub fn line(&self) -> u64 {
        match self {
            ParseError::FieldCount { line, .. }
            | ParseError::InvalidField { line, .. }
            | ParseError::Csv { line, .. } => *line,
        }
    }

    /// 실패한 필드 (필드 값 오류인 경우).
    pub fn field(&self) -> Option<RecordField> {
        match self {
            ParseError::InvalidField { field, .. } => Some(*field),
            _ => None,
        }
    }
}
