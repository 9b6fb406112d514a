//! CSV 방언(dialect) 설명자.
//!
//! 두 가지 입력 형식을 하나의 파서로 처리하기 위해 형식 차이를 값으로 표현합니다.
//!
//! | 방언 | 날짜 형식 | 배너 줄 | 필드 수 |
//! |------|-----------|---------|---------|
//! | historical (A) | `YYYYMMDD` | `<`로 시작하면 건너뜀 | 7개 이상 (7번째 이후 무시) |
//! | contemporary (B) | `MM/DD/YYYY` | 없음 | 정확히 8개 (8번째 무시) |

use std::fmt;
use std::str::FromStr;

/// 레코드 필드별 CSV 열 위치 (0부터 시작).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    pub symbol: usize,
    pub date: usize,
    pub open: usize,
    pub high: usize,
    pub low: usize,
    pub close: usize,
    pub volume: usize,
}

impl FieldMap {
    /// `symbol, date, open, high, low, close, volume` 순서.
    pub const STANDARD: FieldMap = FieldMap {
        symbol: 0,
        date: 1,
        open: 2,
        high: 3,
        low: 4,
        close: 5,
        volume: 6,
    };
}

/// 허용되는 필드 수 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCount {
    /// 최소 개수 (초과분은 무시)
    AtLeast(usize),
    /// 정확한 개수
    Exactly(usize),
}

impl FieldCount {
    pub fn accepts(&self, found: usize) -> bool {
        match *self {
            FieldCount::AtLeast(min) => found >= min,
            FieldCount::Exactly(n) => found == n,
        }
    }
}

impl fmt::Display for FieldCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldCount::AtLeast(n) => write!(f, "at least {}", n),
            FieldCount::Exactly(n) => write!(f, "exactly {}", n),
        }
    }
}

/// 방언 설명자.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// 방언 이름 (로그용)
    pub name: &'static str,
    /// 날짜 필드 형식 (chrono strftime)
    pub date_format: &'static str,
    /// 배너 줄 표시 문자. 이 문자로 시작하는 줄은 레코드로 취급하지 않습니다.
    pub comment_marker: Option<u8>,
    /// 필드 위치
    pub fields: FieldMap,
    /// 필드 수 규칙
    pub field_count: FieldCount,
}

impl Dialect {
    /// 과거 데이터 형식 (A).
    ///
    /// ```text
    /// <NAME>,<DATE>,<OPEN>,<HIGH>,<LOW>,<CLOSE>,<VOL>,
    /// SEVN,20131213,101.00000,101.00000,99.50000,100.00000,4940,
    /// ```
    pub const HISTORICAL: Dialect = Dialect {
        name: "historical",
        date_format: "%Y%m%d",
        comment_marker: Some(b'<'),
        fields: FieldMap::STANDARD,
        field_count: FieldCount::AtLeast(7),
    };

    /// 최신 데이터 형식 (B).
    ///
    /// ```text
    /// BPI,04/22/2013,104.2,106.5,104.2,105.7,4258640,-207782450
    /// ```
    pub const CONTEMPORARY: Dialect = Dialect {
        name: "contemporary",
        date_format: "%m/%d/%Y",
        comment_marker: None,
        fields: FieldMap::STANDARD,
        field_count: FieldCount::Exactly(8),
    };

    /// 첫 번째 필드가 배너 표시 문자로 시작하는지 확인합니다.
    pub fn is_banner(&self, first_field: &str) -> bool {
        match self.comment_marker {
            Some(marker) => first_field.as_bytes().first() == Some(&marker),
            None => false,
        }
    }
}

/// 내장 방언 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectKind {
    Historical,
    Contemporary,
}

impl DialectKind {
    pub fn dialect(self) -> Dialect {
        match self {
            DialectKind::Historical => Dialect::HISTORICAL,
            DialectKind::Contemporary => Dialect::CONTEMPORARY,
        }
    }
}

impl From<DialectKind> for Dialect {
    fn from(kind: DialectKind) -> Self {
        kind.dialect()
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "historical" | "a" => Ok(DialectKind::Historical),
            "contemporary" | "b" => Ok(DialectKind::Contemporary),
            _ => Err(format!(
                "Unknown dialect: {}. Supported: historical (a), contemporary (b)",
                s
            )),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dialect().name)
    }
}
