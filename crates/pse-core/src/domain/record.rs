//! 일별 거래 레코드.
//!
//! 한 종목의 하루치 시가/고가/저가/종가/거래량 관측값을 표현합니다.
//! 레코드는 생성 이후 변경되지 않으며, `(symbol, date)` 외의 식별자를 갖지 않습니다.

use crate::types::{format_price, Price, Volume};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 표시용 날짜 형식 (ISO-8601).
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// 일별 거래 레코드.
///
/// `low <= open, close <= high` 관계는 검증하지 않습니다.
/// 원본 데이터가 이를 위반할 수 있으므로 파싱 실패만 거부 사유가 됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyRecord {
    symbol: String,
    date: NaiveDate,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    volume: Volume,
}

impl DailyRecord {
    /// 새 레코드를 생성합니다.
    ///
    /// 생성자는 실패하지 않습니다. 원시 필드 검증은 파싱하는 쪽의 책임입니다.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Volume,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 종목 심볼
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 거래일
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// 시가
    pub fn open(&self) -> Price {
        self.open
    }

    /// 고가
    pub fn high(&self) -> Price {
        self.high
    }

    /// 저가
    pub fn low(&self) -> Price {
        self.low
    }

    /// 종가
    pub fn close(&self) -> Price {
        self.close
    }

    /// 거래량
    pub fn volume(&self) -> Volume {
        self.volume
    }
}

/// `symbol,YYYY-MM-DD,open,high,low,close,volume` 형식으로 출력합니다.
///
/// 가격은 소수점 6자리 고정입니다. 표시/테스트 전용이며 저장 형식이 아닙니다.
impl fmt::Display for DailyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.symbol,
            self.date.format(RECORD_DATE_FORMAT),
            format_price(self.open),
            format_price(self.high),
            format_price(self.low),
            format_price(self.close),
            self.volume
        )
    }
}
