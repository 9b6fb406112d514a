//! 방언 파서.
//!
//! 바이트 스트림을 한 번만 순회하며 `DailyRecord`를 하나씩 꺼내는 풀(pull) 방식 파서입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use pse_data::import::{Dialect, DialectParser};
//!
//! let mut parser = DialectParser::from_path("data/SEVN.csv", Dialect::HISTORICAL)?;
//! while let Some(record) = parser.next_record()? {
//!     println!("{}", record);
//! }
//! ```

use super::dialect::Dialect;
use super::error::{ParseError, RecordField};
use chrono::NaiveDate;
use pse_core::{DailyRecord, Price, Volume};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::trace;

/// 방언 설명자로 설정되는 단일 패스 레코드 파서.
///
/// 한 번의 호출에서 실패가 발생해도 파서는 다음 줄부터 계속 읽을 수 있습니다.
/// 중단 여부는 호출자가 결정합니다.
pub struct DialectParser<R> {
    reader: csv::Reader<R>,
    dialect: Dialect,
    row: csv::StringRecord,
    records_parsed: u64,
    banners_skipped: u64,
}

impl<R: io::Read> DialectParser<R> {
    /// 바이트 소스 위에 파서를 생성합니다.
    pub fn new(source: R, dialect: Dialect) -> Self {
        // 배너 줄은 CSV 리더의 주석 옵션 대신 아래 루프에서 걸러냄.
        // 주석 옵션을 쓰면 건너뛴 줄이 다음 레코드의 위치에 합쳐져 오류 줄 번호가 어긋남.
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        Self {
            reader,
            dialect,
            row: csv::StringRecord::new(),
            records_parsed: 0,
            banners_skipped: 0,
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// 지금까지 반환한 레코드 수
    pub fn records_parsed(&self) -> u64 {
        self.records_parsed
    }

    /// 건너뛴 배너 줄 수
    pub fn banners_skipped(&self) -> u64 {
        self.banners_skipped
    }

    /// 다음 레코드를 읽습니다.
    ///
    /// - `Ok(Some(record))`: 레코드 하나
    /// - `Ok(None)`: 입력 끝
    /// - `Err(ParseError)`: 현재 줄 파싱 실패
    pub fn next_record(&mut self) -> Result<Option<DailyRecord>, ParseError> {
        loop {
            let has_row = self.reader.read_record(&mut self.row).map_err(|source| {
                let line = source
                    .position()
                    .map(|p| p.line())
                    .unwrap_or_else(|| self.reader.position().line());
                ParseError::Csv { line, source }
            })?;

            if !has_row {
                return Ok(None);
            }

            if self.row.get(0).is_some_and(|first| self.dialect.is_banner(first)) {
                self.banners_skipped += 1;
                trace!(line = self.current_line(), dialect = self.dialect.name, "Skipping banner line");
                continue;
            }

            let record = parse_row(&self.row, &self.dialect, self.current_line())?;
            self.records_parsed += 1;
            return Ok(Some(record));
        }
    }

    fn current_line(&self) -> u64 {
        self.row.position().map(|p| p.line()).unwrap_or(0)
    }
}

impl DialectParser<File> {
    /// 파일을 열어 파서를 생성합니다.
    pub fn from_path(path: impl AsRef<Path>, dialect: Dialect) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?, dialect))
    }
}

impl<R: io::Read> Iterator for DialectParser<R> {
    type Item = Result<DailyRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// 분리된 필드를 방언 규칙에 따라 레코드로 변환합니다.
fn parse_row(
    row: &csv::StringRecord,
    dialect: &Dialect,
    line: u64,
) -> Result<DailyRecord, ParseError> {
    if !dialect.field_count.accepts(row.len()) {
        return Err(ParseError::FieldCount {
            line,
            expected: dialect.field_count,
            found: row.len(),
        });
    }

    let fields = &dialect.fields;

    let symbol = field(row, fields.symbol, line, dialect)?;
    if symbol.is_empty() {
        return Err(ParseError::invalid(line, RecordField::Symbol, symbol, "empty symbol"));
    }

    let raw_date = field(row, fields.date, line, dialect)?;
    let date = NaiveDate::parse_from_str(raw_date, dialect.date_format)
        .map_err(|e| ParseError::invalid(line, RecordField::Date, raw_date, e))?;

    let open = price(row, fields.open, RecordField::Open, line, dialect)?;
    let high = price(row, fields.high, RecordField::High, line, dialect)?;
    let low = price(row, fields.low, RecordField::Low, line, dialect)?;
    let close = price(row, fields.close, RecordField::Close, line, dialect)?;

    let raw_volume = field(row, fields.volume, line, dialect)?;
    let volume = Volume::from_str(raw_volume)
        .map_err(|e| ParseError::invalid(line, RecordField::Volume, raw_volume, e))?;

    Ok(DailyRecord::new(symbol, date, open, high, low, close, volume))
}

fn field<'r>(
    row: &'r csv::StringRecord,
    index: usize,
    line: u64,
    dialect: &Dialect,
) -> Result<&'r str, ParseError> {
    // 필드 맵이 필드 수 규칙보다 넓은 사용자 정의 방언 대비
    row.get(index).ok_or_else(|| ParseError::FieldCount {
        line,
        expected: dialect.field_count,
        found: row.len(),
    })
}

fn price(
    row: &csv::StringRecord,
    index: usize,
    name: RecordField,
    line: u64,
    dialect: &Dialect,
) -> Result<Price, ParseError> {
    let raw = field(row, index, line, dialect)?;
    // Decimal::from_str는 `1_01` 같은 자릿수 구분자를 허용함
    if let Some(c) = raw
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-')))
    {
        return Err(ParseError::invalid(
            line,
            name,
            raw,
            format!("unexpected character {:?}", c),
        ));
    }

    let price = Decimal::from_str(raw).map_err(|e| ParseError::invalid(line, name, raw, e))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ParseError::invalid(line, name, raw, "negative price"));
    }
    Ok(price)
}
