//! 저장된 레코드 조회 명령.

use anyhow::Result;
use chrono::NaiveDate;
use pse_core::{ConnectionInfo, DailyRecord, DatabaseSettings};
use pse_data::{Connector, DataError, DayTradeStore, PgConnector};

use super::close_store;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 레코드당 한 줄 (`symbol,date,open,high,low,close,volume`)
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: text, json", s)),
        }
    }
}

/// 조회 설정.
#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub symbol: String,
    /// 지정하면 해당 날짜 레코드만 조회
    pub date: Option<NaiveDate>,
    pub format: OutputFormat,
}

/// 레코드를 조회해 stdout에 출력하고 출력한 개수를 반환합니다.
pub async fn show(settings: &DatabaseSettings, config: ShowConfig) -> Result<usize> {
    let records = fetch_records(&PgConnector, &settings.connection_info(), &config).await?;

    if records.is_empty() {
        eprintln!("No records found for {}", config.symbol);
        return Ok(0);
    }

    println!("{}", render(&records, config.format)?);
    Ok(records.len())
}

pub(crate) async fn fetch_records<C: Connector>(
    connector: &C,
    info: &ConnectionInfo,
    config: &ShowConfig,
) -> Result<Vec<DailyRecord>> {
    let mut store = DayTradeStore::open(connector, info).await?;

    let result = match config.date {
        Some(date) => match store.find(&config.symbol, date).await {
            Ok(record) => Ok(vec![record]),
            Err(DataError::NotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        },
        None => store.find_all(&config.symbol).await,
    };
    close_store(&mut store).await;

    Ok(result?)
}

/// 레코드 목록을 출력 문자열로 변환합니다.
pub fn render(records: &[DailyRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::FlakyCloseConnector;
    use rust_decimal_macros::dec;

    fn sevn() -> DailyRecord {
        DailyRecord::new(
            "SEVN",
            NaiveDate::from_ymd_opt(2013, 12, 13).unwrap(),
            dec!(101.0),
            dec!(101.0),
            dec!(99.5),
            dec!(100.0),
            4940,
        )
    }

    #[tokio::test]
    async fn test_fetch_records_survives_close_failure() {
        let connector = FlakyCloseConnector::with_rows(vec![sevn()]);
        let info = ConnectionInfo::new("localhost", 5432, "pse", "", "pse_data");

        let config = ShowConfig {
            symbol: "SEVN".to_string(),
            date: NaiveDate::from_ymd_opt(2013, 12, 13),
            format: OutputFormat::Text,
        };
        let records = fetch_records(&connector, &info, &config).await.unwrap();
        assert_eq!(records, vec![sevn()]);

        let missing = ShowConfig {
            date: NaiveDate::from_ymd_opt(2013, 12, 14),
            ..config
        };
        assert!(fetch_records(&connector, &info, &missing).await.unwrap().is_empty());
        assert_eq!(connector.close_attempts(), 2);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::parse("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::parse("table").is_err());
    }

    #[test]
    fn test_render_text() {
        let out = render(&[sevn(), sevn()], OutputFormat::Text).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "SEVN,2013-12-13,101.000000,101.000000,99.500000,100.000000,4940"
        );
    }

    #[test]
    fn test_render_json() {
        let out = render(&[sevn()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["symbol"], "SEVN");
        assert_eq!(value[0]["date"], "2013-12-13");
        assert_eq!(value[0]["volume"], 4940);
    }
}
