//! PostgreSQL 백엔드.
//!
//! 풀 없이 단일 `PgConnection`을 사용합니다. 저장소 하나가 연결 하나를 소유합니다.

use super::backend::{Backend, Connector};
use super::store::DayTradeStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use pse_core::{DailyRecord, Price};
use sqlx::postgres::{PgConnection, PgStatement};
use sqlx::{Connection, Executor, FromRow, Statement};
use tracing::debug;

/// PostgreSQL 저장소.
pub type PgDayTradeStore = DayTradeStore<PgBackend>;

/// `day_trades` 행.
#[derive(Debug, Clone, FromRow)]
struct DayTradeRow {
    symbol: String,
    date: NaiveDate,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    vol: i32,
}

impl TryFrom<DayTradeRow> for DailyRecord {
    type Error = sqlx::Error;

    fn try_from(row: DayTradeRow) -> Result<Self, Self::Error> {
        let volume = u64::try_from(row.vol).map_err(|e| sqlx::Error::ColumnDecode {
            index: "vol".to_string(),
            source: Box::new(e),
        })?;

        Ok(DailyRecord::new(
            row.symbol, row.date, row.open, row.high, row.low, row.close, volume,
        ))
    }
}

/// `PgConnection`을 여는 커넥터.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

#[async_trait]
impl Connector for PgConnector {
    type Backend = PgBackend;

    async fn connect(&self, url: &str) -> sqlx::Result<PgBackend> {
        let conn = PgConnection::connect(url).await?;
        Ok(PgBackend { conn })
    }
}

/// 단일 PostgreSQL 연결 백엔드.
pub struct PgBackend {
    conn: PgConnection,
}

impl std::fmt::Debug for PgBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl Backend for PgBackend {
    type Statement = PgStatement<'static>;

    async fn execute(&mut self, sql: &str) -> sqlx::Result<()> {
        // 인자 없는 문장은 simple query 프로토콜로 실행됨
        (&mut self.conn).execute(sql).await?;
        Ok(())
    }

    async fn prepare(&mut self, sql: &'static str) -> sqlx::Result<PgStatement<'static>> {
        debug!(sql, "Preparing statement");
        (&mut self.conn).prepare(sql).await
    }

    async fn insert(
        &mut self,
        statement: &PgStatement<'static>,
        record: &DailyRecord,
    ) -> sqlx::Result<()> {
        // vol 열은 integer
        let vol = i32::try_from(record.volume()).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        statement
            .query()
            .bind(record.symbol().to_string())
            .bind(record.date())
            .bind(record.open())
            .bind(record.high())
            .bind(record.low())
            .bind(record.close())
            .bind(vol)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn fetch(
        &mut self,
        sql: &str,
        symbol: &str,
        date: Option<NaiveDate>,
    ) -> sqlx::Result<Vec<DailyRecord>> {
        let mut query = sqlx::query_as::<_, DayTradeRow>(sql).bind(symbol.to_string());
        if let Some(date) = date {
            query = query.bind(date);
        }

        let rows = query.fetch_all(&mut self.conn).await?;
        rows.into_iter().map(DailyRecord::try_from).collect()
    }

    async fn release(&mut self, statement: PgStatement<'static>) -> sqlx::Result<()> {
        drop(statement);
        self.conn.clear_cached_statements().await
    }

    async fn close(self) -> sqlx::Result<()> {
        self.conn.close().await
    }
}
