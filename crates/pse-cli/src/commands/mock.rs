//! 연결 종료가 항상 실패하는 테스트용 메모리 커넥터.

use async_trait::async_trait;
use chrono::NaiveDate;
use pse_core::DailyRecord;
use pse_data::{Backend, Connector};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Shared {
    rows: Vec<DailyRecord>,
    close_attempts: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FlakyCloseConnector {
    shared: Arc<Mutex<Shared>>,
}

impl FlakyCloseConnector {
    pub fn with_rows(rows: Vec<DailyRecord>) -> Self {
        let connector = Self::default();
        connector.shared.lock().unwrap().rows = rows;
        connector
    }

    pub fn rows(&self) -> Vec<DailyRecord> {
        self.shared.lock().unwrap().rows.clone()
    }

    pub fn close_attempts(&self) -> usize {
        self.shared.lock().unwrap().close_attempts
    }
}

#[async_trait]
impl Connector for FlakyCloseConnector {
    type Backend = FlakyCloseBackend;

    async fn connect(&self, _url: &str) -> sqlx::Result<FlakyCloseBackend> {
        Ok(FlakyCloseBackend {
            shared: Arc::clone(&self.shared),
        })
    }
}

pub(crate) struct FlakyCloseBackend {
    shared: Arc<Mutex<Shared>>,
}

#[async_trait]
impl Backend for FlakyCloseBackend {
    type Statement = ();

    async fn execute(&mut self, _sql: &str) -> sqlx::Result<()> {
        Ok(())
    }

    async fn prepare(&mut self, _sql: &'static str) -> sqlx::Result<()> {
        Ok(())
    }

    async fn insert(&mut self, _statement: &(), record: &DailyRecord) -> sqlx::Result<()> {
        self.shared.lock().unwrap().rows.push(record.clone());
        Ok(())
    }

    async fn fetch(
        &mut self,
        _sql: &str,
        symbol: &str,
        date: Option<NaiveDate>,
    ) -> sqlx::Result<Vec<DailyRecord>> {
        let shared = self.shared.lock().unwrap();
        Ok(shared
            .rows
            .iter()
            .filter(|r| r.symbol() == symbol && date.map_or(true, |d| r.date() == d))
            .cloned()
            .collect())
    }

    async fn release(&mut self, _statement: ()) -> sqlx::Result<()> {
        Ok(())
    }

    async fn close(self) -> sqlx::Result<()> {
        self.shared.lock().unwrap().close_attempts += 1;
        Err(sqlx::Error::Protocol("connection reset by peer".to_string()))
    }
}
