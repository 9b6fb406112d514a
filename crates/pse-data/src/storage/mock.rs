//! 테스트용 메모리 백엔드.

use super::backend::{Backend, Connector};
use async_trait::async_trait;
use chrono::NaiveDate;
use pse_core::DailyRecord;
use std::sync::{Arc, Mutex, MutexGuard};

/// 모든 mock 연결이 공유하는 서버 상태.
#[derive(Debug, Default)]
pub(crate) struct MockServer {
    /// 연결된 URL 목록 (연결 순서)
    pub connections: Vec<String>,
    /// 실행된 (URL, SQL) 목록
    pub executed: Vec<(String, String)>,
    /// 저장된 레코드
    pub rows: Vec<DailyRecord>,
    pub prepared: usize,
    pub released: usize,
    pub closed: usize,
    /// 이 문자열을 포함하는 URL로는 연결 실패
    pub fail_connect: Option<String>,
    /// 이 접두사로 시작하는 문장은 실행 실패
    pub fail_execute: Option<String>,
    /// 이 심볼의 삽입은 실패
    pub fail_insert_symbol: Option<String>,
    pub fail_prepare: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockConnector {
    server: Arc<Mutex<MockServer>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server(&self) -> MutexGuard<'_, MockServer> {
        self.server.lock().unwrap()
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Backend = MockBackend;

    async fn connect(&self, url: &str) -> sqlx::Result<MockBackend> {
        let mut server = self.server();
        if let Some(pattern) = &server.fail_connect {
            if url.contains(pattern.as_str()) {
                return Err(sqlx::Error::Protocol(format!("connection refused: {}", url)));
            }
        }
        server.connections.push(url.to_string());

        Ok(MockBackend {
            url: url.to_string(),
            server: Arc::clone(&self.server),
        })
    }
}

#[derive(Debug)]
pub(crate) struct MockBackend {
    url: String,
    server: Arc<Mutex<MockServer>>,
}

#[derive(Debug)]
pub(crate) struct MockStatement {
    sql: &'static str,
}

impl MockBackend {
    fn server(&self) -> MutexGuard<'_, MockServer> {
        self.server.lock().unwrap()
    }
}

#[async_trait]
impl Backend for MockBackend {
    type Statement = MockStatement;

    async fn execute(&mut self, sql: &str) -> sqlx::Result<()> {
        let mut server = self.server();
        if let Some(prefix) = &server.fail_execute {
            if sql.starts_with(prefix.as_str()) {
                return Err(sqlx::Error::Protocol(format!("statement failed: {}", sql)));
            }
        }
        server.executed.push((self.url.clone(), sql.to_string()));
        Ok(())
    }

    async fn prepare(&mut self, sql: &'static str) -> sqlx::Result<MockStatement> {
        let mut server = self.server();
        if server.fail_prepare {
            return Err(sqlx::Error::Protocol("prepare failed".to_string()));
        }
        server.prepared += 1;
        Ok(MockStatement { sql })
    }

    async fn insert(&mut self, statement: &MockStatement, record: &DailyRecord) -> sqlx::Result<()> {
        assert_eq!(statement.sql, super::schema::INSERT_SQL);

        let mut server = self.server();
        if server.fail_insert_symbol.as_deref() == Some(record.symbol()) {
            return Err(sqlx::Error::Protocol(format!(
                "value too long for type character varying(5): {}",
                record.symbol()
            )));
        }
        server.rows.push(record.clone());
        Ok(())
    }

    async fn fetch(
        &mut self,
        _sql: &str,
        symbol: &str,
        date: Option<NaiveDate>,
    ) -> sqlx::Result<Vec<DailyRecord>> {
        let server = self.server();
        Ok(server
            .rows
            .iter()
            .filter(|r| r.symbol() == symbol && date.map_or(true, |d| r.date() == d))
            .cloned()
            .collect())
    }

    async fn release(&mut self, _statement: MockStatement) -> sqlx::Result<()> {
        self.server().released += 1;
        Ok(())
    }

    async fn close(self) -> sqlx::Result<()> {
        self.server().closed += 1;
        Ok(())
    }
}
