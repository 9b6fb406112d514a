//! 저장소 백엔드 추상화.
//!
//! `DayTradeStore`는 이 trait들만 사용하므로 PostgreSQL 없이 메모리 백엔드로도
//! 동작을 검증할 수 있습니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use pse_core::DailyRecord;

/// 연결 URL로 백엔드 연결을 여는 팩토리.
#[async_trait]
pub trait Connector: Send + Sync {
    /// 생성되는 백엔드 연결 타입
    type Backend: Backend;

    /// 연결을 엽니다.
    async fn connect(&self, url: &str) -> sqlx::Result<Self::Backend>;
}

/// 단일 데이터베이스 연결.
///
/// 연결은 하나의 작업 흐름에서 순차적으로 사용됩니다.
#[async_trait]
pub trait Backend: Send {
    /// 준비된 문장 핸들
    type Statement: Send + Sync;

    /// 결과가 없는 SQL 문장을 실행합니다 (DDL).
    async fn execute(&mut self, sql: &str) -> sqlx::Result<()>;

    /// 문장을 서버에 준비합니다.
    async fn prepare(&mut self, sql: &'static str) -> sqlx::Result<Self::Statement>;

    /// 준비된 삽입 문장으로 레코드 하나를 씁니다.
    async fn insert(
        &mut self,
        statement: &Self::Statement,
        record: &DailyRecord,
    ) -> sqlx::Result<()>;

    /// `symbol`(과 선택적으로 `date`)을 바인딩하여 레코드를 조회합니다.
    async fn fetch(
        &mut self,
        sql: &str,
        symbol: &str,
        date: Option<NaiveDate>,
    ) -> sqlx::Result<Vec<DailyRecord>>;

    /// 준비된 문장을 해제합니다.
    async fn release(&mut self, statement: Self::Statement) -> sqlx::Result<()>;

    /// 연결을 닫습니다.
    async fn close(self) -> sqlx::Result<()>;
}
