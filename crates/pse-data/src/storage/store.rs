//! 일별 거래 저장소.
//!
//! 스키마 생성과 레코드 단위/일괄 작업을 제공합니다.
//!
//! ```text
//! (값 없음) --provision/open--> Open --close--> Closed
//! ```
//!
//! 모든 작업이 `&mut self`를 받으므로 하나의 저장소를 동시에 사용할 수 없습니다.

use super::backend::{Backend, Connector};
use super::schema;
use crate::error::{DataError, Result};
use crate::import::ParseError;
use chrono::NaiveDate;
use pse_core::{ConnectionInfo, DailyRecord};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

/// 가져오기 진행 로그 간격 (레코드 수).
const IMPORT_LOG_INTERVAL: usize = 10_000;

/// 데이터베이스 생성 옵션.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// 데이터베이스 기본 시간대 (`None`이면 서버 기본값 유지)
    pub time_zone: Option<String>,
}

impl ProvisionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 데이터베이스 기본 시간대를 설정합니다 (예: `Asia/Manila`).
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }
}

/// `day_trades` 테이블 저장소.
pub struct DayTradeStore<B: Backend> {
    database: String,
    state: StoreState<B>,
}

enum StoreState<B: Backend> {
    Open(OpenStore<B>),
    Closed,
}

struct OpenStore<B: Backend> {
    backend: B,
    /// 첫 삽입 시 준비되어 닫을 때까지 재사용됨
    insert_statement: OnceCell<B::Statement>,
}

impl<B: Backend> OpenStore<B> {
    fn new(backend: B) -> Self {
        Self {
            backend,
            insert_statement: OnceCell::new(),
        }
    }

    async fn insert(&mut self, record: &DailyRecord) -> Result<()> {
        let OpenStore {
            backend,
            insert_statement,
        } = self;

        if !insert_statement.initialized() {
            debug!("Preparing insert statement");
        }
        let statement = insert_statement
            .get_or_try_init(|| backend.prepare(schema::INSERT_SQL))
            .await
            .map_err(|e| DataError::WriteError(format!("failed to prepare insert: {}", e)))?;

        backend
            .insert(statement, record)
            .await
            .map_err(|e| DataError::WriteError(e.to_string()))
    }

    async fn shutdown(mut self) -> Result<()> {
        let released = match self.insert_statement.take() {
            Some(statement) => self
                .backend
                .release(statement)
                .await
                .map_err(|e| DataError::QueryError(e.to_string())),
            None => Ok(()),
        };

        // 해제에 실패해도 연결은 닫음
        self.backend
            .close()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;
        released
    }
}

impl<B: Backend> DayTradeStore<B> {
    /// 데이터베이스와 `day_trades` 테이블을 생성하고 저장소를 엽니다.
    ///
    /// 관리용 데이터베이스에 연결하여 `CREATE DATABASE`(그리고 요청 시 시간대 설정)를
    /// 실행한 뒤 대상 데이터베이스에 다시 연결해 테이블을 만듭니다.
    /// 이미 존재하는 데이터베이스는 `ProvisionError`로 실패합니다.
    #[instrument(skip_all, fields(database = %info.database()))]
    pub async fn provision<C>(
        connector: &C,
        info: &ConnectionInfo,
        options: &ProvisionOptions,
    ) -> Result<Self>
    where
        C: Connector<Backend = B>,
    {
        let create_database =
            schema::create_database_sql(info.database()).map_err(DataError::ProvisionError)?;
        let set_time_zone = options
            .time_zone
            .as_deref()
            .map(|tz| schema::set_time_zone_sql(info.database(), tz))
            .transpose()
            .map_err(DataError::ProvisionError)?;

        info!(admin_database = %info.admin_database(), "Creating database");
        let mut admin = connector
            .connect(&info.admin_connection_url())
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        let created = create_database_with(&mut admin, &create_database, set_time_zone.as_deref()).await;
        if let Err(e) = admin.close().await {
            warn!(error = %e, "Failed to close admin connection");
        }
        created?;

        info!("Creating table {}", schema::TABLE_NAME);
        let mut backend = connector
            .connect(&info.connection_url())
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        if let Err(e) = backend.execute(schema::CREATE_TABLE_SQL).await {
            if let Err(close_err) = backend.close().await {
                warn!(error = %close_err, "Failed to close connection");
            }
            return Err(DataError::ProvisionError(e.to_string()));
        }

        info!("Database provisioned");
        Ok(Self::from_backend(info.database(), backend))
    }

    /// 이미 생성된 데이터베이스에 연결합니다.
    #[instrument(skip_all, fields(database = %info.database()))]
    pub async fn open<C>(connector: &C, info: &ConnectionInfo) -> Result<Self>
    where
        C: Connector<Backend = B>,
    {
        let backend = connector
            .connect(&info.connection_url())
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        debug!("Store opened");
        Ok(Self::from_backend(info.database(), backend))
    }

    fn from_backend(database: &str, backend: B) -> Self {
        Self {
            database: database.to_string(),
            state: StoreState::Open(OpenStore::new(backend)),
        }
    }

    /// 대상 데이터베이스 이름.
    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, StoreState::Closed)
    }

    fn open_store(&mut self) -> Result<&mut OpenStore<B>> {
        match &mut self.state {
            StoreState::Open(store) => Ok(store),
            StoreState::Closed => Err(DataError::Closed),
        }
    }

    /// 레코드 하나를 삽입합니다.
    ///
    /// 각 삽입은 독립적으로 커밋됩니다.
    pub async fn insert(&mut self, record: &DailyRecord) -> Result<()> {
        self.open_store()?.insert(record).await
    }

    /// 레코드 소스를 끝까지 읽어 모두 삽입하고 삽입한 개수를 반환합니다.
    ///
    /// 첫 번째 파싱 오류 또는 쓰기 오류에서 멈추고 그 오류를 반환합니다.
    /// 트랜잭션을 사용하지 않으므로 앞서 삽입된 레코드는 남습니다.
    #[instrument(skip_all, fields(database = %self.database))]
    pub async fn import_all<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = std::result::Result<DailyRecord, ParseError>>,
    {
        let store = self.open_store()?;
        let mut inserted = 0usize;

        for item in records {
            let record = match item {
                Ok(record) => record,
                Err(e) => {
                    warn!(inserted, line = e.line(), error = %e, "Import stopped by parse error");
                    return Err(e.into());
                }
            };

            if let Err(e) = store.insert(&record).await {
                warn!(inserted, symbol = %record.symbol(), date = %record.date(), error = %e, "Import stopped by write error");
                return Err(e);
            }

            inserted += 1;
            if inserted % IMPORT_LOG_INTERVAL == 0 {
                info!(inserted, "Import progress");
            }
        }

        info!(inserted, "Import completed");
        Ok(inserted)
    }

    /// (symbol, date)로 레코드를 조회합니다.
    ///
    /// 중복 행이 있으면 그 중 하나를 반환합니다.
    pub async fn find(&mut self, symbol: &str, date: NaiveDate) -> Result<DailyRecord> {
        let store = self.open_store()?;
        let records = store
            .backend
            .fetch(schema::SELECT_BY_KEY_SQL, symbol, Some(date))
            .await
            .map_err(|e| DataError::QueryError(e.to_string()))?;

        records.into_iter().next().ok_or_else(|| DataError::NotFound {
            symbol: symbol.to_string(),
            date,
        })
    }

    /// 심볼의 모든 레코드를 조회합니다. 순서는 보장하지 않습니다.
    pub async fn find_all(&mut self, symbol: &str) -> Result<Vec<DailyRecord>> {
        let store = self.open_store()?;
        store
            .backend
            .fetch(schema::SELECT_BY_SYMBOL_SQL, symbol, None)
            .await
            .map_err(|e| DataError::QueryError(e.to_string()))
    }

    /// 준비된 문장과 연결을 해제합니다. 이미 닫혀 있으면 아무 것도 하지 않습니다.
    pub async fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, StoreState::Closed) {
            StoreState::Open(store) => {
                debug!(database = %self.database, "Closing store");
                store.shutdown().await
            }
            StoreState::Closed => Ok(()),
        }
    }
}

impl<B: Backend> std::fmt::Debug for DayTradeStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DayTradeStore")
            .field("database", &self.database)
            .field("closed", &self.is_closed())
            .finish()
    }
}

async fn create_database_with<B: Backend>(
    admin: &mut B,
    create_database: &str,
    set_time_zone: Option<&str>,
) -> Result<()> {
    admin
        .execute(create_database)
        .await
        .map_err(|e| DataError::ProvisionError(e.to_string()))?;

    if let Some(sql) = set_time_zone {
        admin
            .execute(sql)
            .await
            .map_err(|e| DataError::ProvisionError(e.to_string()))?;
    }
    Ok(())
}

// ===== 테스트 =====
