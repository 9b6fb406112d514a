//! 데이터베이스 생성 명령.

use anyhow::{Context, Result};
use pse_core::DatabaseSettings;
use pse_data::{PgConnector, PgDayTradeStore, ProvisionOptions};
use tracing::info;

/// 설정의 시간대로 생성 옵션을 만듭니다.
pub fn provision_options(settings: &DatabaseSettings) -> ProvisionOptions {
    match settings.time_zone() {
        Some(time_zone) => ProvisionOptions::new().with_time_zone(time_zone),
        None => ProvisionOptions::new(),
    }
}

/// 데이터베이스와 `day_trades` 테이블을 생성합니다.
pub async fn create_db(settings: &DatabaseSettings) -> Result<()> {
    let info = settings.connection_info();
    let options = provision_options(settings);

    let mut store = PgDayTradeStore::provision(&PgConnector, &info, &options)
        .await
        .with_context(|| format!("Failed to create database {}", info.database()))?;
    store.close().await?;

    info!(database = %info.database(), "Database created");
    Ok(())
}
