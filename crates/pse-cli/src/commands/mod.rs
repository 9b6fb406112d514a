//! CLI 명령어 구현 모듈.

pub mod create_db;
pub mod import;
pub mod show;

#[cfg(test)]
pub(crate) mod mock;

use pse_data::{Backend, DayTradeStore};
use tracing::warn;

/// 저장소를 닫습니다. 실패는 경고로만 남기고 명령 결과를 바꾸지 않습니다.
pub(crate) async fn close_store<B: Backend>(store: &mut DayTradeStore<B>) {
    if let Err(e) = store.close().await {
        warn!(database = %store.database(), error = %e, "Failed to close store");
    }
}
