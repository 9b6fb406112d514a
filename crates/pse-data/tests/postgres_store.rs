//! PostgreSQL 저장소 통합 테스트
//!
//! 로컬 PostgreSQL 서버가 필요합니다. 접속 정보는 환경 변수로 변경할 수 있습니다:
//! `PSE_TEST_DATABASE_HOST`, `PSE_TEST_DATABASE_PORT`, `PSE_TEST_DATABASE_USER`,
//! `PSE_TEST_DATABASE_PASSWORD`.
//!
//! ```text
//! cargo test -p pse-data --test postgres_store -- --ignored --test-threads=1
//! ```

use chrono::NaiveDate;
use pse_core::{ConnectionInfo, DailyRecord};
use pse_data::{
    DataError, Dialect, DialectParser, PgConnector, PgDayTradeStore, ProvisionOptions,
};
use rust_decimal_macros::dec;
use sqlx::{Connection, PgConnection};

const TEST_DATABASE: &str = "pse_data_pg_test";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn test_info() -> ConnectionInfo {
    let port = env_or("PSE_TEST_DATABASE_PORT", "5432").parse().unwrap();
    ConnectionInfo::new(
        env_or("PSE_TEST_DATABASE_HOST", "localhost"),
        port,
        env_or("PSE_TEST_DATABASE_USER", "pse_test"),
        env_or("PSE_TEST_DATABASE_PASSWORD", "pse_test"),
        TEST_DATABASE,
    )
}

/// 이전 실행에서 남은 테스트 데이터베이스를 삭제하고 새로 생성합니다.
async fn fresh_store() -> PgDayTradeStore {
    let info = test_info();
    let mut admin = PgConnection::connect(&info.admin_connection_url()).await.unwrap();
    sqlx::query(&format!("DROP DATABASE IF EXISTS {}", TEST_DATABASE))
        .execute(&mut admin)
        .await
        .unwrap();
    admin.close().await.unwrap();

    let options = ProvisionOptions::new().with_time_zone("Asia/Manila");
    PgDayTradeStore::provision(&PgConnector, &info, &options)
        .await
        .unwrap()
}

fn sevn() -> DailyRecord {
    DailyRecord::new(
        "SEVN",
        NaiveDate::from_ymd_opt(2013, 12, 13).unwrap(),
        dec!(101.00000),
        dec!(101.00000),
        dec!(99.50000),
        dec!(100.00000),
        4940,
    )
}

#[tokio::test]
#[ignore] // DB 연결 필요
async fn test_provision_insert_find() {
    let mut store = fresh_store().await;

    store.insert(&sevn()).await.unwrap();
    let found = store
        .find("SEVN", NaiveDate::from_ymd_opt(2013, 12, 13).unwrap())
        .await
        .unwrap();
    assert_eq!(found.to_string(), sevn().to_string());

    let missing = store
        .find("SEVN", NaiveDate::from_ymd_opt(2013, 12, 14).unwrap())
        .await
        .unwrap_err();
    assert!(missing.is_not_found());

    store.close().await.unwrap();
    store.close().await.unwrap();
    assert!(store.insert(&sevn()).await.unwrap_err().is_closed());
}

#[tokio::test]
#[ignore] // DB 연결 필요
async fn test_provision_existing_database_fails() {
    let mut store = fresh_store().await;
    store.close().await.unwrap();

    let err = PgDayTradeStore::provision(&PgConnector, &test_info(), &ProvisionOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::ProvisionError(_)));
}

#[tokio::test]
#[ignore] // DB 연결 필요
async fn test_import_contemporary_file() {
    let mut store = fresh_store().await;

    let input = "BPI,04/22/2013,104.2,106.5,104.2,105.7,4258640,-207782450\n\
                 BPI,04/23/2013,105.7,107.0,105.0,106.9,3100000,12000\n";
    let parser = DialectParser::new(input.as_bytes(), Dialect::CONTEMPORARY);

    assert_eq!(store.import_all(parser).await.unwrap(), 2);

    let records = store.find_all("BPI").await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().any(|r| r.volume() == 4258640));

    store.close().await.unwrap();
}

#[tokio::test]
#[ignore] // DB 연결 필요
async fn test_symbol_too_long_is_write_error() {
    let mut store = fresh_store().await;

    let record = DailyRecord::new(
        "TOOLONG",
        NaiveDate::from_ymd_opt(2013, 12, 13).unwrap(),
        dec!(1),
        dec!(1),
        dec!(1),
        dec!(1),
        1,
    );
    let err = store.insert(&record).await.unwrap_err();
    assert!(matches!(err, DataError::WriteError(_)));

    store.close().await.unwrap();
}
