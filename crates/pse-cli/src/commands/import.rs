//! CSV 파일 가져오기 명령.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pse_core::{ConnectionInfo, DatabaseSettings};
use pse_data::{Connector, DayTradeStore, DialectKind, DialectParser, PgConnector};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

use super::close_store;

/// 가져오기 설정.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// 입력 파일 경로
    pub file: PathBuf,
    /// 입력 형식
    pub dialect: DialectKind,
}

/// 파일의 모든 레코드를 저장소에 삽입하고 삽입 개수를 반환합니다.
///
/// 실패하면 그 전에 삽입된 레코드는 그대로 남습니다.
pub async fn import_file(settings: &DatabaseSettings, config: ImportConfig) -> Result<usize> {
    import_with(&PgConnector, &settings.connection_info(), &config).await
}

pub(crate) async fn import_with<C: Connector>(
    connector: &C,
    info: &ConnectionInfo,
    config: &ImportConfig,
) -> Result<usize> {
    let parser = DialectParser::from_path(&config.file, config.dialect.dialect())
        .with_context(|| format!("Failed to open {}", config.file.display()))?;

    info!(database = %info.database(), "Connecting to database...");
    let mut store = DayTradeStore::open(connector, info)
        .await
        .context("Failed to connect to database")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!(
        "Importing {} ({})",
        config.file.display(),
        config.dialect
    ));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = store.import_all(parser).await;
    match &result {
        Ok(inserted) => pb.finish_with_message(format!("Imported {} records", inserted)),
        Err(e) => {
            pb.abandon_with_message("Import failed");
            error!(file = %config.file.display(), "Import failed: {}", e);
        }
    }
    close_store(&mut store).await;

    result.context("Import stopped; records before the failing line were kept")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::FlakyCloseConnector;
    use pse_data::DataError;
    use std::path::Path;

    fn write_input(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pse-cli-{}-{}.csv", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn info() -> ConnectionInfo {
        ConnectionInfo::new("localhost", 5432, "pse", "", "pse_data")
    }

    fn config(file: &Path) -> ImportConfig {
        ImportConfig {
            file: file.to_path_buf(),
            dialect: DialectKind::Historical,
        }
    }

    #[tokio::test]
    async fn test_import_error_survives_close_failure() {
        let file = write_input(
            "bad-row",
            "SEVN,20131213,101,101,99.5,100,4940,\n\
             SEVN,20131216,100,102,100,101.5,1200,\n\
             SEVN,2013121,100,102,100,101.5,1200,\n\
             SEVN,20131218,99.5,99.5,99.5,99.5,90,\n",
        );
        let connector = FlakyCloseConnector::default();

        let err = import_with(&connector, &info(), &config(&file)).await.unwrap_err();
        std::fs::remove_file(&file).ok();

        match err.downcast_ref::<DataError>() {
            Some(DataError::ParseError(e)) => assert_eq!(e.line(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(connector.rows().len(), 2);
        assert_eq!(connector.close_attempts(), 1);
    }

    #[tokio::test]
    async fn test_import_count_survives_close_failure() {
        let file = write_input(
            "ok",
            "<NAME>,<DATE>,<OPEN>,<HIGH>,<LOW>,<CLOSE>,<VOL>,\n\
             SEVN,20131213,101,101,99.5,100,4940,\n",
        );
        let connector = FlakyCloseConnector::default();

        let inserted = import_with(&connector, &info(), &config(&file)).await.unwrap();
        std::fs::remove_file(&file).ok();

        assert_eq!(inserted, 1);
        assert_eq!(connector.close_attempts(), 1);
    }
}
