//! 설정 관리.
//!
//! 설정 파일(선택)과 `PSE` 접두사 환경 변수에서 애플리케이션 설정을 로드합니다.
//!
//! ```text
//! PSE__DATABASE__HOST=db.internal
//! PSE__DATABASE__PASSWORD=secret
//! PSE__LOGGING__FORMAT=json
//! ```

use crate::domain::{ConnectionInfo, DEFAULT_ADMIN_DATABASE};
use crate::error::CoreResult;
use crate::logging::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 데이터베이스 기본 시간대.
pub const DEFAULT_TIME_ZONE: &str = "Asia/Manila";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseSettings,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 데이터베이스 설정.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// 호스트
    pub host: String,
    /// 포트
    pub port: u16,
    /// 사용자
    pub user: String,
    /// 비밀번호
    pub password: String,
    /// 대상 데이터베이스 이름
    pub name: String,
    /// 관리용 데이터베이스 이름 (CREATE DATABASE 실행용)
    pub admin_database: String,
    /// 데이터베이스 생성 시 지정할 시간대 (빈 문자열이면 지정하지 않음)
    pub time_zone: Option<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "pse".to_string(),
            password: String::new(),
            name: "pse_data".to_string(),
            admin_database: DEFAULT_ADMIN_DATABASE.to_string(),
            time_zone: Some(DEFAULT_TIME_ZONE.to_string()),
        }
    }
}

impl DatabaseSettings {
    /// 연결 정보로 변환합니다.
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo::new(
            &self.host,
            self.port,
            &self.user,
            &self.password,
            &self.name,
        )
        .with_admin_database(&self.admin_database)
    }

    /// 프로비저닝 시 적용할 시간대.
    pub fn time_zone(&self) -> Option<&str> {
        self.time_zone.as_deref().filter(|tz| !tz.trim().is_empty())
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("admin_database", &self.admin_database)
            .field("time_zone", &self.time_zone)
            .finish()
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl LoggingConfig {
    /// `LogConfig`로 변환합니다. 알 수 없는 형식은 기본값을 사용합니다.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig::new(&self.level)
            .with_format(self.format.parse::<LogFormat>().unwrap_or_default())
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("PSE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
