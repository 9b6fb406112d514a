//! 데이터베이스 연결 정보.
//!
//! 관리용 데이터베이스(생성/삭제용)와 대상 데이터베이스, 두 가지 연결 문자열을 만듭니다.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// 관리용 기본 데이터베이스.
pub const DEFAULT_ADMIN_DATABASE: &str = "template1";

/// PostgreSQL 연결 정보.
///
/// 비밀번호는 `SecretString`으로 보관하며 `Debug` 출력에 노출되지 않습니다.
pub struct ConnectionInfo {
    host: String,
    port: u16,
    user: String,
    password: SecretString,
    database: String,
    admin_database: String,
}

impl ConnectionInfo {
    /// 새 연결 정보를 생성합니다.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            password: SecretString::new(password.into().into_boxed_str()),
            database: database.into(),
            admin_database: DEFAULT_ADMIN_DATABASE.to_string(),
        }
    }

    /// 관리용 데이터베이스 이름을 변경합니다.
    pub fn with_admin_database(mut self, admin_database: impl Into<String>) -> Self {
        self.admin_database = admin_database.into();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// 대상 데이터베이스 이름
    pub fn database(&self) -> &str {
        &self.database
    }

    /// 관리용 데이터베이스 이름
    pub fn admin_database(&self) -> &str {
        &self.admin_database
    }

    /// 대상 데이터베이스 연결 URL.
    pub fn connection_url(&self) -> String {
        self.url_for(&self.database)
    }

    /// 관리용 데이터베이스 연결 URL.
    ///
    /// 대상 데이터베이스가 아직 없을 때 생성하거나 조회하는 용도입니다.
    pub fn admin_connection_url(&self) -> String {
        self.url_for(&self.admin_database)
    }

    fn url_for(&self, database: &str) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode=disable",
            urlencoding::encode(&self.user),
            urlencoding::encode(self.password.expose_secret()),
            self.host,
            self.port,
            urlencoding::encode(database)
        )
    }
}

impl Clone for ConnectionInfo {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: SecretString::new(self.password.expose_secret().into()),
            database: self.database.clone(),
            admin_database: self.admin_database.clone(),
        }
    }
}

impl fmt::Debug for ConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionInfo")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .field("admin_database", &self.admin_database)
            .finish()
    }
}
