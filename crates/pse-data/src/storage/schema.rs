//! `day_trades` 테이블 스키마와 SQL 문장.
//!
//! ```text
//! symbol  varchar(5)      NOT NULL
//! date    date            NOT NULL
//! open    numeric(14, 5)  NOT NULL
//! high    numeric(14, 5)  NOT NULL
//! low     numeric(14, 5)  NOT NULL
//! close   numeric(14, 5)  NOT NULL
//! vol     integer         NOT NULL
//! ```
//!
//! 기본 키나 유니크 제약이 없으므로 같은 (symbol, date)를 여러 번 삽입할 수 있습니다.

/// 테이블 이름.
pub const TABLE_NAME: &str = "day_trades";

/// PostgreSQL 식별자 최대 길이 (바이트).
pub const MAX_IDENTIFIER_LEN: usize = 63;

pub const CREATE_TABLE_SQL: &str = "CREATE TABLE day_trades (\
     symbol varchar(5) NOT NULL, \
     date date NOT NULL, \
     open numeric(14, 5) NOT NULL, \
     high numeric(14, 5) NOT NULL, \
     low numeric(14, 5) NOT NULL, \
     close numeric(14, 5) NOT NULL, \
     vol integer NOT NULL)";

pub const INSERT_SQL: &str = "INSERT INTO day_trades (symbol, date, open, high, low, close, vol) \
     VALUES ($1, $2, $3, $4, $5, $6, $7)";

pub const SELECT_BY_SYMBOL_SQL: &str = "SELECT symbol, date, open, high, low, close, vol \
     FROM day_trades WHERE symbol = $1";

pub const SELECT_BY_KEY_SQL: &str = "SELECT symbol, date, open, high, low, close, vol \
     FROM day_trades WHERE symbol = $1 AND date = $2 LIMIT 1";

/// `CREATE DATABASE` 문장을 생성합니다.
///
/// 데이터베이스 이름은 따옴표 없는 소문자 식별자(`[a-z_][a-z0-9_]*`)만 허용합니다.
pub fn create_database_sql(database: &str) -> Result<String, String> {
    validate_identifier(database)?;
    Ok(format!("CREATE DATABASE {}", database))
}

/// 데이터베이스 기본 시간대 설정 문장을 생성합니다.
pub fn set_time_zone_sql(database: &str, time_zone: &str) -> Result<String, String> {
    validate_identifier(database)?;
    validate_time_zone(time_zone)?;
    Ok(format!(
        "ALTER DATABASE {} SET TIME ZONE '{}'",
        database,
        time_zone
    ))
}

fn validate_identifier(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if !valid_start || !valid_rest {
        return Err(format!(
            "invalid database name {:?}: expected lowercase letters, digits and underscores",
            name
        ));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(format!(
            "invalid database name {:?}: longer than {} bytes",
            name, MAX_IDENTIFIER_LEN
        ));
    }
    Ok(())
}

fn validate_time_zone(time_zone: &str) -> Result<(), String> {
    let valid = !time_zone.is_empty()
        && time_zone
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '+' | '-' | ':'));
    if valid {
        Ok(())
    } else {
        Err(format!("invalid time zone {:?}", time_zone))
    }
}
