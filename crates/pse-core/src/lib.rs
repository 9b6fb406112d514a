//! # PSE Core
//!
//! PSE 일별 거래 데이터의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 일별 거래 레코드 (`DailyRecord`)
//! - 데이터베이스 연결 정보 (`ConnectionInfo`)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
