//! PSE 데이터 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 데이터베이스 및 `day_trades` 테이블 생성
//! - CSV 파일 가져오기
//! - 저장된 레코드 조회

pub mod commands;
