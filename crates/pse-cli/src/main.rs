//! PSE 일별 거래 데이터 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 데이터베이스와 day_trades 테이블 생성
//! pse create-db
//!
//! # 과거 형식(YYYYMMDD) 파일 가져오기
//! pse import -f data/stockQuotes_20131213.csv -d historical
//!
//! # 최신 형식(MM/DD/YYYY) 파일 가져오기
//! pse import -f data/2013-04-22.csv -d contemporary
//!
//! # 조회
//! pse show -s SEVN
//! pse show -s SEVN --date 2013-12-13 --format json
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pse_cli::commands::create_db::create_db;
use pse_cli::commands::import::{import_file, ImportConfig};
use pse_cli::commands::show::{show, OutputFormat, ShowConfig};
use pse_core::{init_logging, AppConfig, DEFAULT_CONFIG_PATH};
use pse_data::DialectKind;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "pse")]
#[command(about = "PSE daily trade data CLI - CSV 가져오기 및 PostgreSQL 저장", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (PSE__ 환경 변수로 오버라이드)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 데이터베이스와 day_trades 테이블 생성
    CreateDb,

    /// CSV 파일을 데이터베이스로 가져오기
    Import {
        /// 입력 파일 경로
        #[arg(short, long)]
        file: PathBuf,

        /// 입력 형식 (historical: YYYYMMDD, contemporary: MM/DD/YYYY)
        #[arg(short, long, default_value = "historical")]
        dialect: DialectKind,
    },

    /// 저장된 레코드 조회
    Show {
        /// 종목 심볼 (예: SEVN, BPI)
        #[arg(short, long)]
        symbol: String,

        /// 날짜 (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// 출력 형식 (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    init_logging(config.logging.to_log_config())?;

    match cli.command {
        Commands::CreateDb => {
            create_db(&config.database).await?;
            println!("데이터베이스 생성 완료: {}", config.database.name);
        }

        Commands::Import { file, dialect } => {
            let inserted = import_file(&config.database, ImportConfig { file, dialect }).await?;
            info!("Successfully imported {} records", inserted);
            println!("\n가져오기 완료: {} 레코드", inserted);
        }

        Commands::Show {
            symbol,
            date,
            format,
        } => {
            let format = OutputFormat::parse(&format)?;
            show(
                &config.database,
                ShowConfig {
                    symbol,
                    date,
                    format,
                },
            )
            .await?;
        }
    }

    Ok(())
}
