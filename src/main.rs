//! # chueok 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 업로드 디렉토리 생성
//! 6. API 라우터 설정
//! 7. HTTP 서버 시작 (Ctrl+C로 정상 종료)

mod config;
mod db;
mod error;
mod extract;
mod models;
mod routes;
mod services;

use anyhow::Result;
use config::Config;
use routes::AppState;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 chueok, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chueok=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting chueok server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // "?mode=rwc": 파일이 없으면 새로 만듭니다.
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: 업로드 디렉토리 생성 ──
    let uploads_path = PathBuf::from(&config.uploads_path);
    if !uploads_path.exists() {
        tokio::fs::create_dir_all(&uploads_path).await?;
        tracing::info!("Created uploads directory: {}", config.uploads_path);
    }

    // ── 7단계: 라우터 조립 ──
    let state = AppState {
        pool: pool.clone(),
        uploads_path,
        upload_max_bytes: config.upload_max_bytes,
    };
    let app = routes::router(state);

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // with_graceful_shutdown(): 신호가 오면 새 연결을 받지 않고 진행 중인 요청을 마친 뒤 반환합니다.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 종료 직전에 DB 연결을 모두 닫습니다.
    pool.close().await;
    tracing::info!("Server stopped, database pool closed");

    Ok(())
}

/// Ctrl+C(SIGINT)를 기다립니다.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
