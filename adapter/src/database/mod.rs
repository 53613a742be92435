use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{postgres::PgConnectOptions, PgPool};

pub mod model;

fn make_pg_connect_options(cfg: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.username)
        .password(&cfg.password)
        .database(&cfg.database)
}

#[derive(Clone)]
pub struct ConnectionPool(PgPool);

impl ConnectionPool {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &PgPool {
        &self.0
    }

    pub async fn begin(&self) -> AppResult<sqlx::Transaction<'_, sqlx::Postgres>> {
        self.0.begin().await.map_err(AppError::TransactionError)
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> ConnectionPool {
    ConnectionPool(PgPool::connect_lazy_with(make_pg_connect_options(cfg)))
}

// 参加登録など、件数を伴う更新はすべて SERIALIZABLE で実行する
pub(crate) async fn set_transaction_serializable(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> AppResult<()> {
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
    Ok(())
}

// 外部キー制約違反は 422 として返す
pub(crate) fn map_foreign_key_violation(e: sqlx::Error, message: &str) -> AppError {
    match e.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => {
            AppError::UnprocessableEntity(message.to_string())
        }
        _ => AppError::SpecificOperationError(e),
    }
}

// SERIALIZABLE での直列化失敗 (40001) は利用者に再試行してもらう
pub(crate) fn map_serialization_failure(e: sqlx::Error) -> AppError {
    let serialization_failure = e
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "40001");
    if serialization_failure {
        AppError::UnprocessableEntity(
            "同時に処理が行われたため完了できませんでした。もう一度お試しください。".into(),
        )
    } else {
        AppError::SpecificOperationError(e)
    }
}
