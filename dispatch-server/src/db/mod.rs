//! Database Module
//!
//! 嵌入式 SurrealDB 存储。二进制使用 RocksDB 引擎，测试使用内存引擎。
//!
//! 唯一性约束在库级定义 (`DEFINE INDEX ... UNIQUE`)，重复的
//! `account.email` / `order.order_id` 在并发下也只会有一次写入成功。

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "dispatch";
const DATABASE: &str = "dispatch";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database at `db_path` (RocksDB engine)
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self::bootstrap(db).await?;
        tracing::info!(path = %db_path, "Database connection established (SurrealDB/RocksDB)");
        Ok(service)
    }

    /// Open an in-memory database (tests, ephemeral runs)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::bootstrap(db).await
    }

    /// Select namespace/database and define schema-level constraints
    async fn bootstrap(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(
            r#"
            DEFINE INDEX IF NOT EXISTS uniq_account_email ON TABLE account COLUMNS email UNIQUE;
            DEFINE INDEX IF NOT EXISTS uniq_order_ref ON TABLE order COLUMNS order_id UNIQUE;
            "#,
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;

        Ok(Self { db })
    }
}
