//! 数据库连接管理模块
//!
//! 提供 PostgreSQL 连接池管理，支持健康检查和连接配置。
//! 每个存储一个 `Database` 句柄，启动时构造一次后注入到各组件，不存在全局连接。

use crate::config::{AppConfig, DatabaseConfig};
use crate::error::{InfraError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// 数据库连接池包装
#[derive(Clone)]
pub struct Database {
    name: &'static str,
    pool: PgPool,
}

impl Database {
    /// 创建数据库连接池并立即探活
    ///
    /// 连接池建立后执行一次 `SELECT 1`，确保启动阶段就能发现不可达的存储。
    #[instrument(skip(config))]
    pub async fn connect(name: &'static str, config: &DatabaseConfig) -> Result<Self> {
        info!(store = name, "Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| InfraError::database(name, e))?;

        let db = Self { name, pool };
        db.health_check().await?;

        info!(store = name, "Database connection pool created");

        Ok(db)
    }

    /// 包装已有连接池（测试或外部已建立连接时使用）
    pub fn from_pool(name: &'static str, pool: PgPool) -> Self {
        Self { name, pool }
    }

    /// 存储名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 获取连接池引用
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 健康检查
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| InfraError::database(self.name, e))
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
        info!(store = self.name, "Database connection pool closed");
    }
}

impl std::ops::Deref for Database {
    type Target = PgPool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

/// 学籍库与成绩库两个独立存储句柄
///
/// 两者之间没有任何共享事务，任何跨库一致性都只能由调用方尽力而为。
#[derive(Clone)]
pub struct Stores {
    pub student: Database,
    pub grade: Database,
}

impl Stores {
    pub const STUDENT: &'static str = "student_directory";
    pub const GRADE: &'static str = "grade_records";

    /// 按配置依次建立两个存储的连接，任一失败即返回错误
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let student = Database::connect(Self::STUDENT, &config.student_database).await?;
        let grade = Database::connect(Self::GRADE, &config.grade_database).await?;
        Ok(Self { student, grade })
    }

    /// 同时探活两个存储
    pub async fn health_check(&self) -> Result<()> {
        self.student.health_check().await?;
        self.grade.health_check().await
    }

    /// 关闭两个连接池
    pub async fn close(&self) {
        self.student.close().await;
        self.grade.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_pool_keeps_name() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost:5432/student_info_db")
            .unwrap();
        let db = Database::from_pool(Stores::STUDENT, pool);
        assert_eq!(db.name(), "student_directory");
    }

    #[tokio::test]
    #[ignore] // 需要数据库连接
    async fn test_database_connection() {
        let config = DatabaseConfig::student_default();
        let db = Database::connect(Stores::STUDENT, &config).await.unwrap();
        db.health_check().await.unwrap();
    }
}
