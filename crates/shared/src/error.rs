//! 基础设施错误类型
//!
//! 仅覆盖启动阶段（配置加载、连接池建立）的失败，请求路径上的错误由各服务自行定义。

use thiserror::Error;

/// 基础设施错误
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("数据库错误 [{store}]: {source}")]
    Database {
        store: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, InfraError>;

impl InfraError {
    /// 包装某个存储上的数据库错误，保留存储名便于定位是哪一侧失败
    pub fn database(store: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Database {
            store: store.into(),
            source,
        }
    }

    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}
