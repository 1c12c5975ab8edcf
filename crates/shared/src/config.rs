//! 配置管理模块
//!
//! 支持 .env 文件、多格式配置文件加载、环境变量覆盖，以及类型安全的配置访问。
//! 学籍库与成绩库是两个独立的存储，因此各自拥有一份完整的数据库配置。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::observability::ObservabilityConfig;

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// 以指定连接串构造，其余连接池参数取默认值
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 学籍库默认配置
    pub fn student_default() -> Self {
        Self::with_url("postgres://postgres@localhost:5432/student_info_db")
    }

    /// 成绩库默认配置
    pub fn grade_default() -> Self {
        Self::with_url("postgres://postgres@localhost:5432/grade_db")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://postgres@localhost:5432/postgres".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        }
    }
}

fn default_student_database() -> DatabaseConfig {
    DatabaseConfig::student_default()
}

fn default_grade_database() -> DatabaseConfig {
    DatabaseConfig::grade_default()
}

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 允许的跨域来源，逗号分隔；"*" 表示全部放行
    pub cors_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: "*".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_student_database")]
    pub student_database: DatabaseConfig,
    #[serde(default = "default_grade_database")]
    pub grade_database: DatabaseConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            environment: "development".to_string(),
            server: ServerConfig::default(),
            student_database: DatabaseConfig::student_default(),
            grade_database: DatabaseConfig::grade_default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从 .env、配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. .env 文件（仅非生产环境，缺失时忽略）
    /// 2. config/default.toml（默认配置）
    /// 3. config/{environment}.toml（环境特定配置）
    /// 4. config/{service_name}.toml（服务特定配置）
    /// 5. 环境变量（CAMPUS_ 前缀，层级用双下划线，如 CAMPUS_GRADE_DATABASE__URL -> grade_database.url）
    /// 6. 服务特定端口环境变量（如 CAMPUS_RECORDS_PORT）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("CAMPUS_ENV").unwrap_or_else(|_| "development".to_string());

        if env != "production" {
            if let Err(e) = dotenvy::dotenv() {
                debug!(error = %e, "No .env file loaded");
            }
        }

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        if let Some(port) = Self::get_service_port_from_env(service_name) {
            config.server.port = port;
        }

        Ok(config)
    }

    /// 从环境变量获取服务特定端口
    ///
    /// 服务名到环境变量的映射规则：
    /// - campus-records-service -> CAMPUS_RECORDS_PORT
    /// - 其他服务：大写下划线格式 + _PORT
    fn get_service_port_from_env(service_name: &str) -> Option<u16> {
        let env_var_name = Self::service_port_env_var(service_name);
        std::env::var(env_var_name)
            .ok()
            .and_then(|v| v.parse().ok())
    }

    fn service_port_env_var(service_name: &str) -> String {
        match service_name {
            "campus-records-service" => "CAMPUS_RECORDS_PORT".to_string(),
            _ => format!("{}_PORT", service_name.to_uppercase().replace('-', "_")),
        }
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
