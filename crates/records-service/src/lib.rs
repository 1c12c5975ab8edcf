//! 学籍成绩服务
//!
//! 通过 REST API 提供学生学籍与考试成绩数据。数据分布在两个独立的 PostgreSQL 存储：
//! 学籍库（年级、班级、学生）与成绩库（成绩记录、科目、考试类型），
//! 成绩记录中的学号是指向学籍库的软引用。
//!
//! ## 模块结构
//!
//! - `filter`: 参数化过滤条件构建
//! - `repository`: 两个存储各自的仓储
//! - `service`: 学籍查询、成绩查询（跨库姓名补全）、成绩写入及组合服务
//! - `handlers` / `routes`: HTTP 接口

pub mod dto;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{RecordsError, Result};
pub use filter::{FilterClause, FilterClauseBuilder, GradeRecordFilter};
pub use service::{GradeRecordReader, GradeRecordWriter, RecordsService, StudentDirectoryReader};
pub use state::AppState;
