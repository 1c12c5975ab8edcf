//! 共享库
//!
//! 包含学籍服务与成绩服务共用的配置、错误处理、数据库连接与可观测性等基础设施代码。
//! 两个存储（学籍库、成绩库）各自独立连接，本库只负责把它们建立起来，不做任何跨库协调。

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
