//! HTTP 请求处理器模块

pub mod grade;
pub mod health;
pub mod reference;
pub mod student;
