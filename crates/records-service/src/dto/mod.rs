//! 数据传输对象
//!
//! 成功响应直接返回实体本身，这里只定义请求侧结构。

pub mod request;

pub use request::*;
