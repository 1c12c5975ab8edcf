//! 数据库仓储层
//!
//! 提供两个独立存储的数据访问接口，封装 SQL 操作细节。
//!
//! ## 设计原则
//!
//! - 每个仓储只持有自己那一个存储的连接池，不跨库访问
//! - 跨库拼接由服务层完成，仓储不包含业务逻辑
//! - 定义 trait 接口以支持 mock 测试

mod grade_repo;
mod student_repo;
mod traits;

pub use grade_repo::GradeRecordRepository;
pub use student_repo::StudentDirectoryRepository;
pub use traits::*;
