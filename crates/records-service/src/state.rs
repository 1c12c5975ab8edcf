//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use campus_shared::database::Stores;

use crate::repository::{GradeRecordRepository, StudentDirectoryRepository};
use crate::service::RecordsService;

/// 基于 PostgreSQL 仓储的组合服务
pub type PgRecordsService = RecordsService<StudentDirectoryRepository, GradeRecordRepository>;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PgRecordsService>,
    /// 就绪探针用的存储句柄
    pub stores: Stores,
}

impl AppState {
    /// 由两个存储句柄装配仓储与服务
    pub fn new(stores: Stores) -> Self {
        let student_repo = Arc::new(StudentDirectoryRepository::new(stores.student.pool().clone()));
        let grade_repo = Arc::new(GradeRecordRepository::new(stores.grade.pool().clone()));

        Self {
            service: Arc::new(RecordsService::new(student_repo, grade_repo)),
            stores,
        }
    }
}
