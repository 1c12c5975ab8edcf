//! 仓储 Trait 定义
//!
//! 服务层依赖抽象而非具体实现，测试时可以分别替换两个存储

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::filter::GradeRecordFilter;
use crate::models::{
    ExamType, GradeRecord, GradeRecordPatch, GradeRecordRow, NewGradeRecord, StudentWithClass,
    Subject,
};

/// 学籍库仓储接口（只读）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectoryRepositoryTrait: Send + Sync {
    async fn list_students(&self) -> Result<Vec<StudentWithClass>>;
    async fn find_by_number(&self, student_number: &str) -> Result<Option<StudentWithClass>>;
    async fn list_by_class(&self, class_id: i32) -> Result<Vec<StudentWithClass>>;
    async fn student_exists(&self, student_number: &str) -> Result<bool>;
}

/// 成绩库仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GradeRecordRepositoryTrait: Send + Sync {
    // 成绩记录
    async fn list_records(&self, filter: &GradeRecordFilter) -> Result<Vec<GradeRecordRow>>;
    async fn insert_record(
        &self,
        record: &NewGradeRecord,
        created_at: DateTime<Utc>,
    ) -> Result<GradeRecord>;
    /// 返回受影响行数
    async fn update_record(&self, record_id: i32, patch: &GradeRecordPatch) -> Result<u64>;
    /// 返回受影响行数
    async fn delete_record(&self, record_id: i32) -> Result<u64>;

    // 基础数据
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn list_exam_types(&self) -> Result<Vec<ExamType>>;
}
