//! 成绩记录查询与跨库姓名补全
//!
//! 成绩库内完成 成绩 ⋈ 科目 ⋈ 考试类型 联查，学生姓名需逐行回学籍库查询。
//! 学号查不到视为孤儿记录，以 `"Unknown"` 展示并照常返回；
//! 其它查询失败则中止整个请求，不与"查不到"混为一谈。

use std::sync::Arc;

use campus_shared::observability::metrics as app_metrics;
use tracing::{instrument, warn};

use crate::error::Result;
use crate::filter::GradeRecordFilter;
use crate::models::{GradeRecordWithDetails, StudentRef};
use crate::repository::{GradeRecordRepositoryTrait, StudentDirectoryRepositoryTrait};

/// 成绩记录查询服务
pub struct GradeRecordReader<GR, SR>
where
    GR: GradeRecordRepositoryTrait,
    SR: StudentDirectoryRepositoryTrait,
{
    grade_repo: Arc<GR>,
    student_repo: Arc<SR>,
}

impl<GR, SR> GradeRecordReader<GR, SR>
where
    GR: GradeRecordRepositoryTrait,
    SR: StudentDirectoryRepositoryTrait,
{
    pub fn new(grade_repo: Arc<GR>, student_repo: Arc<SR>) -> Self {
        Self {
            grade_repo,
            student_repo,
        }
    }

    /// 按条件列出成绩记录，按创建时间倒序
    ///
    /// 每行一次学籍库往返（1 + N），结果集较大时耗时线性增长。
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &GradeRecordFilter) -> Result<Vec<GradeRecordWithDetails>> {
        let rows = self.grade_repo.list_records(filter).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let student = self.resolve_student(&row.student_number).await?;
            records.push(GradeRecordWithDetails::compose(row, &student));
        }

        Ok(records)
    }

    /// 解析软引用：存在则带回姓名，不存在则为孤儿
    async fn resolve_student(&self, student_number: &str) -> Result<StudentRef> {
        match self.student_repo.find_by_number(student_number).await? {
            Some(student) => {
                app_metrics::record_grade_record_enrichment("resolved");
                Ok(StudentRef::Resolved(student.name))
            }
            None => {
                app_metrics::record_grade_record_enrichment("orphaned");
                warn!(student_number = %student_number, "Grade record references missing student");
                Ok(StudentRef::Orphaned)
            }
        }
    }
}
