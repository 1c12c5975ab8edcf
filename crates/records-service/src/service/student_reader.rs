//! 学籍只读查询

use std::sync::Arc;

use tracing::instrument;

use crate::error::{RecordsError, Result};
use crate::models::StudentWithClass;
use crate::repository::StudentDirectoryRepositoryTrait;

/// 学籍查询服务
///
/// 只访问学籍库，不涉及任何跨库操作。
pub struct StudentDirectoryReader<SR>
where
    SR: StudentDirectoryRepositoryTrait,
{
    student_repo: Arc<SR>,
}

impl<SR> StudentDirectoryReader<SR>
where
    SR: StudentDirectoryRepositoryTrait,
{
    pub fn new(student_repo: Arc<SR>) -> Self {
        Self { student_repo }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<StudentWithClass>> {
        self.student_repo.list_students().await
    }

    /// 按学号查询，查不到返回 `StudentNotFound`
    #[instrument(skip(self))]
    pub async fn get_by_number(&self, student_number: &str) -> Result<StudentWithClass> {
        let student_number = student_number.trim();
        if student_number.is_empty() {
            return Err(RecordsError::missing_param("student_number"));
        }

        self.student_repo
            .find_by_number(student_number)
            .await?
            .ok_or_else(|| RecordsError::StudentNotFound(student_number.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_by_class(&self, class_id: i32) -> Result<Vec<StudentWithClass>> {
        self.student_repo.list_by_class(class_id).await
    }
}
