//! 成绩记录写入
//!
//! 创建时对学籍库做一次存在性校验，校验与插入分属两个库，不在同一事务中。
//! 更新与删除只作用于成绩库，影响行数为 0 视为记录不存在。

use std::sync::Arc;

use campus_shared::observability::metrics as app_metrics;
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::error::{RecordsError, Result};
use crate::models::{GradeRecord, GradeRecordPatch, NewGradeRecord};
use crate::repository::{GradeRecordRepositoryTrait, StudentDirectoryRepositoryTrait};

/// 写操作结果标签
mod write_status {
    pub const SUCCESS: &str = "success";
    pub const REJECTED: &str = "rejected";
    pub const NOT_FOUND: &str = "not_found";
    pub const FAILED: &str = "failed";
}

/// 成绩记录写入服务
pub struct GradeRecordWriter<GR, SR>
where
    GR: GradeRecordRepositoryTrait,
    SR: StudentDirectoryRepositoryTrait,
{
    grade_repo: Arc<GR>,
    student_repo: Arc<SR>,
}

impl<GR, SR> GradeRecordWriter<GR, SR>
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

    /// 创建成绩记录
    ///
    /// 先做字段校验，再到学籍库确认学号存在，最后插入。记录 id 与创建时间由服务端生成。
    #[instrument(skip(self, record), fields(student_number = %record.student_number))]
    pub async fn create(&self, record: NewGradeRecord) -> Result<GradeRecord> {
        let record = match validate_new_record(record) {
            Ok(record) => record,
            Err(e) => {
                app_metrics::record_grade_record_write("create", write_status::REJECTED);
                return Err(e);
            }
        };

        self.ensure_student_exists(&record.student_number).await?;

        let created = self
            .grade_repo
            .insert_record(&record, Utc::now())
            .await
            .inspect_err(|_| {
                app_metrics::record_grade_record_write("create", write_status::FAILED);
            })?;

        app_metrics::record_grade_record_write("create", write_status::SUCCESS);
        info!(
            record_id = created.record_id,
            student_number = %created.student_number,
            "Grade record created"
        );

        Ok(created)
    }

    /// 更新成绩记录，学号不可修改也不再校验
    #[instrument(skip(self))]
    pub async fn update(&self, record_id: i32, patch: GradeRecordPatch) -> Result<()> {
        let patch = match validate_patch(patch) {
            Ok(patch) => patch,
            Err(e) => {
                app_metrics::record_grade_record_write("update", write_status::REJECTED);
                return Err(e);
            }
        };

        let affected = self
            .grade_repo
            .update_record(record_id, &patch)
            .await
            .inspect_err(|_| {
                app_metrics::record_grade_record_write("update", write_status::FAILED);
            })?;

        if affected == 0 {
            app_metrics::record_grade_record_write("update", write_status::NOT_FOUND);
            return Err(RecordsError::GradeRecordNotFound(record_id));
        }

        app_metrics::record_grade_record_write("update", write_status::SUCCESS);
        info!(record_id, "Grade record updated");
        Ok(())
    }

    /// 删除成绩记录
    #[instrument(skip(self))]
    pub async fn delete(&self, record_id: i32) -> Result<()> {
        let affected = self
            .grade_repo
            .delete_record(record_id)
            .await
            .inspect_err(|_| {
                app_metrics::record_grade_record_write("delete", write_status::FAILED);
            })?;

        if affected == 0 {
            app_metrics::record_grade_record_write("delete", write_status::NOT_FOUND);
            return Err(RecordsError::GradeRecordNotFound(record_id));
        }

        app_metrics::record_grade_record_write("delete", write_status::SUCCESS);
        info!(record_id, "Grade record deleted");
        Ok(())
    }

    /// 跨库校验学号存在
    ///
    /// 学籍库查询失败与学号不存在对调用方表现一致，均为校验错误。
    async fn ensure_student_exists(&self, student_number: &str) -> Result<()> {
        let exists = match self.student_repo.student_exists(student_number).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(student_number = %student_number, error = %e, "Student existence check failed");
                false
            }
        };

        if exists {
            Ok(())
        } else {
            app_metrics::record_grade_record_write("create", write_status::REJECTED);
            Err(RecordsError::UnknownStudent(student_number.to_string()))
        }
    }
}

/// 校验并规整新建记录
fn validate_new_record(mut record: NewGradeRecord) -> Result<NewGradeRecord> {
    record.student_number = record.student_number.trim().to_string();
    record.semester = record.semester.trim().to_string();

    if record.student_number.is_empty() {
        return Err(RecordsError::Validation("student_number is required".into()));
    }
    if record.semester.is_empty() {
        return Err(RecordsError::Validation("semester is required".into()));
    }
    if record.subject_id <= 0 {
        return Err(RecordsError::Validation("subject_id is required".into()));
    }
    if record.exam_type_id <= 0 {
        return Err(RecordsError::Validation("exam_type_id is required".into()));
    }

    Ok(record)
}

/// 校验部分更新：提供了的字段必须有效
fn validate_patch(mut patch: GradeRecordPatch) -> Result<GradeRecordPatch> {
    if let Some(semester) = patch.semester.as_mut() {
        *semester = semester.trim().to_string();
        if semester.is_empty() {
            return Err(RecordsError::Validation("semester must not be empty".into()));
        }
    }
    if patch.subject_id.is_some_and(|id| id <= 0) {
        return Err(RecordsError::Validation("subject_id must be positive".into()));
    }
    if patch.exam_type_id.is_some_and(|id| id <= 0) {
        return Err(RecordsError::Validation("exam_type_id must be positive".into()));
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockGradeRecordRepositoryTrait, MockStudentDirectoryRepositoryTrait};

    fn new_record() -> NewGradeRecord {
        NewGradeRecord {
            student_number: "S001".to_string(),
            subject_id: 1,
            exam_type_id: 1,
            score: 88.5,
            semester: "2024-1".to_string(),
        }
    }

    fn writer(
        grades: MockGradeRecordRepositoryTrait,
        students: MockStudentDirectoryRepositoryTrait,
    ) -> GradeRecordWriter<MockGradeRecordRepositoryTrait, MockStudentDirectoryRepositoryTrait>
    {
        GradeRecordWriter::new(Arc::new(grades), Arc::new(students))
    }

    #[tokio::test]
    async fn test_create_success_returns_stored_record() {
        let mut students = MockStudentDirectoryRepositoryTrait::new();
        students
            .expect_student_exists()
            .withf(|n: &str| n == "S001")
            .times(1)
            .returning(|_| Ok(true));

        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades
            .expect_insert_record()
            .times(1)
            .returning(|r, created_at| {
                Ok(GradeRecord {
                    record_id: 42,
                    student_number: r.student_number.clone(),
                    subject_id: r.subject_id,
                    exam_type_id: r.exam_type_id,
                    score: r.score,
                    semester: r.semester.clone(),
                    created_at,
                })
            });

        let created = writer(grades, students).create(new_record()).await.unwrap();
        assert_eq!(created.record_id, 42);
        assert_eq!(created.student_number, "S001");
        assert_eq!(created.score, 88.5);
        assert_eq!(created.semester, "2024-1");
    }

    #[tokio::test]
    async fn test_create_trims_before_checking() {
        let mut students = MockStudentDirectoryRepositoryTrait::new();
        students
            .expect_student_exists()
            .withf(|n: &str| n == "S001")
            .returning(|_| Ok(true));

        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades
            .expect_insert_record()
            .withf(|r, _| r.student_number == "S001" && r.semester == "2024-1")
            .returning(|r, created_at| {
                Ok(GradeRecord {
                    record_id: 1,
                    student_number: r.student_number.clone(),
                    subject_id: r.subject_id,
                    exam_type_id: r.exam_type_id,
                    score: r.score,
                    semester: r.semester.clone(),
                    created_at,
                })
            });

        let record = NewGradeRecord {
            student_number: "  S001 ".to_string(),
            semester: " 2024-1".to_string(),
            ..new_record()
        };
        assert!(writer(grades, students).create(record).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_invalid_fields_touch_no_store() {
        let cases = [
            NewGradeRecord { student_number: "".into(), ..new_record() },
            NewGradeRecord { student_number: "   ".into(), ..new_record() },
            NewGradeRecord { semester: "".into(), ..new_record() },
            NewGradeRecord { subject_id: 0, ..new_record() },
            NewGradeRecord { exam_type_id: 0, ..new_record() },
        ];

        for record in cases {
            let mut students = MockStudentDirectoryRepositoryTrait::new();
            students.expect_student_exists().never();
            let mut grades = MockGradeRecordRepositoryTrait::new();
            grades.expect_insert_record().never();

            let err = writer(grades, students).create(record).await.unwrap_err();
            assert!(matches!(err, RecordsError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_create_unknown_student_writes_nothing() {
        let mut students = MockStudentDirectoryRepositoryTrait::new();
        students.expect_student_exists().returning(|_| Ok(false));
        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades.expect_insert_record().never();

        let err = writer(grades, students).create(new_record()).await.unwrap_err();
        assert!(matches!(err, RecordsError::UnknownStudent(ref n) if n == "S001"));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_create_failing_check_reads_as_unknown_student() {
        let mut students = MockStudentDirectoryRepositoryTrait::new();
        students
            .expect_student_exists()
            .returning(|_| Err(RecordsError::Database(sqlx::Error::PoolTimedOut)));
        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades.expect_insert_record().never();

        let err = writer(grades, students).create(new_record()).await.unwrap_err();
        assert!(matches!(err, RecordsError::UnknownStudent(_)));
    }

    #[tokio::test]
    async fn test_create_insert_failure_is_store_error() {
        let mut students = MockStudentDirectoryRepositoryTrait::new();
        students.expect_student_exists().returning(|_| Ok(true));
        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades
            .expect_insert_record()
            .returning(|_, _| Err(RecordsError::Database(sqlx::Error::PoolClosed)));

        let err = writer(grades, students).create(new_record()).await.unwrap_err();
        assert!(matches!(err, RecordsError::Database(_)));
    }

    #[tokio::test]
    async fn test_update_zero_rows_is_not_found() {
        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades
            .expect_update_record()
            .withf(|id, _| *id == 99)
            .returning(|_, _| Ok(0));

        let patch = GradeRecordPatch {
            score: Some(60.0),
            ..Default::default()
        };
        let err = writer(grades, MockStudentDirectoryRepositoryTrait::new())
            .update(99, patch)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::GradeRecordNotFound(99)));
    }

    #[tokio::test]
    async fn test_update_never_consults_directory() {
        let mut students = MockStudentDirectoryRepositoryTrait::new();
        students.expect_student_exists().never();
        students.expect_find_by_number().never();

        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades
            .expect_update_record()
            .withf(|id, p| *id == 1 && p.score == Some(95.0) && p.semester.as_deref() == Some("2024-2"))
            .returning(|_, _| Ok(1));

        let patch = GradeRecordPatch {
            score: Some(95.0),
            semester: Some(" 2024-2 ".into()),
            ..Default::default()
        };
        assert!(writer(grades, students).update(1, patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_patch() {
        let cases = [
            GradeRecordPatch { semester: Some("  ".into()), ..Default::default() },
            GradeRecordPatch { subject_id: Some(0), ..Default::default() },
            GradeRecordPatch { exam_type_id: Some(-1), ..Default::default() },
        ];

        for patch in cases {
            let mut grades = MockGradeRecordRepositoryTrait::new();
            grades.expect_update_record().never();

            let err = writer(grades, MockStudentDirectoryRepositoryTrait::new())
                .update(1, patch)
                .await
                .unwrap_err();
            assert!(matches!(err, RecordsError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_delete_zero_rows_is_not_found() {
        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades.expect_delete_record().returning(|_| Ok(0));

        let err = writer(grades, MockStudentDirectoryRepositoryTrait::new())
            .delete(7)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::GradeRecordNotFound(7)));
    }

    #[tokio::test]
    async fn test_delete_existing_record() {
        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades
            .expect_delete_record()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(1));

        assert!(
            writer(grades, MockStudentDirectoryRepositoryTrait::new())
                .delete(7)
                .await
                .is_ok()
        );
    }
}
