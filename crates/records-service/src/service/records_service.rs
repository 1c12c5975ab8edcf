//! 学籍成绩组合服务
//!
//! HTTP 层唯一依赖的业务入口，按请求把工作分派给学籍查询、成绩查询、成绩写入。
//! 两个仓储各自持有独立的连接池，在构造时注入。

use std::sync::Arc;

use tracing::instrument;

use crate::error::Result;
use crate::filter::GradeRecordFilter;
use crate::models::{
    ExamType, GradeRecord, GradeRecordPatch, GradeRecordWithDetails, NewGradeRecord,
    StudentWithClass, Subject,
};
use crate::repository::{GradeRecordRepositoryTrait, StudentDirectoryRepositoryTrait};

use super::{GradeRecordReader, GradeRecordWriter, StudentDirectoryReader};

/// 学籍成绩服务
pub struct RecordsService<SR, GR>
where
    SR: StudentDirectoryRepositoryTrait,
    GR: GradeRecordRepositoryTrait,
{
    students: StudentDirectoryReader<SR>,
    grade_reader: GradeRecordReader<GR, SR>,
    grade_writer: GradeRecordWriter<GR, SR>,
    grade_repo: Arc<GR>,
}

impl<SR, GR> RecordsService<SR, GR>
where
    SR: StudentDirectoryRepositoryTrait,
    GR: GradeRecordRepositoryTrait,
{
    pub fn new(student_repo: Arc<SR>, grade_repo: Arc<GR>) -> Self {
        Self {
            students: StudentDirectoryReader::new(student_repo.clone()),
            grade_reader: GradeRecordReader::new(grade_repo.clone(), student_repo.clone()),
            grade_writer: GradeRecordWriter::new(grade_repo.clone(), student_repo),
            grade_repo,
        }
    }

    // ==================== 学籍 ====================

    pub async fn list_students(&self) -> Result<Vec<StudentWithClass>> {
        self.students.list_all().await
    }

    pub async fn get_student_by_number(&self, student_number: &str) -> Result<StudentWithClass> {
        self.students.get_by_number(student_number).await
    }

    pub async fn list_students_by_class(&self, class_id: i32) -> Result<Vec<StudentWithClass>> {
        self.students.list_by_class(class_id).await
    }

    // ==================== 成绩记录 ====================

    pub async fn list_grade_records(
        &self,
        filter: &GradeRecordFilter,
    ) -> Result<Vec<GradeRecordWithDetails>> {
        self.grade_reader.list(filter).await
    }

    pub async fn create_grade_record(&self, record: NewGradeRecord) -> Result<GradeRecord> {
        self.grade_writer.create(record).await
    }

    pub async fn update_grade_record(&self, record_id: i32, patch: GradeRecordPatch) -> Result<()> {
        self.grade_writer.update(record_id, patch).await
    }

    pub async fn delete_grade_record(&self, record_id: i32) -> Result<()> {
        self.grade_writer.delete(record_id).await
    }

    // ==================== 基础数据 ====================

    #[instrument(skip(self))]
    pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.grade_repo.list_subjects().await
    }

    #[instrument(skip(self))]
    pub async fn list_exam_types(&self) -> Result<Vec<ExamType>> {
        self.grade_repo.list_exam_types().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordsError;
    use crate::models::{GradeRecordRow, StudentWithClass};
    use crate::repository::{MockGradeRecordRepositoryTrait, MockStudentDirectoryRepositoryTrait};
    use chrono::Utc;

    fn service(
        students: MockStudentDirectoryRepositoryTrait,
        grades: MockGradeRecordRepositoryTrait,
    ) -> RecordsService<MockStudentDirectoryRepositoryTrait, MockGradeRecordRepositoryTrait> {
        RecordsService::new(Arc::new(students), Arc::new(grades))
    }

    #[tokio::test]
    async fn test_reference_data_comes_from_grade_store() {
        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades.expect_list_subjects().returning(|| {
            Ok(vec![
                Subject { subject_id: 1, subject_name: "语文".into() },
                Subject { subject_id: 2, subject_name: "数学".into() },
            ])
        });
        grades.expect_list_exam_types().returning(|| {
            Ok(vec![ExamType { exam_type_id: 1, exam_type_name: "期中".into() }])
        });

        let svc = service(MockStudentDirectoryRepositoryTrait::new(), grades);
        assert_eq!(svc.list_subjects().await.unwrap().len(), 2);
        assert_eq!(svc.list_exam_types().await.unwrap()[0].exam_type_name, "期中");
    }

    #[tokio::test]
    async fn test_create_then_list_by_student() {
        // 模拟同一学生创建成绩后按学号查询
        let created_at = Utc::now();

        let mut students = MockStudentDirectoryRepositoryTrait::new();
        students.expect_student_exists().returning(|_| Ok(true));
        students.expect_find_by_number().returning(|n| {
            Ok(Some(StudentWithClass {
                student_id: 1,
                student_number: n.to_string(),
                name: "张三".into(),
                class_id: 1,
                class_name: "一班".into(),
                grade_id: 1,
                grade_name: "高一".into(),
            }))
        });

        let mut grades = MockGradeRecordRepositoryTrait::new();
        grades.expect_insert_record().returning(move |r, _| {
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
        grades
            .expect_list_records()
            .withf(|f: &GradeRecordFilter| f.student_number.as_deref() == Some("S001"))
            .returning(move |_| {
                Ok(vec![GradeRecordRow {
                    record_id: 1,
                    student_number: "S001".into(),
                    subject_id: 1,
                    exam_type_id: 1,
                    score: 88.5,
                    semester: "2024-1".into(),
                    created_at,
                    subject_name: "语文".into(),
                    exam_type_name: "期中".into(),
                }])
            });

        let svc = service(students, grades);
        let created = svc
            .create_grade_record(NewGradeRecord {
                student_number: "S001".into(),
                subject_id: 1,
                exam_type_id: 1,
                score: 88.5,
                semester: "2024-1".into(),
            })
            .await
            .unwrap();

        let listed = svc
            .list_grade_records(&GradeRecordFilter::by_student("S001"))
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].record_id, created.record_id);
        assert_eq!(listed[0].created_at, created.created_at);
        assert_eq!(listed[0].student_name, "张三");
        assert_eq!(listed[0].subject_name, "语文");
    }

    #[tokio::test]
    async fn test_student_not_found_surfaces() {
        let mut students = MockStudentDirectoryRepositoryTrait::new();
        students.expect_find_by_number().returning(|_| Ok(None));

        let svc = service(students, MockGradeRecordRepositoryTrait::new());
        let err = svc.get_student_by_number("S404").await.unwrap_err();
        assert!(matches!(err, RecordsError::StudentNotFound(_)));
    }
}
