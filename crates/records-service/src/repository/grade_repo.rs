//! 成绩库仓储
//!
//! 成绩记录的动态过滤查询（联表科目、考试类型）、增删改，以及科目/考试类型基础数据。
//! 本仓储不知道学籍库的存在，学生姓名由服务层另行解析。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::traits::GradeRecordRepositoryTrait;
use crate::error::Result;
use crate::filter::GradeRecordFilter;
use crate::models::{
    ExamType, GradeRecord, GradeRecordPatch, GradeRecordRow, NewGradeRecord, Subject,
};

const GRADE_RECORD_SELECT: &str = r#"
    SELECT gr.record_id, gr.student_number, gr.subject_id, gr.exam_type_id,
           gr.score, gr.semester, gr.created_at,
           s.subject_name, et.exam_type_name
    FROM grades_records gr
    JOIN subjects s ON gr.subject_id = s.subject_id
    JOIN exam_types et ON gr.exam_type_id = et.exam_type_id
"#;

/// 按过滤条件拼出完整查询语句
///
/// 返回的 SQL 只包含占位符，参数需通过 `FilterClause::bind_to` 绑定。
fn list_records_sql(filter: &GradeRecordFilter) -> String {
    format!(
        "{}{} ORDER BY gr.created_at DESC, gr.record_id DESC",
        GRADE_RECORD_SELECT,
        filter.to_clause().where_clause()
    )
}

/// 成绩库仓储
pub struct GradeRecordRepository {
    pool: PgPool,
}

impl GradeRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 成绩记录 ====================

    /// 按条件查询成绩记录，按创建时间倒序
    pub async fn list_records(&self, filter: &GradeRecordFilter) -> Result<Vec<GradeRecordRow>> {
        let clause = filter.to_clause();
        let sql = list_records_sql(filter);

        let query = clause.bind_to(sqlx::query_as::<_, GradeRecordRow>(&sql));
        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows)
    }

    /// 插入成绩记录，返回库中实际保存的记录
    pub async fn insert_record(
        &self,
        record: &NewGradeRecord,
        created_at: DateTime<Utc>,
    ) -> Result<GradeRecord> {
        let inserted = sqlx::query_as::<_, GradeRecord>(
            r#"
            INSERT INTO grades_records (student_number, subject_id, exam_type_id, score, semester, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING record_id, student_number, subject_id, exam_type_id, score, semester, created_at
            "#,
        )
        .bind(&record.student_number)
        .bind(record.subject_id)
        .bind(record.exam_type_id)
        .bind(record.score)
        .bind(&record.semester)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// 更新成绩记录，未提供的字段保持原值
    pub async fn update_record(&self, record_id: i32, patch: &GradeRecordPatch) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE grades_records
            SET
                score = COALESCE($2, score),
                semester = COALESCE($3, semester),
                subject_id = COALESCE($4, subject_id),
                exam_type_id = COALESCE($5, exam_type_id)
            WHERE record_id = $1
            "#,
        )
        .bind(record_id)
        .bind(patch.score)
        .bind(&patch.semester)
        .bind(patch.subject_id)
        .bind(patch.exam_type_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// 删除成绩记录
    pub async fn delete_record(&self, record_id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM grades_records WHERE record_id = $1")
            .bind(record_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ==================== 基础数据 ====================

    /// 列出所有科目
    pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT subject_id, subject_name FROM subjects ORDER BY subject_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subjects)
    }

    /// 列出所有考试类型
    pub async fn list_exam_types(&self) -> Result<Vec<ExamType>> {
        let exam_types = sqlx::query_as::<_, ExamType>(
            "SELECT exam_type_id, exam_type_name FROM exam_types ORDER BY exam_type_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(exam_types)
    }
}

#[async_trait]
impl GradeRecordRepositoryTrait for GradeRecordRepository {
    async fn list_records(&self, filter: &GradeRecordFilter) -> Result<Vec<GradeRecordRow>> {
        self.list_records(filter).await
    }

    async fn insert_record(
        &self,
        record: &NewGradeRecord,
        created_at: DateTime<Utc>,
    ) -> Result<GradeRecord> {
        self.insert_record(record, created_at).await
    }

    async fn update_record(&self, record_id: i32, patch: &GradeRecordPatch) -> Result<u64> {
        self.update_record(record_id, patch).await
    }

    async fn delete_record(&self, record_id: i32) -> Result<u64> {
        self.delete_record(record_id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects().await
    }

    async fn list_exam_types(&self) -> Result<Vec<ExamType>> {
        self.list_exam_types().await
    }
}
