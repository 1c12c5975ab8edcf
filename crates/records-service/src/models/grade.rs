//! 成绩库实体定义
//!
//! 成绩记录的 student_number 是指向学籍库的软引用：数据库层面没有任何约束，
//! 只在创建时做一次跨库存在性校验，之后可能因学生被删除而成为孤儿记录。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 科目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subject {
    pub subject_id: i32,
    pub subject_name: String,
}

/// 考试类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExamType {
    pub exam_type_id: i32,
    pub exam_type_name: String,
}

/// 成绩记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GradeRecord {
    pub record_id: i32,
    pub student_number: String,
    pub subject_id: i32,
    pub exam_type_id: i32,
    pub score: f64,
    pub semester: String,
    pub created_at: DateTime<Utc>,
}

/// 成绩库内联表结果（成绩 ⋈ 科目 ⋈ 考试类型），尚未解析学生姓名
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct GradeRecordRow {
    pub record_id: i32,
    pub student_number: String,
    pub subject_id: i32,
    pub exam_type_id: i32,
    pub score: f64,
    pub semester: String,
    pub created_at: DateTime<Utc>,
    pub subject_name: String,
    pub exam_type_name: String,
}

/// 跨库学生引用的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentRef {
    /// 学籍库中存在该学号，携带学生姓名
    Resolved(String),
    /// 学籍库中已找不到该学号
    Orphaned,
}

impl StudentRef {
    /// 孤儿记录对外展示的学生姓名
    pub const UNKNOWN_NAME: &'static str = "Unknown";

    pub fn display_name(&self) -> &str {
        match self {
            Self::Resolved(name) => name,
            Self::Orphaned => Self::UNKNOWN_NAME,
        }
    }

    pub fn is_orphaned(&self) -> bool {
        matches!(self, Self::Orphaned)
    }
}

/// 带科目、考试类型、学生姓名的成绩记录视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecordWithDetails {
    pub record_id: i32,
    pub student_number: String,
    pub student_name: String,
    pub subject_name: String,
    pub subject_id: i32,
    pub exam_type_name: String,
    pub exam_type_id: i32,
    pub score: f64,
    pub semester: String,
    pub created_at: DateTime<Utc>,
}

impl GradeRecordWithDetails {
    /// 将库内联表结果与跨库解析结果拼接
    pub fn compose(row: GradeRecordRow, student: &StudentRef) -> Self {
        Self {
            record_id: row.record_id,
            student_number: row.student_number,
            student_name: student.display_name().to_string(),
            subject_name: row.subject_name,
            subject_id: row.subject_id,
            exam_type_name: row.exam_type_name,
            exam_type_id: row.exam_type_id,
            score: row.score,
            semester: row.semester,
            created_at: row.created_at,
        }
    }
}

/// 待写入的新成绩记录（已通过校验）
#[derive(Debug, Clone, PartialEq)]
pub struct NewGradeRecord {
    pub student_number: String,
    pub subject_id: i32,
    pub exam_type_id: i32,
    pub score: f64,
    pub semester: String,
}

/// 成绩记录的部分更新
///
/// 为 None 的字段保持库中原值；学号不在可更新范围内。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeRecordPatch {
    pub subject_id: Option<i32>,
    pub exam_type_id: Option<i32>,
    pub score: Option<f64>,
    pub semester: Option<String>,
}
