//! 请求参数与请求体
//!
//! 查询参数一律先以字符串接收，再由各自的转换方法解析，
//! 这样整数格式错误能以统一的校验错误返回，而不是框架默认的拒绝响应。

use serde::Deserialize;
use validator::Validate;

use crate::error::{RecordsError, Result};
use crate::filter::GradeRecordFilter;
use crate::models::{GradeRecordPatch, NewGradeRecord};

/// 去掉首尾空白，空串视为未提供
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 解析可选整数参数
fn parse_optional_int(name: &str, value: Option<String>) -> Result<Option<i32>> {
    match non_blank(value) {
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| RecordsError::invalid_integer(name, &raw)),
        None => Ok(None),
    }
}

/// 解析必填整数参数
fn parse_required_int(name: &str, value: Option<String>) -> Result<i32> {
    parse_optional_int(name, value)?.ok_or_else(|| RecordsError::missing_param(name))
}

/// 成绩记录查询参数
///
/// 未识别的参数直接忽略。
#[derive(Debug, Default, Deserialize)]
pub struct GradeRecordQuery {
    pub student_number: Option<String>,
    pub subject_id: Option<String>,
    pub semester: Option<String>,
}

impl GradeRecordQuery {
    pub fn into_filter(self) -> Result<GradeRecordFilter> {
        Ok(GradeRecordFilter {
            student_number: non_blank(self.student_number),
            subject_id: parse_optional_int("subject_id", self.subject_id)?,
            semester: non_blank(self.semester),
        })
    }
}

/// 按学号查询学生
#[derive(Debug, Default, Deserialize)]
pub struct StudentSearchParams {
    pub student_number: Option<String>,
}

impl StudentSearchParams {
    pub fn student_number(self) -> Result<String> {
        non_blank(self.student_number).ok_or_else(|| RecordsError::missing_param("student_number"))
    }
}

/// 按班级查询学生
#[derive(Debug, Default, Deserialize)]
pub struct ClassQueryParams {
    pub class_id: Option<String>,
}

impl ClassQueryParams {
    pub fn class_id(self) -> Result<i32> {
        parse_required_int("class_id", self.class_id)
    }
}

/// 更新、删除成绩记录时定位记录
#[derive(Debug, Default, Deserialize)]
pub struct RecordIdParams {
    pub record_id: Option<String>,
}

impl RecordIdParams {
    pub fn record_id(self) -> Result<i32> {
        parse_required_int("record_id", self.record_id)
    }
}

/// 创建成绩记录请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGradeRecordRequest {
    #[validate(length(max = 32, message = "学号长度不能超过32个字符"))]
    pub student_number: String,
    pub subject_id: i32,
    pub exam_type_id: i32,
    pub score: f64,
    #[validate(length(max = 20, message = "学期长度不能超过20个字符"))]
    pub semester: String,
}

impl From<CreateGradeRecordRequest> for NewGradeRecord {
    fn from(req: CreateGradeRecordRequest) -> Self {
        Self {
            student_number: req.student_number,
            subject_id: req.subject_id,
            exam_type_id: req.exam_type_id,
            score: req.score,
            semester: req.semester,
        }
    }
}

/// 更新成绩记录请求
///
/// 只更新出现的字段；请求体中的学号会被忽略。
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGradeRecordRequest {
    pub subject_id: Option<i32>,
    pub exam_type_id: Option<i32>,
    pub score: Option<f64>,
    #[validate(length(max = 20, message = "学期长度不能超过20个字符"))]
    pub semester: Option<String>,
}

impl From<UpdateGradeRecordRequest> for GradeRecordPatch {
    fn from(req: UpdateGradeRecordRequest) -> Self {
        Self {
            subject_id: req.subject_id,
            exam_type_id: req.exam_type_id,
            score: req.score,
            semester: req.semester,
        }
    }
}
