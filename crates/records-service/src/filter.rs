//! 动态过滤条件构建
//!
//! 把一组可选的查询条件翻译成参数化的 WHERE 片段（合取）和与之按位置对齐的绑定参数。
//! 列名只能是编译期常量，用户输入一律作为绑定参数传入，从不拼接进 SQL 文本；
//! 占位符与其参数总是成对追加，序号由已追加的参数个数决定，避免错位。

use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;

/// 绑定参数值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Int(i32),
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

/// 构建完成的过滤子句
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterClause {
    conditions: Vec<String>,
    args: Vec<FilterValue>,
}

impl FilterClause {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// 各个谓词项，如 `gr.semester = $2`
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// 与占位符序号一一对应的参数
    pub fn args(&self) -> &[FilterValue] {
        &self.args
    }

    /// 下一个可用的占位符序号，供调用方在片段之后继续追加参数
    pub fn next_placeholder(&self) -> usize {
        self.args.len() + 1
    }

    /// 可直接拼接在基础查询之后的 WHERE 片段；无条件时为空串
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// 按顺序把参数绑定到查询上
    pub fn bind_to<'q, O>(
        &self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for value in &self.args {
            query = match value {
                FilterValue::Text(text) => query.bind(text.clone()),
                FilterValue::Int(int) => query.bind(*int),
            };
        }
        query
    }
}

/// 过滤子句构建器
#[derive(Debug, Default)]
pub struct FilterClauseBuilder {
    clause: FilterClause,
}

impl FilterClauseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个相等条件
    pub fn eq(mut self, column: &'static str, value: impl Into<FilterValue>) -> Self {
        self.clause.args.push(value.into());
        self.clause
            .conditions
            .push(format!("{} = ${}", column, self.clause.args.len()));
        self
    }

    /// 条件存在时才追加；None 不产生任何谓词
    pub fn eq_opt<V: Into<FilterValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.eq(column, value),
            None => self,
        }
    }

    pub fn build(self) -> FilterClause {
        self.clause
    }
}

/// 成绩记录查询条件
///
/// 字段顺序即谓词与占位符的顺序：学号、科目、学期。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeRecordFilter {
    pub student_number: Option<String>,
    pub subject_id: Option<i32>,
    pub semester: Option<String>,
}

impl GradeRecordFilter {
    pub const STUDENT_NUMBER_COLUMN: &'static str = "gr.student_number";
    pub const SUBJECT_ID_COLUMN: &'static str = "gr.subject_id";
    pub const SEMESTER_COLUMN: &'static str = "gr.semester";

    /// 仅按学号过滤
    pub fn by_student(student_number: impl Into<String>) -> Self {
        Self {
            student_number: Some(student_number.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.student_number.is_none() && self.subject_id.is_none() && self.semester.is_none()
    }

    pub fn to_clause(&self) -> FilterClause {
        FilterClauseBuilder::new()
            .eq_opt(Self::STUDENT_NUMBER_COLUMN, self.student_number.as_deref())
            .eq_opt(Self::SUBJECT_ID_COLUMN, self.subject_id)
            .eq_opt(Self::SEMESTER_COLUMN, self.semester.as_deref())
            .build()
    }
}
