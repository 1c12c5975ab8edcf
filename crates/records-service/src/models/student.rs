//! 学籍库实体定义
//!
//! 年级 -> 班级 -> 学生 三层结构，库内外键由存储自身保证。

use serde::{Deserialize, Serialize};

/// 年级
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GradeLevel {
    pub grade_id: i32,
    pub grade_name: String,
}

/// 班级
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Class {
    pub class_id: i32,
    /// 所属年级
    pub grade_id: i32,
    pub class_name: String,
}

/// 学生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub student_id: i32,
    /// 学号，唯一业务键，也是成绩库唯一可见的学生标识
    pub student_number: String,
    pub name: String,
    pub class_id: i32,
}

/// 学生 + 班级 + 年级 联表视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentWithClass {
    pub student_id: i32,
    pub student_number: String,
    pub name: String,
    pub class_id: i32,
    pub class_name: String,
    pub grade_id: i32,
    pub grade_name: String,
}

impl StudentWithClass {
    pub fn student(&self) -> Student {
        Student {
            student_id: self.student_id,
            student_number: self.student_number.clone(),
            name: self.name.clone(),
            class_id: self.class_id,
        }
    }

    pub fn class(&self) -> Class {
        Class {
            class_id: self.class_id,
            grade_id: self.grade_id,
            class_name: self.class_name.clone(),
        }
    }

    pub fn grade_level(&self) -> GradeLevel {
        GradeLevel {
            grade_id: self.grade_id,
            grade_name: self.grade_name.clone(),
        }
    }
}
