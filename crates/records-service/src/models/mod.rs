//! 领域模型
//!
//! 学籍库实体（年级、班级、学生）与成绩库实体（科目、考试类型、成绩记录），
//! 以及两者拼接后的视图。

pub mod grade;
pub mod student;

pub use grade::{
    ExamType, GradeRecord, GradeRecordPatch, GradeRecordRow, GradeRecordWithDetails,
    NewGradeRecord, StudentRef, Subject,
};
pub use student::{Class, GradeLevel, Student, StudentWithClass};
