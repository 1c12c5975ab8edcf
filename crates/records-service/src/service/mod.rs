//! 服务层
//!
//! ## 模块结构
//!
//! - `student_reader`: 学籍只读查询
//! - `grade_reader`: 成绩记录查询与跨库姓名补全
//! - `grade_writer`: 成绩记录增删改
//! - `records_service`: 组合服务，供 HTTP 层调用

mod grade_reader;
mod grade_writer;
mod records_service;
mod student_reader;

pub use grade_reader::GradeRecordReader;
pub use grade_writer::GradeRecordWriter;
pub use records_service::RecordsService;
pub use student_reader::StudentDirectoryReader;
