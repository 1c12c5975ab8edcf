//! 学籍库仓储
//!
//! 学生 ⋈ 班级 ⋈ 年级 三表联查，列表、按学号、按班级三种查询共用同一个联表形状。

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::StudentDirectoryRepositoryTrait;
use crate::error::Result;
use crate::models::StudentWithClass;

const STUDENT_WITH_CLASS_SELECT: &str = r#"
    SELECT s.student_id, s.student_number, s.name, s.class_id,
           c.class_name, c.grade_id, g.grade_name
    FROM students s
    JOIN classes c ON s.class_id = c.class_id
    JOIN grades g ON c.grade_id = g.grade_id
"#;

/// 学籍库仓储
pub struct StudentDirectoryRepository {
    pool: PgPool,
}

impl StudentDirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 列出全部学生
    pub async fn list_students(&self) -> Result<Vec<StudentWithClass>> {
        let sql = format!("{} ORDER BY s.student_id", STUDENT_WITH_CLASS_SELECT);
        let students = sqlx::query_as::<_, StudentWithClass>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(students)
    }

    /// 按学号获取学生
    pub async fn find_by_number(&self, student_number: &str) -> Result<Option<StudentWithClass>> {
        let sql = format!("{} WHERE s.student_number = $1", STUDENT_WITH_CLASS_SELECT);
        let student = sqlx::query_as::<_, StudentWithClass>(&sql)
            .bind(student_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    /// 按班级列出学生
    pub async fn list_by_class(&self, class_id: i32) -> Result<Vec<StudentWithClass>> {
        let sql = format!(
            "{} WHERE s.class_id = $1 ORDER BY s.student_id",
            STUDENT_WITH_CLASS_SELECT
        );
        let students = sqlx::query_as::<_, StudentWithClass>(&sql)
            .bind(class_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(students)
    }

    /// 学号是否存在
    pub async fn student_exists(&self, student_number: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM students WHERE student_number = $1)")
                .bind(student_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }
}

#[async_trait]
impl StudentDirectoryRepositoryTrait for StudentDirectoryRepository {
    async fn list_students(&self) -> Result<Vec<StudentWithClass>> {
        self.list_students().await
    }

    async fn find_by_number(&self, student_number: &str) -> Result<Option<StudentWithClass>> {
        self.find_by_number(student_number).await
    }

    async fn list_by_class(&self, class_id: i32) -> Result<Vec<StudentWithClass>> {
        self.list_by_class(class_id).await
    }

    async fn student_exists(&self, student_number: &str) -> Result<bool> {
        self.student_exists(student_number).await
    }
}
