use std::sync::Arc;

use crate::models::{
    ListParams,
    attendance::{
        entities::Attendance,
        requests::{AttendanceChanges, NewAttendance},
        responses::{AttendanceListResponse, AttendanceSummary},
    },
    performance::{
        entities::Performance,
        requests::{NewPerformance, PerformanceChanges},
        responses::{PerformanceListResponse, PerformanceSummary},
    },
    students::{
        entities::Student,
        requests::{NewStudent, StudentChanges},
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段须为已哈希的值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, params: ListParams) -> Result<UserListResponse>;
    // 更新用户信息（password 字段须为已哈希的值）
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 学生管理方法
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        params: ListParams,
    ) -> Result<StudentListResponse>;
    async fn update_student(&self, id: i64, changes: StudentChanges) -> Result<Option<Student>>;
    // 删除学生，关联的考勤和成绩记录级联删除
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn student_exists(&self, id: i64) -> Result<bool>;

    /// 考勤管理方法
    async fn create_attendance(
        &self,
        record: NewAttendance,
        recorded_by: i64,
    ) -> Result<Attendance>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    async fn list_attendance_with_pagination(
        &self,
        params: ListParams,
    ) -> Result<AttendanceListResponse>;
    async fn update_attendance(
        &self,
        id: i64,
        changes: AttendanceChanges,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    // 全表考勤汇总
    async fn get_attendance_summary(&self) -> Result<AttendanceSummary>;

    /// 成绩管理方法
    async fn create_performance(
        &self,
        record: NewPerformance,
        recorded_by: i64,
    ) -> Result<Performance>;
    async fn get_performance_by_id(&self, id: i64) -> Result<Option<Performance>>;
    async fn list_performance_with_pagination(
        &self,
        params: ListParams,
    ) -> Result<PerformanceListResponse>;
    async fn update_performance(
        &self,
        id: i64,
        changes: PerformanceChanges,
    ) -> Result<Option<Performance>>;
    async fn delete_performance(&self, id: i64) -> Result<bool>;
    // 全表成绩汇总
    async fn get_performance_summary(&self) -> Result<PerformanceSummary>;
}

/// 按配置创建存储后端并执行迁移
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
