//! 考勤实体

use sea_orm::entity::prelude::*;

use crate::errors::TrackerError;
use crate::models::attendance::entities::{Attendance, AttendanceStatus};
use crate::models::users::entities::UserSummary;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub date: Date,
    pub status: String,
    pub recorded_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RecordedBy",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Recorder,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recorder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，recorded_by 由调用方批量查询后传入
    ///
    /// 库中状态不在可选值内时返回错误，不做静默替换。
    pub fn into_attendance(self, recorded_by: Option<UserSummary>) -> crate::errors::Result<Attendance> {
        let status = self.status.parse::<AttendanceStatus>().map_err(|e| {
            tracing::warn!("Attendance record {} has invalid status: {}", self.id, e);
            TrackerError::database_operation(format!(
                "Invalid attendance status {:?} for record {}",
                self.status, self.id
            ))
        })?;

        Ok(Attendance {
            id: self.id,
            student: self.student_id,
            date: self.date,
            status,
            recorded_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(status: &str) -> Model {
        Model {
            id: 7,
            student_id: 1,
            date: Date::from_ymd_opt(2024, 3, 4).unwrap(),
            status: status.to_string(),
            recorded_by: None,
        }
    }

    #[test]
    fn test_into_attendance_parses_status() {
        let attendance = model("late").into_attendance(None).unwrap();
        assert_eq!(attendance.status, AttendanceStatus::Late);
        assert_eq!(attendance.student, 1);
    }

    #[test]
    fn test_into_attendance_rejects_unknown_status() {
        let err = model("holiday").into_attendance(None).unwrap_err();
        assert!(matches!(err, TrackerError::DatabaseOperation(_)));
        assert!(err.to_string().contains("holiday"));
    }
}
