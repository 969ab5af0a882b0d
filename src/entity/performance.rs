//! 成绩实体

use sea_orm::entity::prelude::*;

use crate::models::performance::entities::Performance;
use crate::models::users::entities::UserSummary;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "performance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject: String,
    pub score: f64,
    pub date_recorded: Date,
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
    pub fn into_performance(self, recorded_by: Option<UserSummary>) -> Performance {
        Performance {
            id: self.id,
            student: self.student_id,
            subject: self.subject,
            score: self.score,
            date_recorded: self.date_recorded,
            recorded_by,
        }
    }
}
