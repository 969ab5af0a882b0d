use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserSummary;

// 成绩记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct Performance {
    pub id: i64,
    // 学生 ID
    pub student: i64,
    // 科目（自由文本）
    pub subject: String,
    pub score: f64,
    pub date_recorded: NaiveDate,
    pub recorded_by: Option<UserSummary>,
}
