use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    pub name: String,
    // 班级/分组标识
    pub class_name: String,
    // 学号（预期唯一，但不做强制约束）
    pub admission_number: String,
    pub enrollment_date: NaiveDate,
}
