use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserSummary;

// 考勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "attendance.ts")]
pub enum AttendanceStatus {
    Present, // 出勤
    Absent,  // 缺勤
    Late,    // 迟到
}

impl AttendanceStatus {
    pub const PRESENT: &'static str = "present";
    pub const ABSENT: &'static str = "absent";
    pub const LATE: &'static str = "late";

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => Self::PRESENT,
            AttendanceStatus::Absent => Self::ABSENT,
            AttendanceStatus::Late => Self::LATE,
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PRESENT => Ok(AttendanceStatus::Present),
            Self::ABSENT => Ok(AttendanceStatus::Absent),
            Self::LATE => Ok(AttendanceStatus::Late),
            _ => Err(format!("\"{s}\" is not a valid choice.")),
        }
    }
}

// 考勤记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct Attendance {
    pub id: i64,
    // 学生 ID
    pub student: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    // 记录者被删除后为 null
    pub recorded_by: Option<UserSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("late".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Late));
        assert_eq!(AttendanceStatus::Absent.to_string(), "absent");
        assert_eq!(
            "sick".parse::<AttendanceStatus>(),
            Err("\"sick\" is not a valid choice.".to_string())
        );
        assert!("Present".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).unwrap(),
            "\"present\""
        );
    }
}
