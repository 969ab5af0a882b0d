use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::{FieldErrors, add_field_error};
use crate::utils::validate::{MSG_BLANK, MSG_REQUIRED, check_date, check_reference};

/// 考勤写入请求体
///
/// 不含 recorded_by：记录者始终取自当前登录用户，客户端传入的值被忽略。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendancePayload {
    pub student: Option<i64>,
    pub date: Option<String>,
    pub status: Option<String>,
}

/// 完整的考勤数据（不含记录者）
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// 考勤字段变更，None 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct AttendanceChanges {
    pub student_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

impl From<NewAttendance> for AttendanceChanges {
    fn from(record: NewAttendance) -> Self {
        Self {
            student_id: Some(record.student_id),
            date: Some(record.date),
            status: Some(record.status),
        }
    }
}

fn check_status(
    errors: &mut FieldErrors,
    value: Option<String>,
    required: bool,
) -> Option<AttendanceStatus> {
    let Some(raw) = value else {
        if required {
            add_field_error(errors, "status", MSG_REQUIRED);
        }
        return None;
    };
    if raw.trim().is_empty() {
        add_field_error(errors, "status", MSG_BLANK);
        return None;
    }
    match raw.parse() {
        Ok(status) => Some(status),
        Err(msg) => {
            add_field_error(errors, "status", msg);
            None
        }
    }
}

impl AttendancePayload {
    fn check(self, required: bool) -> Result<AttendanceChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let changes = AttendanceChanges {
            student_id: check_reference(&mut errors, "student", self.student, required),
            date: check_date(&mut errors, "date", self.date, required),
            status: check_status(&mut errors, self.status, required),
        };
        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }

    pub fn validate_full(self) -> Result<NewAttendance, FieldErrors> {
        match self.check(true)? {
            AttendanceChanges {
                student_id: Some(student_id),
                date: Some(date),
                status: Some(status),
            } => Ok(NewAttendance {
                student_id,
                date,
                status,
            }),
            // check(true) 已为缺失字段报错
            _ => {
                let mut errors = FieldErrors::new();
                add_field_error(&mut errors, "non_field_errors", MSG_REQUIRED);
                Err(errors)
            }
        }
    }

    pub fn validate_partial(self) -> Result<AttendanceChanges, FieldErrors> {
        self.check(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let record = AttendancePayload {
            student: Some(1),
            date: Some("2024-10-01".into()),
            status: Some("present".into()),
        }
        .validate_full()
        .unwrap();
        assert_eq!(record.student_id, 1);
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_invalid_status_is_field_error() {
        let errors = AttendancePayload {
            student: Some(1),
            date: Some("2024-10-01".into()),
            status: Some("excused".into()),
        }
        .validate_full()
        .unwrap_err();
        assert_eq!(
            errors["status"],
            vec!["\"excused\" is not a valid choice.".to_string()]
        );
    }

    #[test]
    fn test_recorded_by_in_body_is_ignored() {
        let payload: AttendancePayload = serde_json::from_str(
            r#"{"student": 2, "date": "2024-10-01", "status": "late", "recorded_by": 99}"#,
        )
        .unwrap();
        assert!(payload.validate_full().is_ok());
    }

    #[test]
    fn test_partial_status_only() {
        let changes = AttendancePayload {
            status: Some("absent".into()),
            ..Default::default()
        }
        .validate_partial()
        .unwrap();
        assert_eq!(changes.status, Some(AttendanceStatus::Absent));
        assert!(changes.student_id.is_none());
        assert!(changes.date.is_none());
    }

    #[test]
    fn test_missing_fields() {
        let errors = AttendancePayload::default().validate_full().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
