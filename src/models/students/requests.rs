use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::{FieldErrors, add_field_error};
use crate::utils::validate::{MSG_REQUIRED, check_date, check_text};

pub const NAME_MAX_LEN: usize = 100;
pub const CLASS_NAME_MAX_LEN: usize = 50;
pub const ADMISSION_NUMBER_MAX_LEN: usize = 20;

/// 学生写入请求体（POST / PUT / PATCH 共用）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentPayload {
    pub name: Option<String>,
    pub class_name: Option<String>,
    pub admission_number: Option<String>,
    pub enrollment_date: Option<String>,
}

/// 完整的新学生数据
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub class_name: String,
    pub admission_number: String,
    pub enrollment_date: NaiveDate,
}

/// 学生字段变更，None 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub class_name: Option<String>,
    pub admission_number: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}

impl From<NewStudent> for StudentChanges {
    fn from(student: NewStudent) -> Self {
        Self {
            name: Some(student.name),
            class_name: Some(student.class_name),
            admission_number: Some(student.admission_number),
            enrollment_date: Some(student.enrollment_date),
        }
    }
}

impl StudentPayload {
    fn check(self, required: bool) -> Result<StudentChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let changes = StudentChanges {
            name: check_text(&mut errors, "name", self.name, NAME_MAX_LEN, required),
            class_name: check_text(
                &mut errors,
                "class_name",
                self.class_name,
                CLASS_NAME_MAX_LEN,
                required,
            ),
            admission_number: check_text(
                &mut errors,
                "admission_number",
                self.admission_number,
                ADMISSION_NUMBER_MAX_LEN,
                required,
            ),
            enrollment_date: check_date(
                &mut errors,
                "enrollment_date",
                self.enrollment_date,
                required,
            ),
        };

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }

    /// 创建与整体替换：所有字段必填
    pub fn validate_full(self) -> Result<NewStudent, FieldErrors> {
        match self.check(true)? {
            StudentChanges {
                name: Some(name),
                class_name: Some(class_name),
                admission_number: Some(admission_number),
                enrollment_date: Some(enrollment_date),
            } => Ok(NewStudent {
                name,
                class_name,
                admission_number,
                enrollment_date,
            }),
            // check(true) 已为缺失字段报错
            _ => {
                let mut errors = FieldErrors::new();
                add_field_error(&mut errors, "non_field_errors", MSG_REQUIRED);
                Err(errors)
            }
        }
    }

    /// 部分更新：只校验出现的字段
    pub fn validate_partial(self) -> Result<StudentChanges, FieldErrors> {
        self.check(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> StudentPayload {
        StudentPayload {
            name: Some("Ann Lee".into()),
            class_name: Some("7B".into()),
            admission_number: Some("A-001".into()),
            enrollment_date: Some("2024-09-01".into()),
        }
    }

    #[test]
    fn test_full_payload_is_accepted() {
        let student = payload().validate_full().unwrap();
        assert_eq!(student.name, "Ann Lee");
        assert_eq!(
            student.enrollment_date,
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
        );
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let errors = StudentPayload {
            name: Some("Ann".into()),
            ..Default::default()
        }
        .validate_full()
        .unwrap_err();

        assert!(!errors.contains_key("name"));
        for field in ["class_name", "admission_number", "enrollment_date"] {
            assert_eq!(errors[field], vec![MSG_REQUIRED.to_string()]);
        }
    }

    #[test]
    fn test_field_length_limits() {
        let errors = StudentPayload {
            admission_number: Some("X".repeat(21)),
            ..payload()
        }
        .validate_full()
        .unwrap_err();
        assert_eq!(
            errors["admission_number"],
            vec!["Ensure this field has no more than 20 characters.".to_string()]
        );
    }

    #[test]
    fn test_partial_only_checks_present_fields() {
        let changes = StudentPayload {
            class_name: Some("8A".into()),
            ..Default::default()
        }
        .validate_partial()
        .unwrap();
        assert_eq!(changes.class_name.as_deref(), Some("8A"));
        assert!(changes.name.is_none());

        let errors = StudentPayload {
            enrollment_date: Some("yesterday".into()),
            ..Default::default()
        }
        .validate_partial()
        .unwrap_err();
        assert!(errors.contains_key("enrollment_date"));
    }
}
