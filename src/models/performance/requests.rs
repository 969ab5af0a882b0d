use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::{FieldErrors, add_field_error};
use crate::utils::validate::{MSG_REQUIRED, check_date, check_number, check_reference, check_text};

pub const SUBJECT_MAX_LEN: usize = 100;

/// 成绩写入请求体，recorded_by 由服务端设置
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct PerformancePayload {
    pub student: Option<i64>,
    pub subject: Option<String>,
    #[ts(type = "number | string | null")]
    pub score: Option<serde_json::Value>,
    pub date_recorded: Option<String>,
}

/// 完整的成绩数据
///
/// date_recorded 可省略：创建时默认为当天，整体更新时保持原值。
#[derive(Debug, Clone)]
pub struct NewPerformance {
    pub student_id: i64,
    pub subject: String,
    pub score: f64,
    pub date_recorded: Option<NaiveDate>,
}

/// 成绩字段变更，None 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct PerformanceChanges {
    pub student_id: Option<i64>,
    pub subject: Option<String>,
    pub score: Option<f64>,
    pub date_recorded: Option<NaiveDate>,
}

impl From<NewPerformance> for PerformanceChanges {
    fn from(record: NewPerformance) -> Self {
        Self {
            student_id: Some(record.student_id),
            subject: Some(record.subject),
            score: Some(record.score),
            date_recorded: record.date_recorded,
        }
    }
}

impl PerformancePayload {
    fn check(self, required: bool) -> Result<PerformanceChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let changes = PerformanceChanges {
            student_id: check_reference(&mut errors, "student", self.student, required),
            subject: check_text(
                &mut errors,
                "subject",
                self.subject,
                SUBJECT_MAX_LEN,
                required,
            ),
            score: check_number(&mut errors, "score", self.score, required),
            date_recorded: check_date(&mut errors, "date_recorded", self.date_recorded, false),
        };
        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }

    pub fn validate_full(self) -> Result<NewPerformance, FieldErrors> {
        match self.check(true)? {
            PerformanceChanges {
                student_id: Some(student_id),
                subject: Some(subject),
                score: Some(score),
                date_recorded,
            } => Ok(NewPerformance {
                student_id,
                subject,
                score,
                date_recorded,
            }),
            // check(true) 已为缺失字段报错
            _ => {
                let mut errors = FieldErrors::new();
                add_field_error(&mut errors, "non_field_errors", MSG_REQUIRED);
                Err(errors)
            }
        }
    }

    pub fn validate_partial(self) -> Result<PerformanceChanges, FieldErrors> {
        self.check(false)
    }
}
