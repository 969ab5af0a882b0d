use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::{FieldErrors, add_field_error};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@+-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_DATE_FORMAT: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
pub const MSG_NUMBER: &str = "A valid number is required.";

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 5 || username.len() > 150 {
        return Err("Username length must be between 5 and 150 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, digits and @/./+/-/_ characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Enter a valid email address.");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

/// 验证密码是否符合安全策略
///
/// 至少 8 个字符，同时包含大写字母、小写字母和数字，且不是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = ["password1", "qwerty123", "admin123", "abcd1234", "teacher1"];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 校验文本字段：去除首尾空白、非空、长度上限
///
/// `required` 为 false 时（PATCH），缺失字段直接跳过。
pub fn check_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    max_len: usize,
    required: bool,
) -> Option<String> {
    let Some(raw) = value else {
        if required {
            add_field_error(errors, field, MSG_REQUIRED);
        }
        return None;
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        add_field_error(errors, field, MSG_BLANK);
        return None;
    }
    if trimmed.chars().count() > max_len {
        add_field_error(
            errors,
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        );
        return None;
    }
    Some(trimmed.to_string())
}

/// 校验 YYYY-MM-DD 日期字段
pub fn check_date(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    required: bool,
) -> Option<NaiveDate> {
    let Some(raw) = value else {
        if required {
            add_field_error(errors, field, MSG_REQUIRED);
        }
        return None;
    };

    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            add_field_error(errors, field, MSG_DATE_FORMAT);
            None
        }
    }
}

/// 校验必填的外键 ID（存在性由服务层查询确认）
pub fn check_reference(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<i64>,
    required: bool,
) -> Option<i64> {
    match value {
        None => {
            if required {
                add_field_error(errors, field, MSG_REQUIRED);
            }
            None
        }
        Some(id) if id <= 0 => {
            add_field_error(
                errors,
                field,
                format!("Invalid pk \"{id}\" - object does not exist."),
            );
            None
        }
        Some(id) => Some(id),
    }
}

/// 校验数值字段，接受 JSON 数字或数字字符串
pub fn check_number(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<Value>,
    required: bool,
) -> Option<f64> {
    let number = match value {
        None | Some(Value::Null) => {
            if required {
                add_field_error(errors, field, MSG_REQUIRED);
            }
            return None;
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match number {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            add_field_error(errors, field, MSG_NUMBER);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Chalkboard42").is_valid);

        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );

        let result = validate_password("Teacher1");
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_username_and_email() {
        assert!(validate_username("ms.chen").is_ok());
        assert!(validate_username("bob").is_err());
        assert!(validate_username("space in name").is_err());
        assert!(validate_email("chen@school.edu").is_ok());
        assert!(validate_email("chen@school").is_err());
    }

    #[test]
    fn test_check_text_required_and_blank() {
        let mut errors = FieldErrors::new();
        assert_eq!(check_text(&mut errors, "name", None, 10, true), None);
        assert_eq!(errors["name"], vec![MSG_REQUIRED.to_string()]);

        let mut errors = FieldErrors::new();
        assert_eq!(check_text(&mut errors, "name", None, 10, false), None);
        assert!(errors.is_empty());

        let mut errors = FieldErrors::new();
        assert_eq!(
            check_text(&mut errors, "name", Some("   ".into()), 10, false),
            None
        );
        assert_eq!(errors["name"], vec![MSG_BLANK.to_string()]);
    }

    #[test]
    fn test_check_text_trims_and_limits_length() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            check_text(&mut errors, "class_name", Some(" 7B ".into()), 5, true),
            Some("7B".to_string())
        );
        assert!(errors.is_empty());

        check_text(&mut errors, "class_name", Some("abcdef".into()), 5, true);
        assert_eq!(
            errors["class_name"],
            vec!["Ensure this field has no more than 5 characters.".to_string()]
        );
    }

    #[test]
    fn test_check_date() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            check_date(&mut errors, "date", Some("2024-09-02".into()), true),
            NaiveDate::from_ymd_opt(2024, 9, 2)
        );
        assert!(errors.is_empty());

        assert_eq!(
            check_date(&mut errors, "date", Some("02/09/2024".into()), true),
            None
        );
        assert_eq!(errors["date"], vec![MSG_DATE_FORMAT.to_string()]);
    }

    #[test]
    fn test_check_reference_and_number() {
        let mut errors = FieldErrors::new();
        assert_eq!(check_reference(&mut errors, "student", Some(3), true), Some(3));
        assert_eq!(check_reference(&mut errors, "student", Some(0), true), None);
        assert!(errors.contains_key("student"));

        let mut errors = FieldErrors::new();
        assert_eq!(check_number(&mut errors, "score", Some(json!(88.5)), true), Some(88.5));
        assert_eq!(check_number(&mut errors, "score", Some(json!("72")), true), Some(72.0));
        assert!(errors.is_empty());
        assert_eq!(check_number(&mut errors, "score", Some(json!("high")), true), None);
        assert_eq!(errors["score"], vec![MSG_NUMBER.to_string()]);
    }
}
