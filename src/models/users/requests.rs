use serde::Deserialize;
use ts_rs::TS;

use crate::models::{FieldErrors, add_field_error};
use crate::utils::validate::{validate_email, validate_password, validate_username};

// 用户创建请求（仅教师可用）
//
// password 字段在进入存储层之前会被替换为 argon2 哈希
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_staff: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Err(msg) = validate_username(&self.username) {
            add_field_error(&mut errors, "username", msg);
        }
        if let Err(msg) = validate_email(&self.email) {
            add_field_error(&mut errors, "email", msg);
        }
        for msg in validate_password(&self.password).errors {
            add_field_error(&mut errors, "password", msg);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

// 用户更新请求（仅教师可用）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(ref email) = self.email
            && let Err(msg) = validate_email(email)
        {
            add_field_error(&mut errors, "email", msg);
        }
        if let Some(ref password) = self.password {
            for msg in validate_password(password).errors {
                add_field_error(&mut errors, "password", msg);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            is_staff: false,
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(request("teacher_li", "li@school.test", "Chalkboard42").validate().is_ok());
    }

    #[test]
    fn test_invalid_create_request_collects_fields() {
        let errors = request("ab", "not-an-email", "short").validate().unwrap_err();
        assert!(errors.contains_key("username"));
        assert!(errors.contains_key("email"));
        assert!(errors["password"].len() >= 2);
    }

    #[test]
    fn test_update_request_only_checks_present_fields() {
        let update = UpdateUserRequest {
            is_staff: Some(true),
            ..Default::default()
        };
        assert!(update.validate().is_ok());

        let update = UpdateUserRequest {
            email: Some("broken@".to_string()),
            ..Default::default()
        };
        assert!(update.validate().unwrap_err().contains_key("email"));
    }
}
