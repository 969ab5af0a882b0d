use std::collections::BTreeMap;

/// 字段级校验错误：字段名 → 错误信息列表
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub fn add_field_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}
