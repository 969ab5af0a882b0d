//! 汇总统计用的小工具函数

/// 四舍五入保留两位小数
///
/// 放大 100 倍后溢出的极大值原样返回。
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// 百分比，总数为 0 时返回 0
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}
