use super::entities::Attendance;
use crate::models::common::PaginationInfo;
use crate::utils::stats::{percentage, round2};
use serde::Serialize;
use ts_rs::TS;

// 考勤列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<Attendance>,
    pub pagination: PaginationInfo,
}

// 考勤汇总（全部记录）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSummary {
    pub total_records: i64,
    pub present_count: i64,
    pub absent_count: i64,
    pub late_count: i64,
    pub present_percent: f64,
    pub absent_percent: f64,
    pub late_percent: f64,
}

impl AttendanceSummary {
    /// 由各状态计数计算百分比，保留两位小数；没有记录时百分比全为 0
    pub fn from_counts(total: u64, present: u64, absent: u64, late: u64) -> Self {
        Self {
            total_records: total as i64,
            present_count: present as i64,
            absent_count: absent as i64,
            late_count: late as i64,
            present_percent: round2(percentage(present, total)),
            absent_percent: round2(percentage(absent, total)),
            late_percent: round2(percentage(late, total)),
        }
    }
}
