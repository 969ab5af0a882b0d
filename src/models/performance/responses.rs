use std::collections::BTreeMap;

use super::entities::Performance;
use crate::models::common::PaginationInfo;
use crate::utils::stats::round2;
use serde::Serialize;
use ts_rs::TS;

// 成绩列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct PerformanceListResponse {
    pub items: Vec<Performance>,
    pub pagination: PaginationInfo,
}

// 成绩汇总
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct PerformanceSummary {
    pub overall_average: f64,
    pub total_records: i64,
    // 科目 → 平均分，科目集合来自现有数据
    pub subject_breakdown: BTreeMap<String, f64>,
}

impl PerformanceSummary {
    /// 由数据库聚合结果构造汇总
    ///
    /// `overall` 为全表平均分（空表为 None），`subjects` 为按科目分组的 (科目, 平均分)。
    pub fn from_aggregates<I>(overall: Option<f64>, total_records: i64, subjects: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<f64>)>,
    {
        let subject_breakdown = subjects
            .into_iter()
            .map(|(subject, avg)| (subject, round2(avg.unwrap_or(0.0))))
            .collect();

        Self {
            overall_average: round2(overall.unwrap_or(0.0)),
            total_records,
            subject_breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = PerformanceSummary::from_aggregates(None, 0, Vec::new());
        assert_eq!(summary.overall_average, 0.0);
        assert_eq!(summary.total_records, 0);
        assert!(summary.subject_breakdown.is_empty());
    }

    #[test]
    fn test_subject_breakdown() {
        let summary = PerformanceSummary::from_aggregates(
            Some(80.0),
            3,
            vec![
                ("Math".to_string(), Some(85.0)),
                ("Science".to_string(), Some(70.0)),
            ],
        );
        assert_eq!(summary.overall_average, 80.0);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.subject_breakdown["Math"], 85.0);
        assert_eq!(summary.subject_breakdown["Science"], 70.0);
    }

    #[test]
    fn test_averages_rounded_to_two_places() {
        let summary = PerformanceSummary::from_aggregates(
            Some(212.0 / 3.0),
            3,
            vec![("Art".to_string(), Some(212.0 / 3.0))],
        );
        assert_eq!(summary.subject_breakdown["Art"], 70.67);
        assert_eq!(summary.overall_average, 70.67);
    }

    #[test]
    fn test_huge_scores_stay_numeric() {
        let summary = PerformanceSummary::from_aggregates(
            Some(1e307),
            1,
            vec![("Big".to_string(), Some(1e307))],
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["overall_average"], 1e307);
        assert_eq!(json["subject_breakdown"]["Big"], 1e307);
    }

    #[test]
    fn test_serialized_shape() {
        let summary =
            PerformanceSummary::from_aggregates(Some(50.0), 1, vec![("Math".to_string(), Some(50.0))]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["subject_breakdown"]["Math"], 50.0);
        assert_eq!(json["total_records"], 1);
    }
}
