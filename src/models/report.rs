//! 汇总结果
//!
//! 页 → 类别：拼接；类别 → 年级：按类别序号存放；年级 → 账号：按年级编号存放。
//! 所有合并都与子任务完成顺序无关。

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{AssignmentRecord, Grade};

/// 单个年级的结果，按类别序号分槽
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeResult {
    slots: Vec<Vec<AssignmentRecord>>,
}

impl GradeResult {
    pub fn new(category_count: usize) -> Self {
        Self {
            slots: vec![Vec::new(); category_count],
        }
    }

    /// 放入某个类别的结果（同一类别重复放入时追加）
    pub fn insert(&mut self, category_index: usize, records: Vec<AssignmentRecord>) {
        if category_index >= self.slots.len() {
            self.slots.resize_with(category_index + 1, Vec::new);
        }
        self.slots[category_index].extend(records);
    }

    /// 某个类别的记录
    pub fn category(&self, category_index: usize) -> &[AssignmentRecord] {
        self.slots
            .get(category_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按类别顺序展开为一个列表
    pub fn into_records(self) -> Vec<AssignmentRecord> {
        self.slots.into_iter().flatten().collect()
    }
}

/// 单个账号的最终报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport {
    pub success: bool,
    /// 最后更新时间（Unix 秒），失败时为 0
    pub last_update: i64,
    pub first_grade: Vec<AssignmentRecord>,
    pub second_grade: Vec<AssignmentRecord>,
    pub third_grade: Vec<AssignmentRecord>,
}

impl AccountReport {
    /// 登录失败的报告
    pub fn failed() -> Self {
        Self::default()
    }

    /// 汇总各年级结果
    ///
    /// 按年级编号放入固定槽位，与传入顺序无关。
    pub fn from_grades<I>(grades: I, now: DateTime<FixedOffset>) -> Self
    where
        I: IntoIterator<Item = (Grade, GradeResult)>,
    {
        let mut report = Self {
            success: true,
            last_update: now.timestamp(),
            ..Self::default()
        };

        for (grade, result) in grades {
            report.grade_mut(grade).extend(result.into_records());
        }

        report
    }

    pub fn grade(&self, grade: Grade) -> &[AssignmentRecord] {
        match grade {
            Grade::First => &self.first_grade,
            Grade::Second => &self.second_grade,
            Grade::Third => &self.third_grade,
        }
    }

    fn grade_mut(&mut self, grade: Grade) -> &mut Vec<AssignmentRecord> {
        match grade {
            Grade::First => &mut self.first_grade,
            Grade::Second => &mut self.second_grade,
            Grade::Third => &mut self.third_grade,
        }
    }

    /// 全部记录数
    pub fn total_records(&self) -> usize {
        self.first_grade.len() + self.second_grade.len() + self.third_grade.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn seoul() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn record(number: &str) -> AssignmentRecord {
        AssignmentRecord {
            number: number.to_string(),
            teacher: "김선생".to_string(),
            subject: "수학".to_string(),
            title: format!("과제 {}", number),
            due: seoul().with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            is_ended: false,
        }
    }

    #[test]
    fn test_grade_result_is_independent_of_completion_order() {
        let categories = vec![
            (0, vec![record("1-1"), record("1-2")]),
            (1, vec![record("2-1")]),
            (2, vec![record("3-1"), record("3-2")]),
        ];

        let mut forward = GradeResult::new(3);
        for (idx, records) in categories.iter().cloned() {
            forward.insert(idx, records);
        }

        let mut backward = GradeResult::new(3);
        for (idx, records) in categories.iter().rev().cloned() {
            backward.insert(idx, records);
        }

        let mut interleaved = GradeResult::new(3);
        for i in [1, 2, 0] {
            let (idx, records) = categories[i].clone();
            interleaved.insert(idx, records);
        }

        assert_eq!(forward, backward);
        assert_eq!(forward, interleaved);

        let as_set = |r: GradeResult| r.into_records().into_iter().collect::<HashSet<_>>();
        assert_eq!(as_set(forward.clone()), as_set(interleaved));
        assert_eq!(forward.into_records()[0].number, "1-1");
    }

    #[test]
    fn test_empty_category_keeps_siblings() {
        let mut result = GradeResult::new(3);
        result.insert(0, vec![record("1-1")]);
        result.insert(1, Vec::new());
        result.insert(2, vec![record("3-1")]);

        assert_eq!(result.len(), 2);
        assert!(result.category(1).is_empty());
        assert_eq!(result.category(2)[0].number, "3-1");
    }

    #[test]
    fn test_report_slots_by_grade_number() {
        let now = seoul().with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        let mut third = GradeResult::new(3);
        third.insert(0, vec![record("1-9")]);
        let mut first = GradeResult::new(3);
        first.insert(0, vec![record("1-1")]);

        let report = AccountReport::from_grades(
            vec![
                (Grade::Third, third),
                (Grade::Second, GradeResult::new(3)),
                (Grade::First, first),
            ],
            now,
        );

        assert!(report.success);
        assert_eq!(report.last_update, now.timestamp());
        assert_eq!(report.grade(Grade::First)[0].number, "1-1");
        assert!(report.grade(Grade::Second).is_empty());
        assert_eq!(report.grade(Grade::Third)[0].number, "1-9");
        assert_eq!(report.total_records(), 2);
    }

    #[test]
    fn test_report_json_shape() {
        let now = seoul().with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        let mut first = GradeResult::new(3);
        first.insert(0, vec![record("1-1")]);
        let report = AccountReport::from_grades(vec![(Grade::First, first)], now);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["lastUpdate"], now.timestamp());
        assert!(value["secondGrade"].as_array().unwrap().is_empty());
        assert!(value["thirdGrade"].as_array().unwrap().is_empty());

        let item = &value["firstGrade"][0];
        assert_eq!(item["number"], "1-1");
        assert_eq!(item["teacher"], "김선생");
        assert_eq!(item["subject"], "수학");
        assert_eq!(item["isEnded"], false);
        // 2024-05-01 09:00:00 +09:00
        assert_eq!(item["time"], 1714521600);

        let parsed: AccountReport = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_failed_report() {
        let report = AccountReport::failed();
        assert!(!report.success);
        assert_eq!(report.last_update, 0);
        assert_eq!(report.total_records(), 0);
    }
}
