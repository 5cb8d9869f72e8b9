use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::utils::search::Searchable;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    HalfDay,
    OnLeave,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "SSSPL003")]
    pub employee_id: String,
    #[schema(example = "Amit Patel")]
    pub name: String,
    #[schema(example = "2026-01-12", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "09:45:00", value_type = Option<String>)]
    pub in_time: Option<NaiveTime>,
    #[schema(example = "18:15:00", value_type = Option<String>)]
    pub out_time: Option<NaiveTime>,
    #[schema(example = "General")]
    pub shift: String,
    pub status: AttendanceStatus,
    #[schema(example = 45)]
    pub late_by_minutes: u32,
    #[schema(example = 15)]
    pub overtime_minutes: u32,
}

impl AttendanceRecord {
    /// Hours between punch-in and punch-out, rounded to two decimals.
    pub fn worked_hours(&self) -> f64 {
        match (self.in_time, self.out_time) {
            (Some(in_time), Some(out_time)) if out_time > in_time => {
                let minutes = (out_time - in_time).num_minutes() as f64;
                (minutes / 60.0 * 100.0).round() / 100.0
            }
            _ => 0.0,
        }
    }
}

/// One register row: the stored record plus hours derived from its punches.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AttendanceEntry {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    #[schema(example = 8.5)]
    pub worked_hours: f64,
}

impl From<AttendanceRecord> for AttendanceEntry {
    fn from(record: AttendanceRecord) -> Self {
        let worked_hours = record.worked_hours();
        Self {
            record,
            worked_hours,
        }
    }
}

impl Searchable for AttendanceRecord {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn identifier(&self) -> &str {
        &self.employee_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: AttendanceStatus,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    pub total: usize,
    /// One entry per status, in declaration order.
    pub by_status: Vec<StatusCount>,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        use strum::IntoEnumIterator;

        let total = records.len();
        let by_status = AttendanceStatus::iter()
            .map(|status| {
                let count = records.iter().filter(|r| r.status == status).count();
                let percentage = if total == 0 {
                    0.0
                } else {
                    (count as f64 / total as f64 * 1000.0).round() / 10.0
                };
                StatusCount {
                    status,
                    count,
                    percentage,
                }
            })
            .collect();

        Self { total, by_status }
    }

    pub fn count(&self, status: AttendanceStatus) -> usize {
        self.by_status
            .iter()
            .find(|entry| entry.status == status)
            .map_or(0, |entry| entry.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn punch(status: AttendanceStatus, times: Option<(&str, &str)>) -> AttendanceRecord {
        let parse = |t: &str| NaiveTime::parse_from_str(t, "%H:%M").unwrap();
        AttendanceRecord {
            employee_id: "SSSPL001".into(),
            name: "Rajesh Kumar Singh".into(),
            date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            in_time: times.map(|(i, _)| parse(i)),
            out_time: times.map(|(_, o)| parse(o)),
            shift: "General".into(),
            status,
            late_by_minutes: 0,
            overtime_minutes: 0,
        }
    }

    #[test]
    fn worked_hours_from_punches() {
        assert_eq!(punch(AttendanceStatus::Present, Some(("09:05", "18:30"))).worked_hours(), 9.42);
        assert_eq!(punch(AttendanceStatus::HalfDay, Some(("09:00", "13:00"))).worked_hours(), 4.0);
        assert_eq!(punch(AttendanceStatus::Absent, None).worked_hours(), 0.0);
    }

    #[test]
    fn entry_carries_worked_hours() {
        let entry = AttendanceEntry::from(punch(AttendanceStatus::Late, Some(("09:45", "18:15"))));
        assert_eq!(entry.worked_hours, 8.5);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["worked_hours"], 8.5);
        assert_eq!(json["status"], "late");
        assert_eq!(json["in_time"], "09:45:00");
    }

    #[test]
    fn summary_counts_each_status() {
        let records = vec![
            punch(AttendanceStatus::Present, Some(("09:00", "18:00"))),
            punch(AttendanceStatus::Present, Some(("09:00", "18:00"))),
            punch(AttendanceStatus::Late, Some(("09:45", "18:15"))),
            punch(AttendanceStatus::Absent, None),
        ];

        let summary = AttendanceSummary::from_records(&records);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.count(AttendanceStatus::Present), 2);
        assert_eq!(summary.count(AttendanceStatus::OnLeave), 0);
        assert_eq!(summary.by_status[0].percentage, 50.0);
        assert_eq!(summary.by_status.len(), 5);
    }

    #[test]
    fn empty_day_has_zero_percentages() {
        let summary = AttendanceSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.by_status.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn status_uses_kebab_case() {
        assert_eq!(AttendanceStatus::HalfDay.to_string(), "half-day");
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::OnLeave).unwrap(),
            "\"on-leave\""
        );
    }
}
