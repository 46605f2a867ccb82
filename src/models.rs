use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    OnTrack,
    AtRisk,
    Blocked,
    Completed,
}

impl WorkStatus {
    pub const ALL: [WorkStatus; 4] = [
        WorkStatus::OnTrack,
        WorkStatus::AtRisk,
        WorkStatus::Blocked,
        WorkStatus::Completed,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::AtRisk => "at-risk",
            Self::Blocked => "blocked",
            Self::Completed => "completed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::Blocked => "Blocked",
            Self::Completed => "Completed",
        }
    }
}

/// Pre-bucketed due date. Never derived from calendar dates here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeHorizon {
    Immediate,
    ShortTerm,
    Upcoming,
}

impl TimeHorizon {
    pub const ALL: [TimeHorizon; 3] = [
        TimeHorizon::Immediate,
        TimeHorizon::ShortTerm,
        TimeHorizon::Upcoming,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::ShortTerm => "short-term",
            Self::Upcoming => "upcoming",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::ShortTerm => "Short-term",
            Self::Upcoming => "Upcoming",
        }
    }

    pub const fn sublabel(self) -> &'static str {
        match self {
            Self::Immediate => "Due today or overdue",
            Self::ShortTerm => "Due this week",
            Self::Upcoming => "Due next week+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkloadLevel {
    Light,
    Moderate,
    Heavy,
    Overloaded,
}

impl WorkloadLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
            Self::Overloaded => "overloaded",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Heavy => "Heavy",
            Self::Overloaded => "Overloaded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryTrend {
    Improving,
    Stable,
    Declining,
}

impl DeliveryTrend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Improving => "Improving",
            Self::Stable => "Stable",
            Self::Declining => "Declining",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkItem {
    pub id: String,
    pub status: WorkStatus,
    pub due_horizon: TimeHorizon,
    /// Days spent blocked. Only ever set on blocked items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocker_days: Option<u32>,
}

impl WorkItem {
    pub fn new(id: impl Into<String>, status: WorkStatus, due_horizon: TimeHorizon) -> Self {
        Self {
            id: id.into(),
            status,
            due_horizon,
            blocker_days: None,
        }
    }

    pub fn blocked_for(id: impl Into<String>, due_horizon: TimeHorizon, days: u32) -> Self {
        Self {
            blocker_days: Some(days),
            ..Self::new(id, WorkStatus::Blocked, due_horizon)
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == WorkStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub workload: WorkloadLevel,
    pub delivery_trend: DeliveryTrend,
    #[serde(default)]
    pub items: Vec<WorkItem>,
    #[serde(default)]
    pub signals: Vec<String>,
}

impl TeamMember {
    pub fn count_with_status(&self, status: WorkStatus) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }

    pub fn has_status(&self, status: WorkStatus) -> bool {
        self.items.iter().any(|item| item.status == status)
    }
}

/// Per-status item counts for some subset of the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: usize,
    pub on_track: usize,
    pub at_risk: usize,
    pub blocked: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeatLevel {
    Low,
    Medium,
    High,
}

impl HeatLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low priority",
            Self::Medium => "Medium priority",
            Self::High => "High priority",
        }
    }

    pub const fn meaning(self) -> &'static str {
        match self {
            Self::Low => "stable",
            Self::Medium => "monitor",
            Self::High => "action needed",
        }
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected}: '{got}'")]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl FromStr for WorkStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "on-track" | "ontrack" => Ok(Self::OnTrack),
            "at-risk" | "atrisk" => Ok(Self::AtRisk),
            "blocked" => Ok(Self::Blocked),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseEnumError {
                expected: "work status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for TimeHorizon {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "immediate" => Ok(Self::Immediate),
            "short-term" | "shortterm" => Ok(Self::ShortTerm),
            "upcoming" => Ok(Self::Upcoming),
            _ => Err(ParseEnumError {
                expected: "time horizon",
                got: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WorkloadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DeliveryTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_parse_from_display_form() {
        for status in WorkStatus::ALL {
            assert_eq!(status.to_string().parse::<WorkStatus>(), Ok(status));
        }
        assert_eq!("AT_RISK".parse::<WorkStatus>(), Ok(WorkStatus::AtRisk));
        assert!("late".parse::<WorkStatus>().is_err());
    }

    #[test]
    fn horizons_parse_from_display_form() {
        for horizon in TimeHorizon::ALL {
            assert_eq!(horizon.to_string().parse::<TimeHorizon>(), Ok(horizon));
        }
        let err = "someday".parse::<TimeHorizon>().unwrap_err();
        assert_eq!(err.to_string(), "invalid time horizon: 'someday'");
    }

    #[test]
    fn work_item_uses_camel_case_keys() {
        let json = r#"{"id":"2a","status":"blocked","dueHorizon":"short-term","blockerDays":3}"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();
        assert_eq!(item, WorkItem::blocked_for("2a", TimeHorizon::ShortTerm, 3));

        let plain = WorkItem::new("1a", WorkStatus::OnTrack, TimeHorizon::Upcoming);
        let encoded = serde_json::to_string(&plain).unwrap();
        assert!(!encoded.contains("blockerDays"));
        assert!(encoded.contains(r#""status":"on-track""#));
    }

    #[test]
    fn negative_blocker_days_are_rejected_by_the_schema() {
        let json = r#"{"id":"x","status":"blocked","dueHorizon":"immediate","blockerDays":-1}"#;
        assert!(serde_json::from_str::<WorkItem>(json).is_err());
    }

    #[test]
    fn member_status_counts() {
        let member = TeamMember {
            id: "1".to_string(),
            name: "Sarah Chen".to_string(),
            role: "Senior Engineer".to_string(),
            avatar: "SC".to_string(),
            workload: WorkloadLevel::Moderate,
            delivery_trend: DeliveryTrend::Stable,
            items: vec![
                WorkItem::new("1a", WorkStatus::Completed, TimeHorizon::Immediate),
                WorkItem::new("1b", WorkStatus::OnTrack, TimeHorizon::Immediate),
                WorkItem::new("1c", WorkStatus::OnTrack, TimeHorizon::ShortTerm),
            ],
            signals: Vec::new(),
        };

        assert_eq!(member.count_with_status(WorkStatus::OnTrack), 2);
        assert!(member.has_status(WorkStatus::Completed));
        assert!(!member.has_status(WorkStatus::Blocked));
        assert!(member.items[0].is_done());
    }
}
