use crate::models::{StatusSummary, TeamMember, TimeHorizon, WorkItem, WorkStatus};
use crate::roster::Roster;

impl StatusSummary {
    pub fn count(&self, status: WorkStatus) -> usize {
        match status {
            WorkStatus::OnTrack => self.on_track,
            WorkStatus::AtRisk => self.at_risk,
            WorkStatus::Blocked => self.blocked,
            WorkStatus::Completed => self.completed,
        }
    }

    fn record(&mut self, status: WorkStatus) {
        self.total += 1;
        match status {
            WorkStatus::OnTrack => self.on_track += 1,
            WorkStatus::AtRisk => self.at_risk += 1,
            WorkStatus::Blocked => self.blocked += 1,
            WorkStatus::Completed => self.completed += 1,
        }
    }

    pub fn has_issues(&self) -> bool {
        self.at_risk > 0 || self.blocked > 0
    }

    /// Items still at risk or blocked.
    pub fn delayed(&self) -> usize {
        self.at_risk + self.blocked
    }

    pub fn share(&self, status: WorkStatus) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.count(status) as f64 / self.total as f64)
    }
}

pub fn summarize<'a>(items: impl IntoIterator<Item = &'a WorkItem>) -> StatusSummary {
    let mut summary = StatusSummary::default();
    for item in items {
        summary.record(item.status);
    }
    summary
}

pub fn team_summary(roster: &Roster) -> StatusSummary {
    summarize(roster.items())
}

pub fn horizon_summary(roster: &Roster, horizon: TimeHorizon) -> StatusSummary {
    summarize(roster.items().filter(|item| item.due_horizon == horizon))
}

pub fn member_summary(member: &TeamMember) -> StatusSummary {
    summarize(&member.items)
}

/// Percentage of items on track or completed, rounded half up.
///
/// Returns `None` for an empty summary so that "no work" never reads as 0%.
pub fn health_score(summary: &StatusSummary) -> Option<u8> {
    if summary.total == 0 {
        return None;
    }
    let healthy = summary.on_track + summary.completed;
    let percent = (200 * healthy + summary.total) / (2 * summary.total);
    u8::try_from(percent).ok()
}
