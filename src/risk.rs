use crate::models::{DeliveryTrend, HeatLevel, TeamMember, WorkStatus, WorkloadLevel};

/// Attention priority for a member. Blocked or overloaded dominates every
/// other signal.
pub fn heat_level(member: &TeamMember) -> HeatLevel {
    let blocked = member.count_with_status(WorkStatus::Blocked);
    let at_risk = member.count_with_status(WorkStatus::AtRisk);

    if blocked > 0 || member.workload == WorkloadLevel::Overloaded {
        HeatLevel::High
    } else if at_risk >= 2 || member.delivery_trend == DeliveryTrend::Declining {
        HeatLevel::Medium
    } else {
        HeatLevel::Low
    }
}

/// Longest blocker among blocked items; 0 when nothing is blocked or no
/// blocked item records its duration.
pub fn longest_blocker_days(member: &TeamMember) -> u32 {
    member
        .items
        .iter()
        .filter(|item| item.status == WorkStatus::Blocked)
        .map(|item| item.blocker_days.unwrap_or(0))
        .max()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBadge {
    Blocked(usize),
    AtRisk(usize),
}

/// Badge shown on a heatmap card. Blocked items hide the at-risk count.
pub fn card_badge(member: &TeamMember) -> Option<CardBadge> {
    let blocked = member.count_with_status(WorkStatus::Blocked);
    let at_risk = member.count_with_status(WorkStatus::AtRisk);

    match (blocked, at_risk) {
        (0, 0) => None,
        (0, at_risk) => Some(CardBadge::AtRisk(at_risk)),
        (blocked, _) => Some(CardBadge::Blocked(blocked)),
    }
}
