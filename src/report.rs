use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{HeatLevel, StatusSummary, TeamMember, TimeHorizon, WorkStatus};
use crate::nav::Screen;
use crate::risk::{self, CardBadge};
use crate::roster::Roster;
use crate::summary::{self, health_score};

// Order the health bar and per-horizon counts are listed in.
const DISPLAY_ORDER: [WorkStatus; 4] = [
    WorkStatus::Completed,
    WorkStatus::OnTrack,
    WorkStatus::AtRisk,
    WorkStatus::Blocked,
];

fn format_score(score: Option<u8>) -> String {
    match score {
        Some(score) => format!("{score}%"),
        None => "N/A".to_string(),
    }
}

fn format_share(summary: &StatusSummary, status: WorkStatus) -> String {
    match summary.share(status) {
        Some(share) => format!("{:.0}%", share * 100.0),
        None => "-".to_string(),
    }
}

pub fn render_screen(roster: &Roster, screen: &Screen<'_>) -> String {
    match screen {
        Screen::Overview => render_overview(roster),
        Screen::Individual(member) => render_member(member),
        Screen::StatusFilter { status, members } => render_status_filter(*status, members),
    }
}

pub fn render_overview(roster: &Roster) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Team Overview");
    let _ = writeln!(
        output,
        "Situational awareness for your team's execution health"
    );
    let _ = writeln!(output);
    write_health(&mut output, &summary::team_summary(roster));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Time Horizons");
    for horizon in TimeHorizon::ALL {
        write_horizon(&mut output, horizon, &summary::horizon_summary(roster, horizon));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Attention Heatmap");
    if roster.is_empty() {
        let _ = writeln!(output, "No team members on the roster.");
    } else {
        for member in roster.members() {
            write_card(&mut output, member);
        }
    }

    let _ = writeln!(output);
    let legend: Vec<String> = [HeatLevel::Low, HeatLevel::Medium, HeatLevel::High]
        .iter()
        .map(|level| format!("{} = {}", level.label(), level.meaning()))
        .collect();
    let _ = writeln!(output, "Legend: {}", legend.join(", "));

    output
}

fn write_health(output: &mut String, summary: &StatusSummary) {
    let _ = writeln!(output, "## Team Health");
    let _ = writeln!(output, "{} healthy", format_score(health_score(summary)));

    let counts: Vec<String> = DISPLAY_ORDER
        .iter()
        .map(|status| {
            format!(
                "{} {} ({})",
                summary.count(*status),
                status.label(),
                format_share(summary, *status)
            )
        })
        .collect();
    let _ = writeln!(output, "{}", counts.join(" | "));
}

fn write_horizon(output: &mut String, horizon: TimeHorizon, summary: &StatusSummary) {
    let attention = if horizon == TimeHorizon::Immediate && summary.has_issues() {
        " [needs attention]"
    } else {
        ""
    };
    let _ = writeln!(
        output,
        "### {} ({}){}",
        horizon.label(),
        horizon.sublabel(),
        attention
    );

    if summary.total == 0 {
        let _ = writeln!(output, "- No items");
        return;
    }
    for status in DISPLAY_ORDER {
        let count = summary.count(status);
        if count > 0 {
            let _ = writeln!(output, "- {}: {}", status.label(), count);
        }
    }
}

fn write_card(output: &mut String, member: &TeamMember) {
    let level = risk::heat_level(member);
    let badge = match risk::card_badge(member) {
        Some(CardBadge::Blocked(count)) => format!(", {count} blocked"),
        Some(CardBadge::AtRisk(count)) => format!(", {count} at risk"),
        None => String::new(),
    };
    let _ = writeln!(
        output,
        "- [{:<6}] {} {} ({}) id {}: {}, {}{}",
        level.as_str().to_uppercase(),
        member.avatar,
        member.name,
        member.role,
        member.id,
        member.workload,
        member.delivery_trend,
        badge
    );
}

pub fn render_member(member: &TeamMember) -> String {
    let mut output = String::new();
    let summary = summary::member_summary(member);
    let longest = risk::longest_blocker_days(member);

    let _ = writeln!(output, "# {} ({})", member.name, member.avatar);
    let _ = writeln!(output, "{}", member.role);
    let _ = writeln!(output);
    let _ = writeln!(output, "- Workload: {}", member.workload.label());
    if longest > 0 {
        let _ = writeln!(
            output,
            "- Blockers: {} ({}d longest)",
            summary.blocked, longest
        );
    } else {
        let _ = writeln!(output, "- Blockers: {}", summary.blocked);
    }
    let _ = writeln!(output, "- Delivery Trend: {}", member.delivery_trend.label());
    let _ = writeln!(output, "- Attention: {}", risk::heat_level(member).label());

    let _ = writeln!(output);
    let _ = writeln!(output, "## Work Distribution");
    let _ = writeln!(output, "{} total items", summary.total);
    for status in DISPLAY_ORDER {
        let count = summary.count(status);
        if count > 0 {
            let _ = writeln!(output, "- {}: {}", status.label(), count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Work Summary");
    let _ = writeln!(
        output,
        "Assigned {} | In Progress {} | Completed {} | Delayed / Pending {}",
        summary.total,
        summary.on_track,
        summary.completed,
        summary.delayed()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Work History");
    if member.items.is_empty() {
        let _ = writeln!(output, "No work items assigned.");
    }
    for item in &member.items {
        let blocker = match item.blocker_days {
            Some(days) if days > 0 => format!(" - {days}d blocker"),
            _ => String::new(),
        };
        let _ = writeln!(
            output,
            "- {} [{}] {}{} ({})",
            item.id,
            item.status.label(),
            item.due_horizon,
            blocker,
            if item.is_done() { "Done" } else { "Open" }
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Signals");
    if member.signals.is_empty() {
        let _ = writeln!(output, "No signals recorded.");
    }
    for signal in &member.signals {
        let _ = writeln!(output, "- {signal}");
    }

    output
}

pub fn render_status_filter(status: WorkStatus, members: &[&TeamMember]) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "# Team Members with '{}' Items",
        status.label()
    );
    if members.is_empty() {
        let _ = writeln!(output, "No team members found with this status.");
        return output;
    }

    let _ = writeln!(output, "Found {} team member(s).", members.len());
    let _ = writeln!(output);
    for member in members {
        write_card(&mut output, member);
    }

    output
}

/// Full markdown snapshot: overview followed by every member's detail.
pub fn build_report(roster: &Roster, generated_on: NaiveDate) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "<!-- Team status report generated {generated_on} -->");
    output.push_str(&render_overview(roster));

    for status in [WorkStatus::Blocked, WorkStatus::AtRisk] {
        let members = roster.members_with_status(status);
        let _ = writeln!(output);
        output.push_str(&render_status_filter(status, &members));
    }

    for member in roster.members() {
        let _ = writeln!(output);
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        output.push_str(&render_member(member));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryTrend, WorkItem, WorkloadLevel};
    use crate::roster::seed;

    #[test]
    fn overview_shows_health_and_flags_immediate_horizon() {
        let roster = seed().unwrap();
        let text = render_overview(&roster);

        assert!(text.contains("76% healthy"));
        assert!(text.contains("### Immediate (Due today or overdue) [needs attention]"));
        assert!(text.contains("### Upcoming (Due next week+)\n"));
        assert!(text.contains("[HIGH  ] MJ Marcus Johnson (Engineer) id 2: heavy, declining, 1 blocked"));
        assert!(text.contains("[LOW   ] AK Anna Kowalski (Engineer) id 7: heavy, stable, 1 at risk"));
        assert!(text.contains("High priority = action needed"));
    }

    #[test]
    fn empty_roster_renders_not_applicable_health() {
        let roster = Roster::new(Vec::new()).unwrap();
        let text = render_overview(&roster);
        assert!(text.contains("N/A healthy"));
        assert!(!text.contains("0% healthy"));
        assert!(text.contains("No team members on the roster."));
    }

    #[test]
    fn member_view_reports_longest_blocker() {
        let roster = seed().unwrap();
        let lisa = roster.member_by_id("5").unwrap();
        let text = render_member(lisa);

        assert!(text.contains("- Blockers: 1 (5d longest)"));
        assert!(text.contains("Assigned 6 | In Progress 3 | Completed 0 | Delayed / Pending 3"));
        assert!(text.contains("- 5c [Blocked] short-term - 5d blocker (Open)"));
        assert!(text.contains("- Overloaded—consider redistributing work"));
    }

    #[test]
    fn member_without_items_or_signals() {
        let member = TeamMember {
            id: "9".to_string(),
            name: "New Hire".to_string(),
            role: "Engineer".to_string(),
            avatar: "NH".to_string(),
            workload: WorkloadLevel::Light,
            delivery_trend: DeliveryTrend::Stable,
            items: Vec::new(),
            signals: Vec::new(),
        };
        let text = render_member(&member);
        assert!(text.contains("- Blockers: 0\n"));
        assert!(text.contains("No work items assigned."));
        assert!(text.contains("No signals recorded."));
    }

    #[test]
    fn status_filter_handles_empty_results() {
        let roster = Roster::new(vec![TeamMember {
            id: "1".to_string(),
            name: "Solo".to_string(),
            role: "Engineer".to_string(),
            avatar: "SO".to_string(),
            workload: WorkloadLevel::Light,
            delivery_trend: DeliveryTrend::Improving,
            items: vec![WorkItem::new("a", WorkStatus::OnTrack, TimeHorizon::Immediate)],
            signals: Vec::new(),
        }])
        .unwrap();

        let none = render_status_filter(
            WorkStatus::Blocked,
            &roster.members_with_status(WorkStatus::Blocked),
        );
        assert!(none.contains("# Team Members with 'Blocked' Items"));
        assert!(none.contains("No team members found with this status."));

        let some = render_status_filter(
            WorkStatus::OnTrack,
            &roster.members_with_status(WorkStatus::OnTrack),
        );
        assert!(some.contains("Found 1 team member(s)."));
    }

    #[test]
    fn report_includes_every_member() {
        let roster = seed().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let report = build_report(&roster, date);

        assert!(report.starts_with("<!-- Team status report generated 2026-02-02 -->"));
        for member in roster.members() {
            assert!(report.contains(&format!("# {} ({})", member.name, member.avatar)));
        }
        assert!(report.contains("# Team Members with 'Blocked' Items\nFound 2 team member(s)."));
    }
}
