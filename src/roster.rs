use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{
    DeliveryTrend, TeamMember, TimeHorizon, WorkItem, WorkStatus, WorkloadLevel,
};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("member id must not be empty (member '{name}')")]
    EmptyMemberId { name: String },

    #[error("duplicate member id '{0}'")]
    DuplicateMember(String),

    #[error("member '{member}' has duplicate work item id '{item}'")]
    DuplicateItem { member: String, item: String },

    #[error("work item '{item}' of member '{member}' records blocker days but is {status}")]
    BlockerOnUnblockedItem {
        member: String,
        item: String,
        status: WorkStatus,
    },

    #[error("csv row {row}: work item '{item}' is missing {field}")]
    MissingItemField {
        row: usize,
        item: String,
        field: &'static str,
    },

    #[error("csv row {row}: item columns are set but item_id is empty")]
    MissingItemId { row: usize },

    #[error("unsupported roster format for {0}; expected a .json or .csv file")]
    UnsupportedFormat(PathBuf),

    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse roster {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// The validated, read-only set of team members.
///
/// Construction is the only place the data invariants are checked; every
/// query downstream assumes them.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<TeamMember>,
}

impl Roster {
    pub fn new(members: Vec<TeamMember>) -> Result<Self, RosterError> {
        let mut member_ids = HashSet::new();

        for member in &members {
            if member.id.is_empty() {
                return Err(RosterError::EmptyMemberId {
                    name: member.name.clone(),
                });
            }
            if !member_ids.insert(member.id.as_str()) {
                return Err(RosterError::DuplicateMember(member.id.clone()));
            }

            let mut item_ids = HashSet::new();
            for item in &member.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(RosterError::DuplicateItem {
                        member: member.id.clone(),
                        item: item.id.clone(),
                    });
                }
                if item.blocker_days.is_some() && item.status != WorkStatus::Blocked {
                    return Err(RosterError::BlockerOnUnblockedItem {
                        member: member.id.clone(),
                        item: item.id.clone(),
                        status: item.status,
                    });
                }
            }
        }

        Ok(Self { members })
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn items(&self) -> impl Iterator<Item = &WorkItem> {
        self.members.iter().flat_map(|member| member.items.iter())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_by_id(&self, id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Members with at least one item in `status`, in roster order.
    pub fn members_with_status(&self, status: WorkStatus) -> Vec<&TeamMember> {
        self.members
            .iter()
            .filter(|member| member.has_status(status))
            .collect()
    }

    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let roster = match extension.as_deref() {
            Some("json") => {
                let raw = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let members: Vec<TeamMember> =
                    serde_json::from_str(&raw).map_err(|source| RosterError::Json {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Self::new(members)?
            }
            Some("csv") => {
                let reader = csv::Reader::from_path(path).map_err(|source| RosterError::Csv {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_csv(reader, path)?
            }
            _ => return Err(RosterError::UnsupportedFormat(path.to_path_buf())),
        };

        info!(
            path = %path.display(),
            members = roster.len(),
            items = roster.items().count(),
            "roster loaded"
        );
        Ok(roster)
    }

    fn from_csv<R: std::io::Read>(
        mut reader: csv::Reader<R>,
        path: &Path,
    ) -> Result<Self, RosterError> {
        #[derive(Deserialize)]
        struct CsvRow {
            member_id: String,
            name: String,
            role: String,
            avatar: String,
            workload: WorkloadLevel,
            delivery_trend: DeliveryTrend,
            item_id: Option<String>,
            status: Option<WorkStatus>,
            due_horizon: Option<TimeHorizon>,
            blocker_days: Option<u32>,
            signal: Option<String>,
        }

        let mut members: Vec<TeamMember> = Vec::new();

        for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
            // Header is line 1.
            let row_number = index + 2;
            let row = result.map_err(|source| RosterError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

            let position = match members.iter().position(|m| m.id == row.member_id) {
                Some(position) => position,
                None => {
                    members.push(TeamMember {
                        id: row.member_id.clone(),
                        name: row.name,
                        role: row.role,
                        avatar: row.avatar,
                        workload: row.workload,
                        delivery_trend: row.delivery_trend,
                        items: Vec::new(),
                        signals: Vec::new(),
                    });
                    members.len() - 1
                }
            };
            let member = &mut members[position];

            let item_id = row.item_id.filter(|id| !id.is_empty());
            let has_item_fields =
                row.status.is_some() || row.due_horizon.is_some() || row.blocker_days.is_some();
            if item_id.is_none() && has_item_fields {
                return Err(RosterError::MissingItemId { row: row_number });
            }

            if let Some(item_id) = item_id {
                let status = row.status.ok_or_else(|| RosterError::MissingItemField {
                    row: row_number,
                    item: item_id.clone(),
                    field: "status",
                })?;
                let due_horizon =
                    row.due_horizon
                        .ok_or_else(|| RosterError::MissingItemField {
                            row: row_number,
                            item: item_id.clone(),
                            field: "due_horizon",
                        })?;
                member.items.push(WorkItem {
                    id: item_id,
                    status,
                    due_horizon,
                    blocker_days: row.blocker_days,
                });
            }

            if let Some(signal) = row.signal.filter(|signal| !signal.is_empty()) {
                member.signals.push(signal);
            }
        }

        debug!(members = members.len(), "csv rows grouped into members");
        Self::new(members)
    }
}

/// The built-in seven-person example team.
pub fn seed() -> Result<Roster, RosterError> {
    use DeliveryTrend::{Declining, Improving, Stable};
    use TimeHorizon::{Immediate, ShortTerm, Upcoming};
    use WorkStatus::{AtRisk, Completed, OnTrack};
    use WorkloadLevel::{Heavy, Light, Moderate, Overloaded};

    let people = vec![
        (
            "1",
            "Sarah Chen",
            "Senior Engineer",
            "SC",
            Moderate,
            Stable,
            vec![
                WorkItem::new("1a", Completed, Immediate),
                WorkItem::new("1b", OnTrack, Immediate),
                WorkItem::new("1c", OnTrack, ShortTerm),
                WorkItem::new("1d", OnTrack, Upcoming),
            ],
            vec![
                "Completed 2 items ahead of schedule this week",
                "All current work progressing normally",
            ],
        ),
        (
            "2",
            "Marcus Johnson",
            "Engineer",
            "MJ",
            Heavy,
            Declining,
            vec![
                WorkItem::blocked_for("2a", Immediate, 3),
                WorkItem::new("2b", AtRisk, Immediate),
                WorkItem::new("2c", OnTrack, ShortTerm),
                WorkItem::new("2d", AtRisk, ShortTerm),
                WorkItem::new("2e", OnTrack, Upcoming),
            ],
            vec![
                "Blocked for 3 days waiting on API access",
                "Second item at risk due to dependency on blocked work",
                "Workload increased after scope change mid-week",
            ],
        ),
        (
            "3",
            "Emily Rodriguez",
            "Senior Engineer",
            "ER",
            Moderate,
            Improving,
            vec![
                WorkItem::new("3a", Completed, Immediate),
                WorkItem::new("3b", Completed, Immediate),
                WorkItem::new("3c", OnTrack, ShortTerm),
                WorkItem::new("3d", OnTrack, Upcoming),
            ],
            vec![
                "Strong momentum—cleared immediate queue",
                "On pace to complete short-term items early",
            ],
        ),
        (
            "4",
            "David Kim",
            "Engineer",
            "DK",
            Light,
            Stable,
            vec![
                WorkItem::new("4a", OnTrack, ShortTerm),
                WorkItem::new("4b", OnTrack, Upcoming),
            ],
            vec![
                "Lower workload than usual—capacity available",
                "All work progressing as expected",
            ],
        ),
        (
            "5",
            "Lisa Thompson",
            "Senior Engineer",
            "LT",
            Overloaded,
            Declining,
            vec![
                WorkItem::new("5a", AtRisk, Immediate),
                WorkItem::new("5b", AtRisk, Immediate),
                WorkItem::blocked_for("5c", ShortTerm, 5),
                WorkItem::new("5d", OnTrack, ShortTerm),
                WorkItem::new("5e", OnTrack, Upcoming),
                WorkItem::new("5f", OnTrack, Upcoming),
            ],
            vec![
                "Two immediate items at risk—may miss deadlines",
                "Prolonged blocker (5 days) on security review",
                "Overloaded—consider redistributing work",
            ],
        ),
        (
            "6",
            "James Wilson",
            "Engineer",
            "JW",
            Moderate,
            Stable,
            vec![
                WorkItem::new("6a", OnTrack, Immediate),
                WorkItem::new("6b", OnTrack, ShortTerm),
                WorkItem::new("6c", OnTrack, Upcoming),
            ],
            vec![
                "Steady progress across all time horizons",
                "No issues requiring attention",
            ],
        ),
        (
            "7",
            "Anna Kowalski",
            "Engineer",
            "AK",
            Heavy,
            Stable,
            vec![
                WorkItem::new("7a", Completed, Immediate),
                WorkItem::new("7b", OnTrack, Immediate),
                WorkItem::new("7c", AtRisk, ShortTerm),
                WorkItem::new("7d", OnTrack, Upcoming),
                WorkItem::new("7e", OnTrack, Upcoming),
            ],
            vec![
                "One short-term item at risk due to complexity",
                "Managing heavy workload effectively",
            ],
        ),
    ];

    let members = people
        .into_iter()
        .map(
            |(id, name, role, avatar, workload, delivery_trend, items, signals)| TeamMember {
                id: id.to_string(),
                name: name.to_string(),
                role: role.to_string(),
                avatar: avatar.to_string(),
                workload,
                delivery_trend,
                items,
                signals: signals.into_iter().map(str::to_string).collect(),
            },
        )
        .collect();

    Roster::new(members)
}
