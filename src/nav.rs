//! Screen navigation for the dashboard.
//!
//! `Overview` is the hub. Drill-downs go out from it (or from a status list
//! into one member) and `Back` always returns to it. Any other edge is
//! rejected and leaves the current view untouched.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::models::{TeamMember, WorkStatus};
use crate::roster::Roster;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Overview,
    Individual(String),
    StatusFilter(WorkStatus),
}

impl View {
    fn name(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Individual(_) => "individual",
            Self::StatusFilter(_) => "status filter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectMember(String),
    SelectStatus(WorkStatus),
    Back,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectMember(id) => write!(f, "select member '{id}'"),
            Self::SelectStatus(status) => write!(f, "select status '{status}'"),
            Self::Back => f.write_str("go back"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("cannot {intent} from the {from} view")]
    InvalidTransition { from: &'static str, intent: Intent },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIntentError {
    #[error("empty command")]
    Empty,
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' takes a single argument")]
    TooManyArguments(&'static str),
    #[error(transparent)]
    Status(#[from] crate::models::ParseEnumError),
    #[error("unknown command '{0}'")]
    Unknown(String),
}

impl FromStr for Intent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().ok_or(ParseIntentError::Empty)?;
        let argument = words.next();
        let extra = words.next().is_some();

        match command.to_ascii_lowercase().as_str() {
            "member" | "m" => {
                let id = argument.ok_or(ParseIntentError::MissingArgument("member"))?;
                if extra {
                    return Err(ParseIntentError::TooManyArguments("member"));
                }
                Ok(Self::SelectMember(id.to_string()))
            }
            "status" | "s" => {
                let raw = argument.ok_or(ParseIntentError::MissingArgument("status"))?;
                if extra {
                    return Err(ParseIntentError::TooManyArguments("status"));
                }
                Ok(Self::SelectStatus(raw.parse()?))
            }
            "back" | "b" if argument.is_some() => Err(ParseIntentError::TooManyArguments("back")),
            "back" | "b" => Ok(Self::Back),
            other => Err(ParseIntentError::Unknown(other.to_string())),
        }
    }
}

/// A view with its roster data resolved, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<'a> {
    Overview,
    Individual(&'a TeamMember),
    StatusFilter {
        status: WorkStatus,
        members: Vec<&'a TeamMember>,
    },
}

pub struct Navigator<'a> {
    roster: &'a Roster,
    view: View,
}

impl<'a> Navigator<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        Self {
            roster,
            view: View::Overview,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn apply(&mut self, intent: Intent) -> Result<&View, NavigationError> {
        let next = match (&self.view, intent) {
            (View::Overview | View::StatusFilter(_), Intent::SelectMember(id)) => {
                self.enter_member(id)
            }
            (View::Overview, Intent::SelectStatus(status)) => View::StatusFilter(status),
            (View::Individual(_) | View::StatusFilter(_), Intent::Back) => View::Overview,
            (from, intent) => {
                warn!(from = from.name(), %intent, "navigation rejected");
                return Err(NavigationError::InvalidTransition {
                    from: from.name(),
                    intent,
                });
            }
        };

        debug!(from = self.view.name(), to = next.name(), "navigated");
        self.view = next;
        Ok(&self.view)
    }

    fn enter_member(&self, id: String) -> View {
        if self.roster.member_by_id(&id).is_some() {
            View::Individual(id)
        } else {
            warn!(member = %id, "unknown member, returning to overview");
            View::Overview
        }
    }

    /// Resolve the current view against the roster, falling back to the
    /// overview when a member reference no longer resolves.
    pub fn screen(&self) -> Screen<'a> {
        match &self.view {
            View::Overview => Screen::Overview,
            View::Individual(id) => match self.roster.member_by_id(id) {
                Some(member) => Screen::Individual(member),
                None => Screen::Overview,
            },
            View::StatusFilter(status) => Screen::StatusFilter {
                status: *status,
                members: self.roster.members_with_status(*status),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::seed;

    #[test]
    fn starts_on_overview() {
        let roster = seed().unwrap();
        let nav = Navigator::new(&roster);
        assert_eq!(nav.view(), &View::Overview);
        assert_eq!(nav.screen(), Screen::Overview);
    }

    #[test]
    fn select_member_then_back() {
        let roster = seed().unwrap();
        let mut nav = Navigator::new(&roster);

        let view = nav.apply(Intent::SelectMember("2".to_string())).unwrap();
        assert_eq!(view, &View::Individual("2".to_string()));
        match nav.screen() {
            Screen::Individual(member) => assert_eq!(member.name, "Marcus Johnson"),
            other => panic!("expected individual screen, got {other:?}"),
        }

        assert_eq!(nav.apply(Intent::Back).unwrap(), &View::Overview);
    }

    #[test]
    fn unknown_member_falls_back_to_overview() {
        let roster = seed().unwrap();
        let mut nav = Navigator::new(&roster);

        let view = nav
            .apply(Intent::SelectMember("nonexistent-id".to_string()))
            .unwrap();
        assert_eq!(view, &View::Overview);

        nav.apply(Intent::SelectStatus(WorkStatus::Blocked)).unwrap();
        let view = nav
            .apply(Intent::SelectMember("nonexistent-id".to_string()))
            .unwrap();
        assert_eq!(view, &View::Overview);
    }

    #[test]
    fn status_filter_lists_members_and_drills_down() {
        let roster = seed().unwrap();
        let mut nav = Navigator::new(&roster);

        nav.apply(Intent::SelectStatus(WorkStatus::Blocked)).unwrap();
        match nav.screen() {
            Screen::StatusFilter { status, members } => {
                assert_eq!(status, WorkStatus::Blocked);
                let ids: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();
                assert_eq!(ids, vec!["2", "5"]);
            }
            other => panic!("expected status filter, got {other:?}"),
        }

        let view = nav.apply(Intent::SelectMember("5".to_string())).unwrap();
        assert_eq!(view, &View::Individual("5".to_string()));
        assert_eq!(nav.apply(Intent::Back).unwrap(), &View::Overview);
    }

    #[test]
    fn status_filter_back_returns_to_overview() {
        let roster = seed().unwrap();
        let mut nav = Navigator::new(&roster);
        nav.apply(Intent::SelectStatus(WorkStatus::AtRisk)).unwrap();
        assert_eq!(nav.apply(Intent::Back).unwrap(), &View::Overview);
    }

    #[test]
    fn member_to_member_goes_through_the_hub() {
        let roster = seed().unwrap();
        let mut nav = Navigator::new(&roster);
        nav.apply(Intent::SelectMember("1".to_string())).unwrap();

        let err = nav
            .apply(Intent::SelectMember("2".to_string()))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot select member '2' from the individual view"
        );
        assert_eq!(nav.view(), &View::Individual("1".to_string()));
    }

    #[test]
    fn rejected_edges_leave_state_unchanged() {
        let roster = seed().unwrap();
        let mut nav = Navigator::new(&roster);

        assert!(nav.apply(Intent::Back).is_err());
        assert_eq!(nav.view(), &View::Overview);

        nav.apply(Intent::SelectStatus(WorkStatus::Completed)).unwrap();
        assert!(nav.apply(Intent::SelectStatus(WorkStatus::Blocked)).is_err());
        assert_eq!(nav.view(), &View::StatusFilter(WorkStatus::Completed));

        nav.apply(Intent::SelectMember("3".to_string())).unwrap();
        assert!(nav.apply(Intent::SelectStatus(WorkStatus::Blocked)).is_err());
        assert_eq!(nav.view(), &View::Individual("3".to_string()));
    }

    #[test]
    fn intents_parse_from_commands() {
        assert_eq!(
            "member 2".parse::<Intent>(),
            Ok(Intent::SelectMember("2".to_string()))
        );
        assert_eq!(
            "s at-risk".parse::<Intent>(),
            Ok(Intent::SelectStatus(WorkStatus::AtRisk))
        );
        assert_eq!("BACK".parse::<Intent>(), Ok(Intent::Back));
        assert_eq!(
            "member".parse::<Intent>(),
            Err(ParseIntentError::MissingArgument("member"))
        );
        assert!(matches!(
            "status late".parse::<Intent>(),
            Err(ParseIntentError::Status(_))
        ));
        assert_eq!("   ".parse::<Intent>(), Err(ParseIntentError::Empty));
        assert_eq!(
            "member 1 2".parse::<Intent>(),
            Err(ParseIntentError::TooManyArguments("member"))
        );
        assert_eq!(
            "status blocked at-risk".parse::<Intent>(),
            Err(ParseIntentError::TooManyArguments("status"))
        );
        assert_eq!(
            "back 1".parse::<Intent>(),
            Err(ParseIntentError::TooManyArguments("back"))
        );
        assert_eq!(
            "jump".parse::<Intent>(),
            Err(ParseIntentError::Unknown("jump".to_string()))
        );
    }
}
