//! Typed event handlers
//!
//! What a rendered control does when used. Actions serialize to short keys
//! (`navigate:login`, `create:goals`, `delete:tasks:7`) so a host can route
//! DOM events back without any global function registry.

use std::fmt;
use std::str::FromStr;

use super::state::{AuthMode, PlanTier};
use crate::sync::{Collection, RecordId};

/// DOM event a listener reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Click,
    Submit,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Click => write!(f, "click"),
            Event::Submit => write!(f, "submit"),
        }
    }
}

/// Navigation targets reachable from a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nav {
    Landing,
    Login,
    Signup,
    Dashboard,
    Logout,
}

impl Nav {
    fn key(&self) -> &'static str {
        match self {
            Nav::Landing => "landing",
            Nav::Login => "login",
            Nav::Signup => "signup",
            Nav::Dashboard => "dashboard",
            Nav::Logout => "logout",
        }
    }
}

/// Handler attached to a rendered control
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Navigate(Nav),
    /// Submit of the login or signup form; credentials come from the form fields
    SubmitAuth(AuthMode),
    ChoosePlan(PlanTier),
    /// Smooth-scroll to the element with this id
    ScrollTo(String),
    /// Submit of a dashboard add form; field values come from its named inputs
    Create(Collection),
    /// Submit of a single-input quick-add form
    QuickAdd(Collection),
    Delete {
        collection: Collection,
        id: RecordId,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Navigate(nav) => write!(f, "navigate:{}", nav.key()),
            Action::SubmitAuth(mode) => write!(f, "submit-auth:{}", mode),
            Action::ChoosePlan(plan) => write!(f, "choose-plan:{}", plan),
            Action::ScrollTo(target) => write!(f, "scroll-to:{}", target),
            Action::Create(collection) => write!(f, "create:{}", collection),
            Action::QuickAdd(collection) => write!(f, "quick-add:{}", collection),
            Action::Delete { collection, id } => write!(f, "delete:{}:{}", collection, id),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid action key: {}", s);
        let (kind, rest) = s.split_once(':').ok_or_else(invalid)?;

        match kind {
            "navigate" => {
                let nav = match rest {
                    "landing" => Nav::Landing,
                    "login" => Nav::Login,
                    "signup" => Nav::Signup,
                    "dashboard" => Nav::Dashboard,
                    "logout" => Nav::Logout,
                    _ => return Err(invalid()),
                };
                Ok(Action::Navigate(nav))
            }
            "submit-auth" => Ok(Action::SubmitAuth(rest.parse()?)),
            "choose-plan" => Ok(Action::ChoosePlan(rest.parse()?)),
            "scroll-to" if !rest.is_empty() => Ok(Action::ScrollTo(rest.to_string())),
            "create" | "quick-add" => {
                let collection: Collection = rest.parse()?;
                if !collection.creatable() {
                    return Err(invalid());
                }
                Ok(if kind == "create" {
                    Action::Create(collection)
                } else {
                    Action::QuickAdd(collection)
                })
            }
            "delete" => {
                let (collection, id) = rest.split_once(':').ok_or_else(invalid)?;
                Ok(Action::Delete {
                    collection: collection.parse()?,
                    id: id.parse().map_err(|_| invalid())?,
                })
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_keys_parse_back() {
        let actions = [
            Action::Navigate(Nav::Logout),
            Action::SubmitAuth(AuthMode::Signup),
            Action::ChoosePlan(PlanTier::ProSixMonth),
            Action::ScrollTo("pricing".to_string()),
            Action::Create(Collection::Journal),
            Action::QuickAdd(Collection::Tasks),
            Action::Delete {
                collection: Collection::Habits,
                id: 7,
            },
        ];

        for action in actions {
            let key = action.to_string();
            assert_eq!(key.parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_invalid_keys() {
        assert!("navigate:nowhere".parse::<Action>().is_err());
        assert!("delete:tasks:x".parse::<Action>().is_err());
        assert!("scroll-to:".parse::<Action>().is_err());
        assert!("create:summary".parse::<Action>().is_err());
        assert!("click".parse::<Action>().is_err());
    }
}
