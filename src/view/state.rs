//! View State
//!
//! The finite set of pages, the optional signed-in session, and the single
//! transition function that moves between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::action::Nav;

/// Which full page is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Landing,
    Login,
    Signup,
    Dashboard,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Login => "login",
            View::Signup => "signup",
            View::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "landing" => Ok(View::Landing),
            "login" => Ok(View::Login),
            "signup" => Ok(View::Signup),
            "dashboard" => Ok(View::Dashboard),
            _ => Err(format!(
                "Unknown view: {}. Use landing, login, signup, or dashboard",
                s
            )),
        }
    }
}

/// Subscription plan attached to a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanTier {
    #[default]
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "pro-monthly")]
    ProMonthly,
    #[serde(rename = "pro-6mo")]
    ProSixMonth,
}

impl PlanTier {
    pub fn key(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::ProMonthly => "pro-monthly",
            PlanTier::ProSixMonth => "pro-6mo",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PlanTier::Free),
            "pro-monthly" => Ok(PlanTier::ProMonthly),
            "pro-6mo" => Ok(PlanTier::ProSixMonth),
            _ => Err(format!("Unknown plan: {}", s)),
        }
    }
}

/// Which auth form was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMode {
    Login,
    Signup,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Login => write!(f, "login"),
            AuthMode::Signup => write!(f, "signup"),
        }
    }
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(AuthMode::Login),
            "signup" => Ok(AuthMode::Signup),
            _ => Err(format!("Unknown auth mode: {}", s)),
        }
    }
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: String,
    pub plan: PlanTier,
}

impl Session {
    /// Display name is the part of the identifier before `@`
    pub fn from_identifier(identifier: &str) -> Self {
        let name = identifier
            .split_once('@')
            .map(|(local, _)| local)
            .unwrap_or(identifier);

        Self {
            name: name.to_string(),
            email: identifier.to_string(),
            plan: PlanTier::Free,
        }
    }
}

/// Submitted auth form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

/// Every way the view state can change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    ShowLanding,
    ShowLogin,
    ShowSignup,
    ShowDashboard,
    SubmitAuth(Credentials),
    Logout,
    ChoosePlan(PlanTier),
}

/// Rejected transitions. The state is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Missing required credentials: {}", .missing.join(", "))]
    MissingCredentials { missing: Vec<&'static str> },
}

/// Process-local view state passed by reference to the page renderers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub view: View,
    pub user: Option<Session>,
}

impl AppState {
    /// Apply a transition. On error nothing changes.
    pub fn apply(&mut self, transition: Transition) -> Result<(), RouteError> {
        match transition {
            Transition::SubmitAuth(credentials) => return self.sign_in(&credentials),
            Transition::ShowLanding => self.navigate(Nav::Landing),
            Transition::ShowLogin => self.navigate(Nav::Login),
            Transition::ShowSignup => self.navigate(Nav::Signup),
            Transition::ShowDashboard => self.navigate(Nav::Dashboard),
            Transition::Logout => self.navigate(Nav::Logout),
            Transition::ChoosePlan(plan) => self.choose_plan(plan),
        }
        Ok(())
    }

    /// Move to a page. Logging out also ends the session.
    pub fn navigate(&mut self, nav: Nav) {
        self.view = match nav {
            Nav::Landing => View::Landing,
            Nav::Login => View::Login,
            Nav::Signup => View::Signup,
            Nav::Dashboard => View::Dashboard,
            Nav::Logout => {
                self.user = None;
                View::Landing
            }
        };
    }

    /// Signed in: switch plan and show the dashboard. Otherwise sign up first.
    pub fn choose_plan(&mut self, plan: PlanTier) {
        match self.user.as_mut() {
            Some(user) => {
                user.plan = plan;
                self.view = View::Dashboard;
            }
            None => self.view = View::Signup,
        }
    }

    /// Start a session from the auth form. Both fields must be non-blank.
    pub fn sign_in(&mut self, credentials: &Credentials) -> Result<(), RouteError> {
        let identifier = credentials.identifier.trim();
        let mut missing = Vec::new();
        if identifier.is_empty() {
            missing.push("email");
        }
        if credentials.secret.trim().is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(RouteError::MissingCredentials { missing });
        }

        self.user = Some(Session::from_identifier(identifier));
        self.view = View::Dashboard;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert_eq!(state.view, View::Landing);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_demo_credentials() {
        let mut state = AppState::default();
        state
            .apply(Transition::SubmitAuth(Credentials::new(
                "demo@zenith.com",
                "demo123",
            )))
            .unwrap();

        assert_eq!(state.view, View::Dashboard);
        let user = state.user.unwrap();
        assert_eq!(user.name, "demo");
        assert_eq!(user.email, "demo@zenith.com");
        assert_eq!(user.plan, PlanTier::Free);
    }

    #[test]
    fn test_empty_credentials_rejected_without_transition() {
        let mut state = AppState {
            view: View::Login,
            user: None,
        };

        let err = state
            .apply(Transition::SubmitAuth(Credentials::new("", "  ")))
            .unwrap_err();

        assert_eq!(
            err,
            RouteError::MissingCredentials {
                missing: vec!["email", "password"]
            }
        );
        assert_eq!(err.to_string(), "Missing required credentials: email, password");
        assert_eq!(state.view, View::Login);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_identifier_without_at() {
        assert_eq!(Session::from_identifier("alex").name, "alex");
    }

    #[test]
    fn test_choose_plan() {
        let mut state = AppState::default();
        state.apply(Transition::ChoosePlan(PlanTier::ProSixMonth)).unwrap();
        assert_eq!(state.view, View::Signup);
        assert!(state.user.is_none());

        state
            .apply(Transition::SubmitAuth(Credentials::new("sam@zenith.com", "pw")))
            .unwrap();
        state.apply(Transition::ShowLanding).unwrap();
        state.apply(Transition::ChoosePlan(PlanTier::ProSixMonth)).unwrap();

        assert_eq!(state.view, View::Dashboard);
        assert_eq!(state.user.unwrap().plan, PlanTier::ProSixMonth);
    }

    #[test]
    fn test_plan_and_view_keys() {
        assert_eq!("pro-6mo".parse::<PlanTier>(), Ok(PlanTier::ProSixMonth));
        assert_eq!("Dashboard".parse::<View>(), Ok(View::Dashboard));
        assert!("settings".parse::<View>().is_err());
    }
}
