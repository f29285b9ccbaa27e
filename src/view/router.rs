//! View Router
//!
//! Owns the application state and the current page. Every successful
//! transition re-renders the whole page and rebuilds the behavior bindings
//! from the new tree only, so bindings from earlier renders never pile up.

use super::action::{Action, Nav};
use super::node::{Node, NodePath};
use super::pages::{self, REVEAL_CLASS};
use super::state::{AppState, Credentials, PlanTier, RouteError, Session, Transition, View};

/// Scroll behaviors bound to one rendered page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Behaviors {
    /// Elements revealed when scrolled into view
    pub reveal_on_scroll: Vec<NodePath>,
    /// In-page links that smooth-scroll to their target id
    pub smooth_anchors: Vec<AnchorBinding>,
}

/// An in-page link and the element id it scrolls to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorBinding {
    pub path: NodePath,
    pub target: String,
}

impl Behaviors {
    /// Derive the bindings for a freshly rendered tree
    pub fn from_tree(tree: &Node) -> Self {
        let mut behaviors = Behaviors::default();
        tree.visit(&mut |path, element| {
            if element.has_class(REVEAL_CLASS) {
                behaviors.reveal_on_scroll.push(path.to_vec());
            }
            if let Some(target) = element.in_page_target() {
                behaviors.smooth_anchors.push(AnchorBinding {
                    path: path.to_vec(),
                    target: target.to_string(),
                });
            }
        });
        behaviors
    }

    pub fn binding_count(&self) -> usize {
        self.reveal_on_scroll.len() + self.smooth_anchors.len()
    }
}

/// Outcome of dispatching a rendered control's action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The view changed and the page was re-rendered
    Rendered(View),
    /// Scroll to an element on the current page; no re-render
    Scroll(String),
    /// The action needs form input or belongs to another subsystem
    Unhandled,
}

/// Client-side view router
#[derive(Debug, Clone)]
pub struct ViewRouter {
    state: AppState,
    page: Node,
    behaviors: Behaviors,
    renders: u64,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    /// Start on the landing page
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let page = pages::render(&state);
        let behaviors = Behaviors::from_tree(&page);
        Self {
            state,
            page,
            behaviors,
            renders: 1,
        }
    }

    pub fn view(&self) -> View {
        self.state.view
    }

    pub fn user(&self) -> Option<&Session> {
        self.state.user.as_ref()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn page(&self) -> &Node {
        &self.page
    }

    pub fn behaviors(&self) -> &Behaviors {
        &self.behaviors
    }

    /// Number of full-page renders so far, including the initial one
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Apply a transition and re-render. A rejected transition leaves the
    /// state and the page as they were.
    pub fn transition(&mut self, transition: Transition) -> Result<View, RouteError> {
        let from = self.state.view;
        if let Err(err) = self.state.apply(transition) {
            tracing::warn!(view = %from, error = %err, "Transition rejected");
            return Err(err);
        }
        Ok(self.rerender(from))
    }

    /// Move to a page and re-render
    pub fn navigate(&mut self, nav: Nav) -> View {
        let from = self.state.view;
        self.state.navigate(nav);
        self.rerender(from)
    }

    pub fn show_landing(&mut self) -> View {
        self.navigate(Nav::Landing)
    }

    pub fn show_login(&mut self) -> View {
        self.navigate(Nav::Login)
    }

    pub fn show_signup(&mut self) -> View {
        self.navigate(Nav::Signup)
    }

    pub fn show_dashboard(&mut self) -> View {
        self.navigate(Nav::Dashboard)
    }

    pub fn logout(&mut self) -> View {
        self.navigate(Nav::Logout)
    }

    pub fn choose_plan(&mut self, plan: PlanTier) -> View {
        let from = self.state.view;
        self.state.choose_plan(plan);
        self.rerender(from)
    }

    /// Submit the login or signup form
    pub fn handle_auth(&mut self, credentials: Credentials) -> Result<View, RouteError> {
        self.transition(Transition::SubmitAuth(credentials))
    }

    /// Route a control's action. Auth submits go through `handle_auth`
    /// because they carry form input; record actions belong to the sync
    /// layer.
    pub fn dispatch(&mut self, action: &Action) -> Dispatch {
        match action {
            Action::Navigate(nav) => Dispatch::Rendered(self.navigate(*nav)),
            Action::ChoosePlan(plan) => Dispatch::Rendered(self.choose_plan(*plan)),
            Action::ScrollTo(target) => Dispatch::Scroll(target.clone()),
            Action::SubmitAuth(_)
            | Action::Create(_)
            | Action::QuickAdd(_)
            | Action::Delete { .. } => Dispatch::Unhandled,
        }
    }

    fn rerender(&mut self, from: View) -> View {
        self.page = pages::render(&self.state);
        self.behaviors = Behaviors::from_tree(&self.page);
        self.renders += 1;
        tracing::debug!(from = %from, to = %self.state.view, renders = self.renders, "View changed");
        self.state.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::Collection;
    use crate::view::state::AuthMode;

    #[test]
    fn test_starts_on_landing() {
        let router = ViewRouter::new();
        assert_eq!(router.view(), View::Landing);
        assert_eq!(router.render_count(), 1);
        assert!(router.user().is_none());
    }

    #[test]
    fn test_signup_dashboard_logout() {
        let mut router = ViewRouter::new();

        assert_eq!(router.show_signup(), View::Signup);
        assert_eq!(
            router.handle_auth(Credentials::new("demo@zenith.com", "demo123")),
            Ok(View::Dashboard)
        );
        assert_eq!(router.user().map(|u| u.name.as_str()), Some("demo"));
        assert_eq!(router.logout(), View::Landing);

        assert_eq!(router.view(), View::Landing);
        assert!(router.user().is_none());
        assert_eq!(router.render_count(), 4);
    }

    #[test]
    fn test_rejected_auth_keeps_page() {
        let mut router = ViewRouter::new();
        router.show_login();
        let before = router.page().clone();
        let renders = router.render_count();

        let result = router.handle_auth(Credentials::new("demo@zenith.com", ""));

        assert!(matches!(result, Err(RouteError::MissingCredentials { .. })));
        assert_eq!(router.view(), View::Login);
        assert_eq!(router.page(), &before);
        assert_eq!(router.render_count(), renders);
    }

    #[test]
    fn test_bindings_do_not_accumulate() {
        let mut router = ViewRouter::new();
        let landing = router.behaviors().clone();
        assert_eq!(landing.reveal_on_scroll.len(), 9);
        assert_eq!(
            landing
                .smooth_anchors
                .iter()
                .map(|a| a.target.as_str())
                .collect::<Vec<_>>(),
            vec!["features", "pricing"]
        );

        for _ in 0..5 {
            router.show_login();
            router.show_landing();
        }

        assert_eq!(router.behaviors(), &landing);

        router.show_login();
        assert_eq!(router.behaviors().binding_count(), 0);
    }

    #[test]
    fn test_dispatch_rendered_actions() {
        let mut router = ViewRouter::new();

        let sign_in = router
            .page()
            .listeners()
            .into_iter()
            .find(|l| l.action == Action::Navigate(Nav::Login))
            .map(|l| l.action.clone())
            .unwrap();
        assert_eq!(router.dispatch(&sign_in), Dispatch::Rendered(View::Login));

        assert_eq!(
            router.dispatch(&Action::ScrollTo("pricing".to_string())),
            Dispatch::Scroll("pricing".to_string())
        );
        assert_eq!(
            router.dispatch(&Action::SubmitAuth(AuthMode::Login)),
            Dispatch::Unhandled
        );
        assert_eq!(
            router.dispatch(&Action::Create(Collection::Tasks)),
            Dispatch::Unhandled
        );
        assert_eq!(router.view(), View::Login);
    }

    #[test]
    fn test_choose_plan_when_signed_in() {
        let mut router = ViewRouter::new();
        router
            .handle_auth(Credentials::new("kim@zenith.com", "pw"))
            .unwrap();
        router.show_landing();

        let outcome = router.dispatch(&Action::ChoosePlan(PlanTier::ProMonthly));

        assert_eq!(outcome, Dispatch::Rendered(View::Dashboard));
        assert_eq!(router.user().map(|u| u.plan), Some(PlanTier::ProMonthly));
        assert!(router.page().text_content().contains("pro-monthly"));
    }

    #[test]
    fn test_choose_plan_signed_out_goes_to_signup() {
        let mut router = ViewRouter::new();

        assert_eq!(router.choose_plan(PlanTier::ProMonthly), View::Signup);
        assert!(router.user().is_none());
        assert_eq!(router.render_count(), 2);
    }
}
