//! View Router
//!
//! Client-side page state for the dashboard app: landing, login, signup, and
//! dashboard views plus an optional signed-in session. Pages are rendered as
//! plain render trees with typed actions on their controls.
//!
//! # Example
//!
//! ```rust
//! use zenith::view::{Credentials, View, ViewRouter};
//!
//! let mut router = ViewRouter::new();
//! router.show_login();
//! let view = router.handle_auth(Credentials::new("demo@zenith.com", "demo123")).unwrap();
//!
//! assert_eq!(view, View::Dashboard);
//! assert_eq!(router.user().unwrap().name, "demo");
//! ```

pub mod action;
pub mod node;
pub mod pages;
pub mod router;
pub mod state;

pub use action::{Action, Event, Nav};
pub use node::{el, text, Element, Listener, Node, NodePath};
pub use router::{AnchorBinding, Behaviors, Dispatch, ViewRouter};
pub use state::{AppState, AuthMode, Credentials, PlanTier, RouteError, Session, Transition, View};
