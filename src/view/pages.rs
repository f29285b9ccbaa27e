//! Page templates
//!
//! One render function per view. Each takes the application state by
//! reference and builds the whole page from scratch.

use super::action::{Action, Event, Nav};
use super::node::{el, Element, Node};
use super::state::{AppState, AuthMode, PlanTier, View};
use crate::sync::{Collection, Mood, Priority, TaskStatus};

pub const BRAND: &str = "Zenith";

/// Class marking elements that fade in when scrolled into view
pub const REVEAL_CLASS: &str = "fade-in-up";

/// Render the full page for the current view
pub fn render(state: &AppState) -> Node {
    let body = match state.view {
        View::Landing => landing(),
        View::Login => auth_form(AuthMode::Login),
        View::Signup => auth_form(AuthMode::Signup),
        View::Dashboard => dashboard(state),
    };

    el("div")
        .id("app")
        .attr("data-view", state.view.name())
        .child(header(state))
        .child(body)
        .into()
}

fn button(class: &str, label: &str, action: Action) -> Element {
    el("button")
        .class(class)
        .on(Event::Click, action)
        .text(label)
}

fn header(state: &AppState) -> Element {
    let links = if state.view == View::Landing {
        el("div")
            .class("nav-links")
            .child(el("a").attr("href", "#features").class("btn-ghost").text("Features"))
            .child(el("a").attr("href", "#pricing").class("btn-ghost").text("Pricing"))
            .child(button("btn-ghost", "Sign In", Action::Navigate(Nav::Login)))
            .child(button(
                "btn-primary",
                "Start Free Trial",
                Action::Navigate(Nav::Signup),
            ))
    } else {
        el("div")
            .class("nav-links")
            .child(button("btn-ghost", "Home", Action::Navigate(Nav::Landing)))
            .child(button("btn-ghost", "Sign Out", Action::Navigate(Nav::Logout)))
    };

    el("header").class("header").child(
        el("nav")
            .class("nav")
            .child(
                el("div")
                    .class("brand")
                    .child(el("div").class("logo"))
                    .child(el("span").text(BRAND)),
            )
            .child(links),
    )
}

fn feature(icon: &str, title: &str, description: &str) -> Element {
    el("div")
        .class(format!("feature-card {}", REVEAL_CLASS))
        .child(el("div").class("feature-icon").text(icon))
        .child(el("h3").class("feature-title").text(title))
        .child(el("p").class("feature-description").text(description))
}

fn plan_card(name: &str, price: &str, cta: &str, plan: PlanTier) -> Element {
    el("div")
        .class(format!("pricing-card {}", REVEAL_CLASS))
        .attr("data-plan", plan.key())
        .child(el("h3").text(name))
        .child(el("div").class("price").text(price))
        .child(button("btn-primary", cta, Action::ChoosePlan(plan)))
}

fn landing() -> Element {
    let hero = el("section")
        .class("hero")
        .child(el("div").class("eyebrow").text("Productivity • Wellness • Mindfulness"))
        .child(el("h1").text("Master your time. Elevate your mind."))
        .child(
            el("div")
                .class("hero-actions")
                .child(button(
                    "btn-primary btn-large",
                    "Start Free Trial",
                    Action::Navigate(Nav::Signup),
                ))
                .child(button(
                    "btn-secondary btn-large",
                    "Save 40% - 6 Months",
                    Action::ScrollTo("pricing".to_string()),
                )),
        );

    let features = el("section").id("features").class("section").child(
        el("div")
            .class("features-grid")
            .child(feature("📋", "Smart Task Management", "Prioritize, track deadlines, and organize projects."))
            .child(feature("🎯", "Habit Formation", "Weekly check-ins and streak counters."))
            .child(feature("🧘", "Mindfulness Integration", "Mood, stress, and gratitude journaling."))
            .child(feature("📊", "Advanced Analytics", "Trends across productivity and wellness."))
            .child(feature("🔄", "Seamless Sync", "Your dashboard always reflects the server."))
            .child(feature("🎨", "Beautiful Design", "A clean interface that gets out of the way.")),
    );

    let pricing = el("section").id("pricing").class("section").child(
        el("div")
            .class("pricing-grid")
            .child(plan_card("Free", "$0", "Start Free", PlanTier::Free))
            .child(plan_card("Pro 6 Months", "$59", "Get 6 Months Pro", PlanTier::ProSixMonth))
            .child(plan_card("Pro Monthly", "$15/mo", "Start Monthly", PlanTier::ProMonthly)),
    );

    el("main")
        .class("landing")
        .child(hero)
        .child(features)
        .child(pricing)
}

fn auth_form(mode: AuthMode) -> Element {
    let (title, submit, switch_prompt, switch_label, switch_to) = match mode {
        AuthMode::Login => (
            "Welcome back",
            "Sign In",
            "Don't have an account?",
            "Sign up",
            Nav::Signup,
        ),
        AuthMode::Signup => (
            "Create your account",
            "Create Account",
            "Already have an account?",
            "Sign in",
            Nav::Login,
        ),
    };

    let form = el("form")
        .class("auth-form")
        .id(format!("{}-form", mode))
        .on(Event::Submit, Action::SubmitAuth(mode))
        .child(
            el("input")
                .class("form-input")
                .attr("type", "email")
                .attr("name", "email")
                .attr("placeholder", "your@email.com")
                .attr("required", "required"),
        )
        .child(
            el("input")
                .class("form-input")
                .attr("type", "password")
                .attr("name", "password")
                .attr("required", "required"),
        )
        .child(
            el("button")
                .class("btn-primary")
                .attr("type", "submit")
                .text(submit),
        );

    el("main").class("auth").child(
        el("div")
            .class("auth-card")
            .child(el("h2").text(title))
            .child(form)
            .child(
                el("p")
                    .class("auth-switch")
                    .text(format!("{} ", switch_prompt))
                    .child(button("link", switch_label, Action::Navigate(switch_to))),
            ),
    )
}

fn table(id: &str, headers: &[&str]) -> Element {
    el("table")
        .id(id)
        .child(el("thead").child(el("tr").children(headers.iter().map(|h| el("th").text(*h)))))
        .child(el("tbody"))
}

fn input(name: &str, kind: &str, placeholder: &str) -> Element {
    el("input")
        .class("form-input")
        .attr("name", name)
        .attr("type", kind)
        .attr("placeholder", placeholder)
}

fn select(name: &str, options: &[&str], selected: Option<&str>) -> Element {
    el("select")
        .class("form-input")
        .attr("name", name)
        .children(options.iter().map(|option| {
            let choice = el("option").attr("value", *option).text(*option);
            if selected == Some(*option) {
                choice.attr("selected", "selected")
            } else {
                choice
            }
        }))
}

/// Form whose submit creates a record. Input names match the sync layer's
/// form fields.
fn add_form(
    collection: Collection,
    action: Action,
    label: &str,
    fields: Vec<Element>,
) -> Element {
    el("form")
        .class("add-form")
        .attr("data-collection", collection.name())
        .on(Event::Submit, action)
        .children(fields)
        .child(
            el("button")
                .class("btn-primary")
                .attr("type", "submit")
                .text(label),
        )
}

fn quick_add() -> Element {
    el("div")
        .class("card quick-add")
        .child(el("h3").text("Quick Add"))
        .child(add_form(
            Collection::Tasks,
            Action::QuickAdd(Collection::Tasks),
            "Add Task",
            vec![input("title", "text", "What needs to be done?")],
        ))
        .child(add_form(
            Collection::Habits,
            Action::QuickAdd(Collection::Habits),
            "Add Habit",
            vec![input("name", "text", "Habit to track")],
        ))
}

fn task_form() -> Element {
    let priorities = [Priority::Low, Priority::Medium, Priority::High];
    let statuses = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];
    let priorities: Vec<&str> = priorities.iter().map(|p| p.label()).collect();
    let statuses: Vec<&str> = statuses.iter().map(|s| s.label()).collect();

    add_form(
        Collection::Tasks,
        Action::Create(Collection::Tasks),
        "Add Task",
        vec![
            input("title", "text", "Task"),
            input("project", "text", "Project"),
            select("priority", &priorities, Some(Priority::Medium.label())),
            input("due_date", "date", "Due"),
            select("status", &statuses, Some(TaskStatus::NotStarted.label())),
        ],
    )
}

fn journal_form() -> Element {
    let moods = Mood::choices();
    let moods: Vec<&str> = moods.iter().map(|m| m.label()).collect();

    add_form(
        Collection::Journal,
        Action::Create(Collection::Journal),
        "Save Entry",
        vec![
            input("date", "date", "Date"),
            select("mood", &moods, None),
            input("stress", "number", "Stress (1-10)"),
            input("gratitude", "text", "Grateful for"),
            input("highlight", "text", "Highlight"),
            input("notes", "text", "Notes"),
        ],
    )
}

/// Dashboard shell. Table bodies are mounted by the sync layer into the
/// containers named here.
fn dashboard(state: &AppState) -> Element {
    let greeting = match &state.user {
        Some(user) => format!("Welcome back, {}", user.name),
        None => "Welcome".to_string(),
    };
    let plan = state.user.as_ref().map(|u| u.plan).unwrap_or_default();

    let mut main = el("main")
        .class("dashboard")
        .child(el("h1").text(greeting))
        .child(el("span").class("plan-badge").text(plan.key()))
        .child(el("div").id("kpis").class("kpis"))
        .child(quick_add())
        .child(task_form())
        .child(table(
            "tasksTable",
            &["ID", "Task", "Project", "Priority", "Due", "Status", ""],
        ))
        .child(add_form(
            Collection::Habits,
            Action::Create(Collection::Habits),
            "Add Habit",
            vec![input("name", "text", "New habit")],
        ))
        .child(table(
            "habitsTable",
            &["Habit", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun", ""],
        ))
        .child(add_form(
            Collection::Goals,
            Action::Create(Collection::Goals),
            "Add Goal",
            vec![
                input("title", "text", "Goal"),
                input("action_steps", "text", "Action steps"),
                input("progress", "number", "Progress %")
                    .attr("min", "0")
                    .attr("max", "100"),
            ],
        ))
        .child(table("goalsTable", &["Goal", "Action Steps", "Progress %", ""]))
        .child(journal_form())
        .child(table(
            "journalTable",
            &["Date", "Mood", "Stress", "Gratitude", "Highlight", "Notes"],
        ));

    if plan == PlanTier::Free {
        main = main.child(
            el("div")
                .class(format!("upgrade-card {}", REVEAL_CLASS))
                .child(el("p").text("Get advanced analytics and premium integrations with Pro."))
                .child(button(
                    "btn-primary",
                    "Upgrade to Pro",
                    Action::ChoosePlan(PlanTier::ProSixMonth),
                )),
        );
    }

    main
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::DashboardForm;
    use crate::view::state::Session;

    #[test]
    fn test_landing_has_sections_and_anchors() {
        let page = render(&AppState::default());

        assert!(page.find_by_id("features").is_some());
        assert!(page.find_by_id("pricing").is_some());
        assert_eq!(page.find_by_class(REVEAL_CLASS).len(), 9);
        assert!(page.to_html().contains(r#"data-view="landing""#));
    }

    #[test]
    fn test_auth_form_submit_action() {
        let page = render(&AppState {
            view: View::Signup,
            user: None,
        });

        let form = page.find_by_id("signup-form").unwrap();
        assert_eq!(
            form.listeners[0].action,
            Action::SubmitAuth(AuthMode::Signup)
        );
    }

    #[test]
    fn test_dashboard_greets_user() {
        let page = render(&AppState {
            view: View::Dashboard,
            user: Some(Session::from_identifier("demo@zenith.com")),
        });

        assert!(page.text_content().contains("Welcome back, demo"));
        for id in ["kpis", "tasksTable", "habitsTable", "goalsTable", "journalTable"] {
            assert!(page.find_by_id(id).is_some(), "missing container {}", id);
        }
        assert!(page
            .listeners()
            .iter()
            .any(|l| l.action == Action::Navigate(Nav::Logout)));
    }

    fn dashboard_page() -> Node {
        render(&AppState {
            view: View::Dashboard,
            user: Some(Session::from_identifier("demo@zenith.com")),
        })
    }

    fn input_names(form: &Element) -> Vec<String> {
        Node::from(form.clone())
            .elements()
            .into_iter()
            .filter_map(|e| e.get_attr("name").map(str::to_string))
            .collect()
    }

    #[test]
    fn test_dashboard_has_one_add_form_per_creatable_collection() {
        let page = dashboard_page();

        let creates: Vec<Collection> = page
            .listeners()
            .iter()
            .filter_map(|l| match l.action {
                Action::Create(collection) => Some(collection),
                _ => None,
            })
            .collect();
        let creatable: Vec<Collection> = Collection::ALL
            .into_iter()
            .filter(Collection::creatable)
            .collect();
        assert_eq!(creates, creatable);

        for collection in creatable {
            let form = page
                .elements()
                .into_iter()
                .find(|e| {
                    e.listeners
                        .iter()
                        .any(|l| l.action == Action::Create(collection))
                })
                .unwrap();
            assert_eq!(form.listeners[0].event, Event::Submit);
            assert_eq!(
                input_names(form),
                DashboardForm::field_names(collection).to_vec(),
                "inputs of the {} form",
                collection
            );
        }
    }

    #[test]
    fn test_dashboard_quick_add_inputs() {
        let page = dashboard_page();

        let quick: Vec<&Element> = page
            .elements()
            .into_iter()
            .filter(|e| {
                e.listeners
                    .iter()
                    .any(|l| matches!(l.action, Action::QuickAdd(_)))
            })
            .collect();

        assert_eq!(quick.len(), 2);
        assert_eq!(input_names(quick[0]), vec!["title"]);
        assert_eq!(input_names(quick[1]), vec!["name"]);
        assert!(page.to_html().contains(r#"data-on-submit="quick-add:tasks""#));
    }

    #[test]
    fn test_render_is_pure() {
        let state = AppState::default();
        assert_eq!(render(&state), render(&state));
    }
}
