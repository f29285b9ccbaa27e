//! Zenith CLI
//!
//! Command-line front end for the dashboard:
//! - Show every dashboard table
//! - Add tasks, habits, goals, and journal entries
//! - Delete tasks, habits, and goals
//! - Render a page as HTML

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use zenith::config::{generate_default_config, init_logging, Config};
use zenith::sync::{
    Collection, DashboardClient, GoalForm, HabitForm, HttpStore, JournalForm, LoadReport,
    MemoryStore, Mood, RecordId, RemoteStore, TaskForm,
};
use zenith::view::{Credentials, Node, Transition, View, ViewRouter};

type Client = DashboardClient<Arc<dyn RemoteStore>>;

#[derive(Parser)]
#[command(name = "zenith")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Productivity and wellness dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Use an in-process store seeded with demo data instead of a server
    #[arg(long, global = true)]
    pub mock: bool,

    /// Config file path (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and print every dashboard table
    Dashboard,

    /// Add a task
    AddTask {
        /// Task title
        title: String,
        #[arg(short, long, default_value = "")]
        project: String,
        /// Low, Medium, or High
        #[arg(long, default_value = "Medium")]
        priority: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long, default_value = "")]
        due: String,
        /// Not Started, In Progress, or Completed
        #[arg(short, long, default_value = "Not Started")]
        status: String,
    },

    /// Add a habit
    AddHabit {
        /// Habit name
        name: String,
    },

    /// Add a goal
    AddGoal {
        /// Goal title
        title: String,
        /// Action steps
        #[arg(long, default_value = "")]
        steps: String,
        /// Progress percentage, 0-100
        #[arg(long, default_value = "")]
        progress: String,
    },

    /// Add a journal entry
    AddJournal {
        /// Entry date (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Great, Good, Calm, Okay, Stressed, or Low
        #[arg(short, long)]
        mood: Option<String>,
        /// Stress level
        #[arg(short, long, default_value = "")]
        stress: String,
        #[arg(long, default_value = "")]
        gratitude: String,
        #[arg(long, default_value = "")]
        highlight: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Delete a task, habit, or goal
    Delete {
        /// tasks, habits, or goals
        collection: Collection,
        /// Record id
        id: RecordId,
    },

    /// Print a page as HTML
    Render {
        /// landing, login, signup, or dashboard
        view: View,
        /// Sign in with this email first
        #[arg(long)]
        as_user: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.client.base_url = url.clone();
    }
    init_logging(&config.logging);

    match cli.command {
        Commands::Dashboard => {
            let client = connect(&config, cli.mock)?;
            let report = client.load_all().await;
            print_dashboard(&client, &report).await;
        }

        Commands::AddTask {
            title,
            project,
            priority,
            due,
            status,
        } => {
            let client = connect(&config, cli.mock)?;
            let mut form = TaskForm {
                title,
                project,
                priority: priority.into(),
                due_date: due,
                status: status.into(),
            };
            let report = client.create_task(&mut form).await?;
            println!("Task added.");
            print_dashboard(&client, &report).await;
        }

        Commands::AddHabit { name } => {
            let client = connect(&config, cli.mock)?;
            let mut form = HabitForm { name };
            let report = client.create_habit(&mut form).await?;
            println!("Habit added.");
            print_dashboard(&client, &report).await;
        }

        Commands::AddGoal {
            title,
            steps,
            progress,
        } => {
            let client = connect(&config, cli.mock)?;
            let mut form = GoalForm {
                title,
                action_steps: steps,
                progress,
            };
            let report = client.create_goal(&mut form).await?;
            println!("Goal added.");
            print_dashboard(&client, &report).await;
        }

        Commands::AddJournal {
            date,
            mood,
            stress,
            gratitude,
            highlight,
            notes,
        } => {
            let client = connect(&config, cli.mock)?;
            let mut form = JournalForm {
                date: date.unwrap_or_else(|| chrono::Local::now().date_naive().to_string()),
                mood: mood.map(Mood::from),
                stress,
                gratitude,
                highlight,
                notes,
            };
            let report = client.create_journal_entry(&mut form).await?;
            println!("Journal entry saved.");
            print_dashboard(&client, &report).await;
        }

        Commands::Delete { collection, id } => {
            let client = connect(&config, cli.mock)?;
            let report = client.delete_record(collection, id).await?;
            println!("Deleted {} {}.", collection, id);
            print_dashboard(&client, &report).await;
        }

        Commands::Render { view, as_user } => {
            let mut router = ViewRouter::new();
            if let Some(email) = as_user {
                router.handle_auth(Credentials::new(email, "cli"))?;
            }
            let transition = match view {
                View::Landing => Transition::ShowLanding,
                View::Login => Transition::ShowLogin,
                View::Signup => Transition::ShowSignup,
                View::Dashboard => Transition::ShowDashboard,
            };
            router.transition(transition)?;
            println!("{}", router.page().to_html());
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Build a client over the configured server, or the demo store with `--mock`
fn connect(config: &Config, mock: bool) -> anyhow::Result<Client> {
    let store: Arc<dyn RemoteStore> = if mock {
        tracing::info!("Using in-process demo store");
        Arc::new(MemoryStore::with_demo_data())
    } else {
        tracing::info!(base_url = %config.client.base_url, "Using remote store");
        let store = HttpStore::new(&config.client.store_config())
            .context("Failed to build HTTP client")?;
        Arc::new(store)
    };
    Ok(DashboardClient::new(store))
}

async fn print_dashboard(client: &Client, report: &LoadReport) {
    for collection in Collection::ALL {
        println!();
        println!("{}", collection.name().to_uppercase());
        println!("{}", "-".repeat(60));
        match client.rendered(collection).await {
            Some(body) => print_rows(&body),
            None => println!("(not loaded)"),
        }
    }

    for (collection, error) in &report.failed {
        eprintln!("Failed to load {}: {}", collection, error);
    }
}

/// Print each row of a rendered body, one cell per column
fn print_rows(body: &Node) {
    let Some(element) = body.as_element() else {
        return;
    };
    if element.children.is_empty() {
        println!("(empty)");
        return;
    }

    for row in &element.children {
        println!("{}", row_cells(row).join(" | "));
    }
}

/// Text of each cell in a row, leaving out cells that hold controls
fn row_cells(row: &Node) -> Vec<String> {
    match row.as_element() {
        Some(row) => row
            .children
            .iter()
            .filter(|cell| cell.listeners().is_empty())
            .map(Node::text_content)
            .collect(),
        None => vec![row.text_content()],
    }
}
