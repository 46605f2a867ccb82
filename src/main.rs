use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::models::WorkStatus;
use crate::nav::{Intent, Navigator, View};
use crate::roster::Roster;

mod browse;
mod models;
mod nav;
mod report;
mod risk;
mod roster;
mod summary;

#[derive(Parser)]
#[command(name = "team-pulse")]
#[command(about = "Team status dashboard: health, horizons and attention heatmap", long_about = None)]
struct Cli {
    /// Roster file (.json or .csv); the built-in example team when omitted
    #[arg(long, global = true, env = "TEAM_PULSE_ROSTER")]
    roster: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Team health, time horizons and the attention heatmap
    Overview,
    /// Detail view for one team member
    Member { id: String },
    /// Team members with at least one item in the given status
    Status { status: WorkStatus },
    /// Write a markdown report of the whole dashboard
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Navigate the dashboard interactively from stdin
    Browse,
    /// Write the built-in example roster as JSON
    Seed {
        #[arg(long, default_value = "roster.json")]
        out: PathBuf,
    },
    /// Validate the roster and print its size
    Check,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TEAM_PULSE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("team_pulse=info,warn"));

    let format = env::var("TEAM_PULSE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_roster(path: Option<&PathBuf>) -> anyhow::Result<Roster> {
    match path {
        Some(path) => Roster::load(path)
            .with_context(|| format!("could not load roster from {}", path.display())),
        None => roster::seed().context("built-in roster is invalid"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let roster = load_roster(cli.roster.as_ref())?;

    match cli.command {
        Commands::Overview => {
            print!("{}", report::render_overview(&roster));
        }
        Commands::Member { id } => {
            let mut nav = Navigator::new(&roster);
            nav.apply(Intent::SelectMember(id.clone()))?;
            if nav.view() == &View::Overview {
                println!("No team member with id '{id}'; showing the overview.");
                println!();
            }
            print!("{}", report::render_screen(&roster, &nav.screen()));
        }
        Commands::Status { status } => {
            let mut nav = Navigator::new(&roster);
            nav.apply(Intent::SelectStatus(status))?;
            print!("{}", report::render_screen(&roster, &nav.screen()));
        }
        Commands::Report { out } => {
            let generated_on = chrono::Local::now().date_naive();
            let report = report::build_report(&roster, generated_on);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Browse => {
            let stdin = std::io::stdin();
            browse::run(&roster, stdin.lock(), std::io::stdout())?;
        }
        Commands::Seed { out } => {
            let seeded = roster::seed()?;
            let json = serde_json::to_string_pretty(&seeded)?;
            std::fs::write(&out, json + "\n")
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Seed roster written to {}.", out.display());
        }
        Commands::Check => {
            let team = summary::team_summary(&roster);
            println!(
                "Roster ok: {} members, {} work items.",
                roster.len(),
                team.total
            );
            for status in WorkStatus::ALL {
                println!(
                    "- {}: {} items across {} members",
                    status.label(),
                    team.count(status),
                    roster.members_with_status(status).len()
                );
            }
        }
    }

    Ok(())
}
