mod calendar;
mod preview;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use rxdesk_config::AppConfig;
use rxdesk_plan::Block;
use rxdesk_review::{ReviewController, ReviewPage, Session, SessionContext};
use rxdesk_store::ReviewStore;

use calendar::TextCalendar;
use preview::TextPreview;

const CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Parser)]
#[command(
    name = "rxdesk",
    version,
    about = "Reviewer console for AI-generated exercise prescriptions"
)]
struct Cli {
    /// Trace id of the review session (defaults to the shared draft slot).
    #[arg(long, global = true)]
    trace: Option<String>,
    /// Plan document used to seed a session with no saved state.
    #[arg(long, global = true, value_name = "FILE")]
    plan: Option<PathBuf>,
    /// Session payload (profile / measurements / evidence) as JSON.
    #[arg(long, global = true, value_name = "FILE")]
    session: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the full review page.
    Show {
        /// Render without the calendar and preview collaborators.
        #[arg(long)]
        bare: bool,
    },
    /// Edit one field of one prescription card and apply the change.
    Set {
        /// Card position, 0-based.
        index: usize,
        #[arg(value_enum)]
        field: CardField,
        /// New value (may be "-" or negative, e.g. a reach measurement).
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Replace the working document with the contents of a file.
    Apply {
        #[arg(long, value_name = "FILE")]
        from: PathBuf,
    },
    /// Approve the plan.
    Approve,
    /// Send the plan back for changes.
    Reject,
    /// Adjust the calendar controls.
    Calendar {
        #[arg(long)]
        weeks: Option<u32>,
        /// Plan start date as YYYY-MM-DD.
        #[arg(long, value_name = "DATE")]
        start: Option<String>,
        /// Unset the start date.
        #[arg(long, conflicts_with = "start")]
        clear_start: bool,
    },
    /// Print the persisted record as JSON.
    Status,
    /// Start a review under a freshly minted trace id and print it.
    New,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CardField {
    Category,
    Title,
    Freq,
    Intensity,
    Time,
    Kind,
    VideoTitle,
    VideoUrl,
    Notes,
    CsvId,
}

impl CardField {
    fn assign(self, block: &mut Block, value: String) {
        match self {
            CardField::Category => block.category = value,
            CardField::Title => block.title = value,
            CardField::Freq => block.freq = value,
            CardField::Intensity => block.intensity = value,
            CardField::Time => block.time = value,
            CardField::Kind => block.kind = value,
            CardField::VideoTitle => block.video_title = value,
            CardField::VideoUrl => block.video_url = value,
            CardField::Notes => block.notes = value,
            CardField::CsvId => block.csv_id = value,
        }
    }
}

fn build_session(cli: &Cli) -> Result<SessionContext> {
    let mut session: Session = match &cli.session {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read session file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parse session file {}", path.display()))?
        }
        None => Session::default(),
    };
    if let Some(trace) = &cli.trace {
        session.trace_id = trace.clone();
    }
    if let Some(plan) = &cli.plan {
        session.plan_md = fs::read_to_string(plan)
            .with_context(|| format!("read plan file {}", plan.display()))?;
    }
    Ok(SessionContext::new(session))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load_from(CONFIG_PATH)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.telemetry.log_level)),
        )
        .init();

    let mut cli = Cli::parse();
    if matches!(cli.command, Some(Commands::New)) && cli.trace.is_none() {
        cli.trace = Some(Uuid::new_v4().to_string());
    }

    let store = ReviewStore::new(config.reviews_dir());
    let ctx = build_session(&cli)?;
    let mut controller = ReviewController::load(ctx.clone(), store, &config);

    match cli.command.unwrap_or(Commands::Show { bare: false }) {
        Commands::Show { bare } => {
            let text_calendar = TextCalendar;
            let text_preview = TextPreview;
            let page = if bare {
                ReviewPage::default()
            } else {
                ReviewPage {
                    calendar: Some(&text_calendar),
                    preview: Some(&text_preview),
                }
            };
            print!("{}", page.render(&controller, &ctx.snapshot()));
        }
        Commands::Set {
            index,
            field,
            value,
        } => {
            let mut rows = controller.blocks();
            if index >= rows.len() {
                bail!("card index {index} out of range (0..{})", rows.len());
            }
            field.assign(&mut rows[index], value);
            let message = controller.apply(&rows).to_string();
            println!("{message}");
        }
        Commands::Apply { from } => {
            let md = fs::read_to_string(&from)
                .with_context(|| format!("read plan file {}", from.display()))?;
            let rows = rxdesk_plan::parse(&md);
            let message = controller.apply(&rows).to_string();
            println!("{message}");
        }
        Commands::Approve => {
            let message = controller.approve().to_string();
            println!("{message}");
        }
        Commands::Reject => {
            let message = controller.reject().to_string();
            println!("{message}");
        }
        Commands::Calendar {
            weeks,
            start,
            clear_start,
        } => {
            if let Some(weeks) = weeks {
                controller.set_weeks(weeks);
            }
            if clear_start {
                controller.set_start_iso(None);
            } else if let Some(date) = start {
                chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .with_context(|| format!("invalid start date {date:?}, expected YYYY-MM-DD"))?;
                controller.set_start_iso(Some(format!("{date}T09:00:00")));
            }
            println!(
                "주간 계획표: {}주, 시작일 {}",
                controller.weeks(),
                controller.start_iso().unwrap_or("미정")
            );
        }
        Commands::Status => {
            println!("{}", serde_json::to_string_pretty(&controller.record())?);
        }
        Commands::New => {
            // Schedule an initial record so the fresh trace id is recoverable.
            let seeded = controller.edited_md().to_string();
            controller.set_document(&seeded);
            println!("{}", controller.trace_id());
        }
    }

    // The debounced path is pointless for a short-lived process; make sure
    // the final state lands before exit.
    controller.flush()?;
    Ok(())
}
