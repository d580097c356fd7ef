use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use triage_core::*;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Sports injury triage and training load advisor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Load configuration from a specific file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a symptom payload and print the triage recommendation
    Assess {
        /// JSON payload file, or '-' to read from stdin
        payload: String,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,

        /// Do not record the assessment to history or the training dataset
        #[arg(long)]
        dry_run: bool,

        /// Tag the history record with a user id
        #[arg(long)]
        user: Option<String>,
    },

    /// Show recent assessments
    History {
        /// Maximum number of records to show
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Only show records for this user id
        #[arg(long)]
        user: Option<String>,
    },

    /// Rate a previously issued recommendation
    Feedback {
        #[arg(long)]
        user: String,

        #[arg(long)]
        recommendation_id: String,

        /// Whether the recommendation was applied
        #[arg(long)]
        applied: bool,

        /// How useful it was for prevention (1-10)
        #[arg(long)]
        usefulness: u8,

        /// How clear it was (1-10)
        #[arg(long)]
        clarity: u8,

        /// Overall rating (1-5)
        #[arg(long)]
        stars: u8,

        #[arg(long)]
        comment: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    triage_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Commands::Assess {
            payload,
            json,
            dry_run,
            user,
        } => cmd_assess(data_dir, &config, &payload, json, dry_run, user).await,
        Commands::History { limit, user } => cmd_history(data_dir, limit, user.as_deref()),
        Commands::Feedback {
            user,
            recommendation_id,
            applied,
            usefulness,
            clarity,
            stars,
            comment,
        } => cmd_feedback(
            data_dir,
            user,
            recommendation_id,
            applied,
            usefulness,
            clarity,
            stars,
            comment,
        ),
    }
}

fn history_path(data_dir: &Path) -> PathBuf {
    data_dir.join("history").join("triage_records.jsonl")
}

async fn cmd_assess(
    data_dir: PathBuf,
    config: &Config,
    payload_arg: &str,
    json: bool,
    dry_run: bool,
    user: Option<String>,
) -> Result<()> {
    let raw = if payload_arg == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(payload_arg)?
    };
    let payload: serde_json::Value = serde_json::from_str(&raw)?;

    let report = normalize(&payload)?;
    let engine = TriageEngine::new(config);
    let result = engine.assess_report(&report).await;

    if dry_run {
        tracing::info!("Dry run - assessment not recorded");
    } else {
        let record = TriageRecord::new(user, report.clone(), result.clone());

        let mut sink = JsonlSink::new(history_path(&data_dir));
        sink.append(&record)?;
        append_case(
            &data_dir.join("training_cases.csv"),
            &report,
            result.injury_type,
        )?;

        if !json {
            println!("Recorded as {}", record.id);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_result(&result);
    }

    Ok(())
}

fn cmd_history(data_dir: PathBuf, limit: usize, user: Option<&str>) -> Result<()> {
    let records = load_recent(&history_path(&data_dir), limit, user)?;

    if records.is_empty() {
        println!("No assessments recorded yet.");
        return Ok(());
    }

    for record in records {
        println!(
            "{}  {:<16} severity {:<7} pain {}/10 in {}  (id {})",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.result.injury_type.display_name(),
            record.result.severity.to_string(),
            record.result.pain.level,
            record.result.pain.zone,
            record.id
        );
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_feedback(
    data_dir: PathBuf,
    user: String,
    recommendation_id: String,
    applied: bool,
    usefulness: u8,
    clarity: u8,
    stars: u8,
    comment: Option<String>,
) -> Result<()> {
    let record = FeedbackRecord::new(
        user,
        recommendation_id,
        applied,
        usefulness,
        clarity,
        stars,
        comment,
    )?;

    let path = data_dir.join("feedback").join("feedback_records.jsonl");
    append_feedback(&path, &record)?;

    println!("✓ Feedback saved ({})", record.id);
    Ok(())
}

fn display_result(result: &TriageResult) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} SEVERITY", result.severity.to_string().to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {} ({})", result.injury_name, result.injury_type.display_name());
    println!();
    println!("  {}", result.description);
    println!();

    if result.referral.urgent {
        println!("  ⚠ See a specialist URGENTLY");
    } else if result.referral.required {
        println!("  ⚠ A specialist visit is recommended");
    } else {
        println!("  Self-care is appropriate for now");
    }
    println!("  {}", result.referral.reason);
    println!();

    println!("  Recommendations:");
    for (i, item) in result.recommendations.iter().enumerate() {
        println!("    {}. {}", i + 1, item);
    }
    println!();

    println!(
        "  Weekly load: {}/100 ({})",
        result.load_index.score, result.load_index.category
    );
    println!("  {}", result.load_index.advice);
    println!();
    println!("  ℹ {}", result.disclaimer);
    println!();
}
