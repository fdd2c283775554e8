use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mindscreen::config::AppConfig;
use mindscreen::error::AppError;
use mindscreen::screening::export;
use mindscreen::screening::{
    ActionPlan, AssessmentSession, AttentionLevel, DraftStore, FileDraftStore, LevelRule,
    LevelRuleTable, ScaleCatalog, ScaleId, ScreeningOutcome, ScreeningRecord, SelfHelpContent,
    SelfHelpLibrary,
};
use mindscreen::telemetry;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "mindscreen",
    about = "Run PHQ-9 / GAD-7 self-assessments from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available scales and their banding rubrics
    Scales(ScalesArgs),
    /// Score an answer sheet for a scale and print the result
    Score(ScoreArgs),
    /// Inspect or discard the locally saved draft
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ScalesArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Scale to administer (phq-9 or gad-7)
    #[arg(long)]
    scale: String,
    /// Option scores in question order, comma separated (e.g. 0,1,2,3,...)
    #[arg(long, value_delimiter = ',')]
    answers: Vec<u8>,
    /// Resume from the saved draft and save back to it when incomplete
    #[arg(long)]
    draft: bool,
    /// Override the configured user id on the exported record
    #[arg(long)]
    user: Option<String>,
    /// Write the screening record as CSV to this path
    #[arg(long)]
    export: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum DraftCommand {
    /// Show the saved draft, if any
    Show,
    /// Delete the saved draft
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct ScaleSummary {
    id: &'static str,
    full_name: &'static str,
    description: &'static str,
    duration_minutes: u8,
    question_count: usize,
    max_score: u32,
    bands: Vec<LevelRule>,
}

#[derive(Debug, Serialize)]
struct ScoreResponse<'a> {
    scale: ScaleId,
    total_score: u32,
    level: AttentionLevel,
    level_label: &'static str,
    description: &'static str,
    recommendation: &'static str,
    risk_flag: bool,
    actions: &'a ActionPlan,
    self_help: Vec<&'a SelfHelpContent>,
    record: ScreeningRecord,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Scales(ScalesArgs::default()));

    match command {
        Command::Scales(args) => run_scales(args),
        Command::Score(args) => run_score(&config, args),
        Command::Draft { command } => run_draft(&config, command),
    }
}

fn run_scales(args: ScalesArgs) -> Result<(), AppError> {
    let catalog = ScaleCatalog::standard();
    let table = LevelRuleTable::standard(&catalog)?;

    let summaries: Vec<ScaleSummary> = catalog
        .scales()
        .iter()
        .map(|scale| ScaleSummary {
            id: scale.id.code(),
            full_name: scale.full_name,
            description: scale.description,
            duration_minutes: scale.duration_minutes,
            question_count: scale.question_count(),
            max_score: scale.max_score(),
            bands: table
                .rules_for(scale.id)
                .map(<[LevelRule]>::to_vec)
                .unwrap_or_default(),
        })
        .collect();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text => {
            for summary in &summaries {
                println!("{} — {}", summary.id, summary.full_name);
                println!("  {}", summary.description);
                println!(
                    "  {} questions, about {} minutes, scores 0..={}",
                    summary.question_count, summary.duration_minutes, summary.max_score
                );
                for band in &summary.bands {
                    println!(
                        "  [{:>2}-{:>2}] {:?}: {} — {}",
                        band.min_score, band.max_score, band.level, band.label, band.description
                    );
                }
                println!();
            }
        }
    }
    Ok(())
}

fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let catalog = ScaleCatalog::standard();
    let table = LevelRuleTable::standard(&catalog)?;
    let store = FileDraftStore::new(&config.storage.draft_path);

    let scale_id = ScaleId::parse(&args.scale)
        .ok_or_else(|| AppError::InvalidArgument(format!("unknown scale '{}'", args.scale)))?;

    let mut session = resume_or_start(&catalog, &store, scale_id, args.draft)?;

    let remaining = session
        .answers()
        .iter()
        .skip(session.current_index())
        .filter(|answer| answer.is_none())
        .count();
    if args.answers.len() > remaining {
        return Err(AppError::InvalidArgument(format!(
            "{} answer(s) supplied but only {} question(s) remain",
            args.answers.len(),
            remaining
        )));
    }

    for value in &args.answers {
        session.answer(*value)?;
    }

    if !session.can_submit() {
        if !args.draft {
            let missing = session
                .answers()
                .iter()
                .filter(|answer| answer.is_none())
                .count();
            return Err(AppError::InvalidArgument(format!(
                "incomplete answer sheet: {missing} question(s) unanswered (pass --draft to save progress)"
            )));
        }
        if let Some(snapshot) = session.snapshot() {
            store.save(&snapshot)?;
            let answered = snapshot.answers.iter().flatten().count();
            info!(scale = %scale_id, answered, "draft saved");
            println!(
                "Draft saved: {answered}/{} questions answered. Run again with more --answers to continue.",
                snapshot.answers.len()
            );
        }
        return Ok(());
    }

    let outcome = session.submit(&table, Utc::now())?.clone();
    if args.draft {
        store.clear()?;
    }
    info!(
        scale = %outcome.scale,
        total = outcome.total_score,
        level = ?outcome.level.level,
        risk_flag = outcome.risk_flag,
        "screening scored"
    );

    let user_id = args.user.unwrap_or_else(|| config.export.user_id.clone());
    let record = ScreeningRecord::from_outcome(user_id, &outcome);
    if let Some(path) = &args.export {
        export::write_csv_file(path, std::slice::from_ref(&record))?;
        println!("Record exported to {}", path.display());
    }

    render_outcome(&outcome, record, args.format)
}

fn resume_or_start(
    catalog: &ScaleCatalog,
    store: &FileDraftStore,
    scale_id: ScaleId,
    use_draft: bool,
) -> Result<AssessmentSession, AppError> {
    if use_draft {
        if let Some(snapshot) = store.load()? {
            if snapshot.scale_id == scale_id {
                if let Some(session) = AssessmentSession::restore(catalog, &snapshot) {
                    let answered = snapshot.answers.iter().flatten().count();
                    info!(scale = %scale_id, answered, "resuming from draft");
                    return Ok(session);
                }
            }
        }
    }

    let mut session = AssessmentSession::new();
    session.select_scale(catalog, scale_id)?;
    Ok(session)
}

fn render_outcome(
    outcome: &ScreeningOutcome,
    record: ScreeningRecord,
    format: OutputFormat,
) -> Result<(), AppError> {
    let library = SelfHelpLibrary::standard();
    let self_help = library.recommended_for(outcome.level.level);

    match format {
        OutputFormat::Json => {
            let response = ScoreResponse {
                scale: outcome.scale,
                total_score: outcome.total_score,
                level: outcome.level.level,
                level_label: outcome.level.label,
                description: outcome.level.description,
                recommendation: outcome.level.recommendation,
                risk_flag: outcome.risk_flag,
                actions: &outcome.actions,
                self_help,
                record,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!(
                "{} result: total score {} — {} ({})",
                outcome.scale,
                outcome.total_score,
                outcome.level.label,
                outcome.level.description
            );
            println!("{}", outcome.level.recommendation);
            if let Some(urgent) = &outcome.actions.urgent {
                println!("! Safety note: [{}] {}", urgent.kind.label(), urgent.label);
            }
            println!(
                "Next steps: [{}] {} / [{}] {}",
                outcome.actions.primary.kind.label(),
                outcome.actions.primary.label,
                outcome.actions.secondary.kind.label(),
                outcome.actions.secondary.label
            );
            if !self_help.is_empty() {
                println!("Self-help suggestions:");
                for content in self_help {
                    println!(
                        "  - {} ({} min): {}",
                        content.title, content.duration_minutes, content.description
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_draft(config: &AppConfig, command: DraftCommand) -> Result<(), AppError> {
    let store = FileDraftStore::new(&config.storage.draft_path);

    match command {
        DraftCommand::Show => match store.load()? {
            Some(snapshot) => {
                let answered = snapshot.answers.iter().flatten().count();
                println!(
                    "Draft for {}: {answered}/{} questions answered, next question {}",
                    snapshot.scale_id,
                    snapshot.answers.len(),
                    snapshot.current_question_index + 1
                );
            }
            None => println!("No draft saved."),
        },
        DraftCommand::Clear => {
            store.clear()?;
            println!("Draft cleared.");
        }
    }
    Ok(())
}
