use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use student_stress_advisor::baseline::{predict_baseline, TierGuidance};
use student_stress_advisor::batch::{self, parse_probabilities, split_list};
use student_stress_advisor::config::{ReferencePaths, LOG_ENV_VAR};
use student_stress_advisor::report;
use student_stress_advisor::{
    AssessmentRequest, RecommendationEngine, ReferenceData, StressTier, UserProfile,
};

#[derive(Parser)]
#[command(name = "stress-advisor")]
#[command(
    about = "Student stress assessment with personalized coping recommendations",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    reference: ReferencePaths,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single student from command-line answers
    Assess(AssessArgs),
    /// Assess every row of a CSV file, writing one JSON result per line
    Batch {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List course stress profiles
    Courses,
    /// List regions and localities with facility data
    Locations {
        #[arg(long)]
        region: Option<String>,
    },
}

#[derive(Args)]
struct AssessArgs {
    #[arg(long, default_value_t = 75.0)]
    tenth_mark: f64,
    #[arg(long, default_value_t = 75.0)]
    twelfth_mark: f64,
    #[arg(long, default_value_t = 75.0)]
    college_mark: f64,
    #[arg(long, default_value_t = 6.0)]
    study_hours: f64,
    #[arg(long, default_value_t = 3.0)]
    social_media_hours: f64,
    #[arg(long, default_value_t = 30.0)]
    travel_minutes: f64,
    #[arg(long, default_value_t = 50.0)]
    career_willingness: f64,
    #[arg(long, default_value = "Good")]
    financial_status: String,
    #[arg(long)]
    course: String,
    #[arg(long, default_value = "Neutral")]
    emotion: String,
    /// Trigger event; repeat for several, or separate with ';'
    #[arg(long = "trigger")]
    triggers: Vec<String>,
    #[arg(long, default_value = "")]
    context: String,
    #[arg(long)]
    region: String,
    #[arg(long)]
    locality: String,
    /// Base distribution over Fabulous,Good,Bad,Awful; the rule-based baseline is used when omitted
    #[arg(long)]
    probabilities: Option<String>,
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
    /// Write a markdown report to this path
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var(LOG_ENV_VAR)
                .from_env_lossy(),
        )
        .try_init()
        .context("failed to initialise logging")?;

    let cli = Cli::parse();
    let reference = ReferenceData::load(&cli.reference).context("failed to load reference data")?;
    let engine = RecommendationEngine::new(reference);

    match cli.command {
        Commands::Assess(args) => assess(&engine, args)?,
        Commands::Batch { csv, out } => {
            let requests = batch::read_requests(&csv)
                .with_context(|| format!("failed to read {}", csv.display()))?;

            let mut writer: Box<dyn Write> = match &out {
                Some(path) => Box::new(std::io::BufWriter::new(
                    std::fs::File::create(path)
                        .with_context(|| format!("failed to create {}", path.display()))?,
                )),
                None => Box::new(std::io::stdout().lock()),
            };

            let mut assessed = 0usize;
            let mut rejected = 0usize;
            for (index, request) in requests.into_iter().enumerate() {
                let row = index + 1;
                match request.and_then(|request| engine.assess(&request)) {
                    Ok(result) => {
                        serde_json::to_writer(&mut writer, &result)?;
                        writeln!(writer)?;
                        assessed += 1;
                    }
                    Err(err) => {
                        warn!(row, error = %err, "rejected batch row");
                        rejected += 1;
                    }
                }
            }
            writer.flush()?;
            info!(assessed, rejected, "batch complete");
            if let Some(path) = out {
                println!(
                    "Wrote {assessed} assessments to {} ({rejected} rejected).",
                    path.display()
                );
            }
        }
        Commands::Courses => {
            let courses = engine.courses().courses();
            if courses.is_empty() {
                println!("No course profiles loaded.");
                return Ok(());
            }
            println!("Course stress profiles:");
            for (name, profile) in courses {
                let served = engine.courses().coping_strategies(name, StressTier::Fabulous);
                println!(
                    "- {} factor {:.2} ({} coping strategies{})",
                    name,
                    profile.base_stress_factor,
                    served.len(),
                    if profile.coping_strategies.is_none() { ", generic" } else { "" }
                );
            }
        }
        Commands::Locations { region } => {
            let directory = engine.locations().directory();
            for (name, localities) in directory {
                if region.as_deref().is_some_and(|wanted| wanted != name.as_str()) {
                    continue;
                }
                let names: Vec<&str> = localities.keys().map(String::as_str).collect();
                println!("{}: {}", name, names.join(", "));
            }
        }
    }

    Ok(())
}

fn assess(engine: &RecommendationEngine, args: AssessArgs) -> anyhow::Result<()> {
    let profile = UserProfile {
        tenth_mark: args.tenth_mark,
        twelfth_mark: args.twelfth_mark,
        college_mark: args.college_mark,
        study_hours: args.study_hours,
        social_media_hours: args.social_media_hours,
        travel_minutes: args.travel_minutes,
        career_willingness: args.career_willingness,
        financial_status: args.financial_status.parse::<StressTier>()?,
    };

    let (base_label, base_probabilities) = match &args.probabilities {
        Some(raw) => {
            let probabilities = parse_probabilities(raw)?;
            (batch::most_likely_tier(&probabilities), probabilities)
        }
        None => {
            let prediction = predict_baseline(&profile);
            info!(
                label = %prediction.label,
                confidence = prediction.confidence(),
                risk_points = prediction.risk_points,
                "baseline prediction"
            );
            (prediction.label, prediction.probabilities.to_vec())
        }
    };

    let request = AssessmentRequest {
        base_label,
        base_probabilities,
        course: args.course,
        emotion: args.emotion,
        trigger_events: args
            .triggers
            .iter()
            .flat_map(|raw| split_list(raw, ';'))
            .collect(),
        context_text: args.context,
        region: args.region,
        locality: args.locality,
        profile,
    };

    let result = engine.assess(&request)?;

    if let Some(out) = &args.out {
        let report = report::build_report(&request, &result, chrono::Utc::now());
        std::fs::write(out, report)
            .with_context(|| format!("failed to write {}", out.display()))?;
        println!("Report written to {}.", out.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let guidance = TierGuidance::for_tier(result.enhanced_tier);
    println!(
        "Stress level: {} (base prediction {}, score {:.3})",
        result.enhanced_tier, result.original_prediction, result.breakdown.final_score
    );
    println!("{}", guidance.status);
    println!();
    println!("Immediate actions:");
    for action in &result.immediate_actions {
        println!("- {action}");
    }
    println!();
    println!("Personalized solutions:");
    for solution in &result.personalized_solutions {
        println!("- {solution}");
    }
    if let Some(note) = &result.location_facilities.fallback_note {
        println!();
        println!("{note}");
    }
    println!();
    println!("Emergency helplines:");
    for contact in &result.location_facilities.emergency_numbers {
        println!("- {}: {}", contact.name, contact.number);
    }

    Ok(())
}
