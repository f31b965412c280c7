use crate::{
    config::PlannerConfig,
    Orchestrator, RoutingStrategy, TripPreferences,
};
use chrono::{Duration, NaiveDate, Utc};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan a trip with research, planning and optimization agents")
        .arg(
            Arg::new("prompt")
                .help("Free-text trip request, e.g. \"4 days in Jaipur for two, heritage and food\"")
                .index(1)
                .conflicts_with("location"),
        )
        .arg(
            Arg::new("location")
                .short('l')
                .long("location")
                .value_name("PLACE")
                .help("Destination (required unless a prompt is given)"),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("AMOUNT")
                .help("Total budget for the party")
                .default_value("50000"),
        )
        .arg(
            Arg::new("days")
                .short('d')
                .long("days")
                .value_name("COUNT")
                .help("Trip length in days")
                .default_value("5"),
        )
        .arg(
            Arg::new("interests")
                .long("interests")
                .value_name("LIST")
                .help("Comma-separated interests: heritage, culture, nightlife, beaches, adventure, local food")
                .default_value("culture"),
        )
        .arg(
            Arg::new("travelers")
                .long("travelers")
                .value_name("COUNT")
                .help("Number of travelers")
                .default_value("2"),
        )
        .arg(
            Arg::new("start-date")
                .long("start-date")
                .value_name("YYYY-MM-DD")
                .help("First day of the trip (defaults to 30 days from today)"),
        )
        .arg(
            Arg::new("strategy")
                .short('s')
                .long("strategy")
                .value_name("STRATEGY")
                .help("Routing strategy: sequential, parallel, conditional, semantic, priority, feedback")
                .default_value("sequential"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("The model to use (or set MODEL env var)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Chat completions base URL (or set OPENAI_BASE_URL / OPENROUTER_BASE_URL env vars)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the itinerary as JSON"),
        )
}

fn build_config(matches: &ArgMatches) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    build_config_from(matches, |name| env::var(name).ok())
}

fn build_config_from<F>(
    matches: &ArgMatches,
    lookup: F,
) -> Result<PlannerConfig, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config =
        PlannerConfig::from_lookup(matches.get_one::<String>("api-key").cloned(), lookup)?;

    if let Some(model) = matches.get_one::<String>("model") {
        config.model = model.clone();
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = matches.get_one::<String>("timeout") {
        config.timeout = std::time::Duration::from_secs(timeout.parse()?);
    }

    Ok(config)
}

fn preferences_from_flags(
    matches: &ArgMatches,
    location: &str,
) -> Result<TripPreferences, Box<dyn std::error::Error>> {
    let arg = |name: &str| matches.get_one::<String>(name).cloned().unwrap_or_default();

    let budget: f64 = arg("budget").parse()?;
    let days: u32 = arg("days").parse()?;
    let travelers: u32 = arg("travelers").parse()?;
    let start_date = match matches.get_one::<String>("start-date") {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")?,
        None => Utc::now().date_naive() + Duration::days(30),
    };
    let interests: Vec<String> = arg("interests")
        .split(',')
        .map(str::trim)
        .filter(|interest| !interest.is_empty())
        .map(str::to_lowercase)
        .collect();

    Ok(TripPreferences::new(location, budget, days, start_date, travelers)?
        .with_interests(interests))
}

/// CLI entry point for the trip-planner binary
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = command().get_matches();
    let strategy: RoutingStrategy = matches
        .get_one::<String>("strategy")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()?;

    let config = build_config(&matches)?;
    info!("Using model: {}", config.model);
    info!("Base URL: {}", config.base_url);
    let currency = config.currency.clone();
    let orchestrator = Orchestrator::from_config(&config)?;

    let outcome = match (
        matches.get_one::<String>("prompt"),
        matches.get_one::<String>("location"),
    ) {
        (Some(prompt), _) => {
            info!("Planning from prompt: {}", prompt);
            orchestrator.plan_trip_from_prompt(prompt, strategy).await
        }
        (None, Some(location)) => {
            let preferences = preferences_from_flags(&matches, location)?;
            orchestrator.plan_trip(preferences, strategy).await
        }
        (None, None) => {
            return Err("Either a prompt or --location is required".into());
        }
    };

    match outcome {
        Ok(itinerary) => {
            if matches.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&itinerary)?);
            } else {
                println!("{}", itinerary.render_summary(&currency));
            }
            info!("Planning completed with strategy {}", strategy);
            Ok(())
        }
        Err(e) => {
            error!("Planning failed: {}", e);
            Err(e.into())
        }
    }
}
