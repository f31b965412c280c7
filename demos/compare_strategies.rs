//! Compare routing strategies on one trip request
//!
//! Plans the same trip with every built-in strategy and prints which agents ran,
//! how many items were scheduled and the final cost. Needs OPENAI_API_KEY (and
//! network access for OpenStreetMap lookups).

use anyhow::Context;
use chrono::{Duration, Utc};
use trip_planner_rs::{AgentKind, Orchestrator, RoutingStrategy, TripPreferences};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let orchestrator = Orchestrator::from_env().context("failed to configure the planner")?;

    let preferences = TripPreferences::new(
        "Jaipur",
        60_000.0,
        4,
        Utc::now().date_naive() + Duration::days(30),
        2,
    )?
    .with_interests(["heritage", "culture", "local food"]);

    println!("🧭 Routing strategy comparison");
    println!("==============================");
    println!(
        "Destination: {} | {} days | budget {:.0} {}",
        preferences.location,
        preferences.duration_days,
        preferences.budget,
        orchestrator.currency()
    );

    for strategy in RoutingStrategy::ALL {
        let itinerary = orchestrator
            .plan_trip(preferences.clone(), strategy)
            .await
            .with_context(|| format!("{strategy} routing failed"))?;

        let agents = orchestrator
            .routing_history()
            .last()
            .map(|record| {
                record
                    .agents
                    .iter()
                    .map(AgentKind::to_string)
                    .collect::<Vec<_>>()
                    .join(" → ")
            })
            .unwrap_or_default();

        println!(
            "\n📋 {:<12} agents: [{}]\n   items: {:>2}  cost: {:.2} {}",
            strategy.as_str(),
            agents,
            itinerary.items.len(),
            itinerary.total_cost(),
            orchestrator.currency()
        );
    }

    // Reward the agents that produced the plan, then replan with feedback routing
    orchestrator.performance().record(AgentKind::Research, 0.9);
    orchestrator.performance().record(AgentKind::Planning, 0.85);

    let first = orchestrator
        .plan_trip(preferences, RoutingStrategy::Sequential)
        .await?;
    let replanned = orchestrator
        .adaptive_replan(&first, serde_json::Map::new())
        .await?;

    println!("\n🔁 Replanned itinerary");
    println!("{}", replanned.render_summary(orchestrator.currency()));

    Ok(())
}
