//! Medify demo session.
//!
//! Walks one user through the client core: restore the session, log in, run a
//! symptom assessment, request and track a drone delivery, raise an emergency
//! and log out. Snapshots are printed as JSON on stdout; tracing goes to stderr.
//!
//! Run with:
//! ```bash
//! MEDIFY_TRANSIT_DELAY_MS=1000 cargo run --bin medify
//! ```

mod config;

use anyhow::Context;
use config::MedifyConfig;
use medify_auth::{AuthGate, MemorySessionStore, SessionGate};
use medify_core::environment::{Clock, SystemClock};
use medify_dispatch::{
    DeliveryForm, DispatchEnvironment, EmergencyForm, RequestTracker, detect_location,
};
use medify_triage::{AssessmentForm, Marker, TriageEnvironment, TriageError, TriageStore};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Gate = Arc<SessionGate<MemorySessionStore>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    let config = MedifyConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_directives().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(?config, "Starting Medify demo session");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let gate: Gate = Arc::new(
        SessionGate::restore(MemorySessionStore::new(), Arc::clone(&clock))
            .await
            .context("restoring session")?,
    );

    let triage = TriageStore::new(Arc::clone(&gate), TriageEnvironment::new(Arc::clone(&clock)));
    let tracker = RequestTracker::new(
        Arc::clone(&gate),
        DispatchEnvironment::new(config.dispatch.clone(), Arc::clone(&clock)),
    );

    // Nothing is reachable before login
    match triage.submit(assessment_form(&triage).await).await {
        Err(TriageError::AuthRequired) => {
            tracing::info!("Assessment refused while logged out, as expected");
        },
        other => anyhow::bail!("assessment accepted without a session: {other:?}"),
    }

    let user = gate
        .login("asha@example.com", "correct horse")
        .await
        .context("logging in")?;
    println!("logged in: {}", serde_json::to_string(&user)?);

    run_triage(&triage).await?;
    run_delivery(&tracker, &config).await?;
    run_emergency(&tracker, &config).await?;

    triage.reset().await?;
    tracker.reset().await?;
    gate.logout().await.context("logging out")?;
    tracing::info!(authenticated = gate.is_authenticated(), "Session closed");

    tracker
        .shutdown(Duration::from_secs(1))
        .await
        .context("shutting down request tracker")?;
    Ok(())
}

async fn assessment_form(triage: &TriageStore<Gate>) -> AssessmentForm {
    AssessmentForm {
        age: "34".to_string(),
        gender: "female".to_string(),
        primary_symptom: "Sore throat since Monday".to_string(),
        additional_info: String::new(),
        selected: triage.selection().await,
    }
}

async fn run_triage(triage: &TriageStore<Gate>) -> anyhow::Result<()> {
    for marker in [Marker::Fever, Marker::Cough, Marker::SoreThroat] {
        triage.toggle_symptom(marker.symptom_id()).await?;
    }

    let result = triage.submit(assessment_form(triage).await).await?;
    println!("assessment: {}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run_delivery(
    tracker: &RequestTracker<Gate>,
    config: &MedifyConfig,
) -> anyhow::Result<()> {
    let request = tracker
        .submit_delivery(DeliveryForm {
            address: "12 Hill Rd".to_string(),
            coordinates: String::new(),
            medicine_description: "Amoxicillin 500mg, 21 capsules".to_string(),
            phone_number: "555-0100".to_string(),
            cold_chain_required: false,
        })
        .await?;
    println!("delivery: {}", serde_json::to_string_pretty(&request)?);

    let mut handle = tracker.begin_transit().await?;
    tracing::info!(
        request_id = %request.id,
        delay = ?config.dispatch.transit_delay,
        "Waiting for the drone"
    );
    handle.wait().await;

    let delivered = tracker
        .delivery()
        .await
        .context("delivery disappeared during transit")?;
    println!("delivery status: {}", delivered.status);
    Ok(())
}

async fn run_emergency(
    tracker: &RequestTracker<Gate>,
    config: &MedifyConfig,
) -> anyhow::Result<()> {
    let request = tracker
        .submit_emergency(EmergencyForm {
            location: "Ridge trail, km 4".to_string(),
            coordinates: detect_location(),
            description: "Hiker with a suspected broken ankle".to_string(),
            phone_number: "555-0101".to_string(),
        })
        .await?;
    println!("emergency: {}", serde_json::to_string_pretty(&request)?);

    tokio::time::sleep(config.dispatch.emergency_ack_delay + Duration::from_millis(10)).await;
    if let Some(emergency) = tracker.emergency().await {
        println!("emergency {}: {:?}", emergency.id, emergency.status());
    }
    Ok(())
}
