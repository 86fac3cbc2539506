//! Sota robot gRPC connection test: motion, speech synthesis, playback.

use clap::Parser;
use sota_cli::{Cli, Target};
use sota_driver::{ConnectionTest, RobotServices, RunReport};
use sota_grpc::RobotClients;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let target = Target::resolve(&cli.host, cli.port)?;
    tracing::info!("Connecting to gRPC server at {}...", target);
    let clients = RobotClients::connect(&target.host, target.port)?;

    let services = RobotServices {
        motion: Arc::new(clients.motion),
        playback: Arc::new(clients.playback),
        recording: Arc::new(clients.recording),
        tts: Arc::new(clients.tts),
        recognition: Arc::new(clients.recognition),
    };
    let report = ConnectionTest::new(services, cli.driver_config())
        .run(&target.to_string())
        .await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    println!("\n--- All tests finished ---");
    Ok(())
}

fn print_summary(report: &RunReport) {
    println!("\nConnection test against {}", report.target);
    for step in &report.steps {
        println!("  {:<14} {}", step.step.as_str(), step.outcome);
    }
}
