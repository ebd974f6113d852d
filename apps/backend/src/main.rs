use backend::bin_support::{replay, SessionScript};
use backend::config::ScoringConfig;
use backend::AppError;

mod telemetry;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - SCORING_SCRIPT: path to the session script (required)
    // - SCORING_TOSS_SEED, SCORING_COMMIT_ATTEMPTS: optional
    if let Err(e) = run().await {
        tracing::error!(code = %e.code(), error = %e, "Replay failed");
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = ScoringConfig::from_env()?;
    let path = config
        .script
        .clone()
        .ok_or_else(|| AppError::config("SCORING_SCRIPT must be set"))?;

    let script = SessionScript::load(&path)?;
    tracing::info!(script = %path.display(), commands = script.commands.len(), "Replaying session script");

    let report = replay(script, config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
