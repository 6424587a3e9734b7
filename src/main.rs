use anyhow::Context;
use tracing_subscriber::EnvFilter;

// Logs go to stderr so stdout carries only the JSON result
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let matches = restgate::cli::command().get_matches();

    let outcome = match restgate::cli::parse_matches(&matches) {
        Ok(request) => restgate::run(request).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(outcome) => {
            let failed = outcome.is_failure();
            let report = serde_json::json!({
                "changed": outcome.changed,
                "status": outcome.status,
                "msg": if failed { "Bad Status Code" } else { "" },
                "json": outcome.json,
            });
            println!("{}", serde_json::to_string_pretty(&report).context("Failed to render result")?);
            if failed {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "call failed");
            let report = serde_json::json!({ "failed": true, "msg": e.to_string() });
            println!("{}", serde_json::to_string_pretty(&report).context("Failed to render error")?);
            std::process::exit(1);
        }
    }

    Ok(())
}
