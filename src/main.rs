use std::process::ExitCode;

use anyhow::Context;
use lcfetch::{FetchConfig, Summary};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

const RULE: &str = "============================================================";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    println!("{}", RULE);
    println!("WASP-18 b Light Curve Data Fetcher");
    println!("{}", RULE);

    // ─── 2) fetch + save ─────────────────────────────────────────────
    let config = FetchConfig::default();
    info!(planet = %config.target, output = %config.output.display(), "startup");

    let result = lcfetch::run(&config)
        .await
        .with_context(|| format!("fetching {} light curve", config.target));

    // ─── 3) report ───────────────────────────────────────────────────
    report(result)
}

/// Print the summary or the failure; any failure exits non-zero.
fn report(result: anyhow::Result<Summary>) -> ExitCode {
    match result {
        Ok(summary) => {
            println!("\nData summary:");
            for line in summary.to_string().lines() {
                println!("  {}", line);
            }
            println!("\n{}", RULE);
            println!("SUCCESS! Light curve saved to {}", summary.path.display());
            println!("{}", RULE);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "fetch failed");
            eprintln!("\nERROR: {:#}", err);
            eprintln!("Data fetch failed. Please check your internet connection and try again.");
            ExitCode::FAILURE
        }
    }
}
