//! tagship CLI application
//!
//! Publishes files matching glob patterns as assets of the GitHub release for
//! a tag, creating the release when needed, and optionally commits a rendered
//! Homebrew formula to a tap repository.

// CLI binary needs to output to stdout/stderr - this is intentional
#![allow(clippy::print_stdout, clippy::print_stderr)]

use tagship::cli::{
    self, Cli, CliError, EXIT_OK, EXIT_RELEASE, ErrorOutput, OkEnvelope, exit_code_for,
    render_error,
};
use tagship::publish::{self, PublishPlan};
use tagship::tracing::{TracingConfig, TracingFormat, init_tracing};
use tagship_release::Environment;

fn main() {
    // NOTE: tracing may not be usable during a panic, so the hook prints directly.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    // Remote calls are awaited one at a time; a single thread is enough.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal error: Failed to create tokio runtime: {e}");
            std::process::exit(EXIT_RELEASE);
        }
    };

    let exit_code = rt.block_on(run(cli));
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> i32 {
    let format = cli.log_format.unwrap_or_else(TracingFormat::detect);
    let output = ErrorOutput::select(cli.json, format);

    match real_main(cli, format).await {
        Ok(()) => EXIT_OK,
        Err(err) => {
            // The terminal error is reported once, outside the log stream.
            render_error(&err, output);
            exit_code_for(&err)
        }
    }
}

async fn real_main(cli: Cli, format: TracingFormat) -> Result<(), CliError> {
    init_tracing(TracingConfig {
        format,
        level: cli.level.into(),
        // Annotations share stdout with the JSON envelope; keep it parseable.
        annotations: !cli.json,
    })
    .map_err(|e| CliError::other(e.to_string()))?;

    let plan = PublishPlan::prepare(&cli, &Environment::from_process())?;
    let summary = publish::execute(&plan).await?;

    if cli.json {
        let envelope = OkEnvelope::new(summary);
        let json = serde_json::to_string(&envelope)
            .map_err(|e| CliError::other(format!("Failed to serialize summary: {e}")))?;
        println!("{json}");
    }

    Ok(())
}
