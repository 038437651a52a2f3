use cardex::commands::{notify_config_failure, run_export};
use cardex::config::Cli;
use cardex::logging::init_logger;
use cardex::platform::default_notifier;
use cardex::Config;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level())?;

    let config = match Config::try_from(cli) {
        Ok(config) => config,
        Err(e) => {
            notify_config_failure(default_notifier().as_ref(), &e);
            return Err(e.into());
        }
    };
    tracing::debug!("cardex v{}", cardex::VERSION);

    // Failures are reported through notifications, not the exit code.
    let outcome = run_export(&config);
    if outcome.is_completed() {
        tracing::debug!(processed = outcome.processed(), "run ended");
    } else {
        tracing::debug!(status = ?outcome.status, "run stopped early");
    }

    Ok(())
}
