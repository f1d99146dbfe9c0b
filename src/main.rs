use clap::Parser;
use contact_relay::utils::logger;
use contact_relay::{CliConfig, ConsoleFeedback, ContactForm, EmailJsMailer, SubmitOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting contact-relay CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let resolved = match config.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let min_fill_time_ms = resolved.min_fill_time_ms;
    let mailer = EmailJsMailer::new(resolved);
    let mut form = ContactForm::new(mailer, ConsoleFeedback, min_fill_time_ms);
    form.set_name(config.name);
    form.set_email(config.email);
    form.set_message(config.message);
    form.set_honeypot(config.honeypot);

    match form.submit().await {
        SubmitOutcome::Delivered(receipt) => {
            tracing::info!("✅ Message relayed (status {})", receipt.status);
        }
        SubmitOutcome::Invalid(errors) => {
            let mut rendered = false;
            for (field, message) in errors.visible() {
                eprintln!("❌ {}: {}", field, message);
                rendered = true;
            }
            if rendered {
                std::process::exit(1);
            }
            // Only the hidden honeypot failed: a bot signal, so stay silent
            // like any other heuristic rejection.
            tracing::debug!("Submission blocked by hidden-field error");
        }
        SubmitOutcome::Discarded(reason) => {
            // Bot-heuristic rejections are a silent no-op by policy.
            tracing::debug!("Submission discarded: {:?}", reason);
        }
        SubmitOutcome::Failed(e) => {
            tracing::error!("❌ Delivery failed: {}", e);
            std::process::exit(2);
        }
        SubmitOutcome::InFlight => {
            unreachable!("single submit per invocation");
        }
    }

    Ok(())
}
