//! Wiring & DI. Entry point: bootstrap adapters, inject into the orchestrator, run the menu.
//! No business logic here; the resumption loop lives in the Orchestrator.

use crypto_resume::adapters::executor::SimulatedExecutor;
use crypto_resume::adapters::ui::notify::TerminalNotifier;
use crypto_resume::adapters::ui::passphrase::InquireSecretEntry;
use crypto_resume::adapters::ui::progress::IndicatifProgress;
use crypto_resume::adapters::ui::sign_view::SignMessageView;
use crypto_resume::adapters::ui::token::InquireTokenInteraction;
use crypto_resume::ports::{NotificationPort, ProgressPort, SecretEntryPort, TokenInteractionPort};
use crypto_resume::shared::config::AppConfig;
use crypto_resume::usecases::{
    AttemptOutcome, Dispatcher, Foreground, InputResolver, Orchestrator, ProgressSettings,
};
use dotenv::dotenv;
use inquire::{Select, Text};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const MENU_SIGN: &str = "Sign a message";
const MENU_QUIT: &str = "Quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found (check CWD)"),
    }

    crypto_resume::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config unreadable, using defaults");
        AppConfig::default()
    });

    // --- Executor (simulated signing service) ---
    let step_delay = Duration::from_millis(cfg.executor_step_delay_ms_or_default());
    info!(
        require_token = cfg.demo_require_token(),
        step_delay_ms = step_delay.as_millis() as u64,
        "simulated executor configured"
    );
    let executor = Arc::new(SimulatedExecutor::new(
        cfg.demo_passphrase_or_default(),
        cfg.demo_require_token(),
        step_delay,
    ));

    // --- Collaborators ---
    // Prompts share the bar registry so they can hold the indicator still.
    let bars = Arc::new(IndicatifProgress::new());
    let secret_entry: Arc<dyn SecretEntryPort> =
        Arc::new(InquireSecretEntry::new(Arc::clone(&bars)));
    let token_interaction: Arc<dyn TokenInteractionPort> =
        Arc::new(InquireTokenInteraction::new(Arc::clone(&bars)));
    let progress: Arc<dyn ProgressPort> = bars;
    let notifier: Arc<dyn NotificationPort> = Arc::new(TerminalNotifier::new());

    let dispatcher = Dispatcher::new(
        executor,
        progress,
        ProgressSettings {
            message: cfg.progress_message_or_default(),
            style: cfg.progress_style_or_default(),
        },
    );
    let orchestrator = Orchestrator::new(
        dispatcher,
        InputResolver::new(secret_entry, token_interaction),
        notifier,
        Foreground::new(false),
    );

    // --- Run (main menu -> Sign / Quit) ---
    orchestrator.foreground().activate();
    loop {
        let choice = match Select::new("What next?", vec![MENU_SIGN, MENU_QUIT]).prompt() {
            Ok(choice) => choice,
            Err(_) => break,
        };
        if choice == MENU_QUIT {
            break;
        }

        let Ok(message) = Text::new("Message to sign:").prompt() else {
            continue;
        };
        let view = SignMessageView::new(message);
        match orchestrator.crypto_operation(&view).await? {
            AttemptOutcome::Declined => println!("Nothing to sign."),
            outcome => info!(?outcome, "sign attempt done"),
        }
    }
    orchestrator.foreground().deactivate();

    Ok(())
}
