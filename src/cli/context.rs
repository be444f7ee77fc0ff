//! Shared command setup: configuration, logging, and the wired client.

use crate::cli::CommonArgs;
use crate::client::ApiClient;
use crate::config::{LogFormat, PodeskConfig};
use crate::probe::HealthProbe;
use crate::session::SessionStore;
use crate::status::BackendStatusMonitor;
use crate::store::{FileStore, KeyValueStore};
use crate::wake::WakeTracker;
use colored::Colorize;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides applied.
///
/// A missing config file is not an error: defaults plus environment
/// overrides apply, so the tool works out of the box.
pub fn load_config(args: &CommonArgs) -> Result<PodeskConfig, Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        PodeskConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        PodeskConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Initialize the tracing subscriber from the logging config.
pub fn init_logging(config: &PodeskConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// The wired-up client stack for one command invocation.
pub struct AppContext {
    pub config: PodeskConfig,
    pub session: Arc<SessionStore>,
    pub tracker: Arc<WakeTracker>,
    pub monitor: Arc<BackendStatusMonitor>,
    pub client: Arc<ApiClient>,
}

impl AppContext {
    /// Wire the stores, tracker, probe, monitor, and client together.
    pub fn build(config: PodeskConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match &config.state_dir {
            Some(dir) => Arc::new(FileStore::new(dir.clone())),
            None => Arc::new(FileStore::default_location()),
        };

        let session = Arc::new(SessionStore::new(store.clone()));
        let tracker = Arc::new(WakeTracker::new(store, config.wake.grace_window()));
        let probe = Arc::new(HealthProbe::new(
            &config.api.base_url,
            config.wake.probe_timeout(),
            tracker.clone(),
        ));
        let monitor = BackendStatusMonitor::new(probe.clone(), config.wake.clone());
        let client = Arc::new(ApiClient::new(
            &config.api,
            config.wake.retry_delay(),
            session.clone(),
            probe,
            monitor.clone(),
        ));

        Self {
            config,
            session,
            tracker,
            monitor,
            client,
        }
    }

    /// Run a command with the status monitor running and a wake notice on
    /// stderr while it is in flight.
    ///
    /// The monitor's background poll (and its timers) are cancelled before
    /// returning so nothing outlives the command.
    pub async fn with_monitor<F, T>(&self, command: F) -> T
    where
        F: Future<Output = T>,
    {
        let cancel = CancellationToken::new();
        let poll = self.monitor.start(cancel.clone());

        // Notification surface: render wake-cycle state changes on stderr.
        let mut waking_rx = self.monitor.subscribe();
        let notice = tokio::spawn(async move {
            while waking_rx.changed().await.is_ok() {
                if *waking_rx.borrow() {
                    eprintln!(
                        "{}",
                        "Backend is waking up from sleep, this can take up to a minute..."
                            .yellow()
                    );
                } else {
                    eprintln!("{}", "Backend is responding again.".green());
                }
            }
        });

        let result = command.await;

        cancel.cancel();
        let _ = poll.await;
        notice.abort();

        result
    }
}
