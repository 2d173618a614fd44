use {
    crate::{
        api::console::{
            stdin_lines,
            Console,
        },
        config::{
            Config,
            RunOptions,
        },
        kernel::tabular::CsvStore,
        session::service::{
            self,
            import_participants::ImportParticipantsInput,
            Service,
        },
    },
    anyhow::anyhow,
    std::{
        sync::atomic::{
            AtomicBool,
            Ordering,
        },
        time::Duration,
    },
    tokio_util::task::TaskTracker,
};

const NOTIFICATIONS_CHAN_LEN: usize = 1000;

fn load_config(run_options: &RunOptions) -> anyhow::Result<Config> {
    match &run_options.config.config {
        Some(path) => Config::load(path).map_err(|err| {
            anyhow!(
                "Failed to load config from file({path}): {:?}",
                err,
                path = path
            )
        }),
        None => Ok(Config::default()),
    }
}

pub async fn start_session(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let config = load_config(&run_options)?;
    tracing::info!(
        auctioneers = config.auctioneers.len(),
        lot_preset = config.lot.is_some(),
        "Loaded session config"
    );

    let (event_sender, event_receiver) = tokio::sync::broadcast::channel(NOTIFICATIONS_CHAN_LEN);
    let service = Service::new(
        service::Config {
            round_duration_secs: run_options.session.round_duration_secs,
            auctioneers:         config.auctioneers,
            lot_preset:          config.lot,
        },
        CsvStore,
        event_sender,
    );

    if let Some(path) = run_options.session.participants_file {
        service
            .import_participants(ImportParticipantsInput { path: path.clone() })
            .await
            .map_err(|err| anyhow!("Failed to import participants from {}: {}", path, err))?;
    }

    let task_tracker = TaskTracker::new();
    task_tracker.spawn({
        let service = service.clone();
        async move {
            if let Err(err) = service.run_timer_loop().await {
                tracing::error!(error = ?err, "Round timer failed");
            }
        }
    });
    task_tracker.spawn(async move {
        let mut console = Console::new(
            service,
            event_receiver,
            stdin_lines(),
            tokio::io::stdout(),
        );
        console.run().await;
        // Closing the console input ends the application.
        SHOULD_EXIT.store(true, Ordering::Release);
    });
    task_tracker.close();
    task_tracker.wait().await;
    Ok(())
}

// Set once the application is shutting down. Long running tasks poll it every
// `EXIT_CHECK_INTERVAL` and wind down.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
