//! Scheduled polling host.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use folio_client::ClientSummarySource;
use folio_core::error::PollError;
use folio_core::types::PortfolioRef;
use folio_monitor::LogNotifier;
use folio_poller::PortfolioPoller;

/// Coordinators are driven at least once per minute; the schedule policy
/// decides which ticks actually fetch.
const TICK_INTERVAL: Duration = Duration::from_secs(60);

pub async fn run(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    config.validate()?;

    info!("starting {} ({})", config.app.name, config.app.environment);

    let credentials = super::credentials_from(&config);
    let notifier = Arc::new(LogNotifier);

    // One coordinator per configured portfolio, owned here by id and handed
    // by reference to the tasks that need it.
    let mut pollers: HashMap<i64, Arc<Mutex<PortfolioPoller>>> = HashMap::new();
    for settings in &config.portfolios {
        let client = super::client_from(&config)?;
        let source = Arc::new(ClientSummarySource::new(
            client,
            credentials.clone(),
            settings.id,
        ));
        let portfolio = PortfolioRef {
            id: settings.id,
            name: settings.name.clone(),
            kind: "position".to_string(),
        };
        let mut poller = PortfolioPoller::new(
            portfolio,
            config.schedule.clone(),
            source,
            notifier.clone(),
        );

        // The initial fetch is mandatory; failing it aborts setup.
        let snapshot = poller
            .poll()
            .await
            .with_context(|| format!("initial fetch failed for '{}'", settings.name))?;
        super::fetch::print_snapshot(&snapshot);

        pollers.insert(settings.id, Arc::new(Mutex::new(poller)));
    }

    for poller in pollers.values() {
        spawn_printer(poller).await;
        spawn_tick_loop(poller.clone());
    }

    println!("Watching; press Enter to refresh now, Ctrl-C to exit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(_)) = lines.next_line().await {
        for (id, poller) in &pollers {
            let mut poller = poller.lock().await;
            match poller.force_refresh().await {
                Ok(_) => info!("forced refresh of portfolio {id}"),
                Err(err) => warn!("forced refresh of portfolio {id} failed: {err}"),
            }
        }
    }
    Ok(())
}

/// Print every successful update as it is published.
async fn spawn_printer(poller: &Arc<Mutex<PortfolioPoller>>) {
    let mut updates = poller.lock().await.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if let Some(snapshot) = snapshot {
                super::fetch::print_snapshot(&snapshot);
            }
        }
    });
}

/// Drive one coordinator; each tick runs to completion before the next.
fn spawn_tick_loop(poller: Arc<Mutex<PortfolioPoller>>) {
    tokio::spawn(async move {
        let mut ticker = interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial fetch already ran.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let mut poller = poller.lock().await;
            match poller.poll().await {
                Ok(_) => {}
                Err(PollError::AwaitingSchedule) => debug!("no update due"),
                Err(err @ PollError::Reauthenticate { .. }) => error!("{err}"),
                Err(err) => {
                    warn!("update failed, keeping previous snapshot: {err}");
                }
            }
        }
    });
}
