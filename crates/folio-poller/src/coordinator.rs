//! Polling coordinator for one portfolio.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime, Timelike, Utc};
use tokio::sync::watch;
use tracing::{debug, error};

use folio_core::error::{ApiError, PollError};
use folio_core::parsers::normalize_name;
use folio_core::traits::{Notifier, SummarySource};
use folio_core::types::{PortfolioRef, ScheduleConfig, Snapshot};

use crate::schedule::should_update_now;

/// Sentinel for "no update minute recorded"; never equals a real minute of
/// day, so the next tick is free to fetch.
const MINUTE_UNSET: i32 = -1;

/// Stateful polling coordinator for one portfolio.
///
/// Owns the schedule decision, the last-known-good snapshot, and the error
/// notification streak. All methods take `&mut self`; the host serializes
/// access so at most one fetch is in flight per coordinator. Coordinators
/// for different portfolios share nothing.
pub struct PortfolioPoller {
    portfolio: PortfolioRef,
    schedule: ScheduleConfig,
    source: Arc<dyn SummarySource>,
    notifier: Arc<dyn Notifier>,
    last_snapshot: Option<Snapshot>,
    last_update_minute: i32,
    error_notified: bool,
    updates: watch::Sender<Option<Snapshot>>,
}

impl PortfolioPoller {
    pub fn new(
        portfolio: PortfolioRef,
        schedule: ScheduleConfig,
        source: Arc<dyn SummarySource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            portfolio,
            schedule,
            source,
            notifier,
            last_snapshot: None,
            last_update_minute: MINUTE_UNSET,
            error_notified: false,
            updates,
        }
    }

    /// The portfolio this coordinator tracks.
    pub fn portfolio(&self) -> &PortfolioRef {
        &self.portfolio
    }

    /// Latest successfully parsed snapshot, if any.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Subscribe to snapshot updates.
    ///
    /// Receivers see every successful fetch, scheduled or forced; cache
    /// hits are not republished.
    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.updates.subscribe()
    }

    /// Run one scheduled update cycle against the current local time.
    pub async fn poll(&mut self) -> Result<Snapshot, PollError> {
        self.poll_at(Local::now().naive_local()).await
    }

    /// Run one scheduled update cycle as of `now`.
    pub async fn poll_at(&mut self, now: NaiveDateTime) -> Result<Snapshot, PollError> {
        let minute_of_day = (now.hour() * 60 + now.minute()) as i32;

        // At most one fetch per minute of day, whether it succeeded or not.
        if minute_of_day == self.last_update_minute {
            return match &self.last_snapshot {
                Some(snapshot) => Ok(snapshot.clone()),
                None => Err(PollError::AwaitingSchedule),
            };
        }

        if !should_update_now(now, &self.schedule) {
            if let Some(snapshot) = &self.last_snapshot {
                return Ok(snapshot.clone());
            }
            // First run: nothing cached yet, fetch regardless of the schedule.
            debug!("initial data fetch for {}", self.portfolio.name);
        }

        self.last_update_minute = minute_of_day;
        self.refresh().await
    }

    /// Fetch immediately, bypassing the schedule.
    ///
    /// Clears the per-minute de-duplication mark so this refresh does not
    /// suppress the next scheduled tick; the schedule policy itself is
    /// untouched.
    pub async fn force_refresh(&mut self) -> Result<Snapshot, PollError> {
        self.last_update_minute = MINUTE_UNSET;
        self.refresh().await
    }

    /// One fetch-and-parse cycle: classify the error, manage the
    /// notification streak, and cache the parsed snapshot on success.
    async fn refresh(&mut self) -> Result<Snapshot, PollError> {
        let summary = match self.source.fetch_summary().await {
            Ok(summary) => summary,
            Err(ApiError::TokenExpired) => {
                let message = format!(
                    "Authentication token expired or invalid for '{}'. \
                     Run the login command to reconfigure your credentials.",
                    self.portfolio.name
                );
                if !self.error_notified {
                    self.notifier
                        .notify(
                            &self.notification_id(),
                            &format!("Portfolio Tracker - {}", self.portfolio.name),
                            &message,
                        )
                        .await;
                    self.error_notified = true;
                }
                error!("{message}");
                return Err(PollError::Reauthenticate {
                    portfolio: self.portfolio.name.clone(),
                });
            }
            Err(err @ ApiError::PortfolioNotFound(_)) => {
                error!("invalid portfolio id for '{}': {err}", self.portfolio.name);
                return Err(err.into());
            }
            Err(err) => {
                error!("API error for '{}': {err}", self.portfolio.name);
                return Err(err.into());
            }
        };

        self.error_notified = false;

        let snapshot = Snapshot::from_summary(&self.portfolio.name, &summary, Utc::now());
        debug!("data fetched successfully for {}", self.portfolio.name);

        self.last_snapshot = Some(snapshot.clone());
        self.updates.send_replace(Some(snapshot.clone()));
        Ok(snapshot)
    }

    fn notification_id(&self) -> String {
        format!("folio_{}_error", normalize_name(&self.portfolio.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use folio_core::types::PortfolioSummary;

    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<PortfolioSummary, ApiError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<PortfolioSummary, ApiError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SummarySource for ScriptedSource {
        async fn fetch_summary(&self) -> Result<PortfolioSummary, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(summary("240.937,98")))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notes: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn count(&self) -> usize {
            self.notes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, _id: &str, _title: &str, message: &str) {
            self.notes.lock().unwrap().push(message.to_string());
        }
    }

    fn summary(market_value: &str) -> PortfolioSummary {
        PortfolioSummary {
            market_value: market_value.to_string(),
            open_pl: "+70.864,27".to_string(),
            open_pl_percent: "41,71%".to_string(),
            daily_pl: "-1.615,47".to_string(),
            daily_pl_percent: "-0,67%".to_string(),
            raw: json!({}),
        }
    }

    fn poller(
        responses: Vec<Result<PortfolioSummary, ApiError>>,
    ) -> (PortfolioPoller, Arc<ScriptedSource>, Arc<RecordingNotifier>) {
        let source = ScriptedSource::new(responses);
        let notifier = Arc::new(RecordingNotifier::default());
        let portfolio = PortfolioRef {
            id: 7,
            name: "Main Portfolio".to_string(),
            kind: "position".to_string(),
        };
        let poller = PortfolioPoller::new(
            portfolio,
            ScheduleConfig::default(),
            source.clone(),
            notifier.clone(),
        );
        (poller, source, notifier)
    }

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    // 2024-01-06 is a Saturday: the default schedule never fires at 10:07.
    const SAT: (i32, u32, u32) = (2024, 1, 6);
    // 2024-01-03 is a Wednesday: 10:00/10:15/... are scheduled minutes.
    const WED: (i32, u32, u32) = (2024, 1, 3);

    #[tokio::test]
    async fn test_first_run_fetches_despite_schedule() {
        let (mut poller, source, _) = poller(vec![]);

        let snapshot = poller.poll_at(at(SAT.0, SAT.1, SAT.2, 10, 7)).await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(snapshot.market_value, 240937.98);
    }

    #[tokio::test]
    async fn test_same_minute_returns_cache_without_fetch() {
        let (mut poller, source, _) = poller(vec![]);

        let first = poller.poll_at(at(SAT.0, SAT.1, SAT.2, 10, 7)).await.unwrap();
        let second = poller.poll_at(at(SAT.0, SAT.1, SAT.2, 10, 7)).await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_same_minute_without_cache_waits() {
        let (mut poller, source, _) = poller(vec![Err(ApiError::Portfolio("boom".into()))]);

        let first = poller.poll_at(at(SAT.0, SAT.1, SAT.2, 10, 7)).await;
        assert!(matches!(first, Err(PollError::Api(_))));

        let second = poller.poll_at(at(SAT.0, SAT.1, SAT.2, 10, 7)).await;
        assert!(matches!(second, Err(PollError::AwaitingSchedule)));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_off_schedule_returns_cache_without_fetch() {
        let (mut poller, source, _) = poller(vec![]);

        let first = poller.poll_at(at(SAT.0, SAT.1, SAT.2, 10, 7)).await.unwrap();
        let later = poller.poll_at(at(SAT.0, SAT.1, SAT.2, 10, 9)).await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(first, later);
    }

    #[tokio::test]
    async fn test_scheduled_minutes_fetch_again() {
        let (mut poller, source, _) = poller(vec![]);

        poller.poll_at(at(WED.0, WED.1, WED.2, 10, 0)).await.unwrap();
        poller.poll_at(at(WED.0, WED.1, WED.2, 10, 15)).await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_snapshot() {
        let (mut poller, _, _) = poller(vec![
            Ok(summary("100,00")),
            Err(ApiError::Network("timeout".into())),
        ]);

        poller.poll_at(at(WED.0, WED.1, WED.2, 10, 0)).await.unwrap();
        let failed = poller.poll_at(at(WED.0, WED.1, WED.2, 10, 15)).await;

        assert!(failed.is_err());
        assert_eq!(poller.snapshot().unwrap().market_value, 100.0);
    }

    #[tokio::test]
    async fn test_token_expiry_notifies_once_per_streak() {
        let (mut poller, _, notifier) = poller(vec![
            Err(ApiError::TokenExpired),
            Err(ApiError::TokenExpired),
            Ok(summary("100,00")),
            Err(ApiError::TokenExpired),
        ]);

        let first = poller.poll_at(at(WED.0, WED.1, WED.2, 10, 0)).await;
        assert!(matches!(first, Err(PollError::Reauthenticate { .. })));
        assert_eq!(notifier.count(), 1);

        // Second failure in the same streak stays quiet.
        poller.poll_at(at(WED.0, WED.1, WED.2, 10, 15)).await.unwrap_err();
        assert_eq!(notifier.count(), 1);

        // A success clears the suppression...
        poller.poll_at(at(WED.0, WED.1, WED.2, 10, 30)).await.unwrap();

        // ...so the next failure notifies again.
        poller.poll_at(at(WED.0, WED.1, WED.2, 10, 45)).await.unwrap_err();
        assert_eq!(notifier.count(), 2);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_schedule() {
        let (mut poller, source, _) = poller(vec![Ok(summary("100,00")), Ok(summary("200,00"))]);

        // Saturday off-schedule: first run fetches, later polls serve cache.
        poller.poll_at(at(SAT.0, SAT.1, SAT.2, 10, 7)).await.unwrap();
        poller.poll_at(at(SAT.0, SAT.1, SAT.2, 10, 9)).await.unwrap();
        assert_eq!(source.calls(), 1);

        let refreshed = poller.force_refresh().await.unwrap();

        assert_eq!(source.calls(), 2);
        assert_eq!(refreshed.market_value, 200.0);
        assert_eq!(poller.snapshot().unwrap().market_value, 200.0);
    }

    #[tokio::test]
    async fn test_updates_published_on_success_only() {
        let (mut poller, _, _) = poller(vec![
            Ok(summary("100,00")),
            Err(ApiError::Network("timeout".into())),
        ]);
        let mut updates = poller.subscribe();

        poller.poll_at(at(WED.0, WED.1, WED.2, 10, 0)).await.unwrap();
        assert!(updates.has_changed().unwrap());
        assert_eq!(
            updates.borrow_and_update().as_ref().unwrap().market_value,
            100.0
        );

        poller.poll_at(at(WED.0, WED.1, WED.2, 10, 15)).await.unwrap_err();
        assert!(!updates.has_changed().unwrap());

        // Cache hits are not republished either.
        poller.poll_at(at(WED.0, WED.1, WED.2, 10, 16)).await.unwrap();
        assert!(!updates.has_changed().unwrap());
    }
}
