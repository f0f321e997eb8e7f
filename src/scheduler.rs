use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::model::AggregatedPayload;

/// Anything that can produce a fresh payload for a notification tick.
#[async_trait]
pub trait PayloadSource: Send + Sync {
    async fn fetch(&self) -> AggregatedPayload;
}

pub type Callback = Arc<dyn Fn(&AggregatedPayload) + Send + Sync>;

/// How a freshly fetched payload is compared with the last delivered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeDetection {
    /// Next fixture and the number of recent results only. Quiet under
    /// provider jitter, but misses an edited result in a same-length list.
    Coarse,
    /// Every field except `last_update`.
    #[default]
    Structural,
}

impl ChangeDetection {
    pub fn has_changed(self, previous: Option<&AggregatedPayload>, next: &AggregatedPayload) -> bool {
        let Some(previous) = previous else {
            return true;
        };
        match self {
            ChangeDetection::Coarse => {
                previous.next_match != next.next_match
                    || previous.recent_results.len() != next.recent_results.len()
            }
            ChangeDetection::Structural => !previous.same_content(next),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No subscribers, no timer.
    Idle,
    /// At least one subscriber, timer running.
    Active,
}

/// What a single notification tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Another fetch was still in flight.
    Skipped,
    /// The source panicked; the cache and subscribers are untouched.
    Failed,
    Unchanged,
    Notified { subscribers: usize },
}

struct Registry {
    subscribers: Vec<(u64, Callback)>,
    next_id: u64,
    timer: Option<JoinHandle<()>>,
}

struct Shared {
    source: Arc<dyn PayloadSource>,
    period: Duration,
    detection: ChangeDetection,
    registry: Mutex<Registry>,
    cache: Mutex<Option<Arc<AggregatedPayload>>>,
    in_flight: AtomicBool,
}

// Callbacks never run under a lock, so a poisoned mutex still holds valid state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the in-flight flag even if the tick is cancelled mid-fetch.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Polls a [`PayloadSource`] on a fixed period while anyone is subscribed and
/// pushes changed payloads to every subscriber in subscription order.
pub struct SubscriptionScheduler {
    shared: Arc<Shared>,
}

impl SubscriptionScheduler {
    pub fn new(source: Arc<dyn PayloadSource>, period: Duration, detection: ChangeDetection) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                period,
                detection,
                registry: Mutex::new(Registry {
                    subscribers: Vec::new(),
                    next_id: 0,
                    timer: None,
                }),
                cache: Mutex::new(None),
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// Register a callback. The first subscriber starts the timer, whose first
    /// tick fires immediately. Must be called from within a tokio runtime.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AggregatedPayload) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.shared.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.push((id, Arc::new(callback)));

        if registry.timer.as_ref().is_none_or(JoinHandle::is_finished) {
            info!(period_secs = self.shared.period.as_secs(), "Starting real-time football updates");
            let shared = Arc::clone(&self.shared);
            registry.timer = Some(tokio::spawn(run_timer(shared)));
        }
        debug!(subscriber = id, total = registry.subscribers.len(), "Subscriber added");

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Run one fetch-compare-notify cycle now, unless one is already in flight.
    pub async fn refresh_now(&self) -> TickOutcome {
        self.shared.tick().await
    }

    /// The last payload delivered to subscribers.
    pub fn latest(&self) -> Option<Arc<AggregatedPayload>> {
        lock(&self.shared.cache).clone()
    }

    pub fn state(&self) -> SchedulerState {
        if lock(&self.shared.registry).timer.as_ref().is_some_and(|timer| !timer.is_finished()) {
            SchedulerState::Active
        } else {
            SchedulerState::Idle
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared.registry).subscribers.len()
    }
}

impl Drop for SubscriptionScheduler {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.shared.registry).timer.take() {
            timer.abort();
        }
    }
}

/// Handle returned by [`SubscriptionScheduler::subscribe`].
#[must_use = "dropping a Subscription does not unsubscribe; call `unsubscribe`"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Deregister the callback. The last unsubscribe stops the timer; no
    /// notification is delivered to this callback afterwards.
    pub fn unsubscribe(self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let mut registry = lock(&shared.registry);
        registry.subscribers.retain(|(id, _)| *id != self.id);
        debug!(subscriber = self.id, total = registry.subscribers.len(), "Subscriber removed");

        if registry.subscribers.is_empty() {
            if let Some(timer) = registry.timer.take() {
                info!("Stopping real-time football updates");
                timer.abort();
            }
        }
    }
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared")
            .field("period", &self.period)
            .field("detection", &self.detection)
            .finish_non_exhaustive()
    }
}

async fn run_timer(shared: Arc<Shared>) {
    let mut ticker = interval(shared.period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        shared.tick().await;
    }
}

impl Shared {
    async fn tick(&self) -> TickOutcome {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("Previous fetch still in flight, skipping tick");
            return TickOutcome::Skipped;
        }
        let _in_flight = InFlight(&self.in_flight);

        info!("Fetching latest football data");
        let fetched = match AssertUnwindSafe(self.source.fetch()).catch_unwind().await {
            Ok(fetched) => fetched,
            Err(panic) => {
                error!(error = %panic_message(panic.as_ref()), "Football data fetch panicked, keeping last payload");
                return TickOutcome::Failed;
            }
        };

        match self.accept(fetched) {
            Some(payload) => {
                info!(data_source = %payload.data_source, "New football data available");
                let subscribers = self.notify(&payload);
                TickOutcome::Notified { subscribers }
            }
            None => {
                info!("Football data unchanged");
                TickOutcome::Unchanged
            }
        }
    }

    /// Replace the cache if the payload differs from the last delivered one.
    fn accept(&self, mut fetched: AggregatedPayload) -> Option<Arc<AggregatedPayload>> {
        let mut cache = lock(&self.cache);
        if !self.detection.has_changed(cache.as_deref(), &fetched) {
            return None;
        }
        fetched.last_update = Utc::now();
        let payload = Arc::new(fetched);
        *cache = Some(Arc::clone(&payload));
        Some(payload)
    }

    fn notify(&self, payload: &AggregatedPayload) -> usize {
        let snapshot: Vec<(u64, Callback)> = lock(&self.registry).subscribers.clone();
        let mut delivered = 0;

        for (id, callback) in snapshot {
            // Skip anyone who unsubscribed while earlier callbacks ran
            let still_subscribed = lock(&self.registry).subscribers.iter().any(|(sid, _)| *sid == id);
            if !still_subscribed {
                continue;
            }
            match catch_unwind(AssertUnwindSafe(|| callback(payload))) {
                Ok(()) => delivered += 1,
                Err(panic) => {
                    error!(subscriber = id, error = %panic_message(panic.as_ref()), "Error in subscriber callback");
                }
            }
        }

        delivered
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
