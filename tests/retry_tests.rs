use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::time::Instant;

use fennec_live_stats::FetchError;
use fennec_live_stats::config::RetryPolicy;
use fennec_live_stats::retry::with_retry;

fn unreachable() -> FetchError {
    FetchError::Unreachable {
        url: "https://www.thesportsdb.com/api/v1/json/3/eventsnext.php?id=134516".to_string(),
        reason: "timed out".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn succeeds_after_transient_failures() {
    let attempts = AtomicU32::new(0);
    let counter = &attempts;
    let start = Instant::now();

    let value = with_retry(&RetryPolicy::default(), "eventsnext", || async move {
        if counter.fetch_add(1, Ordering::SeqCst) < 2 {
            Err(unreachable())
        } else {
            Ok(42)
        }
    })
    .await
    .expect("expected the third attempt to succeed");

    assert_eq!(value, 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    // 1s then 2s of backoff
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_max_attempts() {
    let attempts = AtomicU32::new(0);
    let counter = &attempts;

    let err = with_retry(&RetryPolicy::default(), "eventslast", || async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Err::<(), _>(FetchError::Status {
            url: "https://api.football-data.org/v4/teams/5616/matches".to_string(),
            status: 503,
        })
    })
    .await
    .unwrap_err();

    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(matches!(err, FetchError::Status { status: 503, .. }), "error was: {}", err);
}

#[tokio::test(start_paused = true)]
async fn malformed_response_is_not_retried() {
    let attempts = AtomicU32::new(0);
    let counter = &attempts;

    let err = with_retry(&RetryPolicy::default(), "standings", || async move {
        counter.fetch_add(1, Ordering::SeqCst);
        serde_json::from_str::<Vec<u32>>("<html>").map_err(FetchError::from)
    })
    .await
    .unwrap_err();

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test(start_paused = true)]
async fn zero_attempts_still_tries_once() {
    let attempts = AtomicU32::new(0);
    let counter = &attempts;
    let policy = RetryPolicy { max_attempts: 0, ..RetryPolicy::default() };

    let _ = with_retry(&policy, "eventsnext", || async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Err::<(), _>(unreachable())
    })
    .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn backoff_is_capped() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.next_delay(Duration::from_secs(1)), Duration::from_secs(2));
    assert_eq!(policy.next_delay(Duration::from_secs(20)), Duration::from_secs(30));
}
