//! Fire-and-forget alert delivery
//!
//! The dispatcher hands each fraud report to a detached tokio task so the
//! submission path never waits on the outbound channel. Every attempt is bounded
//! by a timeout and retried with exponential backoff up to a fixed number of
//! attempts. In-flight deliveries are tracked so callers can wait for them to
//! drain (graceful shutdown, tests).

use super::{Alert, Notifier};
use crate::types::{FraudError, FraudReport};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;

/// Timeout and retry policy for alert delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Upper bound for a single delivery attempt
    pub timeout: Duration,
    /// Total number of attempts before giving up
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure
    pub backoff: Duration,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

impl DispatchPolicy {
    /// Create a policy with custom timeout and attempts
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(timeout: Duration, max_attempts: u32) -> Self {
        let default = Self::default();

        let timeout = if timeout.is_zero() {
            tracing::warn!(
                default = ?default.timeout,
                "Invalid notification timeout (0), using default"
            );
            default.timeout
        } else {
            timeout
        };

        let max_attempts = if max_attempts == 0 {
            tracing::warn!(
                default = default.max_attempts,
                "Invalid notification max_attempts (0), using default"
            );
            default.max_attempts
        } else {
            max_attempts
        };

        Self {
            timeout,
            max_attempts,
            backoff: default.backoff,
        }
    }

    /// Set the initial retry backoff
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

/// Dispatches fraud alerts outside the scoring critical section
///
/// A dispatcher without a notifier is a no-op; this is the degraded mode used
/// when notification settings are missing.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Option<Arc<dyn Notifier>>,
    policy: DispatchPolicy,
    tracker: TaskTracker,
    /// Callers currently inside `wait_idle`; shared by clones
    waiters: Arc<Mutex<usize>>,
}

impl NotificationDispatcher {
    /// Create a dispatcher delivering through `notifier`
    pub fn new(notifier: Arc<dyn Notifier>, policy: DispatchPolicy) -> Self {
        Self {
            notifier: Some(notifier),
            policy,
            tracker: TaskTracker::new(),
            waiters: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a dispatcher that skips every alert
    pub fn disabled() -> Self {
        Self {
            notifier: None,
            policy: DispatchPolicy::default(),
            tracker: TaskTracker::new(),
            waiters: Arc::new(Mutex::new(0)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Queue delivery of a report and return immediately
    ///
    /// Requires a tokio runtime; without one the alert is dropped with a warning.
    pub fn dispatch(&self, report: &FraudReport) {
        let transaction_id = report.transaction.id;

        let Some(notifier) = self.notifier.clone() else {
            tracing::debug!(transaction_id, "Notifications disabled, skipping fraud alert");
            return;
        };

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!(
                    transaction_id,
                    "No async runtime available, fraud alert not sent"
                );
                return;
            }
        };

        let alert = Alert::from_report(report);
        let policy = self.policy.clone();

        self.tracker.spawn_on(
            async move {
                if let Err(e) = deliver(notifier.as_ref(), &alert, &policy).await {
                    tracing::error!(transaction_id, error = %e, "Fraud alert could not be delivered");
                }
            },
            &handle,
        );
    }

    /// Number of deliveries still in flight
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every queued delivery has finished
    ///
    /// Safe to call from several tasks at once. The tracker stays closed while
    /// any caller is waiting and is reopened by the last one to finish, so
    /// alerts dispatched afterwards are tracked as usual.
    pub async fn wait_idle(&self) {
        {
            let mut waiters = self.waiters.lock();
            *waiters += 1;
            self.tracker.close();
        }

        self.tracker.wait().await;

        let mut waiters = self.waiters.lock();
        *waiters -= 1;
        if *waiters == 0 {
            self.tracker.reopen();
        }
    }
}

impl fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("enabled", &self.is_enabled())
            .field("policy", &self.policy)
            .field("pending", &self.pending())
            .finish()
    }
}

/// Deliver an alert, retrying per `policy`
///
/// # Errors
///
/// Returns [`FraudError::NotificationDelivery`] once every attempt has failed
/// or timed out.
pub async fn deliver(
    notifier: &dyn Notifier,
    alert: &Alert,
    policy: &DispatchPolicy,
) -> Result<(), FraudError> {
    let mut last_error = String::from("no delivery attempted");

    for attempt in 1..=policy.max_attempts {
        match tokio::time::timeout(policy.timeout, notifier.notify(alert)).await {
            Ok(Ok(())) => {
                tracing::info!(attempt, subject = %alert.subject, "Fraud alert delivered");
                return Ok(());
            }
            Ok(Err(e)) => last_error = e.to_string(),
            Err(_) => last_error = format!("timed out after {:?}", policy.timeout),
        }

        tracing::warn!(
            attempt,
            max_attempts = policy.max_attempts,
            error = %last_error,
            "Fraud alert delivery attempt failed"
        );

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.delay_after(attempt)).await;
        }
    }

    Err(FraudError::notification_delivery(
        policy.max_attempts,
        last_error,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Evidence, FraudType, FraudVerdict, Transaction};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` calls, then succeeds
    struct FlakyNotifier {
        failures: u32,
        calls: AtomicU32,
        delivered: Mutex<Vec<Alert>>,
    }

    impl FlakyNotifier {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
                delivered: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        async fn notify(&self, alert: &Alert) -> Result<(), FraudError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                return Err(FraudError::notification_delivery(1, "relay unreachable"));
            }
            self.delivered.lock().push(alert.clone());
            Ok(())
        }
    }

    struct StalledNotifier;

    #[async_trait]
    impl Notifier for StalledNotifier {
        async fn notify(&self, _alert: &Alert) -> Result<(), FraudError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    fn alert() -> Alert {
        Alert {
            subject: "Fraud Alert: Suspicious Pattern Detected".to_string(),
            body: "{}".to_string(),
        }
    }

    fn fast_policy(max_attempts: u32) -> DispatchPolicy {
        DispatchPolicy::new(Duration::from_millis(50), max_attempts)
            .with_backoff(Duration::from_millis(1))
    }

    #[test]
    fn test_policy_zero_values_fall_back() {
        let policy = DispatchPolicy::new(Duration::ZERO, 0);
        assert_eq!(policy, DispatchPolicy::default());
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = DispatchPolicy::default().with_backoff(Duration::from_millis(100));
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(3), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_deliver_succeeds_first_try() {
        let notifier = FlakyNotifier::new(0);

        deliver(&notifier, &alert(), &fast_policy(3)).await.unwrap();

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.delivered.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_deliver_retries_until_success() {
        let notifier = FlakyNotifier::new(2);

        deliver(&notifier, &alert(), &fast_policy(3)).await.unwrap();

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 3);
        assert_eq!(notifier.delivered.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_deliver_gives_up_after_max_attempts() {
        let notifier = FlakyNotifier::new(10);

        let err = deliver(&notifier, &alert(), &fast_policy(2))
            .await
            .unwrap_err();

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 2);
        assert!(matches!(
            err,
            FraudError::NotificationDelivery { attempts: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_deliver_times_out_stalled_channel() {
        let err = deliver(&StalledNotifier, &alert(), &fast_policy(1))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("timed out"));
    }

    struct SlowNotifier {
        delivered: AtomicU32,
    }

    #[async_trait]
    impl Notifier for SlowNotifier {
        async fn notify(&self, _alert: &Alert) -> Result<(), FraudError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.delivered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn report() -> FraudReport {
        let transaction = Transaction {
            id: 7,
            amount: Decimal::new(10, 0),
            ip: "9.9.9.9".to_string(),
            device_id: "d7".to_string(),
            payer_id: "p7".to_string(),
            insurance_fee: Decimal::new(2, 1),
            platform_fee: Decimal::new(5, 2),
            seller_share: Decimal::new(15, 2),
            claimed: false,
            timestamp: Utc::now(),
        };
        let verdict = FraudVerdict {
            fraud_type: FraudType::SuspiciousPattern,
            evidence: Evidence {
                ip: "9.9.9.9".to_string(),
                device_id: "d7".to_string(),
                same_ip: 4,
                same_device: 1,
                claim_count: 0,
            },
        };
        FraudReport::new(verdict, transaction)
    }

    #[tokio::test]
    async fn test_concurrent_wait_idle_callers() {
        let notifier = Arc::new(SlowNotifier {
            delivered: AtomicU32::new(0),
        });
        let dispatcher =
            NotificationDispatcher::new(notifier.clone(), DispatchPolicy::new(Duration::from_secs(5), 1));

        dispatcher.dispatch(&report());
        let first = dispatcher.clone();
        let second = dispatcher.clone();
        let waited = tokio::time::timeout(Duration::from_secs(5), async {
            tokio::join!(first.wait_idle(), second.wait_idle());
        })
        .await;

        assert!(waited.is_ok(), "wait_idle callers did not finish");
        assert_eq!(notifier.delivered.load(Ordering::SeqCst), 1);
        assert!(!dispatcher.tracker.is_closed());
        assert_eq!(*dispatcher.waiters.lock(), 0);

        // Alerts dispatched after draining are still tracked and awaited
        dispatcher.dispatch(&report());
        assert_eq!(dispatcher.pending(), 1);
        tokio::time::timeout(Duration::from_secs(5), dispatcher.wait_idle())
            .await
            .expect("second drain finished");
        assert_eq!(notifier.delivered.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_tracker_stays_closed_while_a_caller_waits() {
        let notifier = Arc::new(SlowNotifier {
            delivered: AtomicU32::new(0),
        });
        let dispatcher =
            NotificationDispatcher::new(notifier.clone(), DispatchPolicy::new(Duration::from_secs(5), 1));
        dispatcher.dispatch(&report());

        let waiter = dispatcher.clone();
        let handle = tokio::spawn(async move { waiter.wait_idle().await });
        tokio::task::yield_now().await;

        // A second caller finishing early must not reopen the tracker
        {
            let mut waiters = dispatcher.waiters.lock();
            assert_eq!(*waiters, 1);
            assert!(dispatcher.tracker.is_closed());
            *waiters += 1;
        }
        handle.await.unwrap();
        assert!(dispatcher.tracker.is_closed());

        *dispatcher.waiters.lock() -= 1;
        dispatcher.wait_idle().await;
        assert!(!dispatcher.tracker.is_closed());
        assert_eq!(notifier.delivered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disabled_dispatcher() {
        let dispatcher = NotificationDispatcher::disabled();
        assert!(!dispatcher.is_enabled());
        assert_eq!(dispatcher.pending(), 0);
    }
}
