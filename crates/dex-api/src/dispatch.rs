//! Bounded-concurrency fan-out over a list of URLs.
//!
//! Every URL gets its own task on a [`JoinSet`]; a shared [`Semaphore`]
//! caps how many run at once and the rest wait for a permit. Outcomes are
//! collected in completion order by the calling task, which alone owns the
//! result vector and the counters. A task that errors or panics is logged
//! with its URL and never affects the others.

use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Completion count reported to the progress observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Tasks finished so far, whatever their outcome.
    pub completed: usize,
    /// Tasks in the batch.
    pub total: usize,
}

type ProgressObserver = Arc<dyn Fn(Progress) + Send + Sync>;

/// Counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Locators handed to the dispatcher.
    pub submitted: usize,
    /// Tasks that returned a result.
    pub succeeded: usize,
    /// Tasks that returned an error or never got to run.
    pub failed: usize,
    /// Tasks that panicked.
    pub panicked: usize,
    /// Wall time of the whole batch.
    pub elapsed: Duration,
}

/// Successful results in completion order, plus the batch summary.
#[derive(Debug)]
pub struct BatchOutcome<T> {
    /// Successful results, in completion order.
    pub items: Vec<T>,
    /// Counts for the batch.
    pub summary: BatchSummary,
}

/// Runs one async task per input with at most `limit` in flight.
#[derive(Clone)]
pub struct Dispatcher {
    limit: usize,
    progress_every: usize,
    observer: Option<ProgressObserver>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("limit", &self.limit)
            .field("progress_every", &self.progress_every)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Dispatcher {
    /// `limit` and `progress_every` are clamped to at least 1.
    #[must_use]
    pub fn new(limit: usize, progress_every: usize) -> Self {
        Self {
            limit: limit.max(1),
            progress_every: progress_every.max(1),
            observer: None,
        }
    }

    /// Call `observer` after every completion, success or not.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Run `task` once per locator and wait for all of them.
    ///
    /// `task` is called up front for every locator; the futures it returns
    /// only start running once they hold a permit.
    pub async fn run<T, E, F, Fut>(&self, locators: Vec<String>, task: F) -> BatchOutcome<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        let started = Instant::now();
        let total = locators.len();
        let mut summary = BatchSummary {
            submitted: total,
            ..BatchSummary::default()
        };
        let mut items = Vec::with_capacity(total);

        let semaphore = Arc::new(Semaphore::new(self.limit));
        let mut set = JoinSet::new();
        for (idx, locator) in locators.iter().enumerate() {
            let fut = task(locator.clone());
            let sem = Arc::clone(&semaphore);
            set.spawn(async move {
                let Ok(_permit) = sem.acquire_owned().await else {
                    return (idx, None);
                };
                (idx, Some(AssertUnwindSafe(fut).catch_unwind().await))
            });
        }

        let mut completed = 0;
        while let Some(joined) = set.join_next().await {
            completed += 1;
            match joined {
                Ok((_, Some(Ok(Ok(item))))) => {
                    summary.succeeded += 1;
                    items.push(item);
                }
                Ok((idx, Some(Ok(Err(e))))) => {
                    summary.failed += 1;
                    tracing::warn!(url = %locators[idx], error = %e, "fetch failed, skipping");
                }
                Ok((idx, Some(Err(payload)))) => {
                    summary.panicked += 1;
                    tracing::error!(
                        url = %locators[idx],
                        panic = panic_message(payload.as_ref()),
                        "task panicked, skipping"
                    );
                }
                Ok((idx, None)) => {
                    summary.failed += 1;
                    tracing::error!(url = %locators[idx], "worker pool closed before task ran");
                }
                Err(e) => {
                    summary.panicked += 1;
                    tracing::error!(error = %e, "task join failed");
                }
            }
            self.report(completed, total);
        }

        summary.elapsed = started.elapsed();
        BatchOutcome { items, summary }
    }

    fn report(&self, completed: usize, total: usize) {
        if completed % self.progress_every == 0 || completed == total {
            tracing::info!("processed {completed}/{total}");
        }
        if let Some(observer) = &self.observer {
            observer(Progress { completed, total });
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    fn locators(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("https://pokeapi.test/pokemon/{i}/")).collect()
    }

    /// Shared buffer the fmt subscriber writes log lines into.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn progress_lines(&self) -> Vec<String> {
            let raw = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
            raw.lines()
                .filter_map(|line| line.split("processed ").nth(1))
                .map(str::to_string)
                .collect()
        }
    }

    fn id_of(url: &str) -> u32 {
        url.trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap()
    }

    #[tokio::test]
    async fn collects_every_success() {
        let outcome = Dispatcher::new(4, 100)
            .run(locators(25), |url| async move { Ok::<_, String>(id_of(&url)) })
            .await;

        let mut ids = outcome.items;
        ids.sort_unstable();
        assert_eq!(ids, (1..=25).collect::<Vec<_>>());
        assert_eq!(outcome.summary.succeeded, 25);
        assert_eq!(outcome.summary.failed, 0);
    }

    #[tokio::test]
    async fn never_exceeds_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let outcome = Dispatcher::new(3, 100)
            .run(locators(30), |url| {
                let in_flight = Arc::clone(&in_flight);
                let peak = Arc::clone(&peak);
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, String>(url)
                }
            })
            .await;

        assert_eq!(outcome.items.len(), 30);
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn errors_are_skipped_without_aborting() {
        let outcome = Dispatcher::new(5, 100)
            .run(locators(10), |url| async move {
                let id = id_of(&url);
                if id % 2 == 0 {
                    Err(format!("boom {id}"))
                } else {
                    Ok(id)
                }
            })
            .await;

        assert_eq!(outcome.items.len(), 5);
        assert_eq!(outcome.summary.failed, 5);
        assert_eq!(outcome.summary.submitted, 10);
    }

    #[tokio::test]
    async fn panic_in_one_task_is_isolated() {
        let outcome = Dispatcher::new(2, 100)
            .run(locators(6), |url| async move {
                let id = id_of(&url);
                assert!(id != 4, "unexpected fault in task {id}");
                Ok::<_, String>(id)
            })
            .await;

        let mut ids = outcome.items;
        ids.sort_unstable();
        assert_eq!(ids, [1, 2, 3, 5, 6]);
        assert_eq!(outcome.summary.panicked, 1);
        assert_eq!(outcome.summary.succeeded, 5);
    }

    #[tokio::test]
    async fn observer_sees_every_completion() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        Dispatcher::new(2, 100)
            .with_observer(move |p| sink.lock().unwrap().push(p))
            .run(locators(4), |url| async move { Ok::<_, String>(url) })
            .await;

        let seen = seen.lock().unwrap();
        let completed: Vec<usize> = seen.iter().map(|p| p.completed).collect();
        assert_eq!(completed, [1, 2, 3, 4]);
        assert!(seen.iter().all(|p| p.total == 4));
    }

    #[tokio::test]
    async fn progress_logged_every_n_and_at_the_end() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let outcome = Dispatcher::new(2, 2)
            .run(locators(5), |url| async move {
                let id = id_of(&url);
                if id == 3 {
                    Err(format!("boom {id}"))
                } else {
                    Ok(id)
                }
            })
            .await;

        assert_eq!(outcome.items.len(), 4);
        assert_eq!(outcome.summary.failed, 1);
        assert_eq!(logs.progress_lines(), ["2/5", "4/5", "5/5"]);
    }

    #[tokio::test]
    async fn empty_input_returns_immediately() {
        let outcome = Dispatcher::new(20, 100)
            .run(Vec::new(), |url| async move { Ok::<_, String>(url) })
            .await;
        assert!(outcome.items.is_empty());
        assert_eq!(outcome.summary.submitted, 0);
    }

    #[test]
    fn zero_limit_is_clamped() {
        assert_eq!(Dispatcher::new(0, 0).limit(), 1);
    }

    #[test]
    fn panic_message_reads_both_payload_kinds() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "borrowed");
    }
}
