use std::future::Future;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tokio::time::{sleep, Duration, Instant};

use crate::connect_types::ConnectKeyValue;
use crate::internals::{BoxError, Connector, SourceTask};

const BLOCK_ON_CONDITION_CHECK_FREQ: Duration = Duration::from_millis(5);

/// Wait until `f` returns `true`, panicking if that takes longer than `timeout`.
pub(crate) async fn block_on<F, Fut>(f: F, timeout: Duration)
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    loop {
        if f().await {
            break;
        }

        assert!(Instant::now().duration_since(start) < timeout, "Timed out waiting on desired condition");
        sleep(BLOCK_ON_CONDITION_CHECK_FREQ).await;
    }
}

type Behaviour = Box<dyn Fn(usize) -> Result<bool, BoxError> + Send + Sync>;

/// [`SourceTask`] that records how its commits are invoked.
pub(crate) struct MockSourceTask {
    delay: Duration,
    behaviour: Behaviour,
    started: AtomicUsize,
    completed: AtomicUsize,
    in_flight: Arc<AtomicUsize>,
    max_concurrency: AtomicUsize,
}

impl MockSourceTask {
    /// Each commit sleeps for `delay`, then returns whatever `behaviour` returns
    /// when given the (zero-based) number of the commit.
    pub(crate) fn new<B>(delay: Duration, behaviour: B) -> Arc<Self>
    where
        B: Fn(usize) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        Self::build(delay, Box::new(behaviour), Arc::new(AtomicUsize::new(0)))
    }

    pub(crate) fn succeeding() -> Arc<Self> {
        Self::new(Duration::ZERO, |_| Ok(true))
    }

    /// Like [`Self::new`], with commits that always succeed, counting in-flight commits on
    /// a counter shared with other tasks.
    pub(crate) fn with_in_flight(delay: Duration, in_flight: Arc<AtomicUsize>) -> Arc<Self> {
        Self::build(delay, Box::new(|_| Ok(true)), in_flight)
    }

    fn build(delay: Duration, behaviour: Behaviour, in_flight: Arc<AtomicUsize>) -> Arc<Self> {
        Arc::new(Self {
            delay,
            behaviour,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            in_flight,
            max_concurrency: AtomicUsize::new(0),
        })
    }

    /// Commits completed so far, whatever their outcome.
    pub(crate) fn commits(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of in-flight commits observed when one of the commits of this task started.
    pub(crate) fn max_concurrency(&self) -> usize {
        self.max_concurrency.load(Ordering::SeqCst)
    }
}

/// Marks a commit as completed when dropped, even while unwinding from a panic.
struct CompletionGuard<'a>(&'a MockSourceTask);

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.0.completed.fetch_add(1, Ordering::SeqCst);
    }
}

impl SourceTask for MockSourceTask {
    fn commit_offsets(&self) -> Result<bool, BoxError> {
        let n = self.started.fetch_add(1, Ordering::SeqCst);
        let concurrency = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrency.fetch_max(concurrency, Ordering::SeqCst);
        let _guard = CompletionGuard(self);

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        (self.behaviour)(n)
    }
}

/// [`Connector`] that returns a fixed list of partial Task configurations.
pub(crate) struct MockConnector {
    pub(crate) task_class: String,
    pub(crate) partial_configs: Vec<ConnectKeyValue>,
    pub(crate) requested_max_tasks: AtomicUsize,
}

impl MockConnector {
    pub(crate) fn new(task_class: &str, partial_configs: Vec<ConnectKeyValue>) -> Self {
        Self {
            task_class: task_class.to_string(),
            partial_configs,
            requested_max_tasks: AtomicUsize::new(0),
        }
    }

    pub(crate) fn requested_max_tasks(&self) -> usize {
        self.requested_max_tasks.load(Ordering::SeqCst)
    }
}

impl Connector for MockConnector {
    fn task_configs(&self, max_tasks: i32) -> Vec<ConnectKeyValue> {
        self.requested_max_tasks.store(max_tasks as usize, Ordering::SeqCst);
        self.partial_configs.clone()
    }

    fn task_class(&self) -> &str {
        &self.task_class
    }
}
