//! A fixed-size pool of inference sessions for safe concurrent use.
//!
//! Native sessions are not concurrency-safe, so the pool serialises access
//! per session while letting many callers run at once: each run checks a
//! session out, executes, and returns it on every exit path.

use std::{
	fmt,
	path::Path,
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering}
	},
	time::{Duration, Instant}
};

use parking_lot::Mutex;
use tokio::sync::{Notify, Semaphore};

use crate::{
	Environment, PrepackedWeightsContainer, Session, SessionOptions,
	error::{Error, ErrorCode, Result},
	hooks::{RunHook, RunInfo},
	session::{RunSpec, ValueMap}
};

/// Configuration for a [`SessionPool`].
#[derive(Default)]
pub struct PoolConfig {
	/// Options applied to every session in the pool.
	pub session_options: SessionOptions,
	/// Hooks invoked around every run.
	pub hooks: Vec<Arc<dyn RunHook>>,
	/// Share one prepacked-weights container across all pool sessions, so
	/// packed kernel weights are allocated once instead of per session.
	pub share_prepacked_weights: bool
}

impl fmt::Debug for PoolConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PoolConfig")
			.field("session_options", &self.session_options)
			.field("hooks", &self.hooks.len())
			.field("share_prepacked_weights", &self.share_prepacked_weights)
			.finish()
	}
}

/// A coherent snapshot of the pool's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
	pub total_runs: u64,
	pub total_errors: u64,
	pub total_latency: Duration,
	pub pool_size: usize,
	pub available: usize
}

impl PoolStats {
	/// Average run latency, or zero if no runs completed.
	pub fn avg_latency(&self) -> Duration {
		if self.total_runs == 0 {
			Duration::ZERO
		} else {
			Duration::from_nanos(self.total_latency.as_nanos() as u64 / self.total_runs)
		}
	}
}

/// A fixed-size pool of [`Session`]s loaded from the same model.
///
/// Cloning is cheap and shares the pool.
///
/// ```no_run
/// # use dynort::{Environment, LogLevel, Runtime, Value, pool::SessionPool};
/// # async fn demo() -> dynort::Result<()> {
/// # let runtime = Runtime::load("", 23)?;
/// # let env = Environment::new(&runtime, "app", LogLevel::Warning)?;
/// let pool = SessionPool::from_file(&env, "model.onnx", 8, Default::default())?;
///
/// // safe to call from many tasks at once:
/// let input = Value::from_vec(&runtime, vec![1.0_f32; 10], &[1, 10])?;
/// let inputs = [("input".to_string(), input)].into();
/// let outputs = pool.run(&inputs, &Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionPool {
	inner: Arc<PoolInner>
}

impl std::fmt::Debug for SessionPool {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionPool").field("capacity", &self.inner.capacity).finish_non_exhaustive()
	}
}

struct PoolInner {
	/// Idle sessions. Invariant: holding a semaphore permit guarantees a
	/// pop succeeds, because permits and idle entries move together.
	idle: Mutex<Vec<Session>>,
	slots: Semaphore,
	capacity: usize,
	closed: AtomicBool,
	in_flight: AtomicUsize,
	drained: Notify,
	total_runs: AtomicU64,
	total_errors: AtomicU64,
	total_latency_ns: AtomicU64,
	input_names: Vec<String>,
	output_names: Vec<String>,
	hooks: Vec<Arc<dyn RunHook>>,
	/// Destroyed in `close`, strictly after every session is gone.
	prepacked: Mutex<Option<PrepackedWeightsContainer>>
}

impl SessionPool {
	/// Creates a pool of `size` sessions from in-memory model data.
	pub fn from_bytes(env: &Environment, model: &[u8], size: usize, config: PoolConfig) -> Result<Self> {
		if model.is_empty() {
			return Err(Error::new(ErrorCode::EmptyModel, "model data must not be empty"));
		}
		Self::build(env, size, config, |env, options, prepacked| Session::from_bytes_with_prepacked(env, model, options, prepacked))
	}

	/// Creates a pool of `size` sessions from a model file.
	pub fn from_file(env: &Environment, model_path: impl AsRef<Path>, size: usize, config: PoolConfig) -> Result<Self> {
		let model_path = model_path.as_ref();
		Self::build(env, size, config, |env, options, prepacked| {
			Session::from_file_with_prepacked(env, model_path, options, prepacked)
		})
	}

	fn build(
		env: &Environment,
		size: usize,
		config: PoolConfig,
		create: impl Fn(&Environment, &SessionOptions, Option<&PrepackedWeightsContainer>) -> Result<Session>
	) -> Result<Self> {
		if size == 0 {
			return Err(Error::new(ErrorCode::InvalidArgument, "pool size must be at least 1"));
		}

		let prepacked = if config.share_prepacked_weights {
			Some(PrepackedWeightsContainer::new(env.runtime())?)
		} else {
			None
		};

		let mut sessions = Vec::with_capacity(size);
		for index in 0..size {
			match create(env, &config.session_options, prepacked.as_ref()) {
				Ok(session) => sessions.push(session),
				Err(e) => {
					// already-created sessions must go before the container
					drop(sessions);
					return Err(Error::new(e.code(), format!("failed to create pool session {index}: {}", e.message())));
				}
			}
		}

		let input_names = sessions[0].input_names().to_vec();
		let output_names = sessions[0].output_names().to_vec();

		Ok(SessionPool {
			inner: Arc::new(PoolInner {
				idle: Mutex::new(sessions),
				slots: Semaphore::new(size),
				capacity: size,
				closed: AtomicBool::new(false),
				in_flight: AtomicUsize::new(0),
				drained: Notify::new(),
				total_runs: AtomicU64::new(0),
				total_errors: AtomicU64::new(0),
				total_latency_ns: AtomicU64::new(0),
				input_names,
				output_names,
				hooks: config.hooks,
				prepacked: Mutex::new(prepacked)
			})
		})
	}

	/// Checks a session out, executes the model, and returns the session —
	/// on success, error, cancellation, and panic alike.
	///
	/// Blocks (asynchronously) until a session is available; checkout is
	/// FIFO-fair across waiters. The spec's cancellation token is observed
	/// before checkout, while waiting, and during the native call.
	pub async fn run(&self, inputs: &ValueMap, spec: &RunSpec) -> Result<ValueMap> {
		let inner = &*self.inner;
		if inner.closed.load(Ordering::Acquire) {
			return Err(pool_closed());
		}

		let _flight = FlightGuard::enter(inner);

		if let Some(token) = spec.cancellation() {
			if token.is_cancelled() {
				return Err(cancelled());
			}
		}

		let permit = match spec.cancellation() {
			Some(token) => tokio::select! {
				permit = inner.slots.acquire() => permit.map_err(|_| pool_closed())?,
				_ = token.cancelled() => return Err(cancelled())
			},
			None => inner.slots.acquire().await.map_err(|_| pool_closed())?
		};
		if inner.closed.load(Ordering::Acquire) {
			return Err(pool_closed());
		}
		permit.forget();

		let session = inner
			.idle
			.lock()
			.pop()
			.unwrap_or_else(|| unreachable!("semaphore permit held but no idle session"));
		let mut checkout = CheckoutGuard { inner, session: Some(session) };

		let mut info = RunInfo {
			input_names: inputs.keys().cloned().collect(),
			..Default::default()
		};
		for hook in &inner.hooks {
			hook.before_run(&info);
		}

		let start = Instant::now();
		let result = checkout.session_mut().run(inputs, spec).await;
		let elapsed = start.elapsed();

		inner.total_runs.fetch_add(1, Ordering::Relaxed);
		inner.total_latency_ns.fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
		if result.is_err() {
			inner.total_errors.fetch_add(1, Ordering::Relaxed);
		}

		info.duration = elapsed;
		match &result {
			Ok(outputs) => info.output_names = outputs.keys().cloned().collect(),
			Err(e) => info.error = Some(e.clone())
		}
		for hook in &inner.hooks {
			hook.after_run(&info);
		}

		result
	}

	/// Runs the model once per pool slot with the given inputs, discarding
	/// the outputs, so every session allocates its internal buffers before
	/// real traffic arrives. Cancellation is respected between iterations.
	pub async fn warmup(&self, inputs: &ValueMap, spec: &RunSpec) -> Result<()> {
		for _ in 0..self.inner.capacity {
			if let Some(token) = spec.cancellation() {
				if token.is_cancelled() {
					return Err(cancelled());
				}
			}
			self.run(inputs, spec).await?;
		}
		Ok(())
	}

	/// Runs the model once with the given inputs, reporting only success or
	/// the underlying error.
	pub async fn health_check(&self, inputs: &ValueMap) -> Result<()> {
		self.run(inputs, &RunSpec::new()).await.map(|_| ())
	}

	/// The model's input names, as declared (cached from the first session).
	pub fn input_names(&self) -> &[String] {
		&self.inner.input_names
	}

	/// The model's output names, as declared (cached from the first session).
	pub fn output_names(&self) -> &[String] {
		&self.inner.output_names
	}

	/// Total number of sessions in the pool.
	pub fn size(&self) -> usize {
		self.inner.capacity
	}

	/// Number of idle sessions currently available.
	pub fn available(&self) -> usize {
		self.inner.slots.available_permits()
	}

	/// Returns a snapshot of the pool's counters.
	pub fn stats(&self) -> PoolStats {
		PoolStats {
			total_runs: self.inner.total_runs.load(Ordering::Relaxed),
			total_errors: self.inner.total_errors.load(Ordering::Relaxed),
			total_latency: Duration::from_nanos(self.inner.total_latency_ns.load(Ordering::Relaxed)),
			pool_size: self.inner.capacity,
			available: self.inner.slots.available_permits()
		}
	}

	/// Zeroes the run, error, and latency counters.
	pub fn reset_stats(&self) {
		self.inner.total_runs.store(0, Ordering::Relaxed);
		self.inner.total_errors.store(0, Ordering::Relaxed);
		self.inner.total_latency_ns.store(0, Ordering::Relaxed);
	}

	/// Closes the pool: rejects new runs, waits for in-flight runs to
	/// drain, then destroys every session (and the shared prepacked-weights
	/// container, if any, strictly after the sessions).
	///
	/// Safe to call multiple times; only the first call does the work.
	pub async fn close(&self) {
		let inner = &*self.inner;
		if inner.closed.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
			return;
		}
		inner.slots.close();

		while inner.in_flight.load(Ordering::Acquire) != 0 {
			let notified = inner.drained.notified();
			if inner.in_flight.load(Ordering::Acquire) == 0 {
				break;
			}
			notified.await;
		}

		let sessions = std::mem::take(&mut *inner.idle.lock());
		drop(sessions);
		let container = inner.prepacked.lock().take();
		drop(container);
	}

	/// Whether [`close`](Self::close) has been initiated.
	pub fn is_closed(&self) -> bool {
		self.inner.closed.load(Ordering::Acquire)
	}
}

fn pool_closed() -> Error {
	Error::new(ErrorCode::PoolClosed, "session pool is closed")
}

fn cancelled() -> Error {
	Error::new(ErrorCode::Cancelled, "run cancelled before execution")
}

/// Tracks one caller through the checkout protocol; the decrement (and the
/// drain notification close waits on) happens on every exit path.
struct FlightGuard<'p> {
	inner: &'p PoolInner
}

impl<'p> FlightGuard<'p> {
	fn enter(inner: &'p PoolInner) -> Self {
		inner.in_flight.fetch_add(1, Ordering::AcqRel);
		FlightGuard { inner }
	}
}

impl Drop for FlightGuard<'_> {
	fn drop(&mut self) {
		if self.inner.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
			self.inner.drained.notify_waiters();
		}
	}
}

/// Owns a checked-out session until the run finishes. On drop the session
/// goes back to the idle list (pool open) or is destroyed (pool closing);
/// because this runs in `Drop`, a panicking hook cannot leak a session.
struct CheckoutGuard<'p> {
	inner: &'p PoolInner,
	session: Option<Session>
}

impl CheckoutGuard<'_> {
	fn session_mut(&mut self) -> &mut Session {
		self.session.as_mut().unwrap_or_else(|| unreachable!("session taken before drop"))
	}
}

impl Drop for CheckoutGuard<'_> {
	fn drop(&mut self) {
		if let Some(session) = self.session.take() {
			if self.inner.closed.load(Ordering::Acquire) {
				drop(session);
			} else {
				self.inner.idle.lock().push(session);
				self.inner.slots.add_permits(1);
			}
		}
	}
}
