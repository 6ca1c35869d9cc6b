use std::{
	ffi::CString,
	ptr::{self, NonNull},
	sync::Arc
};

use tracing::debug;

use crate::{LogLevel, Runtime, error::Result, ortsys};

/// A logging-scoped ONNX Runtime environment, under which sessions are
/// created.
///
/// Cloning is cheap; every [`Session`](crate::Session) holds a clone of its
/// environment so the native handle outlives all of its children.
#[derive(Debug, Clone)]
pub struct Environment {
	inner: Arc<EnvironmentInner>
}

#[derive(Debug)]
struct EnvironmentInner {
	ptr: NonNull<dynort_sys::OrtEnv>,
	has_global_thread_pools: bool,
	runtime: Runtime
}

unsafe impl Send for EnvironmentInner {}
unsafe impl Sync for EnvironmentInner {}

impl Drop for EnvironmentInner {
	fn drop(&mut self) {
		debug!(ptr = ?self.ptr, "releasing environment");
		let rt = &self.runtime;
		ortsys![unsafe rt, ReleaseEnv(self.ptr.as_ptr())];
	}
}

impl Environment {
	/// Creates an environment with the given log identifier and level.
	pub fn new(runtime: &Runtime, log_id: impl AsRef<str>, log_level: LogLevel) -> Result<Self> {
		let log_id = CString::new(log_id.as_ref())?;
		let mut env_ptr: *mut dynort_sys::OrtEnv = ptr::null_mut();
		ortsys![unsafe runtime, CreateEnv(log_level.into(), log_id.as_ptr(), &mut env_ptr)?];
		Ok(Environment {
			inner: Arc::new(EnvironmentInner {
				ptr: unsafe { NonNull::new_unchecked(env_ptr) },
				has_global_thread_pools: false,
				runtime: runtime.clone()
			})
		})
	}

	/// Creates an environment whose sessions share the global thread pools
	/// described by `options`.
	///
	/// Sessions created from this environment must set
	/// [`SessionOptions::with_disabled_per_session_threads`](crate::SessionOptions::with_disabled_per_session_threads)
	/// to actually use the shared pools instead of spawning their own.
	pub fn with_global_thread_pools(runtime: &Runtime, log_id: impl AsRef<str>, log_level: LogLevel, options: &ThreadingOptions) -> Result<Self> {
		let log_id = CString::new(log_id.as_ref())?;
		let mut env_ptr: *mut dynort_sys::OrtEnv = ptr::null_mut();
		ortsys![unsafe runtime, CreateEnvWithGlobalThreadPools(log_level.into(), log_id.as_ptr(), options.ptr.as_ptr(), &mut env_ptr)?];
		Ok(Environment {
			inner: Arc::new(EnvironmentInner {
				ptr: unsafe { NonNull::new_unchecked(env_ptr) },
				has_global_thread_pools: true,
				runtime: runtime.clone()
			})
		})
	}

	/// Enables telemetry event collection. Telemetry is on by default;
	/// this only matters after a [`disable_telemetry`](Self::disable_telemetry).
	pub fn enable_telemetry(&self) -> Result<()> {
		let rt = self.runtime();
		ortsys![unsafe rt, EnableTelemetryEvents(self.ptr())?];
		Ok(())
	}

	/// Disables telemetry event collection.
	pub fn disable_telemetry(&self) -> Result<()> {
		let rt = self.runtime();
		ortsys![unsafe rt, DisableTelemetryEvents(self.ptr())?];
		Ok(())
	}

	/// Whether this environment was created with global thread pools.
	pub fn has_global_thread_pools(&self) -> bool {
		self.inner.has_global_thread_pools
	}

	pub fn runtime(&self) -> &Runtime {
		&self.inner.runtime
	}

	pub(crate) fn ptr(&self) -> *const dynort_sys::OrtEnv {
		self.inner.ptr.as_ptr()
	}
}

/// Configuration for the global thread pools shared by all sessions of an
/// environment created via [`Environment::with_global_thread_pools`].
///
/// ```no_run
/// # use dynort::{Environment, LogLevel, Runtime, ThreadingOptions};
/// # fn main() -> dynort::Result<()> {
/// # let runtime = Runtime::load("", 23)?;
/// let threading = ThreadingOptions::new(&runtime)?
/// 	.with_intra_threads(4)?
/// 	.with_inter_threads(2)?
/// 	.with_spin_control(false)?;
/// let env = Environment::with_global_thread_pools(&runtime, "app", LogLevel::Warning, &threading)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ThreadingOptions {
	ptr: NonNull<dynort_sys::OrtThreadingOptions>,
	runtime: Runtime
}

unsafe impl Send for ThreadingOptions {}

impl ThreadingOptions {
	pub fn new(runtime: &Runtime) -> Result<Self> {
		let mut ptr: *mut dynort_sys::OrtThreadingOptions = ptr::null_mut();
		ortsys![unsafe runtime, CreateThreadingOptions(&mut ptr)?];
		Ok(ThreadingOptions {
			ptr: unsafe { NonNull::new_unchecked(ptr) },
			runtime: runtime.clone()
		})
	}

	/// Number of threads used to parallelize execution within operators.
	pub fn with_intra_threads(self, threads: usize) -> Result<Self> {
		let rt = &self.runtime;
		ortsys![unsafe rt, SetGlobalIntraOpNumThreads(self.ptr.as_ptr(), threads as _)?];
		Ok(self)
	}

	/// Number of threads used to parallelize execution across independent
	/// operators.
	pub fn with_inter_threads(self, threads: usize) -> Result<Self> {
		let rt = &self.runtime;
		ortsys![unsafe rt, SetGlobalInterOpNumThreads(self.ptr.as_ptr(), threads as _)?];
		Ok(self)
	}

	/// Whether idle pool threads spin-wait for work instead of blocking.
	/// Spinning lowers latency at the cost of idle CPU.
	pub fn with_spin_control(self, allow_spinning: bool) -> Result<Self> {
		let rt = &self.runtime;
		ortsys![unsafe rt, SetGlobalSpinControl(self.ptr.as_ptr(), if allow_spinning { 1 } else { 0 })?];
		Ok(self)
	}
}

impl Drop for ThreadingOptions {
	fn drop(&mut self) {
		let rt = &self.runtime;
		ortsys![unsafe rt, ReleaseThreadingOptions(self.ptr.as_ptr())];
	}
}
