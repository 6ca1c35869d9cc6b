//! Observability hooks invoked around every pool run.

use std::time::Duration;

use tracing::{error, info};

use crate::error::Error;

/// What a hook gets to see about one inference run.
///
/// `before_run` receives the input names with a zero duration; `after_run`
/// receives everything, with `output_names` empty when the run failed.
#[derive(Debug, Clone, Default)]
pub struct RunInfo {
	pub input_names: Vec<String>,
	pub output_names: Vec<String>,
	pub duration: Duration,
	pub error: Option<Error>
}

/// Callbacks around inference execution, for metrics, logging, or tracing.
///
/// ```
/// # use dynort::{RunHook, RunInfo};
/// struct LatencyHook;
///
/// impl RunHook for LatencyHook {
/// 	fn after_run(&self, info: &RunInfo) {
/// 		eprintln!("inference took {:?}", info.duration);
/// 	}
/// }
/// ```
pub trait RunHook: Send + Sync {
	/// Called before inference starts.
	fn before_run(&self, info: &RunInfo) {
		let _ = info;
	}

	/// Called after inference completes or fails.
	fn after_run(&self, info: &RunInfo);
}

/// Adapts a plain function into a [`RunHook`] whose `before_run` is a no-op.
pub struct AfterRun<F>(F);

impl<F: Fn(&RunInfo) + Send + Sync> AfterRun<F> {
	pub fn new(f: F) -> Self {
		AfterRun(f)
	}
}

impl<F: Fn(&RunInfo) + Send + Sync> RunHook for AfterRun<F> {
	fn after_run(&self, info: &RunInfo) {
		(self.0)(info);
	}
}

/// A [`RunHook`] that emits a structured [`tracing`] event per run: info on
/// success, error on failure, with duration and names as fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl RunHook for TracingHook {
	fn after_run(&self, info: &RunInfo) {
		match &info.error {
			Some(e) => error!(
				duration_us = info.duration.as_micros() as u64,
				inputs = ?info.input_names,
				error = %e,
				"inference failed"
			),
			None => info!(
				duration_us = info.duration.as_micros() as u64,
				inputs = ?info.input_names,
				outputs = ?info.output_names,
				"inference completed"
			)
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{
		Arc,
		atomic::{AtomicUsize, Ordering}
	};

	use super::*;

	#[test]
	fn after_run_adapter_invokes_function() {
		let calls = Arc::new(AtomicUsize::new(0));
		let calls_ = Arc::clone(&calls);
		let hook = AfterRun::new(move |_info: &RunInfo| {
			calls_.fetch_add(1, Ordering::SeqCst);
		});

		let info = RunInfo {
			input_names: vec!["input".into()],
			..Default::default()
		};
		hook.before_run(&info);
		hook.after_run(&info);
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn tracing_hook_handles_both_outcomes() {
		let hook = TracingHook;
		hook.after_run(&RunInfo::default());
		hook.after_run(&RunInfo {
			error: Some(Error::new(crate::ErrorCode::GenericFailure, "boom")),
			duration: Duration::from_millis(3),
			..Default::default()
		});
	}
}
