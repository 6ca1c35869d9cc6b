use std::{
	ffi::CString,
	path::PathBuf,
	ptr::{self, NonNull}
};

use crate::{
	LogLevel, Runtime,
	error::{Error, ErrorCode, Result},
	ortsys, util
};

/// ONNX Runtime graph optimization levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphOptimizationLevel {
	/// No graph optimizations.
	Disable,
	/// Basic optimizations (constant folding, redundant node elimination).
	Basic,
	/// Basic plus extended optimizations (node fusions).
	Extended,
	/// All available optimizations, including layout transformations.
	All
}

impl From<GraphOptimizationLevel> for dynort_sys::GraphOptimizationLevel {
	fn from(value: GraphOptimizationLevel) -> Self {
		match value {
			GraphOptimizationLevel::Disable => Self::ORT_DISABLE_ALL,
			GraphOptimizationLevel::Basic => Self::ORT_ENABLE_BASIC,
			GraphOptimizationLevel::Extended => Self::ORT_ENABLE_EXTENDED,
			GraphOptimizationLevel::All => Self::ORT_ENABLE_ALL
		}
	}
}

/// Sequential vs. parallel execution of independent graph operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
	Sequential,
	Parallel
}

impl From<ExecutionMode> for dynort_sys::ExecutionMode {
	fn from(value: ExecutionMode) -> Self {
		match value {
			ExecutionMode::Sequential => Self::ORT_SEQUENTIAL,
			ExecutionMode::Parallel => Self::ORT_PARALLEL
		}
	}
}

/// An execution provider to register at session creation, by name, with
/// optional provider-specific configuration.
#[derive(Debug, Clone, Default)]
pub struct ExecutionProvider {
	pub name: String,
	pub options: Vec<(String, String)>
}

impl ExecutionProvider {
	pub fn new(name: impl Into<String>) -> Self {
		ExecutionProvider {
			name: name.into(),
			options: Vec::new()
		}
	}

	pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.options.push((key.into(), value.into()));
		self
	}
}

/// Configuration consumed while creating a [`Session`](crate::Session).
///
/// Unset options leave the corresponding ONNX Runtime default in place; the
/// tri-state toggles (`cpu_mem_arena`, `memory_pattern`,
/// `deterministic_compute`) distinguish "leave default" from an explicit
/// enable or disable.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
	intra_threads: Option<usize>,
	inter_threads: Option<usize>,
	pub(crate) execution_providers: Vec<ExecutionProvider>,
	optimization_level: Option<GraphOptimizationLevel>,
	execution_mode: Option<ExecutionMode>,
	cpu_mem_arena: Option<bool>,
	memory_pattern: Option<bool>,
	deterministic_compute: Option<bool>,
	log_severity: Option<LogLevel>,
	free_dimension_overrides: Vec<(String, i64)>,
	config_entries: Vec<(String, String)>,
	profiling_prefix: Option<PathBuf>,
	optimized_model_path: Option<PathBuf>,
	disable_per_session_threads: bool
}

impl SessionOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of threads used to parallelize execution within operators.
	pub fn with_intra_threads(mut self, threads: usize) -> Self {
		self.intra_threads = Some(threads);
		self
	}

	/// Number of threads used to parallelize execution across independent
	/// operators.
	pub fn with_inter_threads(mut self, threads: usize) -> Self {
		self.inter_threads = Some(threads);
		self
	}

	/// Execution providers to register, in preference order.
	pub fn with_execution_providers(mut self, providers: impl IntoIterator<Item = ExecutionProvider>) -> Self {
		self.execution_providers.extend(providers);
		self
	}

	pub fn with_optimization_level(mut self, level: GraphOptimizationLevel) -> Self {
		self.optimization_level = Some(level);
		self
	}

	pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
		self.execution_mode = Some(mode);
		self
	}

	/// Explicitly enables or disables the CPU memory arena.
	pub fn with_cpu_mem_arena(mut self, enable: bool) -> Self {
		self.cpu_mem_arena = Some(enable);
		self
	}

	/// Explicitly enables or disables memory-pattern optimization.
	pub fn with_memory_pattern(mut self, enable: bool) -> Self {
		self.memory_pattern = Some(enable);
		self
	}

	/// Explicitly enables or disables deterministic compute.
	pub fn with_deterministic_compute(mut self, enable: bool) -> Self {
		self.deterministic_compute = Some(enable);
		self
	}

	/// Overrides the environment's log severity for this session.
	pub fn with_log_severity(mut self, level: LogLevel) -> Self {
		self.log_severity = Some(level);
		self
	}

	/// Fixes a named symbolic dimension to a concrete size.
	pub fn with_free_dimension_override(mut self, dimension: impl Into<String>, size: i64) -> Self {
		self.free_dimension_overrides.push((dimension.into(), size));
		self
	}

	/// Adds a free-form session configuration entry.
	pub fn with_config_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.config_entries.push((key.into(), value.into()));
		self
	}

	/// Enables profiling; ONNX Runtime writes `<prefix>_<timestamp>.json`,
	/// and [`Session::end_profiling`](crate::Session::end_profiling) returns
	/// the exact path.
	pub fn with_profiling(mut self, prefix: impl Into<PathBuf>) -> Self {
		self.profiling_prefix = Some(prefix.into());
		self
	}

	/// Serializes the post-optimization model to the given path during
	/// session construction.
	pub fn with_optimized_model_output(mut self, path: impl Into<PathBuf>) -> Self {
		self.optimized_model_path = Some(path.into());
		self
	}

	/// Opts this session out of creating its own thread pools. Required for
	/// sessions created from an environment with global thread pools.
	pub fn with_disabled_per_session_threads(mut self) -> Self {
		self.disable_per_session_threads = true;
		self
	}

	/// Builds and configures the native session-options object. The returned
	/// guard releases the handle when dropped; session construction consumes
	/// it before that.
	pub(crate) fn build(&self, runtime: &Runtime) -> Result<RawSessionOptions> {
		let mut ptr: *mut dynort_sys::OrtSessionOptions = ptr::null_mut();
		ortsys![unsafe runtime, CreateSessionOptions(&mut ptr)?];
		let raw = RawSessionOptions {
			ptr: NonNull::new(ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`CreateSessionOptions` returned null"))?,
			runtime: runtime.clone()
		};
		let ptr = raw.ptr();

		if let Some(threads) = self.intra_threads {
			ortsys![unsafe runtime, SetIntraOpNumThreads(ptr, threads as _)?];
		}
		if let Some(threads) = self.inter_threads {
			ortsys![unsafe runtime, SetInterOpNumThreads(ptr, threads as _)?];
		}
		if let Some(level) = self.optimization_level {
			ortsys![unsafe runtime, SetSessionGraphOptimizationLevel(ptr, level.into())?];
		}
		if let Some(mode) = self.execution_mode {
			ortsys![unsafe runtime, SetSessionExecutionMode(ptr, mode.into())?];
		}
		match self.cpu_mem_arena {
			Some(true) => ortsys![unsafe runtime, EnableCpuMemArena(ptr)?],
			Some(false) => ortsys![unsafe runtime, DisableCpuMemArena(ptr)?],
			None => {}
		}
		match self.memory_pattern {
			Some(true) => ortsys![unsafe runtime, EnableMemPattern(ptr)?],
			Some(false) => ortsys![unsafe runtime, DisableMemPattern(ptr)?],
			None => {}
		}
		if let Some(deterministic) = self.deterministic_compute {
			ortsys![unsafe runtime, SetDeterministicCompute(ptr, deterministic)?];
		}
		if let Some(level) = self.log_severity {
			ortsys![unsafe runtime, SetSessionLogSeverityLevel(ptr, level.severity())?];
		}
		for (dimension, size) in &self.free_dimension_overrides {
			let dimension = CString::new(dimension.as_str())?;
			ortsys![unsafe runtime, AddFreeDimensionOverrideByName(ptr, dimension.as_ptr(), *size)?];
		}
		for (key, value) in &self.config_entries {
			let key = CString::new(key.as_str())?;
			let value = CString::new(value.as_str())?;
			ortsys![unsafe runtime, AddSessionConfigEntry(ptr, key.as_ptr(), value.as_ptr())?];
		}
		if let Some(prefix) = &self.profiling_prefix {
			let prefix = util::path_to_os_char(prefix);
			ortsys![unsafe runtime, EnableProfiling(ptr, prefix.as_ptr())?];
		}
		if let Some(path) = &self.optimized_model_path {
			let path = util::path_to_os_char(path);
			ortsys![unsafe runtime, SetOptimizedModelFilePath(ptr, path.as_ptr())?];
		}
		if self.disable_per_session_threads {
			ortsys![unsafe runtime, DisablePerSessionThreads(ptr)?];
		}

		for provider in &self.execution_providers {
			let name = CString::new(provider.name.as_str())?;
			let keys = provider.options.iter().map(|(k, _)| CString::new(k.as_str())).collect::<Result<Vec<_>, _>>()?;
			let values = provider.options.iter().map(|(_, v)| CString::new(v.as_str())).collect::<Result<Vec<_>, _>>()?;
			let key_ptrs = keys.iter().map(|k| k.as_ptr()).collect::<Vec<_>>();
			let value_ptrs = values.iter().map(|v| v.as_ptr()).collect::<Vec<_>>();
			ortsys![
				unsafe runtime,
				SessionOptionsAppendExecutionProvider(
					ptr,
					name.as_ptr(),
					if key_ptrs.is_empty() { ptr::null() } else { key_ptrs.as_ptr() },
					if value_ptrs.is_empty() { ptr::null() } else { value_ptrs.as_ptr() },
					key_ptrs.len()
				)?
			];
		}

		Ok(raw)
	}
}

/// Owns a native `OrtSessionOptions` for the duration of session creation.
pub(crate) struct RawSessionOptions {
	ptr: NonNull<dynort_sys::OrtSessionOptions>,
	runtime: Runtime
}

impl RawSessionOptions {
	pub(crate) fn ptr(&self) -> *mut dynort_sys::OrtSessionOptions {
		self.ptr.as_ptr()
	}
}

impl Drop for RawSessionOptions {
	fn drop(&mut self) {
		let rt = &self.runtime;
		ortsys![unsafe rt, ReleaseSessionOptions(self.ptr.as_ptr())];
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builder_accumulates_state() {
		let options = SessionOptions::new()
			.with_intra_threads(4)
			.with_inter_threads(2)
			.with_optimization_level(GraphOptimizationLevel::All)
			.with_execution_mode(ExecutionMode::Parallel)
			.with_cpu_mem_arena(false)
			.with_memory_pattern(true)
			.with_deterministic_compute(true)
			.with_log_severity(LogLevel::Error)
			.with_free_dimension_override("batch", 1)
			.with_config_entry("session.intra_op.allow_spinning", "0")
			.with_disabled_per_session_threads();
		assert_eq!(options.intra_threads, Some(4));
		assert_eq!(options.inter_threads, Some(2));
		assert_eq!(options.cpu_mem_arena, Some(false));
		assert_eq!(options.memory_pattern, Some(true));
		assert_eq!(options.deterministic_compute, Some(true));
		assert_eq!(options.free_dimension_overrides, vec![("batch".to_string(), 1)]);
		assert!(options.disable_per_session_threads);
	}

	#[test]
	fn defaults_leave_everything_unset() {
		let options = SessionOptions::default();
		assert_eq!(options.intra_threads, None);
		assert_eq!(options.cpu_mem_arena, None);
		assert_eq!(options.memory_pattern, None);
		assert_eq!(options.deterministic_compute, None);
		assert!(options.execution_providers.is_empty());
		assert!(!options.disable_per_session_threads);
	}

	#[test]
	fn provider_options_preserve_order() {
		let provider = ExecutionProvider::new("CUDAExecutionProvider")
			.with_option("device_id", "0")
			.with_option("gpu_mem_limit", "2147483648");
		assert_eq!(provider.options[0].0, "device_id");
		assert_eq!(provider.options[1].0, "gpu_mem_limit");
	}
}
