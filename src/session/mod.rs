mod options;
mod run_options;
mod type_info;

use std::{
	collections::HashMap,
	ffi::{CString, c_char},
	path::Path,
	ptr::{self, NonNull}
};

use tracing::debug;

pub use self::options::{ExecutionMode, ExecutionProvider, GraphOptimizationLevel, SessionOptions};
pub use self::run_options::RunSpec;
pub(crate) use self::run_options::ActiveRunOptions;
pub use self::type_info::{InputInfo, OutputInfo, TensorTypeInfo};
use crate::{
	Environment, PrepackedWeightsContainer, Value,
	char_p_to_string,
	error::{Error, ErrorCode, Result, status_to_result},
	ortsys, util
};

/// Inference inputs and outputs, keyed by the names the model declares.
pub type ValueMap = HashMap<String, Value>;

/// The name all ONNX Runtime builds are expected to provide, and the
/// fallback of [`Session::with_provider_fallback`].
pub const CPU_EXECUTION_PROVIDER: &str = "CPUExecutionProvider";

/// An inference session for one loaded model.
///
/// A session is not safe for concurrent runs; [`run`](Session::run) takes
/// `&mut self` to make that a compile-time property. To serve many
/// concurrent callers, put sessions in a [`SessionPool`](crate::SessionPool).
pub struct Session {
	ptr: NonNull<dynort_sys::OrtSession>,
	env: Environment,
	input_names: Vec<String>,
	output_names: Vec<String>,
	// null-terminated forms of the names above, cached so each run reuses
	// them instead of re-allocating per call
	input_cnames: Vec<CString>,
	output_cnames: Vec<CString>
}

unsafe impl Send for Session {}

impl std::fmt::Debug for Session {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Session")
			.field("inputs", &self.input_names)
			.field("outputs", &self.output_names)
			.finish()
	}
}

impl Session {
	/// Loads a model from a file path.
	pub fn from_file(env: &Environment, model_path: impl AsRef<Path>, options: &SessionOptions) -> Result<Session> {
		Self::from_file_with_prepacked(env, model_path, options, None)
	}

	/// Loads a model from an in-memory byte buffer.
	pub fn from_bytes(env: &Environment, model: &[u8], options: &SessionOptions) -> Result<Session> {
		Self::from_bytes_with_prepacked(env, model, options, None)
	}

	pub(crate) fn from_file_with_prepacked(
		env: &Environment,
		model_path: impl AsRef<Path>,
		options: &SessionOptions,
		prepacked: Option<&PrepackedWeightsContainer>
	) -> Result<Session> {
		let rt = env.runtime();
		let raw_options = options.build(rt)?;
		let path = util::path_to_os_char(model_path);

		let mut session_ptr: *mut dynort_sys::OrtSession = ptr::null_mut();
		match prepacked {
			Some(container) => {
				ortsys![
					unsafe rt,
					CreateSessionWithPrepackedWeightsContainer(env.ptr(), path.as_ptr(), raw_options.ptr(), container.ptr(), &mut session_ptr)?
				];
			}
			None => {
				ortsys![unsafe rt, CreateSession(env.ptr(), path.as_ptr(), raw_options.ptr(), &mut session_ptr)?];
			}
		}
		Self::wrap(env, session_ptr)
	}

	pub(crate) fn from_bytes_with_prepacked(
		env: &Environment,
		model: &[u8],
		options: &SessionOptions,
		prepacked: Option<&PrepackedWeightsContainer>
	) -> Result<Session> {
		if model.is_empty() {
			return Err(Error::new(ErrorCode::EmptyModel, "model data must not be empty"));
		}
		let rt = env.runtime();
		let raw_options = options.build(rt)?;

		let mut session_ptr: *mut dynort_sys::OrtSession = ptr::null_mut();
		match prepacked {
			Some(container) => {
				ortsys![
					unsafe rt,
					CreateSessionFromArrayWithPrepackedWeightsContainer(
						env.ptr(),
						model.as_ptr().cast(),
						model.len(),
						raw_options.ptr(),
						container.ptr(),
						&mut session_ptr
					)?
				];
			}
			None => {
				ortsys![unsafe rt, CreateSessionFromArray(env.ptr(), model.as_ptr().cast(), model.len(), raw_options.ptr(), &mut session_ptr)?];
			}
		}
		Self::wrap(env, session_ptr)
	}

	/// Creates a session trying each provider in preference order, falling
	/// back to the CPU provider if none of them is available or loads.
	/// Returns the session together with the name of the provider in use.
	pub fn with_provider_fallback(
		env: &Environment,
		model: &[u8],
		base_options: &SessionOptions,
		providers: &[ExecutionProvider]
	) -> Result<(Session, String)> {
		let available = env.runtime().available_providers()?;
		for provider in providers {
			if !available.iter().any(|name| name == &provider.name) {
				continue;
			}
			let mut options = base_options.clone();
			options.execution_providers = vec![provider.clone()];
			match Session::from_bytes(env, model, &options) {
				Ok(session) => return Ok((session, provider.name.clone())),
				Err(e) => debug!(provider = %provider.name, error = %e, "provider failed to load, trying next")
			}
		}

		let mut options = base_options.clone();
		options.execution_providers = Vec::new();
		let session = Session::from_bytes(env, model, &options)?;
		Ok((session, CPU_EXECUTION_PROVIDER.to_string()))
	}

	fn wrap(env: &Environment, session_ptr: *mut dynort_sys::OrtSession) -> Result<Session> {
		let ptr = NonNull::new(session_ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "session creation returned null"))?;
		let mut session = Session {
			ptr,
			env: env.clone(),
			input_names: Vec::new(),
			output_names: Vec::new(),
			input_cnames: Vec::new(),
			output_cnames: Vec::new()
		};
		// a failure here drops (and thus releases) the half-built session
		session.cache_names()?;
		Ok(session)
	}

	fn cache_names(&mut self) -> Result<()> {
		let rt = self.env.runtime().clone();

		let mut input_count = 0;
		ortsys![unsafe rt, SessionGetInputCount(self.ptr.as_ptr(), &mut input_count)?];
		for index in 0..input_count {
			let mut name_ptr: *mut c_char = ptr::null_mut();
			ortsys![unsafe rt, SessionGetInputName(self.ptr.as_ptr(), index, rt.allocator_ptr(), &mut name_ptr)?];
			let name = char_p_to_string(name_ptr);
			unsafe { rt.free(name_ptr) };
			let name = name?;
			self.input_cnames.push(CString::new(name.as_str())?);
			self.input_names.push(name);
		}

		let mut output_count = 0;
		ortsys![unsafe rt, SessionGetOutputCount(self.ptr.as_ptr(), &mut output_count)?];
		for index in 0..output_count {
			let mut name_ptr: *mut c_char = ptr::null_mut();
			ortsys![unsafe rt, SessionGetOutputName(self.ptr.as_ptr(), index, rt.allocator_ptr(), &mut name_ptr)?];
			let name = char_p_to_string(name_ptr);
			unsafe { rt.free(name_ptr) };
			let name = name?;
			self.output_cnames.push(CString::new(name.as_str())?);
			self.output_names.push(name);
		}

		Ok(())
	}

	/// The model's input names, in declaration order.
	pub fn input_names(&self) -> &[String] {
		&self.input_names
	}

	/// The model's output names, in declaration order.
	pub fn output_names(&self) -> &[String] {
		&self.output_names
	}

	pub fn environment(&self) -> &Environment {
		&self.env
	}

	pub(crate) fn ptr(&self) -> *mut dynort_sys::OrtSession {
		self.ptr.as_ptr()
	}

	/// Executes the model.
	///
	/// Inputs are looked up by name; an input the model declares but the map
	/// does not contain is passed as an empty slot (an optional input), and
	/// map keys the model does not declare are ignored. Outputs come back
	/// keyed by name, covering the subset requested in `spec` (all declared
	/// outputs by default).
	pub async fn run(&mut self, inputs: &ValueMap, spec: &RunSpec) -> Result<ValueMap> {
		let output_names: Vec<String> = match &spec.outputs {
			Some(subset) => subset.clone(),
			None => self.output_names.clone()
		};

		// null-terminated forms for any requested output missing from the
		// cache, allocated up front: once the watcher is spawned, the path to
		// the join must be infallible
		let mut scratch_cnames: Vec<CString> = Vec::new();
		for name in &output_names {
			if !self.output_names.contains(name) {
				scratch_cnames.push(CString::new(name.as_str())?);
			}
		}

		let rt = self.env.runtime().clone();
		let active = ActiveRunOptions::build(&rt, spec)?;

		// raw pointers are confined to this block so the future stays `Send`
		// across the join below
		let (result, outputs) = {
			let empty = CString::default();
			let mut input_name_ptrs: Vec<*const c_char> = Vec::with_capacity(self.input_names.len());
			let mut input_value_ptrs: Vec<*const dynort_sys::OrtValue> = Vec::with_capacity(self.input_names.len());
			for (index, name) in self.input_names.iter().enumerate() {
				match inputs.get(name) {
					Some(value) => {
						input_name_ptrs.push(self.input_cnames[index].as_ptr());
						input_value_ptrs.push(value.ptr());
					}
					None => {
						input_name_ptrs.push(empty.as_ptr());
						input_value_ptrs.push(ptr::null());
					}
				}
			}

			let mut scratch = scratch_cnames.iter();
			let mut output_name_ptrs: Vec<*const c_char> = Vec::with_capacity(output_names.len());
			for name in &output_names {
				match self.output_names.iter().position(|cached| cached == name) {
					Some(index) => output_name_ptrs.push(self.output_cnames[index].as_ptr()),
					None => {
						let cname = scratch.next().unwrap_or_else(|| unreachable!("scratch name missing for `{name}`"));
						output_name_ptrs.push(cname.as_ptr());
					}
				}
			}

			let mut output_ptrs: Vec<*mut dynort_sys::OrtValue> = vec![ptr::null_mut(); output_names.len()];
			let run_options_ptr = active.as_ref().map(|a| a.ptr()).unwrap_or(ptr::null());

			let status = util::blocking_call(|| {
				ortsys![
					unsafe rt,
					Run(
						self.ptr.as_ptr(),
						run_options_ptr,
						input_name_ptrs.as_ptr(),
						input_value_ptrs.as_ptr(),
						input_value_ptrs.len(),
						output_name_ptrs.as_ptr(),
						output_name_ptrs.len(),
						output_ptrs.as_mut_ptr()
					)
				]
			});
			let result = status_to_result(rt.api(), status);

			let mut outputs = ValueMap::with_capacity(output_names.len());
			for (name, value_ptr) in output_names.into_iter().zip(output_ptrs) {
				if let Some(value_ptr) = NonNull::new(value_ptr) {
					outputs.insert(name, Value::from_raw(rt.clone(), value_ptr));
				}
			}
			(result, outputs)
		};

		// join the watcher before the run options are released
		if let Some(active) = active {
			active.finish().await;
		}
		result?;
		Ok(outputs)
	}

	/// Stops profiling and returns the path of the JSON profile ONNX
	/// Runtime wrote. Profiling must have been enabled via
	/// [`SessionOptions::with_profiling`].
	pub fn end_profiling(&mut self) -> Result<String> {
		let rt = self.env.runtime();
		let mut path_ptr: *mut c_char = ptr::null_mut();
		ortsys![unsafe rt, SessionEndProfiling(self.ptr.as_ptr(), rt.allocator_ptr(), &mut path_ptr)?];
		let path = char_p_to_string(path_ptr);
		unsafe { rt.free(path_ptr) };
		path
	}

	/// The profiling start timestamp in nanoseconds, for correlating the
	/// profile with external clocks.
	pub fn profiling_start_time_ns(&self) -> Result<u64> {
		let rt = self.env.runtime();
		let mut start = 0_u64;
		ortsys![unsafe rt, SessionGetProfilingStartTimeNs(self.ptr.as_ptr(), &mut start)?];
		Ok(start)
	}
}

impl Drop for Session {
	fn drop(&mut self) {
		let rt = self.env.runtime();
		ortsys![unsafe rt, ReleaseSession(self.ptr.as_ptr())];
	}
}
