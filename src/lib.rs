#![warn(clippy::unwrap_used)]

//! `dynort` is a runtime-loading Rust binding for [ONNX Runtime](https://onnxruntime.ai/).
//!
//! No native toolchain or link-time dependency is required: point a
//! [`Runtime`] at an ONNX Runtime shared library and the versioned C API is
//! resolved on the spot. On top of the safe handle wrappers, the crate
//! provides a [`SessionPool`] that lets many async callers share a fixed set
//! of inference sessions, with cancellation, warmup, metrics, and
//! observability hooks.
//!
//! ```no_run
//! use dynort::{Environment, LogLevel, Runtime, Value, pool::SessionPool};
//!
//! # async fn run() -> dynort::Result<()> {
//! let runtime = Runtime::load("/usr/local/lib/libonnxruntime.so", 23)?;
//! let env = Environment::new(&runtime, "app", LogLevel::Warning)?;
//! let pool = SessionPool::from_file(&env, "model.onnx", 4, Default::default())?;
//!
//! let input = Value::from_vec(&runtime, vec![1.0_f32; 10], &[1, 10])?;
//! let inputs = [("input".to_string(), input)].into();
//! let outputs = pool.run(&inputs, &Default::default()).await?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod adapter;
pub(crate) mod environment;
pub(crate) mod error;
pub mod hooks;
pub(crate) mod io_binding;
pub(crate) mod memory;
pub(crate) mod metadata;
pub mod pool;
pub(crate) mod prepacked;
pub(crate) mod runtime;
pub(crate) mod session;
pub(crate) mod tensor;
pub(crate) mod util;
pub(crate) mod value;

use std::ffi::{CStr, c_char};

pub use dynort_sys as sys;
pub use tokio_util::sync::CancellationToken;

pub use self::adapter::LoraAdapter;
pub use self::environment::{Environment, ThreadingOptions};
pub use self::error::{Error, ErrorCode, Result};
pub use self::hooks::{AfterRun, RunHook, RunInfo, TracingHook};
pub use self::io_binding::IoBinding;
pub use self::memory::MemoryInfo;
pub use self::metadata::ModelMetadata;
pub use self::pool::{PoolConfig, PoolStats, SessionPool};
pub use self::prepacked::PrepackedWeightsContainer;
pub use self::runtime::{LogLevel, MIN_API_VERSION, Runtime};
pub use self::session::{
	CPU_EXECUTION_PROVIDER, ExecutionMode, ExecutionProvider, GraphOptimizationLevel, InputInfo, OutputInfo, RunSpec, Session, SessionOptions, TensorTypeInfo,
	ValueMap
};
pub use self::tensor::{TensorElement, TensorElementType};
pub use self::value::{Value, ValueKind};

/// Calls a function out of a runtime's dispatch table.
///
/// `ortsys![unsafe rt, Method(args)]` invokes the raw function pointer and
/// yields whatever it returns; appending `?` (`ortsys![unsafe rt, Method(args)?]`)
/// additionally routes the returned status through the translator and
/// propagates the error. Every pointer in the table is populated by the
/// loaded library for the negotiated API version, so a null entry is a
/// library bug, not a caller error.
macro_rules! ortsys {
	(unsafe $rt:expr, $method:ident($($n:expr),* $(,)?)) => {{
		let api = $rt.api();
		unsafe { api.$method.unwrap_or_else(|| unreachable!(concat!("`", stringify!($method), "` is null")))($($n),*) }
	}};
	(unsafe $rt:expr, $method:ident($($n:expr),* $(,)?)?) => {{
		let status = $crate::ortsys![unsafe $rt, $method($($n),*)];
		$crate::error::status_to_result($rt.api(), status)?
	}};
}

pub(crate) use ortsys;

/// Copies a null-terminated C string into an owned [`String`].
pub(crate) fn char_p_to_string(raw: *const c_char) -> Result<String> {
	if raw.is_null() {
		return Ok(String::new());
	}
	let cstr = unsafe { CStr::from_ptr(raw) };
	Ok(cstr.to_str().map_err(|e| Error::new(ErrorCode::GenericFailure, format!("C returned invalid string: {e}")))?.to_string())
}

#[cfg(test)]
mod tests {
	use std::ffi::CString;

	use super::*;

	#[test]
	fn char_p_round_trip() {
		let s = CString::new("logits").expect("valid C string");
		assert_eq!(char_p_to_string(s.as_ptr()).expect("conversion"), "logits");
	}

	#[test]
	fn char_p_null_is_empty() {
		assert_eq!(char_p_to_string(std::ptr::null()).expect("conversion"), "");
	}
}
