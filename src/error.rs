use std::{ffi::c_char, fmt};

use crate::char_p_to_string;

/// Type alias for the `Result` type returned by `dynort` functions.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error returned by any `dynort` API.
#[derive(Debug, Clone)]
pub struct Error {
	code: ErrorCode,
	msg: String
}

impl Error {
	/// Creates a custom [`Error`] with the given [`ErrorCode`] and message.
	pub fn new(code: ErrorCode, msg: impl Into<String>) -> Self {
		Error { code, msg: msg.into() }
	}

	pub fn code(&self) -> ErrorCode {
		self.code
	}

	pub fn message(&self) -> &str {
		self.msg.as_str()
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.code.name(), self.msg)
	}
}

impl std::error::Error for Error {}

impl From<std::ffi::NulError> for Error {
	fn from(e: std::ffi::NulError) -> Self {
		Error::new(ErrorCode::InvalidArgument, format!("attempted to pass invalid string to C: {e}"))
	}
}

/// The error classes surfaced by this crate: the ONNX Runtime status codes,
/// plus the conditions detected on this side of the FFI boundary.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
	Ok,
	GenericFailure,
	InvalidArgument,
	NoSuchFile,
	NoModel,
	EngineError,
	RuntimeException,
	InvalidProtobuf,
	ModelLoaded,
	NotImplemented,
	InvalidGraph,
	ExecutionProviderFailure,
	/// The shared library could not be found at the given path or in any of
	/// the platform's default locations.
	LibraryNotFound,
	/// The shared library is missing an expected symbol.
	SymbolNotFound,
	/// The loaded runtime does not provide the requested API version.
	UnsupportedApiVersion,
	/// The pool has been closed.
	PoolClosed,
	/// The caller's cancellation token fired before the native call began.
	Cancelled,
	/// The tensor's element type does not match the requested Rust type.
	TypeMismatch,
	/// A tensor was constructed from an empty buffer.
	EmptyData,
	/// A session was constructed from an empty model buffer.
	EmptyModel,
	/// A tensor was constructed with an empty or invalid shape.
	EmptyShape
}

impl ErrorCode {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Ok => "Ok",
			Self::GenericFailure => "Fail",
			Self::InvalidArgument => "InvalidArgument",
			Self::NoSuchFile => "NoSuchFile",
			Self::NoModel => "NoModel",
			Self::EngineError => "EngineError",
			Self::RuntimeException => "RuntimeException",
			Self::InvalidProtobuf => "InvalidProtobuf",
			Self::ModelLoaded => "ModelLoaded",
			Self::NotImplemented => "NotImplemented",
			Self::InvalidGraph => "InvalidGraph",
			Self::ExecutionProviderFailure => "ExecutionProviderFailure",
			Self::LibraryNotFound => "LibraryNotFound",
			Self::SymbolNotFound => "SymbolNotFound",
			Self::UnsupportedApiVersion => "UnsupportedApiVersion",
			Self::PoolClosed => "PoolClosed",
			Self::Cancelled => "Cancelled",
			Self::TypeMismatch => "TypeMismatch",
			Self::EmptyData => "EmptyData",
			Self::EmptyModel => "EmptyModel",
			Self::EmptyShape => "EmptyShape"
		}
	}
}

impl From<dynort_sys::OrtErrorCode> for ErrorCode {
	fn from(value: dynort_sys::OrtErrorCode) -> Self {
		match value {
			dynort_sys::OrtErrorCode::ORT_OK => Self::Ok,
			dynort_sys::OrtErrorCode::ORT_FAIL => Self::GenericFailure,
			dynort_sys::OrtErrorCode::ORT_INVALID_ARGUMENT => Self::InvalidArgument,
			dynort_sys::OrtErrorCode::ORT_NO_SUCHFILE => Self::NoSuchFile,
			dynort_sys::OrtErrorCode::ORT_NO_MODEL => Self::NoModel,
			dynort_sys::OrtErrorCode::ORT_ENGINE_ERROR => Self::EngineError,
			dynort_sys::OrtErrorCode::ORT_RUNTIME_EXCEPTION => Self::RuntimeException,
			dynort_sys::OrtErrorCode::ORT_INVALID_PROTOBUF => Self::InvalidProtobuf,
			dynort_sys::OrtErrorCode::ORT_MODEL_LOADED => Self::ModelLoaded,
			dynort_sys::OrtErrorCode::ORT_NOT_IMPLEMENTED => Self::NotImplemented,
			dynort_sys::OrtErrorCode::ORT_INVALID_GRAPH => Self::InvalidGraph,
			dynort_sys::OrtErrorCode::ORT_EP_FAIL => Self::ExecutionProviderFailure
		}
	}
}

/// Converts a native status pointer into a [`Result`], releasing the status.
///
/// A null `status` is success. A non-null status is read (code + message,
/// the message copied out of runtime-owned memory) and then freed through
/// `ReleaseStatus`, whether or not the message converts cleanly.
pub(crate) fn status_to_result(api: &dynort_sys::OrtApi, status: dynort_sys::OrtStatusPtr) -> Result<()> {
	if status.is_null() {
		return Ok(());
	}
	let code = ErrorCode::from(unsafe { api.GetErrorCode.unwrap_or_else(|| unreachable!("`GetErrorCode` is null"))(status) });
	let raw: *const c_char = unsafe { api.GetErrorMessage.unwrap_or_else(|| unreachable!("`GetErrorMessage` is null"))(status) };
	let msg = match char_p_to_string(raw) {
		Ok(msg) => msg,
		Err(err) => format!("(failed to convert native error message: {err})")
	};
	unsafe { api.ReleaseStatus.unwrap_or_else(|| unreachable!("`ReleaseStatus` is null"))(status) };
	Err(Error { code, msg })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn native_code_mapping() {
		assert_eq!(ErrorCode::from(dynort_sys::OrtErrorCode::ORT_OK), ErrorCode::Ok);
		assert_eq!(ErrorCode::from(dynort_sys::OrtErrorCode::ORT_INVALID_ARGUMENT), ErrorCode::InvalidArgument);
		assert_eq!(ErrorCode::from(dynort_sys::OrtErrorCode::ORT_EP_FAIL), ErrorCode::ExecutionProviderFailure);
	}

	#[test]
	fn display_includes_code_name() {
		let err = Error::new(ErrorCode::TypeMismatch, "expected f32, tensor holds i64");
		assert_eq!(err.to_string(), "TypeMismatch: expected f32, tensor holds i64");
	}

	#[test]
	fn null_status_is_ok() {
		// a zeroed table is all-`None` function pointers; a null status never
		// dereferences any of them
		let api: dynort_sys::OrtApi = unsafe { std::mem::zeroed() };
		assert!(status_to_result(&api, std::ptr::null_mut()).is_ok());
	}
}
