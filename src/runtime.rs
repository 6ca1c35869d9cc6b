use std::{
	ffi::{c_char, c_int},
	path::{Path, PathBuf},
	ptr::{self, NonNull},
	sync::Arc
};

use libloading::Library;
use tracing::info;

use crate::{
	char_p_to_string,
	error::{Error, ErrorCode, Result, status_to_result},
	ortsys
};

/// The lowest API version whose dispatch table carries every entry this
/// crate may touch unconditionally.
pub const MIN_API_VERSION: u32 = 17;
/// LoRA adapter entries were added to the dispatch table in API 20.
pub(crate) const LORA_API_VERSION: u32 = 20;

#[cfg(target_os = "windows")]
const PLATFORM_LIBRARY_NAME: &str = "onnxruntime.dll";
#[cfg(any(target_os = "macos", target_os = "ios"))]
const PLATFORM_LIBRARY_NAME: &str = "libonnxruntime.dylib";
#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios"))))]
const PLATFORM_LIBRARY_NAME: &str = "libonnxruntime.so";

/// Logging verbosity passed to ONNX Runtime environments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
	Verbose,
	Info,
	#[default]
	Warning,
	Error,
	Fatal
}

impl From<LogLevel> for dynort_sys::OrtLoggingLevel {
	fn from(value: LogLevel) -> Self {
		match value {
			LogLevel::Verbose => Self::ORT_LOGGING_LEVEL_VERBOSE,
			LogLevel::Info => Self::ORT_LOGGING_LEVEL_INFO,
			LogLevel::Warning => Self::ORT_LOGGING_LEVEL_WARNING,
			LogLevel::Error => Self::ORT_LOGGING_LEVEL_ERROR,
			LogLevel::Fatal => Self::ORT_LOGGING_LEVEL_FATAL
		}
	}
}

impl LogLevel {
	pub(crate) fn severity(self) -> c_int {
		dynort_sys::OrtLoggingLevel::from(self) as c_int
	}
}

/// A loaded ONNX Runtime library and its resolved dispatch table.
///
/// A `Runtime` is created once per (library path, API version) and must
/// outlive every handle derived from it; child wrappers hold a clone, so
/// this holds by construction. Cloning is cheap (one `Arc`).
#[derive(Debug, Clone)]
pub struct Runtime {
	inner: Arc<RuntimeInner>
}

#[derive(Debug)]
struct RuntimeInner {
	api: NonNull<dynort_sys::OrtApi>,
	version: u32,
	/// Process-default allocator; per upstream docs it must not be released.
	allocator: NonNull<dynort_sys::OrtAllocator>,
	cpu_memory_info: NonNull<dynort_sys::OrtMemoryInfo>,
	/// Kept last so the library outlives the handles released in `drop`.
	_library: Library
}

unsafe impl Send for RuntimeInner {}
unsafe impl Sync for RuntimeInner {}

impl Drop for RuntimeInner {
	fn drop(&mut self) {
		let api = unsafe { self.api.as_ref() };
		if let Some(release) = api.ReleaseMemoryInfo {
			unsafe { release(self.cpu_memory_info.as_ptr()) };
		}
	}
}

impl Runtime {
	/// Opens the ONNX Runtime shared library and resolves the dispatch table
	/// for `api_version`.
	///
	/// An empty `path` searches the platform's standard locations
	/// (`/usr/local/lib`, the Homebrew prefix, `/usr/lib` and `/lib` on
	/// POSIX; the DLL search order on Windows) for the platform library name.
	/// A non-empty `path` is used verbatim.
	pub fn load(path: impl AsRef<Path>, api_version: u32) -> Result<Self> {
		if api_version < MIN_API_VERSION {
			return Err(Error::new(
				ErrorCode::UnsupportedApiVersion,
				format!("API version {api_version} is below the minimum supported version {MIN_API_VERSION}")
			));
		}

		let candidates = candidate_paths(path.as_ref());
		let mut last_error = None;
		let mut library = None;
		let mut loaded_from = PathBuf::new();
		for candidate in &candidates {
			match unsafe { Library::new(candidate) } {
				Ok(lib) => {
					library = Some(lib);
					loaded_from = candidate.clone();
					break;
				}
				Err(e) => last_error = Some(e)
			}
		}
		let library = library.ok_or_else(|| {
			Error::new(
				ErrorCode::LibraryNotFound,
				format!(
					"could not open ONNX Runtime library (tried {}): {}",
					candidates.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "),
					last_error.map(|e| e.to_string()).unwrap_or_default()
				)
			)
		})?;

		let base_getter: libloading::Symbol<'_, unsafe extern "system" fn() -> *const dynort_sys::OrtApiBase> = unsafe { library.get(b"OrtGetApiBase") }
			.map_err(|e| Error::new(ErrorCode::SymbolNotFound, format!("`OrtGetApiBase` missing from {}: {e}", loaded_from.display())))?;
		let base = unsafe { base_getter() };
		if base.is_null() {
			return Err(Error::new(ErrorCode::SymbolNotFound, "`OrtGetApiBase` returned null"));
		}
		let base = unsafe { &*base };

		if let Some(get_version_string) = base.GetVersionString {
			let version_string = char_p_to_string(unsafe { get_version_string() })?;
			info!(library = %loaded_from.display(), version = %version_string, "loaded ONNX Runtime");
		}

		let get_api = base
			.GetApi
			.ok_or_else(|| Error::new(ErrorCode::SymbolNotFound, "`GetApi` missing from `OrtApiBase`"))?;
		let api = unsafe { get_api(api_version) };
		let api = NonNull::new(api.cast_mut()).ok_or_else(|| {
			Error::new(
				ErrorCode::UnsupportedApiVersion,
				format!("the loaded ONNX Runtime does not provide API version {api_version}")
			)
		})?;
		let api_ref = unsafe { api.as_ref() };

		let mut allocator_ptr: *mut dynort_sys::OrtAllocator = ptr::null_mut();
		status_to_result(api_ref, unsafe {
			api_ref.GetAllocatorWithDefaultOptions.unwrap_or_else(|| unreachable!("`GetAllocatorWithDefaultOptions` is null"))(&mut allocator_ptr)
		})?;
		let allocator =
			NonNull::new(allocator_ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`GetAllocatorWithDefaultOptions` returned null"))?;

		let mut memory_info_ptr: *mut dynort_sys::OrtMemoryInfo = ptr::null_mut();
		status_to_result(api_ref, unsafe {
			api_ref.CreateCpuMemoryInfo.unwrap_or_else(|| unreachable!("`CreateCpuMemoryInfo` is null"))(
				dynort_sys::OrtAllocatorType::OrtDeviceAllocator,
				dynort_sys::OrtMemType::OrtMemTypeDefault,
				&mut memory_info_ptr
			)
		})?;
		let cpu_memory_info = NonNull::new(memory_info_ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`CreateCpuMemoryInfo` returned null"))?;

		Ok(Runtime {
			inner: Arc::new(RuntimeInner {
				api,
				version: api_version,
				allocator,
				cpu_memory_info,
				_library: library
			})
		})
	}

	pub(crate) fn api(&self) -> &dynort_sys::OrtApi {
		unsafe { self.inner.api.as_ref() }
	}

	/// The API version negotiated at load time.
	pub fn api_version(&self) -> u32 {
		self.inner.version
	}

	pub(crate) fn require_api_version(&self, min: u32, what: &str) -> Result<()> {
		if self.inner.version < min {
			return Err(Error::new(
				ErrorCode::NotImplemented,
				format!("{what} requires ONNX Runtime API version {min}, but the runtime was loaded with version {}", self.inner.version)
			));
		}
		Ok(())
	}

	pub(crate) fn allocator_ptr(&self) -> *mut dynort_sys::OrtAllocator {
		self.inner.allocator.as_ptr()
	}

	pub(crate) fn cpu_memory_info_ptr(&self) -> *const dynort_sys::OrtMemoryInfo {
		self.inner.cpu_memory_info.as_ptr()
	}

	/// Frees memory that ONNX Runtime allocated through the default
	/// allocator (input/output names, metadata strings, profile paths).
	pub(crate) unsafe fn free<T>(&self, ptr: *mut T) {
		if ptr.is_null() {
			return;
		}
		let allocator = unsafe { self.inner.allocator.as_ref() };
		if let Some(free) = allocator.Free {
			unsafe { free(self.inner.allocator.as_ptr(), ptr.cast()) };
		}
	}

	/// Returns the execution providers the loaded library was built with.
	/// `CPUExecutionProvider` is always expected to be present.
	pub fn available_providers(&self) -> Result<Vec<String>> {
		let mut providers_ptr: *mut *mut c_char = ptr::null_mut();
		let mut count: c_int = 0;
		ortsys![unsafe self, GetAvailableProviders(&mut providers_ptr, &mut count)?];

		let mut providers = Vec::with_capacity(count as usize);
		for i in 0..count as usize {
			let raw = unsafe { *providers_ptr.add(i) };
			providers.push(char_p_to_string(raw).unwrap_or_default());
		}
		ortsys![unsafe self, ReleaseAvailableProviders(providers_ptr, count)?];
		Ok(providers)
	}

	/// Returns the loaded library's build information string.
	pub fn build_info(&self) -> Result<String> {
		let raw = ortsys![unsafe self, GetBuildInfoString()];
		char_p_to_string(raw)
	}
}

fn candidate_paths(path: &Path) -> Vec<PathBuf> {
	if !path.as_os_str().is_empty() {
		return vec![path.to_path_buf()];
	}
	let mut candidates = Vec::new();
	#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios"))))]
	for dir in ["/usr/local/lib", "/home/linuxbrew/.linuxbrew/lib", "/usr/lib", "/lib"] {
		candidates.push(Path::new(dir).join(PLATFORM_LIBRARY_NAME));
	}
	#[cfg(any(target_os = "macos", target_os = "ios"))]
	for dir in ["/usr/local/lib", "/opt/homebrew/lib", "/usr/lib", "/lib"] {
		candidates.push(Path::new(dir).join(PLATFORM_LIBRARY_NAME));
	}
	// bare name last: defers to the system loader's own search order
	candidates.push(PathBuf::from(PLATFORM_LIBRARY_NAME));
	candidates
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_path_is_used_verbatim() {
		let candidates = candidate_paths(Path::new("/tmp/libonnxruntime.so.1"));
		assert_eq!(candidates, vec![PathBuf::from("/tmp/libonnxruntime.so.1")]);
	}

	#[test]
	fn empty_path_searches_defaults() {
		let candidates = candidate_paths(Path::new(""));
		assert!(candidates.len() > 1);
		assert_eq!(candidates.last(), Some(&PathBuf::from(PLATFORM_LIBRARY_NAME)));
		#[cfg(unix)]
		assert!(candidates[0].starts_with("/usr/local/lib"));
	}

	#[test]
	fn too_old_api_version_is_rejected() {
		let err = Runtime::load("/nonexistent/libonnxruntime.so", 11).expect_err("version 11 is unsupported");
		assert_eq!(err.code(), ErrorCode::UnsupportedApiVersion);
	}

	#[test]
	fn missing_library_reports_not_found() {
		let err = Runtime::load("/nonexistent/libonnxruntime.so", 23).expect_err("library does not exist");
		assert_eq!(err.code(), ErrorCode::LibraryNotFound);
	}
}
