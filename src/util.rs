#[cfg(unix)]
use std::os::unix::ffi::OsStrExt;
#[cfg(target_family = "windows")]
use std::os::windows::ffi::OsStrExt;
use std::{ffi::OsString, path::Path};

use dynort_sys::ortchar;

/// Encodes a path as the null-terminated `ORTCHAR_T` array ONNX Runtime
/// expects: UTF-16 on Windows, bytes everywhere else.
pub(crate) fn path_to_os_char(path: impl AsRef<Path>) -> Vec<ortchar> {
	let path = OsString::from(path.as_ref());
	#[cfg(target_family = "windows")]
	let chars: Vec<ortchar> = path.encode_wide().chain(std::iter::once(0)).collect();
	#[cfg(not(target_family = "windows"))]
	let chars: Vec<ortchar> = path.as_os_str().as_bytes().iter().copied().chain(std::iter::once(0)).map(|b| b as ortchar).collect();
	chars
}

/// Runs a blocking native call from async context.
///
/// On a multi-threaded runtime the call goes through
/// [`tokio::task::block_in_place`] so other tasks migrate off this worker
/// for the duration of the call; on a current-thread runtime (where
/// `block_in_place` would panic) the closure runs inline.
pub(crate) fn blocking_call<T>(f: impl FnOnce() -> T) -> T {
	match tokio::runtime::Handle::try_current() {
		Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => tokio::task::block_in_place(f),
		_ => f()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn path_is_null_terminated() {
		let chars = path_to_os_char("model.onnx");
		assert_eq!(chars.last(), Some(&0));
		assert_eq!(chars.len(), "model.onnx".len() + 1);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
	async fn blocking_call_runs_inline() {
		let value = blocking_call(|| 7 * 6);
		assert_eq!(value, 42);
	}

	#[tokio::test]
	async fn blocking_call_on_current_thread_runtime() {
		let value = blocking_call(|| "ok");
		assert_eq!(value, "ok");
	}
}
