use std::ptr::{self, NonNull};

use crate::{Runtime, error::Result, ortsys};

/// Describes where a tensor's memory lives. Used to ask ONNX Runtime to
/// allocate IO-binding outputs on a particular device.
#[derive(Debug)]
pub struct MemoryInfo {
	ptr: NonNull<dynort_sys::OrtMemoryInfo>,
	runtime: Runtime
}

unsafe impl Send for MemoryInfo {}
unsafe impl Sync for MemoryInfo {}

impl MemoryInfo {
	/// Creates a `MemoryInfo` describing default CPU memory.
	pub fn new_cpu(runtime: &Runtime) -> Result<Self> {
		let mut ptr: *mut dynort_sys::OrtMemoryInfo = ptr::null_mut();
		ortsys![
			unsafe runtime,
			CreateCpuMemoryInfo(dynort_sys::OrtAllocatorType::OrtDeviceAllocator, dynort_sys::OrtMemType::OrtMemTypeDefault, &mut ptr)?
		];
		Ok(MemoryInfo {
			ptr: unsafe { NonNull::new_unchecked(ptr) },
			runtime: runtime.clone()
		})
	}

	pub(crate) fn ptr(&self) -> *const dynort_sys::OrtMemoryInfo {
		self.ptr.as_ptr()
	}
}

impl Drop for MemoryInfo {
	fn drop(&mut self) {
		let rt = &self.runtime;
		ortsys![unsafe rt, ReleaseMemoryInfo(self.ptr.as_ptr())];
	}
}
