use std::{
	path::Path,
	ptr::{self, NonNull}
};

use crate::{
	Runtime,
	error::{Error, ErrorCode, Result},
	ortsys,
	runtime::LORA_API_VERSION,
	util
};

/// A loaded LoRA (low-rank adaptation) adapter.
///
/// Adapters patch base model behaviour at run time without reloading the
/// model; activate one for a single run via
/// [`RunSpec::with_adapter`](crate::RunSpec::with_adapter). Wrap it in an
/// [`Arc`](std::sync::Arc) to share across concurrent runs.
#[derive(Debug)]
pub struct LoraAdapter {
	ptr: NonNull<dynort_sys::OrtLoraAdapter>,
	runtime: Runtime
}

unsafe impl Send for LoraAdapter {}
unsafe impl Sync for LoraAdapter {}

impl LoraAdapter {
	/// Loads an adapter from a file.
	pub fn from_file(runtime: &Runtime, path: impl AsRef<Path>) -> Result<Self> {
		runtime.require_api_version(LORA_API_VERSION, "LoRA adapters")?;
		let path = util::path_to_os_char(path);
		let mut ptr: *mut dynort_sys::OrtLoraAdapter = ptr::null_mut();
		ortsys![unsafe runtime, CreateLoraAdapter(path.as_ptr(), runtime.allocator_ptr(), &mut ptr)?];
		Ok(LoraAdapter {
			ptr: NonNull::new(ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`CreateLoraAdapter` returned null"))?,
			runtime: runtime.clone()
		})
	}

	/// Loads an adapter from an in-memory buffer.
	pub fn from_bytes(runtime: &Runtime, data: &[u8]) -> Result<Self> {
		runtime.require_api_version(LORA_API_VERSION, "LoRA adapters")?;
		if data.is_empty() {
			return Err(Error::new(ErrorCode::EmptyData, "adapter data must not be empty"));
		}
		let mut ptr: *mut dynort_sys::OrtLoraAdapter = ptr::null_mut();
		ortsys![unsafe runtime, CreateLoraAdapterFromArray(data.as_ptr().cast(), data.len(), runtime.allocator_ptr(), &mut ptr)?];
		Ok(LoraAdapter {
			ptr: NonNull::new(ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`CreateLoraAdapterFromArray` returned null"))?,
			runtime: runtime.clone()
		})
	}

	pub(crate) fn ptr(&self) -> *const dynort_sys::OrtLoraAdapter {
		self.ptr.as_ptr()
	}
}

impl Drop for LoraAdapter {
	fn drop(&mut self) {
		let rt = &self.runtime;
		ortsys![unsafe rt, ReleaseLoraAdapter(self.ptr.as_ptr())];
	}
}
