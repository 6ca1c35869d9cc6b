use std::ptr::{self, NonNull};

use crate::{
	Runtime,
	error::{Error, ErrorCode, Result},
	ortsys
};

/// A container for pre-packed kernel weights shared between sessions that
/// load the same model, so the packed buffers are allocated once instead of
/// per session.
///
/// The container must outlive every session created with it; the pool's
/// [`share_prepacked_weights`](crate::PoolConfig::share_prepacked_weights)
/// option manages that ordering automatically.
#[derive(Debug)]
pub struct PrepackedWeightsContainer {
	ptr: NonNull<dynort_sys::OrtPrepackedWeightsContainer>,
	runtime: Runtime
}

unsafe impl Send for PrepackedWeightsContainer {}
unsafe impl Sync for PrepackedWeightsContainer {}

impl PrepackedWeightsContainer {
	pub fn new(runtime: &Runtime) -> Result<Self> {
		let mut ptr: *mut dynort_sys::OrtPrepackedWeightsContainer = ptr::null_mut();
		ortsys![unsafe runtime, CreatePrepackedWeightsContainer(&mut ptr)?];
		Ok(PrepackedWeightsContainer {
			ptr: NonNull::new(ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`CreatePrepackedWeightsContainer` returned null"))?,
			runtime: runtime.clone()
		})
	}

	pub(crate) fn ptr(&self) -> *mut dynort_sys::OrtPrepackedWeightsContainer {
		self.ptr.as_ptr()
	}
}

impl Drop for PrepackedWeightsContainer {
	fn drop(&mut self) {
		let rt = &self.runtime;
		ortsys![unsafe rt, ReleasePrepackedWeightsContainer(self.ptr.as_ptr())];
	}
}
