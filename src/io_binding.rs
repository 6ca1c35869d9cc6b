use std::{
	ffi::CString,
	ptr::{self, NonNull}
};

use crate::{
	MemoryInfo, Session, Value,
	error::{Error, ErrorCode, Result, status_to_result},
	ortsys,
	session::{ActiveRunOptions, RunSpec, ValueMap},
	util
};

/// Pre-bound inputs and outputs for repeated inference with stable shapes,
/// avoiding per-run marshalling and host/device copies.
///
/// A binding borrows its session exclusively, so it is closed (dropped)
/// before the session can be used or dropped again.
pub struct IoBinding<'s> {
	ptr: NonNull<dynort_sys::OrtIoBinding>,
	session: &'s mut Session
}

unsafe impl Send for IoBinding<'_> {}

impl Session {
	/// Creates an IO binding over this session.
	pub fn create_io_binding(&mut self) -> Result<IoBinding<'_>> {
		let rt = self.environment().runtime().clone();
		let mut binding_ptr: *mut dynort_sys::OrtIoBinding = ptr::null_mut();
		ortsys![unsafe rt, CreateIoBinding(self.ptr(), &mut binding_ptr)?];
		Ok(IoBinding {
			ptr: NonNull::new(binding_ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`CreateIoBinding` returned null"))?,
			session: self
		})
	}
}

impl IoBinding<'_> {
	/// Binds an input tensor to the given name.
	pub fn bind_input(&mut self, name: impl AsRef<str>, value: &Value) -> Result<()> {
		let name = CString::new(name.as_ref())?;
		let rt = self.session.environment().runtime();
		ortsys![unsafe rt, BindInput(self.ptr.as_ptr(), name.as_ptr(), value.ptr())?];
		Ok(())
	}

	/// Binds a pre-allocated output tensor to the given name.
	pub fn bind_output(&mut self, name: impl AsRef<str>, value: &Value) -> Result<()> {
		let name = CString::new(name.as_ref())?;
		let rt = self.session.environment().runtime();
		ortsys![unsafe rt, BindOutput(self.ptr.as_ptr(), name.as_ptr(), value.ptr())?];
		Ok(())
	}

	/// Lets ONNX Runtime allocate the named output on the device described
	/// by `memory_info`.
	pub fn bind_output_to_device(&mut self, name: impl AsRef<str>, memory_info: &MemoryInfo) -> Result<()> {
		let name = CString::new(name.as_ref())?;
		let rt = self.session.environment().runtime();
		ortsys![unsafe rt, BindOutputToDevice(self.ptr.as_ptr(), name.as_ptr(), memory_info.ptr())?];
		Ok(())
	}

	/// Removes all bound inputs.
	pub fn clear_inputs(&mut self) {
		let rt = self.session.environment().runtime();
		ortsys![unsafe rt, ClearBoundInputs(self.ptr.as_ptr())];
	}

	/// Removes all bound outputs.
	pub fn clear_outputs(&mut self) {
		let rt = self.session.environment().runtime();
		ortsys![unsafe rt, ClearBoundOutputs(self.ptr.as_ptr())];
	}

	/// Waits until all device work writing the bound inputs is done.
	pub fn synchronize_inputs(&mut self) -> Result<()> {
		let rt = self.session.environment().runtime();
		ortsys![unsafe rt, SynchronizeBoundInputs(self.ptr.as_ptr())?];
		Ok(())
	}

	/// Waits until all device work writing the bound outputs is done.
	pub fn synchronize_outputs(&mut self) -> Result<()> {
		let rt = self.session.environment().runtime();
		ortsys![unsafe rt, SynchronizeBoundOutputs(self.ptr.as_ptr())?];
		Ok(())
	}

	/// Executes the session against the bound inputs and outputs. The
	/// spec's tag, adapters, and cancellation token apply; its output
	/// subset does not (outputs are whatever was bound).
	pub async fn run(&mut self, spec: &RunSpec) -> Result<()> {
		let rt = self.session.environment().runtime().clone();
		let active = ActiveRunOptions::build(&rt, spec)?;

		// raw pointers stay inside this block so the future is `Send` across
		// the join below
		let result = {
			let run_options_ptr = active.as_ref().map(|a| a.ptr()).unwrap_or(ptr::null());
			let status = util::blocking_call(|| ortsys![unsafe rt, RunWithBinding(self.session.ptr(), run_options_ptr, self.ptr.as_ptr())]);
			status_to_result(rt.api(), status)
		};

		// join the watcher before the run options are released
		if let Some(active) = active {
			active.finish().await;
		}
		result
	}

	/// Returns the bound output values, keyed by name, in the order the
	/// session declares its outputs.
	pub fn outputs(&self) -> Result<ValueMap> {
		let rt = self.session.environment().runtime().clone();

		let mut values_ptr: *mut *mut dynort_sys::OrtValue = ptr::null_mut();
		let mut count = 0;
		ortsys![unsafe rt, GetBoundOutputValues(self.ptr.as_ptr(), rt.allocator_ptr(), &mut values_ptr, &mut count)?];
		if values_ptr.is_null() || count == 0 {
			return Ok(ValueMap::new());
		}

		let mut outputs = ValueMap::with_capacity(count);
		for (index, name) in self.session.output_names().iter().enumerate().take(count) {
			let value_ptr = unsafe { *values_ptr.add(index) };
			if let Some(value_ptr) = NonNull::new(value_ptr) {
				outputs.insert(name.clone(), Value::from_raw(rt.clone(), value_ptr));
			}
		}
		// the array itself came from the default allocator
		unsafe { rt.free(values_ptr) };
		Ok(outputs)
	}
}

impl Drop for IoBinding<'_> {
	fn drop(&mut self) {
		let rt = self.session.environment().runtime();
		ortsys![unsafe rt, ReleaseIoBinding(self.ptr.as_ptr())];
	}
}
