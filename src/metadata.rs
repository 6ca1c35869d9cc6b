use std::{
	collections::HashMap,
	ffi::{CString, c_char},
	ptr
};

use crate::{
	Runtime, Session,
	char_p_to_string,
	error::Result,
	ortsys
};

/// An immutable snapshot of a model's metadata. Extracted in one call; no
/// native handle is kept alive behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelMetadata {
	pub producer_name: String,
	pub graph_name: String,
	pub domain: String,
	pub description: String,
	pub version: i64,
	pub custom: HashMap<String, String>
}

impl Session {
	/// Reads the model's metadata out of the session.
	pub fn metadata(&self) -> Result<ModelMetadata> {
		let rt = self.environment().runtime().clone();

		let mut metadata_ptr: *mut dynort_sys::OrtModelMetadata = ptr::null_mut();
		ortsys![unsafe rt, SessionGetModelMetadata(self.ptr(), &mut metadata_ptr)?];
		if metadata_ptr.is_null() {
			return Err(crate::Error::new(crate::ErrorCode::GenericFailure, "`SessionGetModelMetadata` returned null"));
		}
		let guard = MetadataGuard { ptr: metadata_ptr, rt: &rt };

		let mut metadata = ModelMetadata {
			producer_name: read_string(&rt, |out| ortsys![unsafe rt, ModelMetadataGetProducerName(guard.ptr, rt.allocator_ptr(), out)])?,
			graph_name: read_string(&rt, |out| ortsys![unsafe rt, ModelMetadataGetGraphName(guard.ptr, rt.allocator_ptr(), out)])?,
			domain: read_string(&rt, |out| ortsys![unsafe rt, ModelMetadataGetDomain(guard.ptr, rt.allocator_ptr(), out)])?,
			description: read_string(&rt, |out| ortsys![unsafe rt, ModelMetadataGetDescription(guard.ptr, rt.allocator_ptr(), out)])?,
			..Default::default()
		};

		ortsys![unsafe rt, ModelMetadataGetVersion(guard.ptr, &mut metadata.version)?];

		let mut keys_ptr: *mut *mut c_char = ptr::null_mut();
		let mut key_count: i64 = 0;
		ortsys![unsafe rt, ModelMetadataGetCustomMetadataMapKeys(guard.ptr, rt.allocator_ptr(), &mut keys_ptr, &mut key_count)?];
		if !keys_ptr.is_null() {
			for i in 0..key_count as usize {
				let key_ptr = unsafe { *keys_ptr.add(i) };
				let key = char_p_to_string(key_ptr);
				unsafe { rt.free(key_ptr) };
				let key = key?;

				let lookup = CString::new(key.as_str())?;
				let value = read_string(&rt, |out| {
					ortsys![unsafe rt, ModelMetadataLookupCustomMetadataMap(guard.ptr, rt.allocator_ptr(), lookup.as_ptr(), out)]
				})?;
				metadata.custom.insert(key, value);
			}
			unsafe { rt.free(keys_ptr) };
		}

		Ok(metadata)
	}
}

/// Reads one allocator-owned C string out of a native call, copying it into
/// a managed [`String`] and freeing the native buffer.
fn read_string(rt: &Runtime, call: impl FnOnce(*mut *mut c_char) -> dynort_sys::OrtStatusPtr) -> Result<String> {
	let mut value_ptr: *mut c_char = ptr::null_mut();
	crate::error::status_to_result(rt.api(), call(&mut value_ptr))?;
	let value = char_p_to_string(value_ptr);
	unsafe { rt.free(value_ptr) };
	value
}

struct MetadataGuard<'r> {
	ptr: *mut dynort_sys::OrtModelMetadata,
	rt: &'r Runtime
}

impl Drop for MetadataGuard<'_> {
	fn drop(&mut self) {
		let rt = self.rt;
		ortsys![unsafe rt, ReleaseModelMetadata(self.ptr)];
	}
}
