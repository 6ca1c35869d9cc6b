use std::{
	ffi::{CString, c_void},
	mem::size_of,
	ptr::{self, NonNull},
	slice
};

use crate::{
	Runtime, Value,
	error::{Error, ErrorCode, Result},
	ortsys,
	tensor::{TensorElement, TensorElementType}
};

fn validate_dims(len: usize, shape: &[i64]) -> Result<()> {
	if len == 0 {
		return Err(Error::new(ErrorCode::EmptyData, "tensor data must not be empty"));
	}
	if shape.is_empty() {
		return Err(Error::new(ErrorCode::EmptyShape, "tensor shape must not be empty"));
	}
	let mut expected: usize = 1;
	for &dim in shape {
		if dim < 0 {
			return Err(Error::new(ErrorCode::InvalidArgument, format!("shape dimensions must be non-negative, got {dim}")));
		}
		expected = expected.saturating_mul(dim as usize);
	}
	if expected != len {
		return Err(Error::new(
			ErrorCode::InvalidArgument,
			format!("shape {shape:?} describes {expected} elements but {len} were provided")
		));
	}
	Ok(())
}

impl Value {
	/// Creates a tensor from an owned vector without copying.
	///
	/// The native tensor borrows the vector's buffer; the returned value
	/// takes ownership of the vector so the buffer is guaranteed to outlive
	/// the native handle.
	pub fn from_vec<T: TensorElement>(runtime: &Runtime, data: Vec<T>, shape: &[i64]) -> Result<Value> {
		validate_dims(data.len(), shape)?;

		let mut data = data;
		let data_ptr = data.as_mut_ptr().cast::<c_void>();
		let byte_len = data.len() * size_of::<T>();

		let mut value_ptr: *mut dynort_sys::OrtValue = ptr::null_mut();
		ortsys![
			unsafe runtime,
			CreateTensorWithDataAsOrtValue(
				runtime.cpu_memory_info_ptr(),
				data_ptr,
				byte_len,
				shape.as_ptr(),
				shape.len(),
				T::ELEMENT_TYPE.to_sys(),
				&mut value_ptr
			)?
		];
		let ptr = NonNull::new(value_ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`CreateTensorWithDataAsOrtValue` returned null"))?;
		Ok(Value::new(runtime.clone(), ptr, Some(Box::new(data))))
	}

	/// Creates a tensor by copying a slice. Shorthand for
	/// [`Value::from_vec`] when the caller wants to keep its buffer.
	pub fn from_slice<T: TensorElement>(runtime: &Runtime, data: &[T], shape: &[i64]) -> Result<Value> {
		Self::from_vec(runtime, data.to_vec(), shape)
	}

	/// Creates a string tensor from a sequence of strings.
	///
	/// The strings are copied into storage managed by the runtime's default
	/// allocator, so the inputs need not outlive the value.
	pub fn from_strings<S: AsRef<str>>(runtime: &Runtime, data: &[S], shape: &[i64]) -> Result<Value> {
		validate_dims(data.len(), shape)?;

		let mut value_ptr: *mut dynort_sys::OrtValue = ptr::null_mut();
		ortsys![
			unsafe runtime,
			CreateTensorAsOrtValue(
				runtime.allocator_ptr(),
				shape.as_ptr(),
				shape.len(),
				TensorElementType::String.to_sys(),
				&mut value_ptr
			)?
		];
		let ptr = NonNull::new(value_ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`CreateTensorAsOrtValue` returned null"))?;
		// wrapping before the fill means the handle is released if the fill fails
		let value = Value::from_raw(runtime.clone(), ptr);

		let strings = data.iter().map(|s| CString::new(s.as_ref())).collect::<Result<Vec<_>, _>>()?;
		let string_ptrs = strings.iter().map(|s| s.as_ptr()).collect::<Vec<_>>();
		ortsys![unsafe runtime, FillStringTensor(value.ptr(), string_ptrs.as_ptr(), string_ptrs.len())?];

		Ok(value)
	}

	/// Copies the tensor's elements out as `(data, shape)`.
	///
	/// Fails with [`ErrorCode::TypeMismatch`] if the tensor's element type
	/// is not `T`.
	pub fn extract<T: TensorElement>(&self) -> Result<(Vec<T>, Vec<i64>)> {
		let (data, shape) = self.view::<T>()?;
		Ok((data.to_vec(), shape))
	}

	/// Borrows the tensor's elements in place as `(data, shape)`.
	///
	/// The slice aliases the native buffer; the borrow ties it to this
	/// value, so it cannot be read after the value is dropped.
	pub fn view<T: TensorElement>(&self) -> Result<(&[T], Vec<i64>)> {
		let actual = self.element_type()?;
		if actual != T::ELEMENT_TYPE {
			return Err(Error::new(
				ErrorCode::TypeMismatch,
				format!("tensor holds {actual:?}, but {:?} was requested", T::ELEMENT_TYPE)
			));
		}

		let shape = self.shape()?;
		let count = self.element_count()?;
		if count == 0 {
			return Ok((&[], shape));
		}

		let rt = self.runtime();
		let mut data_ptr: *mut c_void = ptr::null_mut();
		ortsys![unsafe rt, GetTensorMutableData(self.ptr(), &mut data_ptr)?];
		if data_ptr.is_null() {
			return Err(Error::new(ErrorCode::GenericFailure, "`GetTensorMutableData` returned null"));
		}
		let data = unsafe { slice::from_raw_parts(data_ptr.cast::<T>(), count) };
		Ok((data, shape))
	}

	/// Copies all strings out of a string tensor as `(data, shape)`, in
	/// flat-index order.
	pub fn extract_strings(&self) -> Result<(Vec<String>, Vec<i64>)> {
		let actual = self.element_type()?;
		if actual != TensorElementType::String {
			return Err(Error::new(ErrorCode::TypeMismatch, format!("tensor holds {actual:?}, but String was requested")));
		}

		let shape = self.shape()?;
		let count = self.element_count()?;
		if count == 0 {
			return Ok((Vec::new(), shape));
		}

		let rt = self.runtime();
		let mut total_len = 0;
		ortsys![unsafe rt, GetStringTensorDataLength(self.ptr(), &mut total_len)?];

		let mut content = vec![0_u8; total_len];
		let mut offsets = vec![0_usize; count];
		ortsys![
			unsafe rt,
			GetStringTensorContent(self.ptr(), content.as_mut_ptr().cast(), total_len, offsets.as_mut_ptr(), count)?
		];

		let mut strings = Vec::with_capacity(count);
		for i in 0..count {
			let start = offsets[i];
			let end = if i + 1 < count { offsets[i + 1] } else { total_len };
			strings.push(String::from_utf8_lossy(&content[start..end]).into_owned());
		}
		Ok((strings, shape))
	}

	/// Returns the string at `index` (flat order) in a string tensor.
	pub fn string_element(&self, index: usize) -> Result<String> {
		let rt = self.runtime();
		let mut len = 0;
		ortsys![unsafe rt, GetStringTensorElementLength(self.ptr(), index, &mut len)?];

		let mut buf = vec![0_u8; len];
		ortsys![unsafe rt, GetStringTensorElement(self.ptr(), len, index, buf.as_mut_ptr().cast())?];
		Ok(String::from_utf8_lossy(&buf).into_owned())
	}

	/// Replaces the string at `index` (flat order) in a string tensor.
	pub fn set_string_element(&mut self, index: usize, value: impl AsRef<str>) -> Result<()> {
		let value = CString::new(value.as_ref())?;
		let rt = self.runtime();
		ortsys![unsafe rt, FillStringTensorElement(self.ptr(), value.as_ptr(), index)?];
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_empty_data() {
		let err = validate_dims(0, &[1, 10]).expect_err("empty data");
		assert_eq!(err.code(), ErrorCode::EmptyData);
	}

	#[test]
	fn rejects_empty_shape() {
		let err = validate_dims(10, &[]).expect_err("empty shape");
		assert_eq!(err.code(), ErrorCode::EmptyShape);
	}

	#[test]
	fn rejects_negative_dimension() {
		let err = validate_dims(10, &[-1, 10]).expect_err("negative dim");
		assert_eq!(err.code(), ErrorCode::InvalidArgument);
	}

	#[test]
	fn rejects_element_count_mismatch() {
		let err = validate_dims(9, &[1, 10]).expect_err("count mismatch");
		assert_eq!(err.code(), ErrorCode::InvalidArgument);
	}

	#[test]
	fn accepts_matching_dims() {
		assert!(validate_dims(6, &[2, 3]).is_ok());
		assert!(validate_dims(1, &[1, 1, 1]).is_ok());
	}
}
