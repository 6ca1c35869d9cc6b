mod tensor;

use std::{
	any::Any,
	ffi::c_int,
	fmt,
	ptr::{self, NonNull},
	sync::OnceLock
};

use crate::{
	Runtime,
	error::{Error, ErrorCode, Result},
	ortsys,
	tensor::TensorElementType
};

/// The ONNX kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	Unknown,
	Tensor,
	Sequence,
	Map,
	Opaque,
	SparseTensor,
	Optional
}

impl From<dynort_sys::ONNXType> for ValueKind {
	fn from(value: dynort_sys::ONNXType) -> Self {
		match value {
			dynort_sys::ONNXType::ONNX_TYPE_TENSOR => Self::Tensor,
			dynort_sys::ONNXType::ONNX_TYPE_SEQUENCE => Self::Sequence,
			dynort_sys::ONNXType::ONNX_TYPE_MAP => Self::Map,
			dynort_sys::ONNXType::ONNX_TYPE_OPAQUE => Self::Opaque,
			dynort_sys::ONNXType::ONNX_TYPE_SPARSETENSOR => Self::SparseTensor,
			dynort_sys::ONNXType::ONNX_TYPE_OPTIONAL => Self::Optional,
			dynort_sys::ONNXType::ONNX_TYPE_UNKNOWN => Self::Unknown
		}
	}
}

struct TensorInfo(NonNull<dynort_sys::OrtTensorTypeAndShapeInfo>);

unsafe impl Send for TensorInfo {}
unsafe impl Sync for TensorInfo {}

/// An ONNX Runtime value — most commonly a tensor, but also the sequence,
/// map, opaque, sparse-tensor, and optional kinds produced by some models.
///
/// A `Value` owns its native handle and releases it on drop, along with the
/// lazily cached tensor type-and-shape handle. Values created with
/// [`Value::from_vec`] additionally own the element storage the native
/// tensor borrows, so the data cannot outlive the value or vice versa.
pub struct Value {
	ptr: NonNull<dynort_sys::OrtValue>,
	info: OnceLock<TensorInfo>,
	runtime: Runtime,
	/// Element storage the native tensor borrows; `None` for values whose
	/// storage ONNX Runtime owns (outputs, string tensors).
	_backing: Option<Box<dyn Any + Send + Sync>>
}

unsafe impl Send for Value {}
// reads through `&Value` (introspection, extraction, use as a run input) are
// safe concurrently; all mutation requires `&mut Value`
unsafe impl Sync for Value {}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Value").field("ptr", &self.ptr).finish()
	}
}

impl Value {
	pub(crate) fn from_raw(runtime: Runtime, ptr: NonNull<dynort_sys::OrtValue>) -> Self {
		Value::new(runtime, ptr, None)
	}

	pub(crate) fn new(runtime: Runtime, ptr: NonNull<dynort_sys::OrtValue>, backing: Option<Box<dyn Any + Send + Sync>>) -> Self {
		Value {
			ptr,
			info: OnceLock::new(),
			runtime,
			_backing: backing
		}
	}

	pub(crate) fn ptr(&self) -> *mut dynort_sys::OrtValue {
		self.ptr.as_ptr()
	}

	pub(crate) fn runtime(&self) -> &Runtime {
		&self.runtime
	}

	/// Returns the cached tensor type-and-shape handle, acquiring it on
	/// first use. If two threads race the acquisition, the loser's handle is
	/// released immediately.
	fn info_ptr(&self) -> Result<NonNull<dynort_sys::OrtTensorTypeAndShapeInfo>> {
		if let Some(info) = self.info.get() {
			return Ok(info.0);
		}
		let rt = &self.runtime;
		let mut info_ptr: *mut dynort_sys::OrtTensorTypeAndShapeInfo = ptr::null_mut();
		ortsys![unsafe rt, GetTensorTypeAndShape(self.ptr.as_ptr(), &mut info_ptr)?];
		let info = NonNull::new(info_ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`GetTensorTypeAndShape` returned null"))?;
		match self.info.set(TensorInfo(info)) {
			Ok(()) => Ok(info),
			Err(TensorInfo(ours)) => {
				ortsys![unsafe rt, ReleaseTensorTypeAndShapeInfo(ours.as_ptr())];
				Ok(self.info.get().unwrap_or_else(|| unreachable!("info was just set")).0)
			}
		}
	}

	/// Returns the tensor's shape; a 2×3 matrix yields `[2, 3]`.
	pub fn shape(&self) -> Result<Vec<i64>> {
		let info = self.info_ptr()?;
		let rt = &self.runtime;
		let mut dim_count = 0;
		ortsys![unsafe rt, GetDimensionsCount(info.as_ptr(), &mut dim_count)?];
		let mut dims = vec![0_i64; dim_count];
		if dim_count > 0 {
			ortsys![unsafe rt, GetDimensions(info.as_ptr(), dims.as_mut_ptr(), dim_count)?];
		}
		Ok(dims)
	}

	/// Returns the tensor's element type.
	pub fn element_type(&self) -> Result<TensorElementType> {
		let info = self.info_ptr()?;
		let rt = &self.runtime;
		let mut raw = dynort_sys::ONNXTensorElementDataType::ONNX_TENSOR_ELEMENT_DATA_TYPE_UNDEFINED;
		ortsys![unsafe rt, GetTensorElementType(info.as_ptr(), &mut raw)?];
		TensorElementType::from_sys(raw).ok_or_else(|| Error::new(ErrorCode::InvalidArgument, format!("unsupported tensor element type {raw:?}")))
	}

	/// Returns the total number of elements; a 2×3 matrix has 6.
	pub fn element_count(&self) -> Result<usize> {
		let info = self.info_ptr()?;
		let rt = &self.runtime;
		let mut count = 0;
		ortsys![unsafe rt, GetTensorShapeElementCount(info.as_ptr(), &mut count)?];
		Ok(count)
	}

	/// Whether this value is a tensor (as opposed to a sequence, map, etc.).
	pub fn is_tensor(&self) -> Result<bool> {
		let rt = &self.runtime;
		let mut out: c_int = 0;
		ortsys![unsafe rt, IsTensor(self.ptr.as_ptr(), &mut out)?];
		Ok(out != 0)
	}

	/// Whether this (possibly optional-typed) value holds data.
	pub fn has_value(&self) -> Result<bool> {
		let rt = &self.runtime;
		let mut out: c_int = 0;
		ortsys![unsafe rt, HasValue(self.ptr.as_ptr(), &mut out)?];
		Ok(out != 0)
	}

	/// Returns the [`ValueKind`] of this value.
	pub fn kind(&self) -> Result<ValueKind> {
		let rt = &self.runtime;
		let mut out = dynort_sys::ONNXType::ONNX_TYPE_UNKNOWN;
		ortsys![unsafe rt, GetValueType(self.ptr.as_ptr(), &mut out)?];
		Ok(ValueKind::from(out))
	}

	/// Returns the number of elements in a sequence value.
	pub fn sequence_len(&self) -> Result<usize> {
		let rt = &self.runtime;
		let mut count = 0;
		ortsys![unsafe rt, GetValueCount(self.ptr.as_ptr(), &mut count)?];
		Ok(count)
	}

	/// Extracts each element of a sequence value as its own owned [`Value`].
	pub fn elements(&self) -> Result<Vec<Value>> {
		let count = self.sequence_len()?;
		let mut values = Vec::with_capacity(count);
		for i in 0..count {
			values.push(self.child(i as c_int)?);
		}
		Ok(values)
	}

	/// Extracts the parallel key and value tensors of a map value.
	///
	/// ONNX maps are represented as two tensors under one parent: index 0
	/// holds the keys, index 1 the values. Both returned values are owned by
	/// the caller.
	pub fn map_entries(&self) -> Result<(Value, Value)> {
		let keys = self.child(0)?;
		let values = self.child(1)?;
		Ok((keys, values))
	}

	fn child(&self, index: c_int) -> Result<Value> {
		let rt = &self.runtime;
		let mut out: *mut dynort_sys::OrtValue = ptr::null_mut();
		ortsys![unsafe rt, GetValue(self.ptr.as_ptr(), index, rt.allocator_ptr(), &mut out)?];
		let ptr = NonNull::new(out).ok_or_else(|| Error::new(ErrorCode::GenericFailure, format!("`GetValue` returned null for element {index}")))?;
		Ok(Value::from_raw(self.runtime.clone(), ptr))
	}
}

impl Drop for Value {
	fn drop(&mut self) {
		let rt = &self.runtime;
		if let Some(info) = self.info.take() {
			ortsys![unsafe rt, ReleaseTensorTypeAndShapeInfo(info.0.as_ptr())];
		}
		ortsys![unsafe rt, ReleaseValue(self.ptr.as_ptr())];
	}
}
