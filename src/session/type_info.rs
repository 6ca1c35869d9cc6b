use std::ptr;

use super::Session;
use crate::{
	ValueKind,
	error::Result,
	ortsys,
	tensor::TensorElementType
};

/// Element type and (possibly symbolic, reported as -1) shape of a declared
/// tensor input or output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorTypeInfo {
	pub element_type: Option<TensorElementType>,
	pub shape: Vec<i64>
}

/// Declared type information for one model input.
#[derive(Debug, Clone)]
pub struct InputInfo {
	pub name: String,
	pub kind: ValueKind,
	/// Present when `kind` is [`ValueKind::Tensor`].
	pub tensor: Option<TensorTypeInfo>
}

/// Declared type information for one model output.
#[derive(Debug, Clone)]
pub struct OutputInfo {
	pub name: String,
	pub kind: ValueKind,
	/// Present when `kind` is [`ValueKind::Tensor`].
	pub tensor: Option<TensorTypeInfo>
}

impl Session {
	/// Returns declared type information for every model input, in
	/// declaration order.
	pub fn input_info(&self) -> Result<Vec<InputInfo>> {
		let mut infos = Vec::with_capacity(self.input_names().len());
		for (index, name) in self.input_names().iter().enumerate() {
			let (kind, tensor) = self.type_info_at(true, index)?;
			infos.push(InputInfo { name: name.clone(), kind, tensor });
		}
		Ok(infos)
	}

	/// Returns declared type information for every model output, in
	/// declaration order.
	pub fn output_info(&self) -> Result<Vec<OutputInfo>> {
		let mut infos = Vec::with_capacity(self.output_names().len());
		for (index, name) in self.output_names().iter().enumerate() {
			let (kind, tensor) = self.type_info_at(false, index)?;
			infos.push(OutputInfo { name: name.clone(), kind, tensor });
		}
		Ok(infos)
	}

	fn type_info_at(&self, input: bool, index: usize) -> Result<(ValueKind, Option<TensorTypeInfo>)> {
		let rt = self.environment().runtime().clone();

		let mut type_info_ptr: *mut dynort_sys::OrtTypeInfo = ptr::null_mut();
		if input {
			ortsys![unsafe rt, SessionGetInputTypeInfo(self.ptr(), index, &mut type_info_ptr)?];
		} else {
			ortsys![unsafe rt, SessionGetOutputTypeInfo(self.ptr(), index, &mut type_info_ptr)?];
		}
		if type_info_ptr.is_null() {
			return Err(crate::Error::new(crate::ErrorCode::GenericFailure, "type info lookup returned null"));
		}
		let guard = TypeInfoGuard { ptr: type_info_ptr, rt: &rt };

		let mut onnx_type = dynort_sys::ONNXType::ONNX_TYPE_UNKNOWN;
		ortsys![unsafe rt, GetOnnxTypeFromTypeInfo(guard.ptr, &mut onnx_type)?];
		let kind = ValueKind::from(onnx_type);

		let tensor = if kind == ValueKind::Tensor {
			// the cast result is owned by the type info and must not be
			// released separately
			let mut tensor_info_ptr: *const dynort_sys::OrtTensorTypeAndShapeInfo = ptr::null();
			ortsys![unsafe rt, CastTypeInfoToTensorInfo(guard.ptr, &mut tensor_info_ptr)?];

			let mut raw_element = dynort_sys::ONNXTensorElementDataType::ONNX_TENSOR_ELEMENT_DATA_TYPE_UNDEFINED;
			ortsys![unsafe rt, GetTensorElementType(tensor_info_ptr, &mut raw_element)?];

			let mut dim_count = 0;
			ortsys![unsafe rt, GetDimensionsCount(tensor_info_ptr, &mut dim_count)?];
			let mut shape = vec![0_i64; dim_count];
			if dim_count > 0 {
				ortsys![unsafe rt, GetDimensions(tensor_info_ptr, shape.as_mut_ptr(), dim_count)?];
			}

			Some(TensorTypeInfo {
				element_type: TensorElementType::from_sys(raw_element),
				shape
			})
		} else {
			None
		};

		Ok((kind, tensor))
	}
}

struct TypeInfoGuard<'r> {
	ptr: *mut dynort_sys::OrtTypeInfo,
	rt: &'r crate::Runtime
}

impl Drop for TypeInfoGuard<'_> {
	fn drop(&mut self) {
		let rt = self.rt;
		ortsys![unsafe rt, ReleaseTypeInfo(self.ptr)];
	}
}
