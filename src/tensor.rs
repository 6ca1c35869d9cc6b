use half::{bf16, f16};

/// The tensor element types this crate can create and extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TensorElementType {
	/// 32-bit float (`f32`).
	Float32,
	/// 64-bit float (`f64`).
	Float64,
	/// Signed 8-bit integer (`i8`).
	Int8,
	/// Signed 16-bit integer (`i16`).
	Int16,
	/// Signed 32-bit integer (`i32`).
	Int32,
	/// Signed 64-bit integer (`i64`).
	Int64,
	/// Unsigned 8-bit integer (`u8`).
	Uint8,
	/// Unsigned 16-bit integer (`u16`).
	Uint16,
	/// Unsigned 32-bit integer (`u32`).
	Uint32,
	/// Unsigned 64-bit integer (`u64`).
	Uint64,
	/// Boolean.
	Bool,
	/// IEEE 754 half-precision float ([`half::f16`]): 1 sign, 5 exponent,
	/// 10 mantissa bits, bias 15.
	Float16,
	/// Brain float ([`half::bf16`]): the upper 16 bits of an IEEE single.
	Bfloat16,
	/// Variable-length string. Created via [`Tensor::from_strings`](crate::Tensor::from_strings),
	/// never through the generic element path.
	String
}

impl TensorElementType {
	pub(crate) fn to_sys(self) -> dynort_sys::ONNXTensorElementDataType {
		use dynort_sys::ONNXTensorElementDataType as T;
		match self {
			Self::Float32 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_FLOAT,
			Self::Float64 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_DOUBLE,
			Self::Int8 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_INT8,
			Self::Int16 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_INT16,
			Self::Int32 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_INT32,
			Self::Int64 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_INT64,
			Self::Uint8 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT8,
			Self::Uint16 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT16,
			Self::Uint32 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT32,
			Self::Uint64 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT64,
			Self::Bool => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_BOOL,
			Self::Float16 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_FLOAT16,
			Self::Bfloat16 => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_BFLOAT16,
			Self::String => T::ONNX_TENSOR_ELEMENT_DATA_TYPE_STRING
		}
	}

	pub(crate) fn from_sys(raw: dynort_sys::ONNXTensorElementDataType) -> Option<Self> {
		use dynort_sys::ONNXTensorElementDataType as T;
		Some(match raw {
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_FLOAT => Self::Float32,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_DOUBLE => Self::Float64,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_INT8 => Self::Int8,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_INT16 => Self::Int16,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_INT32 => Self::Int32,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_INT64 => Self::Int64,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT8 => Self::Uint8,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT16 => Self::Uint16,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT32 => Self::Uint32,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_UINT64 => Self::Uint64,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_BOOL => Self::Bool,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_FLOAT16 => Self::Float16,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_BFLOAT16 => Self::Bfloat16,
			T::ONNX_TENSOR_ELEMENT_DATA_TYPE_STRING => Self::String,
			_ => return None
		})
	}
}

mod private {
	pub trait Sealed {}
}

/// A Rust type usable as a tensor element. Sealed; implemented for the
/// primitive numeric types, `bool`, and the 16-bit float types from the
/// `half` crate.
pub trait TensorElement: private::Sealed + Copy + Send + Sync + 'static {
	const ELEMENT_TYPE: TensorElementType;
}

macro_rules! element {
	($($rust:ty => $variant:ident),+ $(,)?) => {
		$(
			impl private::Sealed for $rust {}
			impl TensorElement for $rust {
				const ELEMENT_TYPE: TensorElementType = TensorElementType::$variant;
			}
		)+
	};
}

element! {
	f32 => Float32,
	f64 => Float64,
	i8 => Int8,
	i16 => Int16,
	i32 => Int32,
	i64 => Int64,
	u8 => Uint8,
	u16 => Uint16,
	u32 => Uint32,
	u64 => Uint64,
	bool => Bool,
	f16 => Float16,
	bf16 => Bfloat16,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sys_mapping_round_trips() {
		for ty in [
			TensorElementType::Float32,
			TensorElementType::Float64,
			TensorElementType::Int8,
			TensorElementType::Int16,
			TensorElementType::Int32,
			TensorElementType::Int64,
			TensorElementType::Uint8,
			TensorElementType::Uint16,
			TensorElementType::Uint32,
			TensorElementType::Uint64,
			TensorElementType::Bool,
			TensorElementType::Float16,
			TensorElementType::Bfloat16,
			TensorElementType::String
		] {
			assert_eq!(TensorElementType::from_sys(ty.to_sys()), Some(ty));
		}
	}

	#[test]
	fn complex_types_are_unsupported() {
		assert_eq!(TensorElementType::from_sys(dynort_sys::ONNXTensorElementDataType::ONNX_TENSOR_ELEMENT_DATA_TYPE_COMPLEX64), None);
		assert_eq!(TensorElementType::from_sys(dynort_sys::ONNXTensorElementDataType::ONNX_TENSOR_ELEMENT_DATA_TYPE_UNDEFINED), None);
	}

	#[test]
	fn element_types_are_compile_time() {
		assert_eq!(<f32 as TensorElement>::ELEMENT_TYPE, TensorElementType::Float32);
		assert_eq!(<f16 as TensorElement>::ELEMENT_TYPE, TensorElementType::Float16);
		assert_eq!(<bf16 as TensorElement>::ELEMENT_TYPE, TensorElementType::Bfloat16);
		assert_eq!(<bool as TensorElement>::ELEMENT_TYPE, TensorElementType::Bool);
	}

	#[test]
	fn f16_round_trips_finite_values() {
		for value in [1.0_f32, 0.5, 65504.0] {
			assert_eq!(f16::from_f32(value).to_f32(), value);
		}
	}

	#[test]
	fn f16_saturates_and_flushes() {
		assert!(f16::from_f32(100000.0).to_f32().is_infinite());
		assert_eq!(f16::from_f32(1e-20).to_f32(), 0.0);
		assert!(f16::from_f32(f32::NAN).to_f32().is_nan());
	}

	#[test]
	fn bf16_keeps_exponent_range() {
		// bf16 shares f32's exponent, so magnitudes far beyond f16's range survive
		let large = bf16::from_f32(3.0e38).to_f32();
		assert!(large.is_finite());
		assert!((large - 3.0e38).abs() / 3.0e38 < 0.01);
		assert_eq!(bf16::from_f32(1.0).to_f32(), 1.0);
		assert_eq!(bf16::from_f32(-2.5).to_f32(), -2.5);
		assert!(bf16::from_f32(f32::NAN).to_f32().is_nan());
	}
}
