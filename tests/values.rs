mod common;

use dynort::{ErrorCode, TensorElementType, Value, ValueKind};
use half::f16;
use test_log::test;

#[test]
fn tensor_round_trips_every_element_type() {
	let Some(rt) = common::runtime() else { return };

	macro_rules! round_trip {
		($ty:ty, $data:expr, $shape:expr) => {{
			let data: Vec<$ty> = $data;
			let value = Value::from_slice(&rt, &data, &$shape).expect("create tensor");
			let (out, shape) = value.extract::<$ty>().expect("extract tensor");
			assert_eq!(out, data);
			assert_eq!(shape, $shape);
		}};
	}

	round_trip!(f32, vec![1.0, 2.0, 3.0, 4.0], [2, 2]);
	round_trip!(f64, vec![1.5, -2.5], [2]);
	round_trip!(i8, vec![-1, 0, 1], [3]);
	round_trip!(i16, vec![-300, 300], [2]);
	round_trip!(i32, vec![i32::MIN, i32::MAX], [2]);
	round_trip!(i64, vec![i64::MIN, i64::MAX], [1, 2]);
	round_trip!(u8, vec![0, 255], [2]);
	round_trip!(u16, vec![0, 65535], [2]);
	round_trip!(u32, vec![7; 6], [2, 3]);
	round_trip!(u64, vec![u64::MAX], [1]);
	round_trip!(bool, vec![true, false, true], [3]);
	round_trip!(f16, vec![f16::from_f32(1.0), f16::from_f32(0.5)], [2]);
	round_trip!(half::bf16, vec![half::bf16::from_f32(-2.5)], [1]);
}

#[test]
fn extract_with_wrong_type_fails() {
	let Some(rt) = common::runtime() else { return };

	let value = Value::from_slice(&rt, &[1.0_f32, 2.0], &[2]).expect("create tensor");
	let err = value.extract::<i64>().expect_err("f32 tensor read as i64");
	assert_eq!(err.code(), ErrorCode::TypeMismatch);
	let err = value.extract_strings().expect_err("f32 tensor read as strings");
	assert_eq!(err.code(), ErrorCode::TypeMismatch);
}

#[test]
fn borrowing_view_matches_extract() {
	let Some(rt) = common::runtime() else { return };

	let data = vec![3_i32, 1, 4, 1, 5, 9];
	let value = Value::from_vec(&rt, data.clone(), &[6]).expect("create tensor");
	let (view, shape) = value.view::<i32>().expect("view tensor");
	assert_eq!(view, &data[..]);
	assert_eq!(shape, vec![6]);
}

#[test]
fn introspection_reports_tensor_properties() {
	let Some(rt) = common::runtime() else { return };

	let value = Value::from_slice(&rt, &[1.0_f32; 12], &[3, 4]).expect("create tensor");
	assert_eq!(value.shape().expect("shape"), vec![3, 4]);
	assert_eq!(value.element_type().expect("element type"), TensorElementType::Float32);
	assert_eq!(value.element_count().expect("count"), 12);
	assert!(value.is_tensor().expect("is_tensor"));
	assert!(value.has_value().expect("has_value"));
	assert_eq!(value.kind().expect("kind"), ValueKind::Tensor);
}

#[test]
fn string_tensor_round_trips() {
	let Some(rt) = common::runtime() else { return };

	let strings = ["hello", "world", "foo"];
	let value = Value::from_strings(&rt, &strings, &[3]).expect("create string tensor");
	let (out, shape) = value.extract_strings().expect("extract strings");
	assert_eq!(out, vec!["hello", "world", "foo"]);
	assert_eq!(shape, vec![3]);
	assert_eq!(value.element_type().expect("element type"), TensorElementType::String);
}

#[test]
fn string_tensor_elements_can_be_replaced() {
	let Some(rt) = common::runtime() else { return };

	let mut value = Value::from_strings(&rt, &["hello", "world", "foo"], &[3]).expect("create string tensor");
	value.set_string_element(1, "replaced").expect("replace element");
	assert_eq!(value.string_element(1).expect("read element"), "replaced");
	assert_eq!(value.string_element(0).expect("read element"), "hello");
	assert_eq!(value.string_element(2).expect("read element"), "foo");
}

#[test]
fn string_tensor_keeps_empty_strings() {
	let Some(rt) = common::runtime() else { return };

	let value = Value::from_strings(&rt, &["", "x", ""], &[3]).expect("create string tensor");
	let (out, shape) = value.extract_strings().expect("extract strings");
	assert_eq!(out, vec!["", "x", ""]);
	assert_eq!(shape, vec![3]);
}

#[test]
fn empty_buffer_is_rejected() {
	let Some(rt) = common::runtime() else { return };

	let err = Value::from_slice::<f32>(&rt, &[], &[0]).expect_err("empty data");
	assert_eq!(err.code(), ErrorCode::EmptyData);
	let err = Value::from_slice(&rt, &[1.0_f32], &[]).expect_err("empty shape");
	assert_eq!(err.code(), ErrorCode::EmptyShape);
	let err = Value::from_strings::<&str>(&rt, &[], &[0]).expect_err("empty strings");
	assert_eq!(err.code(), ErrorCode::EmptyData);
}

#[test]
fn shape_element_mismatch_is_rejected() {
	let Some(rt) = common::runtime() else { return };

	let err = Value::from_slice(&rt, &[1.0_f32; 9], &[2, 5]).expect_err("9 elements for 10-element shape");
	assert_eq!(err.code(), ErrorCode::InvalidArgument);
}
