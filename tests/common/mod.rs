//! Shared fixtures for the integration tests.
//!
//! These tests need a real ONNX Runtime shared library. Point
//! `ONNXRUNTIME_LIB_PATH` at one (or install it in a standard location);
//! when neither works the tests skip silently, so the unit suite stays
//! green on machines without the library.

#![allow(dead_code)]

use dynort::{Environment, LogLevel, Runtime, Value, ValueMap};

pub const API_VERSION: u32 = 23;

/// Loads the runtime under test, or `None` to skip when no library is
/// around. A path set explicitly via `ONNXRUNTIME_LIB_PATH` is expected to
/// work, so failures there panic instead of skipping.
pub fn runtime() -> Option<Runtime> {
	let path = std::env::var("ONNXRUNTIME_LIB_PATH").unwrap_or_default();
	match Runtime::load(&path, API_VERSION) {
		Ok(runtime) => Some(runtime),
		Err(_) if path.is_empty() => None,
		Err(e) => panic!("failed to load ONNX Runtime from ONNXRUNTIME_LIB_PATH={path}: {e}")
	}
}

pub fn environment(runtime: &Runtime) -> Environment {
	Environment::new(runtime, "dynort-tests", LogLevel::Warning).expect("create environment")
}

pub fn float_inputs(runtime: &Runtime, data: Vec<f32>, shape: &[i64]) -> ValueMap {
	let tensor = Value::from_vec(runtime, data, shape).expect("create input tensor");
	ValueMap::from([("input".to_string(), tensor)])
}

// --- minimal ONNX model, assembled by hand ---------------------------------
//
// The tests only need *a* valid model, so we emit the protobuf for a
// single-node Identity graph (float32 `input` [1, 10] -> `output` [1, 10])
// directly rather than shipping a binary fixture.

fn varint(mut value: u64, out: &mut Vec<u8>) {
	loop {
		let byte = (value & 0x7f) as u8;
		value >>= 7;
		if value != 0 {
			out.push(byte | 0x80);
		} else {
			out.push(byte);
			break;
		}
	}
}

fn field_varint(field: u32, value: u64, out: &mut Vec<u8>) {
	varint(u64::from(field) << 3, out);
	varint(value, out);
}

fn field_bytes(field: u32, bytes: &[u8], out: &mut Vec<u8>) {
	varint(u64::from(field) << 3 | 2, out);
	varint(bytes.len() as u64, out);
	out.extend_from_slice(bytes);
}

fn tensor_value_info(name: &str, dims: &[i64]) -> Vec<u8> {
	let mut shape = Vec::new();
	for &dim in dims {
		let mut dimension = Vec::new();
		field_varint(1, dim as u64, &mut dimension); // dim_value
		field_bytes(1, &dimension, &mut shape); // dim
	}

	let mut tensor_type = Vec::new();
	field_varint(1, 1, &mut tensor_type); // elem_type = FLOAT
	field_bytes(2, &shape, &mut tensor_type); // shape

	let mut type_proto = Vec::new();
	field_bytes(1, &tensor_type, &mut type_proto); // tensor_type

	let mut value_info = Vec::new();
	field_bytes(1, name.as_bytes(), &mut value_info); // name
	field_bytes(2, &type_proto, &mut value_info); // type
	value_info
}

/// A complete `ModelProto` for `output = Identity(input)`, both float32
/// tensors of shape `[1, 10]`.
pub fn identity_model() -> Vec<u8> {
	let mut node = Vec::new();
	field_bytes(1, b"input", &mut node); // input
	field_bytes(2, b"output", &mut node); // output
	field_bytes(3, b"identity0", &mut node); // name
	field_bytes(4, b"Identity", &mut node); // op_type

	let mut graph = Vec::new();
	field_bytes(1, &node, &mut graph); // node
	field_bytes(2, b"main_graph", &mut graph); // name
	field_bytes(11, &tensor_value_info("input", &[1, 10]), &mut graph); // input
	field_bytes(12, &tensor_value_info("output", &[1, 10]), &mut graph); // output

	let mut opset = Vec::new();
	field_varint(2, 13, &mut opset); // version

	let mut model = Vec::new();
	field_varint(1, 8, &mut model); // ir_version
	field_bytes(2, b"dynort-tests", &mut model); // producer_name
	field_bytes(7, &graph, &mut model); // graph
	field_bytes(8, &opset, &mut model); // opset_import
	model
}
