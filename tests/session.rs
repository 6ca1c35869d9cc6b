mod common;

use dynort::{
	CPU_EXECUTION_PROVIDER, ErrorCode, ExecutionProvider, GraphOptimizationLevel, RunSpec, Session, SessionOptions, TensorElementType, Value, ValueKind
};
use test_log::test;

#[test]
fn session_caches_declared_names_in_order() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let session = Session::from_bytes(&env, &common::identity_model(), &SessionOptions::new()).expect("create session");
	assert_eq!(session.input_names(), ["input".to_string()]);
	assert_eq!(session.output_names(), ["output".to_string()]);
	// stable across calls
	assert_eq!(session.input_names(), session.input_names());
}

#[test]
fn empty_model_is_rejected() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let err = Session::from_bytes(&env, &[], &SessionOptions::new()).expect_err("empty model");
	assert_eq!(err.code(), ErrorCode::EmptyModel);
}

#[test]
fn missing_model_file_reports_native_error() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let err = Session::from_file(&env, "does-not-exist.onnx", &SessionOptions::new()).expect_err("missing file");
	assert_eq!(err.code(), ErrorCode::NoSuchFile);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_round_trips_through_identity() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let mut session = Session::from_bytes(&env, &common::identity_model(), &SessionOptions::new()).expect("create session");
	let data: Vec<f32> = (1..=10).map(|v| v as f32).collect();
	let inputs = common::float_inputs(&rt, data.clone(), &[1, 10]);

	let outputs = session.run(&inputs, &RunSpec::new()).await.expect("run");
	let output = outputs.get("output").expect("output present");
	let (out, shape) = output.extract::<f32>().expect("extract output");
	assert_eq!(out, data);
	assert_eq!(shape, vec![1, 10]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_input_keys_are_ignored() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let mut session = Session::from_bytes(&env, &common::identity_model(), &SessionOptions::new()).expect("create session");
	let mut inputs = common::float_inputs(&rt, vec![0.5; 10], &[1, 10]);
	inputs.insert("not_a_model_input".to_string(), Value::from_slice(&rt, &[1.0_f32], &[1]).expect("extra tensor"));

	let outputs = session.run(&inputs, &RunSpec::new()).await.expect("run");
	assert!(outputs.contains_key("output"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_with_tag_and_output_subset() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let mut session = Session::from_bytes(&env, &common::identity_model(), &SessionOptions::new()).expect("create session");
	let inputs = common::float_inputs(&rt, vec![1.0; 10], &[1, 10]);

	let spec = RunSpec::new().with_tag("it-session-0").with_outputs(["output"]);
	let outputs = session.run(&inputs, &spec).await.expect("run");
	assert_eq!(outputs.len(), 1);
	assert!(outputs.contains_key("output"));
}

#[test]
fn session_options_all_apply() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let options = SessionOptions::new()
		.with_intra_threads(1)
		.with_inter_threads(1)
		.with_optimization_level(GraphOptimizationLevel::Basic)
		.with_cpu_mem_arena(false)
		.with_memory_pattern(false)
		.with_deterministic_compute(true)
		.with_config_entry("session.intra_op.allow_spinning", "0");
	Session::from_bytes(&env, &common::identity_model(), &options).expect("create configured session");
}

#[test]
fn type_info_describes_identity_graph() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let session = Session::from_bytes(&env, &common::identity_model(), &SessionOptions::new()).expect("create session");
	let inputs = session.input_info().expect("input info");
	assert_eq!(inputs.len(), 1);
	assert_eq!(inputs[0].name, "input");
	assert_eq!(inputs[0].kind, ValueKind::Tensor);
	let tensor = inputs[0].tensor.as_ref().expect("tensor info");
	assert_eq!(tensor.element_type, Some(TensorElementType::Float32));
	assert_eq!(tensor.shape, vec![1, 10]);

	let outputs = session.output_info().expect("output info");
	assert_eq!(outputs[0].name, "output");
}

#[test]
fn metadata_reflects_the_model() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let session = Session::from_bytes(&env, &common::identity_model(), &SessionOptions::new()).expect("create session");
	let metadata = session.metadata().expect("metadata");
	assert_eq!(metadata.graph_name, "main_graph");
	assert_eq!(metadata.producer_name, "dynort-tests");
	assert!(metadata.custom.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn global_thread_pools_serve_sessions() {
	let Some(rt) = common::runtime() else { return };

	let threading = dynort::ThreadingOptions::new(&rt)
		.expect("create threading options")
		.with_intra_threads(2)
		.expect("intra threads")
		.with_inter_threads(1)
		.expect("inter threads")
		.with_spin_control(false)
		.expect("spin control");
	let env = dynort::Environment::with_global_thread_pools(&rt, "dynort-tests", dynort::LogLevel::Warning, &threading).expect("create environment");
	assert!(env.has_global_thread_pools());

	let options = SessionOptions::new().with_disabled_per_session_threads();
	let mut session = Session::from_bytes(&env, &common::identity_model(), &options).expect("create session");

	let inputs = common::float_inputs(&rt, vec![4.0; 10], &[1, 10]);
	let outputs = session.run(&inputs, &RunSpec::new()).await.expect("run");
	assert!(outputs.contains_key("output"));
}

#[test]
fn provider_fallback_lands_on_cpu() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let providers = [ExecutionProvider::new("NonExistentProvider")];
	let (_session, used) =
		Session::with_provider_fallback(&env, &common::identity_model(), &SessionOptions::new(), &providers).expect("fallback session");
	assert_eq!(used, CPU_EXECUTION_PROVIDER);
}

#[test]
fn available_providers_always_includes_cpu() {
	let Some(rt) = common::runtime() else { return };

	let providers = rt.available_providers().expect("provider list");
	assert!(providers.iter().any(|p| p == CPU_EXECUTION_PROVIDER), "got {providers:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn profiling_writes_a_report() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let dir = std::env::temp_dir().join("dynort-profiling-test");
	let _ = std::fs::create_dir_all(&dir);
	let options = SessionOptions::new().with_profiling(dir.join("run"));
	let mut session = Session::from_bytes(&env, &common::identity_model(), &options).expect("create session");

	let inputs = common::float_inputs(&rt, vec![1.0; 10], &[1, 10]);
	session.run(&inputs, &RunSpec::new()).await.expect("run");

	assert!(session.profiling_start_time_ns().expect("start time") > 0);
	let path = session.end_profiling().expect("end profiling");
	assert!(path.contains("run"), "unexpected profile path {path}");
	let _ = std::fs::remove_file(&path);
}

#[test]
fn build_info_is_nonempty() {
	let Some(rt) = common::runtime() else { return };
	assert!(!rt.build_info().expect("build info").is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn io_binding_round_trips() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let mut session = Session::from_bytes(&env, &common::identity_model(), &SessionOptions::new()).expect("create session");
	let input = Value::from_slice(&rt, &[2.0_f32; 10], &[1, 10]).expect("input");
	let memory = dynort::MemoryInfo::new_cpu(&rt).expect("memory info");

	let mut binding = session.create_io_binding().expect("create binding");
	binding.bind_input("input", &input).expect("bind input");
	binding.bind_output_to_device("output", &memory).expect("bind output");
	binding.run(&RunSpec::new()).await.expect("run with binding");

	let outputs = binding.outputs().expect("bound outputs");
	let output = outputs.get("output").expect("output present");
	let (data, shape) = output.extract::<f32>().expect("extract");
	assert_eq!(data, vec![2.0_f32; 10]);
	assert_eq!(shape, vec![1, 10]);

	binding.clear_inputs();
	binding.clear_outputs();
}
