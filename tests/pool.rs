mod common;

use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering}
};
use std::time::Duration;

use dynort::{
	AfterRun, CancellationToken, ErrorCode, PoolConfig, RunSpec, TracingHook,
	pool::SessionPool
};
use test_log::test;

#[test]
fn zero_sized_pool_is_rejected() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let err = SessionPool::from_bytes(&env, &common::identity_model(), 0, PoolConfig::default()).expect_err("size 0");
	assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

#[test]
fn empty_model_is_rejected() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let err = SessionPool::from_bytes(&env, &[], 2, PoolConfig::default()).expect_err("empty model");
	assert_eq!(err.code(), ErrorCode::EmptyModel);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn basic_inference_updates_stats() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let pool = SessionPool::from_bytes(&env, &common::identity_model(), 2, PoolConfig::default()).expect("create pool");
	assert_eq!(pool.input_names(), ["input".to_string()]);
	assert_eq!(pool.output_names(), ["output".to_string()]);

	let data: Vec<f32> = (1..=10).map(|v| v as f32).collect();
	let inputs = common::float_inputs(&rt, data.clone(), &[1, 10]);
	let outputs = pool.run(&inputs, &RunSpec::new()).await.expect("run");

	let output = outputs.get("output").expect("output present");
	let (out, shape) = output.extract::<f32>().expect("extract");
	assert_eq!(out, data);
	assert_eq!(shape, vec![1, 10]);

	let stats = pool.stats();
	assert_eq!(stats.total_runs, 1);
	assert_eq!(stats.total_errors, 0);
	assert_eq!(stats.pool_size, 2);
	assert_eq!(stats.available, 2);
	assert!(stats.total_latency > Duration::ZERO);
	assert!(stats.avg_latency() > Duration::ZERO);

	pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_burst_runs_them_all() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let pool = SessionPool::from_bytes(&env, &common::identity_model(), 4, PoolConfig::default()).expect("create pool");
	let inputs = Arc::new(common::float_inputs(&rt, vec![1.0; 10], &[1, 10]));

	let mut tasks = Vec::new();
	for _ in 0..20 {
		let pool = pool.clone();
		let inputs = Arc::clone(&inputs);
		tasks.push(tokio::spawn(async move { pool.run(&inputs, &RunSpec::new()).await }));
	}
	for task in tasks {
		task.await.expect("task").expect("run");
	}

	let stats = pool.stats();
	assert_eq!(stats.total_runs, 20);
	assert_eq!(stats.total_errors, 0);
	// every session is back between operations
	assert_eq!(stats.available, 4);

	pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancelled_token_short_circuits_checkout() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let pool = SessionPool::from_bytes(&env, &common::identity_model(), 1, PoolConfig::default()).expect("create pool");
	let inputs = common::float_inputs(&rt, vec![1.0; 10], &[1, 10]);

	let token = CancellationToken::new();
	token.cancel();
	let spec = RunSpec::new().with_cancellation(token);
	let err = pool.run(&inputs, &spec).await.expect_err("cancelled");
	assert_eq!(err.code(), ErrorCode::Cancelled);

	// no session was consumed and nothing was recorded
	assert_eq!(pool.available(), 1);
	assert_eq!(pool.stats().total_runs, 0);

	// the pool is still usable
	pool.run(&inputs, &RunSpec::new()).await.expect("run after cancellation");

	pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn hooks_observe_both_phases() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let before = Arc::new(AtomicUsize::new(0));
	let after = Arc::new(AtomicUsize::new(0));
	let after_ = Arc::clone(&after);

	struct CountingHook(Arc<AtomicUsize>);
	impl dynort::RunHook for CountingHook {
		fn before_run(&self, info: &dynort::RunInfo) {
			assert_eq!(info.input_names, ["input".to_string()]);
			assert!(info.error.is_none());
			self.0.fetch_add(1, Ordering::SeqCst);
		}
		fn after_run(&self, _info: &dynort::RunInfo) {}
	}

	let config = PoolConfig {
		hooks: vec![
			Arc::new(CountingHook(Arc::clone(&before))),
			Arc::new(AfterRun::new(move |info: &dynort::RunInfo| {
				assert_eq!(info.output_names, ["output".to_string()]);
				assert!(info.error.is_none());
				assert!(info.duration > Duration::ZERO);
				after_.fetch_add(1, Ordering::SeqCst);
			})),
			Arc::new(TracingHook),
		],
		..Default::default()
	};

	let pool = SessionPool::from_bytes(&env, &common::identity_model(), 1, config).expect("create pool");
	let inputs = common::float_inputs(&rt, vec![1.0; 10], &[1, 10]);
	pool.run(&inputs, &RunSpec::new()).await.expect("run");

	assert_eq!(before.load(Ordering::SeqCst), 1);
	assert_eq!(after.load(Ordering::SeqCst), 1);

	pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn warmup_runs_once_per_slot() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let pool = SessionPool::from_bytes(&env, &common::identity_model(), 3, PoolConfig::default()).expect("create pool");
	let inputs = common::float_inputs(&rt, vec![1.0; 10], &[1, 10]);

	pool.warmup(&inputs, &RunSpec::new()).await.expect("warmup");
	assert_eq!(pool.stats().total_runs, 3);

	pool.health_check(&inputs).await.expect("health check");
	assert_eq!(pool.stats().total_runs, 4);

	pool.reset_stats();
	let stats = pool.stats();
	assert_eq!((stats.total_runs, stats.total_errors, stats.total_latency), (0, 0, Duration::ZERO));

	pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn warmup_respects_cancellation() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let pool = SessionPool::from_bytes(&env, &common::identity_model(), 2, PoolConfig::default()).expect("create pool");
	let inputs = common::float_inputs(&rt, vec![1.0; 10], &[1, 10]);

	let token = CancellationToken::new();
	token.cancel();
	let err = pool.warmup(&inputs, &RunSpec::new().with_cancellation(token)).await.expect_err("cancelled warmup");
	assert_eq!(err.code(), ErrorCode::Cancelled);
	assert_eq!(pool.stats().total_runs, 0);

	pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn closed_pool_rejects_runs() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let pool = SessionPool::from_bytes(&env, &common::identity_model(), 2, PoolConfig::default()).expect("create pool");
	pool.close().await;
	assert!(pool.is_closed());

	let inputs = common::float_inputs(&rt, vec![1.0; 10], &[1, 10]);
	let err = pool.run(&inputs, &RunSpec::new()).await.expect_err("pool closed");
	assert_eq!(err.code(), ErrorCode::PoolClosed);

	// close is idempotent
	pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn close_waits_for_in_flight_runs() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let pool = SessionPool::from_bytes(&env, &common::identity_model(), 1, PoolConfig::default()).expect("create pool");
	let inputs = Arc::new(common::float_inputs(&rt, vec![1.0; 10], &[1, 10]));

	let mut tasks = Vec::new();
	for _ in 0..8 {
		let pool = pool.clone();
		let inputs = Arc::clone(&inputs);
		tasks.push(tokio::spawn(async move { pool.run(&inputs, &RunSpec::new()).await }));
	}
	tokio::time::sleep(Duration::from_millis(10)).await;
	pool.close().await;

	let mut completed = 0;
	for task in tasks {
		if task.await.expect("task").is_ok() {
			completed += 1;
		}
	}
	// runs that had checked out finish; late arrivals see PoolClosed
	assert_eq!(pool.stats().total_runs, completed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn prepacked_weights_can_be_shared() {
	let Some(rt) = common::runtime() else { return };
	let env = common::environment(&rt);

	let config = PoolConfig {
		share_prepacked_weights: true,
		..Default::default()
	};
	let pool = SessionPool::from_bytes(&env, &common::identity_model(), 2, config).expect("create pool");
	let inputs = common::float_inputs(&rt, vec![1.0; 10], &[1, 10]);
	pool.run(&inputs, &RunSpec::new()).await.expect("run");
	pool.close().await;
}
