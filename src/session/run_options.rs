use std::{
	ffi::CString,
	ptr::{self, NonNull},
	sync::Arc
};

use tokio::{sync::oneshot, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
	LoraAdapter, Runtime,
	error::{Error, ErrorCode, Result},
	ortsys,
	runtime::LORA_API_VERSION
};

/// Per-run configuration: an optional output subset, a run tag for log
/// correlation, LoRA adapters to activate for this run only, and an optional
/// cancellation token.
#[derive(Debug, Clone, Default)]
pub struct RunSpec {
	pub(crate) outputs: Option<Vec<String>>,
	pub(crate) tag: Option<String>,
	pub(crate) adapters: Vec<Arc<LoraAdapter>>,
	pub(crate) cancellation: Option<CancellationToken>
}

impl RunSpec {
	pub fn new() -> Self {
		Self::default()
	}

	/// Computes only the named outputs instead of everything the model
	/// declares.
	pub fn with_outputs<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
		self.outputs = Some(names.into_iter().map(Into::into).collect());
		self
	}

	/// Attaches an opaque tag to this run, propagated into runtime log lines.
	pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
		self.tag = Some(tag.into());
		self
	}

	/// Activates a LoRA adapter for this run only.
	pub fn with_adapter(mut self, adapter: Arc<LoraAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	/// Observes the given token: if it fires while the native call is in
	/// flight, the run is asked to terminate (best-effort; the runtime
	/// decides when to check the flag).
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = Some(token);
		self
	}

	pub(crate) fn cancellation(&self) -> Option<&CancellationToken> {
		self.cancellation.as_ref()
	}
}

/// A native `OrtRunOptions` handle.
///
/// `terminate` only sets a flag on the native object, and upstream documents
/// the flag as safe to set from another thread, hence `Send + Sync`; the
/// watcher task relies on this.
#[derive(Debug)]
pub(crate) struct RunOptions {
	ptr: NonNull<dynort_sys::OrtRunOptions>,
	runtime: Runtime
}

unsafe impl Send for RunOptions {}
unsafe impl Sync for RunOptions {}

impl RunOptions {
	fn new(runtime: &Runtime) -> Result<Self> {
		let mut ptr: *mut dynort_sys::OrtRunOptions = ptr::null_mut();
		ortsys![unsafe runtime, CreateRunOptions(&mut ptr)?];
		Ok(RunOptions {
			ptr: NonNull::new(ptr).ok_or_else(|| Error::new(ErrorCode::GenericFailure, "`CreateRunOptions` returned null"))?,
			runtime: runtime.clone()
		})
	}

	fn set_tag(&self, tag: &str) -> Result<()> {
		let tag = CString::new(tag)?;
		let rt = &self.runtime;
		ortsys![unsafe rt, RunOptionsSetRunTag(self.ptr.as_ptr(), tag.as_ptr())?];
		Ok(())
	}

	fn add_active_adapter(&self, adapter: &LoraAdapter) -> Result<()> {
		let rt = &self.runtime;
		ortsys![unsafe rt, RunOptionsAddActiveLoraAdapter(self.ptr.as_ptr(), adapter.ptr())?];
		Ok(())
	}

	fn terminate(&self) -> Result<()> {
		let rt = &self.runtime;
		ortsys![unsafe rt, RunOptionsSetTerminate(self.ptr.as_ptr())?];
		Ok(())
	}
}

impl Drop for RunOptions {
	fn drop(&mut self) {
		let rt = &self.runtime;
		ortsys![unsafe rt, ReleaseRunOptions(self.ptr.as_ptr())];
	}
}

/// The run-options state for one in-flight native call.
///
/// Built only when the spec carries something the native call needs (a tag,
/// adapters, or an observable cancellation token); a spec with none of these
/// results in a null run-options pointer instead.
pub(crate) struct ActiveRunOptions {
	options: Arc<RunOptions>,
	watcher: Option<(oneshot::Sender<()>, JoinHandle<()>)>
}

impl ActiveRunOptions {
	pub(crate) fn build(runtime: &Runtime, spec: &RunSpec) -> Result<Option<Self>> {
		if spec.cancellation.is_none() && spec.tag.is_none() && spec.adapters.is_empty() {
			return Ok(None);
		}

		let options = RunOptions::new(runtime)?;
		if let Some(tag) = &spec.tag {
			options.set_tag(tag)?;
		}
		if !spec.adapters.is_empty() {
			runtime.require_api_version(LORA_API_VERSION, "LoRA adapters")?;
			for adapter in &spec.adapters {
				options.add_active_adapter(adapter)?;
			}
		}

		let options = Arc::new(options);
		let watcher = spec.cancellation.clone().map(|token| {
			let (done_tx, done_rx) = oneshot::channel::<()>();
			let shared = Arc::clone(&options);
			let handle = tokio::spawn(async move {
				tokio::select! {
					_ = token.cancelled() => {
						let _ = shared.terminate();
					}
					_ = done_rx => {}
				}
			});
			(done_tx, handle)
		});

		Ok(Some(ActiveRunOptions { options, watcher }))
	}

	pub(crate) fn ptr(&self) -> *const dynort_sys::OrtRunOptions {
		self.options.ptr.as_ptr()
	}

	/// Raises the done signal and joins the watcher task, then drops the
	/// native handle. The join must complete before release: a watcher that
	/// could still call `terminate` on a freed handle would be a
	/// use-after-free.
	pub(crate) async fn finish(self) {
		if let Some((done_tx, handle)) = self.watcher {
			let _ = done_tx.send(());
			let _ = handle.await;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn spec_defaults_need_no_native_options() {
		let spec = RunSpec::new();
		assert!(spec.cancellation.is_none() && spec.tag.is_none() && spec.adapters.is_empty());
	}

	#[test]
	fn spec_with_tag_needs_native_options() {
		let spec = RunSpec::new().with_tag("req-1234");
		assert_eq!(spec.tag.as_deref(), Some("req-1234"));
	}

	#[test]
	fn spec_with_cancellation_is_observable() {
		let token = CancellationToken::new();
		let spec = RunSpec::new().with_cancellation(token.clone());
		assert!(spec.cancellation().is_some());
		token.cancel();
		assert!(spec.cancellation().map(|t| t.is_cancelled()).unwrap_or_default());
	}

	#[test]
	fn output_subset_preserves_order() {
		let spec = RunSpec::new().with_outputs(["logits", "attention"]);
		assert_eq!(spec.outputs.as_deref(), Some(&["logits".to_string(), "attention".to_string()][..]));
	}
}
