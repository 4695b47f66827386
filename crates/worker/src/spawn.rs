use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;

use crate::TaskClass;

fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static GLOBAL_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("hyperclick-worker-global")
			.build()
			.expect("failed to build hyperclick-worker global tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns an async task on the current runtime, falling back to a shared
/// runtime when called outside of one.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	runtime_handle().spawn(fut)
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	#[test]
	fn test_spawn_outside_runtime_uses_shared_runtime() {
		let (tx, rx) = std::sync::mpsc::channel();
		drop(spawn(TaskClass::Background, async move {
			tx.send(7).unwrap();
		}));
		assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 7);
	}

	#[tokio::test(flavor = "current_thread")]
	async fn test_spawn_inside_runtime_uses_it() {
		let handle = spawn(TaskClass::Interactive, async { 1 + 1 });
		assert_eq!(handle.await.unwrap(), 2);
	}
}
