use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn counting_loop(counter: Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
    async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn drop_aborts_tasks() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut tasks = TaskSet::new();
    tasks.spawn(counting_loop(counter.clone()));
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 2);

    drop(tasks);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn abort_all_is_idempotent() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut tasks = TaskSet::new();
    tasks.spawn(counting_loop(counter.clone()));
    assert_eq!(tasks.live(), 1);
    tasks.abort_all();
    tasks.abort_all();
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(tasks.live(), 0);
}

#[tokio::test]
async fn finished_tasks_are_pruned_on_spawn() {
    let mut tasks = TaskSet::new();
    tasks.spawn(async {});
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    tasks.spawn(std::future::pending());
    assert_eq!(tasks.live(), 1);
}
