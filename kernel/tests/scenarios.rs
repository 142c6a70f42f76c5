//! End-to-end walkthroughs of the documented scenarios, exercised only
//! through the kernel's public API.

use std::sync::Arc;
use std::time::Duration;

use kernel::{Kernel, KernelError};

fn two_by_two() -> Kernel {
    Kernel::new(vec![
        vec!["A".to_string(), "B".to_string()],
        vec!["B".to_string(), "A".to_string()],
    ])
}

#[tokio::test]
async fn solo_match_then_removal() {
    let kernel = two_by_two();

    let board = kernel.flip("alice", 0, 0).await.unwrap();
    assert_eq!(board.render(), "2x2\nmy A\ndown\ndown\ndown\n");

    let board = kernel.flip("alice", 1, 1).await.unwrap();
    assert_eq!(board.render(), "2x2\nmy A\ndown\ndown\nmy A\n");

    let board = kernel.flip("alice", 0, 1).await.unwrap();
    assert_eq!(board.render(), "2x2\nnone\nmy B\ndown\nnone\n");
}

#[tokio::test]
async fn solo_mismatch_then_self_cleanup() {
    let kernel = two_by_two();
    kernel.flip("alice", 0, 0).await.unwrap();
    let board = kernel.flip("alice", 0, 1).await.unwrap();
    assert_eq!(board.render(), "2x2\nup A\nup B\ndown\ndown\n");

    let board = kernel.flip("alice", 1, 0).await.unwrap();
    assert_eq!(board.render(), "2x2\ndown\ndown\nmy B\ndown\n");
}

#[tokio::test]
async fn contention_and_wake() {
    let kernel = Arc::new(two_by_two());
    kernel.flip("alice", 0, 0).await.unwrap();

    let bob_kernel = kernel.clone();
    let bob = tokio::spawn(async move { bob_kernel.flip("bob", 0, 0).await });
    tokio::time::sleep(Duration::from_millis(20)).await;

    kernel.flip("alice", 0, 1).await.unwrap();

    let bob_result = bob.await.unwrap().unwrap();
    assert_eq!(bob_result.render(), "2x2\nmy A\nup B\ndown\ndown\n");
}

#[tokio::test]
async fn contention_then_removal() {
    let kernel = Arc::new(two_by_two());
    kernel.flip("alice", 0, 0).await.unwrap();

    let bob_kernel = kernel.clone();
    let bob = tokio::spawn(async move { bob_kernel.flip("bob", 0, 0).await });
    tokio::time::sleep(Duration::from_millis(20)).await;

    kernel.flip("alice", 1, 1).await.unwrap();
    let board = kernel.flip("alice", 0, 1).await.unwrap();
    assert_eq!(board.render(), "2x2\nnone\nmy B\ndown\nnone\n");

    let bob_result = bob.await.unwrap();
    assert_eq!(bob_result, Err(KernelError::Gone));
}

#[tokio::test]
async fn watch_wakes_on_version_change() {
    let kernel = Arc::new(two_by_two());
    let watcher = kernel.clone();
    let watch_task = tokio::spawn(async move { watcher.watch("bob", Duration::from_secs(30)).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    kernel.flip("alice", 0, 0).await.unwrap();

    let board = watch_task.await.unwrap();
    assert_eq!(board.render(), "2x2\nup A\ndown\ndown\ndown\n");
}

#[tokio::test]
async fn replace_is_atomic_with_match_checks() {
    let kernel = two_by_two();
    kernel
        .map("alice", |label| async move { if label == "A" { "B".to_string() } else { label } })
        .await;

    // Every card is now "B"; a flip of any two should now match.
    kernel.flip("alice", 0, 0).await.unwrap();
    let board = kernel.flip("alice", 0, 1).await.unwrap();
    assert!(board.render().contains("my B"));
}

#[tokio::test]
async fn watch_without_any_change_returns_on_timeout() {
    let kernel = two_by_two();
    let board = kernel.watch("alice", Duration::from_millis(20)).await;
    assert_eq!(board.render(), "2x2\ndown\ndown\ndown\ndown\n");
}
