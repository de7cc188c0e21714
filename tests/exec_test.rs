#![cfg(unix)]

use std::time::{Duration, Instant};

use scriptman::exec::{ExecError, ExecOptions, Executor, Shell};

fn sh() -> Executor {
    Executor::new(Shell::new("/bin/sh", &["-c"]))
}

#[tokio::test]
async fn successful_command_yields_output_and_zero_exit() {
    let result = sh()
        .run("echo hello", &ExecOptions::default())
        .await
        .unwrap();
    assert!(result.output.contains("hello"));
    assert_eq!(result.exit_code, 0);
    assert!(result.success);
    assert!(result.error.is_empty());
}

#[tokio::test]
async fn nonzero_exit_is_a_result_not_an_error() {
    let result = sh()
        .run("echo bad >&2; exit 1", &ExecOptions::default())
        .await
        .unwrap();
    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(result.error.contains("bad"));
}

#[tokio::test]
async fn silent_success_returns_empty_strings() {
    let result = sh().run("true", &ExecOptions::default()).await.unwrap();
    assert!(result.success);
    assert!(result.output.is_empty());
    assert!(result.error.is_empty());
}

#[tokio::test]
async fn missing_interpreter_is_a_spawn_failure() {
    let executor = Executor::new(Shell::new("/nonexistent/interpreter", &["-c"]));
    let err = executor
        .run("echo hello", &ExecOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ExecError::Spawn { .. }));
}

#[tokio::test]
async fn deadline_cancels_and_kills_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let command = format!("sleep 1 && touch {}", marker.display());

    let opts = ExecOptions {
        cancel_after: Some(Duration::from_millis(100)),
    };
    let started = Instant::now();
    let err = sh().run(&command, &opts).await.unwrap_err();

    assert!(matches!(err, ExecError::Cancelled { .. }));
    // Cancellation must not wait out the sleep.
    assert!(started.elapsed() < Duration::from_millis(900));

    // If the shell had survived the kill it would create the marker once the
    // sleep finishes.
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert!(!marker.exists());
}

#[tokio::test]
async fn concurrent_runs_are_independent() {
    let executor = sh();
    let opts = ExecOptions::default();
    let (a, b) = tokio::join!(
        executor.run("echo one", &opts),
        executor.run("echo two", &opts),
    );
    assert!(a.unwrap().output.contains("one"));
    assert!(b.unwrap().output.contains("two"));
}
