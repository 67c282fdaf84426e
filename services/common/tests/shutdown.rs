//! Sends SIGTERM to the test process itself; kept in its own test binary.
#![cfg(unix)]

use std::process::Command;
use std::time::Duration;

#[tokio::test]
async fn sigterm_cancels_the_shutdown_token() {
    let token = common::shutdown::shutdown_token();
    assert!(!token.is_cancelled());

    let status = Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    tokio::time::timeout(Duration::from_secs(5), token.cancelled())
        .await
        .expect("token was not cancelled after SIGTERM");
}
