//! # Example: deadline
//!
//! Cancellation is not built in, but a unit of work can watch an external
//! [`CancellationToken`] and fail when it fires. Merged with slow work under
//! `all_succeed`, the deadline wins.
//!
//! Uses a launcher with the built-in `LogWriter` so the lifecycle is printed.
//!
//! ## Run
//! ```bash
//! cargo run --example deadline --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use signalwait::{all_succeed, Config, Failure, Launcher, LogWriter, Signal, Subscribe};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Error, Debug)]
#[error("deadline exceeded")]
struct DeadlineExceeded;

#[tokio::main]
async fn main() {
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let launcher = Launcher::builder(Config::default())
        .with_subscribers(subs)
        .build();

    let deadline = CancellationToken::new();
    let timer = deadline.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        timer.cancel();
    });

    let watchdog = {
        let deadline = deadline.clone();
        launcher.launch_named("deadline", move || async move {
            deadline.cancelled().await;
            Err::<(), _>(DeadlineExceeded)
        })
    };
    let task = launcher.launch_named("slow-task", || async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Ok::<_, Failure>(())
    });

    match all_succeed([watchdog, task]).wait().await {
        Ok(()) => println!("finished in time"),
        Err(e) => println!("stopped: {e}"),
    }

    launcher.shutdown().await;
}
