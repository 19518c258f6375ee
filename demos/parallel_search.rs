//! # Example: parallel_search
//!
//! Runs three searches concurrently and waits for all of them with `all_succeed`, the
//! same shape as an error group. Results travel through shared state; the signal only
//! carries success or failure.
//!
//! ## Flow
//! ```text
//! launch(web) ───┐
//! launch(image) ─┼──► all_succeed ──► wait() ──► read results
//! launch(video) ─┘
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example parallel_search
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use signalwait::{all_complete, all_succeed, launch, Failure, Signal};

type Results = Arc<Mutex<Vec<Option<String>>>>;

async fn search(kind: &'static str, query: &str) -> Result<String, Failure> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    if query.is_empty() {
        return Err(Failure::msg(format!("{kind}: empty query")));
    }
    Ok(format!("{kind} result for {query:?}"))
}

async fn google(query: &'static str) -> Result<Vec<String>, Failure> {
    let kinds = ["web", "image", "video"];
    let results: Results = Arc::new(Mutex::new(vec![None; kinds.len()]));

    let signals: Vec<_> = kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| {
            let results = Arc::clone(&results);
            launch(move || async move {
                let found = search(kind, query).await?;
                if let Ok(mut slots) = results.lock() {
                    slots[i] = Some(found);
                }
                Ok::<_, Failure>(())
            })
        })
        .collect();

    all_succeed(signals).wait().await?;

    let slots = results.lock().map_err(|_| Failure::msg("results poisoned"))?;
    Ok(slots.iter().flatten().cloned().collect())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    for line in google("rust").await? {
        println!("{line}");
    }

    match google("").await {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("search failed: {e}"),
    }

    // Wait-group style: fire and forget, then wait for everyone regardless of outcome.
    let pings: Vec<_> = (0..3)
        .map(|i| {
            launch(move || async move {
                tokio::time::sleep(Duration::from_millis(10 * i)).await;
                if i == 1 {
                    return Err(Failure::msg("ping 1 lost"));
                }
                Ok(())
            })
        })
        .collect();
    all_complete(pings.clone()).wait().await?;
    for (i, p) in pings.iter().enumerate() {
        println!("ping {i}: {:?}", p.try_outcome());
    }
    Ok(())
}
