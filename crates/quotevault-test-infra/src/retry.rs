use crate::{Result, TestInfraError};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Runs `op` until it succeeds, sleeping `delay` between attempts.
///
/// Fails with [`TestInfraError::NotReady`] carrying the last error once
/// `attempts` runs have failed.
pub async fn retry<T, E, F, Fut>(attempts: u32, delay: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    let mut last_error = String::from("no attempts made");

    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                last_error = err.to_string();
                if attempt < attempts {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(TestInfraError::NotReady {
        attempts,
        last_error,
    })
}
