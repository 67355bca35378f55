use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Token bucket shared by every caller of one upstream service.
///
/// Unlike a rejecting limiter, `acquire` waits for the next token, so a localization
/// burst is spread out instead of failing field by field.
#[derive(Clone)]
pub struct Throttle {
    rps: u32,
    state: Arc<Mutex<Bucket>>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last: Instant,
}

impl Bucket {
    fn refill(&mut self, now: Instant, rps: u32) {
        let elapsed = now.duration_since(self.last);
        self.last = now;
        let refill = elapsed.as_secs_f64() * rps as f64;
        self.tokens = (self.tokens + refill).min(rps as f64);
    }

    /// Takes a token or returns how long until one is available.
    fn take(&mut self, rps: u32) -> Result<(), Duration> {
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            return Ok(());
        }
        Err(Duration::from_secs_f64((1.0 - self.tokens) / rps as f64))
    }
}

impl Throttle {
    /// Returns `None` for a zero rate, meaning unthrottled.
    pub fn per_second(rps: u32) -> Option<Self> {
        if rps == 0 {
            return None;
        }
        Some(Self {
            rps,
            state: Arc::new(Mutex::new(Bucket {
                tokens: rps as f64,
                last: Instant::now(),
            })),
        })
    }

    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.state.lock().await;
                bucket.refill(Instant::now(), self.rps);
                match bucket.take(self.rps) {
                    Ok(()) => return,
                    Err(wait) => wait,
                }
            };
            tokio::time::sleep(wait).await;
        }
    }
}
