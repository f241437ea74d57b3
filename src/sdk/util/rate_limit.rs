use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Google's default per-project ceiling for the web service APIs.
pub const DEFAULT_QPS: NonZeroU32 = match NonZeroU32::new(50) {
    Some(qps) => qps,
    None => unreachable!(),
};

pub fn maps_limiter(requests_per_second: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_second(requests_per_second)))
}

/// Blocks the calling thread until the limiter grants a cell.
pub fn wait_for_permit(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        thread::sleep(not_until.wait_time_from(clock.now()));
    }
}
