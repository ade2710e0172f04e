//! Record id generation.
//!
//! Ids are a short origin prefix followed by a millisecond timestamp. Two ids
//! requested within the same millisecond would collide, so every process keeps
//! the last millisecond value it handed out and never issues it twice.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::clock::Clock;

static LAST_ISSUED_MS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    Event,
    Transform,
    File,
    Workflow,
}

impl IdPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Event => "evt_",
            Self::Transform => "trans_",
            Self::File => "file_",
            Self::Workflow => "wf_",
        }
    }
}

/// Returns `now_ms`, or one past the last issued value if the clock has not
/// moved beyond it.
pub fn next_unique_millis(now_ms: u64) -> u64 {
    let mut last = LAST_ISSUED_MS.load(Ordering::Acquire);
    loop {
        let candidate = now_ms.max(last.saturating_add(1));
        match LAST_ISSUED_MS.compare_exchange_weak(
            last,
            candidate,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => return candidate,
            Err(observed) => last = observed,
        }
    }
}

pub fn generate_id(prefix: IdPrefix, clock: &dyn Clock) -> String {
    format!("{}{}", prefix.as_str(), next_unique_millis(clock.now_millis()))
}

/// True when `id` is `prefix` followed by one or more ASCII digits.
pub fn matches_generated_pattern(prefix: IdPrefix, id: &str) -> bool {
    id.strip_prefix(prefix.as_str())
        .map(|digits| !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()))
        .unwrap_or(false)
}
