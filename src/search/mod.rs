//! Search kernel surface: the read-only launch configuration, the shared
//! result record, and the atomic coordination state.

pub mod condition;
pub mod driver;

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;

use crate::search::condition::PatternConfig;
use crate::wallet::address::SourceMode;

pub const DEFAULT_CHECK_INTERVAL: u32 = 1024;

/// Read-only launch configuration, one copy per worker. Field order and the
/// explicit pads mirror the device-constant record of the kernel ABI;
/// `source_mode` is appended after the ABI fields.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub base_entropy: [u8; 32],
    pub num_threads: u32,
    _pad0: [u8; 4],
    pub condition: u64,
    pub check_interval: u32,
    _pad1: [u8; 4],
    pub pattern: PatternConfig,
    pub source_mode: SourceMode,
}

impl SearchConfig {
    pub fn new(base_entropy: [u8; 32], num_threads: u32, condition: u64) -> Self {
        Self {
            base_entropy,
            num_threads,
            _pad0: [0; 4],
            condition,
            check_interval: DEFAULT_CHECK_INTERVAL,
            _pad1: [0; 4],
            pattern: PatternConfig::EMPTY,
            source_mode: SourceMode::MnemonicEntropy,
        }
    }

    pub fn with_pattern(mut self, pattern: PatternConfig) -> Self {
        self.pattern = pattern;
        self
    }

    /// The flag-poll gate is a mask, so the interval is forced up to a
    /// power of two.
    pub fn with_check_interval(mut self, interval: u32) -> Self {
        self.check_interval = interval.max(1).next_power_of_two();
        self
    }

    pub fn with_source_mode(mut self, mode: SourceMode) -> Self {
        self.source_mode = mode;
        self
    }
}

/// What the winning worker publishes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchResult {
    pub found: i32,
    pub result_entropy: [u8; 32],
    pub eth_address: [u8; 20],
    pub found_by_thread: u32,
}

impl Default for SearchResult {
    fn default() -> Self {
        Self {
            found: 0,
            result_entropy: [0; 32],
            eth_address: [0; 20],
            found_by_thread: 0,
        }
    }
}

/// Shared coordination block. The claim flag is the single happens-before
/// edge between the winner and everyone else; each checked-counter slot has
/// exactly one writer.
pub struct SearchState {
    found_flag: AtomicU32,
    result: Mutex<SearchResult>,
    published: AtomicU32,
    checked: Vec<AtomicU64>,
}

impl SearchState {
    pub fn new(num_threads: usize) -> Self {
        Self {
            found_flag: AtomicU32::new(0),
            result: Mutex::new(SearchResult::default()),
            published: AtomicU32::new(0),
            checked: (0..num_threads).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    /// One-shot claim; only the winner sees true.
    pub fn try_claim(&self) -> bool {
        self.found_flag
            .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Cooperative shutdown: the host raises the same flag the winner would.
    pub fn request_stop(&self) {
        self.found_flag.store(1, Ordering::Release);
    }

    pub fn stop_requested(&self) -> bool {
        self.found_flag.load(Ordering::Acquire) != 0
    }

    /// Winner-only, after a successful [`try_claim`](Self::try_claim).
    pub fn publish(&self, result: SearchResult) {
        if let Ok(mut slot) = self.result.lock() {
            *slot = result;
        }
        self.published.store(1, Ordering::Release);
    }

    /// True once a published payload is readable.
    pub fn poll_found(&self) -> bool {
        self.published.load(Ordering::Acquire) != 0
    }

    pub fn snapshot(&self) -> SearchResult {
        self.result
            .lock()
            .map(|slot| *slot)
            .unwrap_or_default()
    }

    pub fn record_checked(&self, thread_id: usize, count: u64) {
        if let Some(slot) = self.checked.get(thread_id) {
            slot.store(count, Ordering::Relaxed);
        }
    }

    /// Host-side sum after the workers have stopped.
    pub fn total_checked(&self) -> u64 {
        self.checked
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .sum()
    }
}
