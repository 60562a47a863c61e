//! The per-work-item search loop.
//!
//! Worker `t` starts at base_entropy + t and strides by `num_threads`, so
//! the entropy streams partition the counter space. The early-exit flag is
//! polled every `check_interval` iterations through a mask; publication is
//! single-writer, gated by the claim CAS.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::Result;
use crate::search::condition::matches_condition;
use crate::search::{SearchConfig, SearchResult, SearchState};
use crate::wallet::address::derive_address;

/// Add `step` to the entropy read as a little-endian 256-bit counter whose
/// least significant byte is index 31. Returns false when the addition
/// falls off the top of the counter space; the caller's slice of work is
/// exhausted.
pub fn increment_entropy(entropy: &mut [u8; 32], step: u32) -> bool {
    let mut carry = step as u64;
    for byte in entropy.iter_mut().rev() {
        if carry == 0 {
            return true;
        }
        let sum = *byte as u64 + (carry & 0xFF);
        *byte = sum as u8;
        carry = (carry >> 8) + (sum >> 8);
    }
    carry == 0
}

fn worker(config: &SearchConfig, state: &SearchState, thread_id: u32) {
    let mut entropy = config.base_entropy;
    if thread_id > 0 && !increment_entropy(&mut entropy, thread_id) {
        return;
    }

    let poll_mask = (config.check_interval as u64) - 1;
    let mut checked: u64 = 0;
    let mut counter: u64 = 0;

    if !state.stop_requested() {
        loop {
            let address = derive_address(&entropy, config.source_mode);
            checked += 1;

            if let Some(address) = address {
                if matches_condition(&address, config.condition, &config.pattern) {
                    if state.try_claim() {
                        state.publish(SearchResult {
                            found: 1,
                            result_entropy: entropy,
                            eth_address: address,
                            found_by_thread: thread_id,
                        });
                    }
                    break;
                }
            }

            if !increment_entropy(&mut entropy, config.num_threads) {
                break;
            }
            counter += 1;
            if counter & poll_mask == 0 && state.stop_requested() {
                break;
            }
        }
    }

    state.record_checked(thread_id as usize, checked);
}

/// Launch one worker per work-item. The caller polls `state` and joins.
pub fn spawn_workers(
    config: SearchConfig,
    state: Arc<SearchState>,
) -> Result<Vec<JoinHandle<()>>> {
    let mut handles = Vec::with_capacity(config.num_threads as usize);
    for t in 0..config.num_threads {
        let state = Arc::clone(&state);
        let handle = thread::Builder::new()
            .name(format!("miner-{t}"))
            .spawn(move || worker(&config, &state, t))?;
        handles.push(handle);
    }
    Ok(handles)
}

/// Blocking convenience wrapper: run all workers to completion.
pub fn run_search(config: &SearchConfig, state: &SearchState) {
    thread::scope(|scope| {
        for t in 0..config.num_threads {
            scope.spawn(move || worker(config, state, t));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_carries_through_bytes() {
        let mut entropy = [0u8; 32];
        entropy[31] = 0xFF;
        assert!(increment_entropy(&mut entropy, 1));
        assert_eq!(entropy[31], 0x00);
        assert_eq!(entropy[30], 0x01);
    }

    #[test]
    fn increment_large_step() {
        let mut entropy = [0u8; 32];
        assert!(increment_entropy(&mut entropy, 0x0102_0304));
        assert_eq!(&entropy[28..], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn increment_by_k_then_one_equals_k_plus_one() {
        let base: [u8; 32] = {
            let mut e = [0u8; 32];
            e[31] = 0xFE;
            e[30] = 0xFF;
            e
        };
        for k in [1u32, 3, 255, 4096, u32::MAX - 1] {
            let mut a = base;
            assert!(increment_entropy(&mut a, k));
            assert!(increment_entropy(&mut a, 1));
            let mut b = base;
            assert!(increment_entropy(&mut b, k + 1));
            assert_eq!(a, b, "mismatch for k = {k}");
        }
    }

    #[test]
    fn increment_overflow_signalled() {
        let mut entropy = [0xFFu8; 32];
        assert!(!increment_entropy(&mut entropy, 1));

        let mut entropy = [0xFFu8; 32];
        entropy[31] = 0xFE;
        assert!(increment_entropy(&mut entropy, 1));
        assert!(!increment_entropy(&mut entropy, 1));
    }

    #[test]
    fn disjoint_streams_across_threads() {
        // With stride = num_threads the first few entropies per worker
        // never collide.
        let base = [0u8; 32];
        let num_threads = 4u32;
        let mut seen = std::collections::HashSet::new();
        for t in 0..num_threads {
            let mut e = base;
            if t > 0 {
                assert!(increment_entropy(&mut e, t));
            }
            for _ in 0..8 {
                assert!(seen.insert(e), "duplicate entropy across work-items");
                assert!(increment_entropy(&mut e, num_threads));
            }
        }
    }
}
