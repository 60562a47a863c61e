//! Host-facing search interface: seed generation, worker launch, polling,
//! timeout, result decoding.

use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Result, VanityError};
use crate::search::condition::{
    parse_leading_zeros_condition, parse_pattern_condition, parse_prefix_condition,
    parse_suffix_condition, PatternConfig,
};
use crate::search::{driver, SearchConfig, SearchState, DEFAULT_CHECK_INTERVAL};
use crate::wallet::address::{derive_private_key, SourceMode};
use crate::wallet::bip39;

#[derive(Debug, Clone)]
pub enum SearchCondition {
    /// Hex byte string the address must start with.
    Prefix(String),
    /// Hex byte string the address must end with.
    Suffix(String),
    /// At least this many leading zero nibbles.
    LeadingZeros(u32),
    /// Exactly this many leading zero nibbles.
    LeadingZerosExact(u32),
    /// 40-digit template with `x`/`?` wildcards.
    Pattern(String),
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub condition: SearchCondition,
    pub threads: u32,
    pub check_interval: u32,
    pub poll_interval: Duration,
    pub timeout: Option<Duration>,
    pub source_mode: SourceMode,
    pub base_seed: Option<[u8; 32]>,
}

impl SearchRequest {
    pub fn new(condition: SearchCondition) -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(4);
        Self {
            condition,
            threads,
            check_interval: DEFAULT_CHECK_INTERVAL,
            poll_interval: Duration::from_millis(50),
            timeout: None,
            source_mode: SourceMode::MnemonicEntropy,
            base_seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub found: bool,
    pub timed_out: bool,
    pub source_mode: SourceMode,
    pub result_seed: Option<[u8; 32]>,
    pub eth_address: Option<[u8; 20]>,
    pub private_key: Option<[u8; 32]>,
    pub mnemonic: Option<String>,
    pub found_by_thread: Option<u32>,
    pub elapsed: Duration,
    pub total_checked: u64,
    pub speed: f64,
}

impl SearchResponse {
    pub fn eth_address_hex(&self) -> Option<String> {
        self.eth_address.map(hex::encode)
    }

    pub fn result_seed_hex(&self) -> Option<String> {
        self.result_seed.map(hex::encode)
    }

    pub fn private_key_hex(&self) -> Option<String> {
        self.private_key.map(hex::encode)
    }
}

pub fn parse_condition(condition: &SearchCondition) -> Result<(u64, Option<PatternConfig>)> {
    match condition {
        SearchCondition::Prefix(value) => Ok((parse_prefix_condition(value)?, None)),
        SearchCondition::Suffix(value) => Ok((parse_suffix_condition(value)?, None)),
        SearchCondition::LeadingZeros(count) => {
            Ok((parse_leading_zeros_condition(*count, false)?, None))
        }
        SearchCondition::LeadingZerosExact(count) => {
            Ok((parse_leading_zeros_condition(*count, true)?, None))
        }
        SearchCondition::Pattern(value) => {
            let (condition, pattern) = parse_pattern_condition(value)?;
            Ok((condition, Some(pattern)))
        }
    }
}

/// Run a search to completion: found, timed out, or space exhausted.
pub fn search(request: SearchRequest) -> Result<SearchResponse> {
    if request.threads == 0 {
        return Err(VanityError::InvalidConfig(
            "threads must be greater than 0".into(),
        ));
    }

    let (condition, pattern) = parse_condition(&request.condition)?;
    let base_seed = request.base_seed.unwrap_or_else(random_nonzero_seed);

    let mut config = SearchConfig::new(base_seed, request.threads, condition)
        .with_check_interval(request.check_interval)
        .with_source_mode(request.source_mode);
    if let Some(pattern) = pattern {
        config = config.with_pattern(pattern);
    }

    let state = Arc::new(SearchState::new(request.threads as usize));
    let start_time = Instant::now();
    let handles = driver::spawn_workers(config, Arc::clone(&state))?;

    let mut timed_out = false;
    loop {
        if state.poll_found() {
            break;
        }
        if handles.iter().all(|h| h.is_finished()) {
            break;
        }
        if request
            .timeout
            .is_some_and(|timeout| start_time.elapsed() >= timeout)
        {
            timed_out = true;
            state.request_stop();
            break;
        }
        sleep(request.poll_interval);
    }

    for handle in handles {
        let _ = handle.join();
    }

    let elapsed = start_time.elapsed();
    let result = state.snapshot();
    let found = result.found != 0;
    let total_checked = state.total_checked();
    let speed = if elapsed.as_secs_f64() > 0.0 {
        total_checked as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    let mnemonic = (found && request.source_mode == SourceMode::MnemonicEntropy).then(|| {
        let indices = bip39::entropy_to_indices(&result.result_entropy);
        bip39::phrase_string(&indices)
    });
    let private_key =
        found.then(|| derive_private_key(&result.result_entropy, request.source_mode)).flatten();

    Ok(SearchResponse {
        found,
        timed_out: !found && timed_out,
        source_mode: request.source_mode,
        result_seed: found.then_some(result.result_entropy),
        eth_address: found.then_some(result.eth_address),
        private_key,
        mnemonic,
        found_by_thread: found.then_some(result.found_by_thread),
        elapsed,
        total_checked,
        speed,
    })
}

/// OS-random 32 bytes, nudged away from the all-zero counter start.
fn random_nonzero_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    if seed.iter().all(|&b| b == 0) {
        seed[31] = 1;
    }
    seed
}
