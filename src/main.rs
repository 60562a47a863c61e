// vanity-pro - Ethereum vanity address miner
// Derives through the full mnemonic pipeline: BIP39 -> PBKDF2 -> BIP32
// (m/44'/60'/0'/0/0) -> secp256k1 -> Keccak-256

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;

use vanity_pro::hash::keccak::keccak256;
use vanity_pro::math::bigint::U256;
use vanity_pro::math::secp256k1;
use vanity_pro::wallet::address::{derive_address, SourceMode};
use vanity_pro::wallet::bip39;
use vanity_pro::{search, SearchCondition, SearchRequest, SearchResponse};

#[derive(Parser, Debug)]
#[command(name = "vanity-pro")]
#[command(about = "Mine an Ethereum vanity address over BIP39 mnemonics")]
struct Args {
    /// Hex byte prefix the address must start with, e.g. 88 or 0x8888
    #[arg(long, group = "condition")]
    prefix: Option<String>,

    /// Hex byte suffix the address must end with
    #[arg(long, group = "condition")]
    suffix: Option<String>,

    /// Minimum number of leading zero hex digits
    #[arg(long, group = "condition")]
    leading_zeros: Option<u32>,

    /// With --leading-zeros: require exactly that many, not at least
    #[arg(long, requires = "leading_zeros")]
    exact: bool,

    /// 40-digit address template, x or ? for free digits
    #[arg(long, group = "condition")]
    pattern: Option<String>,

    /// Worker threads [default: CPU core count]
    #[arg(long)]
    threads: Option<u32>,

    /// Iterations between polls of the stop flag (rounded to a power of two)
    #[arg(long, default_value_t = 1024)]
    check_interval: u32,

    /// Give up after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Fixed 32-byte base seed in hex (testing/reproduction)
    #[arg(long)]
    seed: Option<String>,

    /// Interpret candidates as raw secp256k1 keys, skipping the mnemonic
    /// pipeline (much faster, no recovery phrase)
    #[arg(long)]
    private_key: bool,

    /// Write the result as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Skip the start-up self-test
    #[arg(long)]
    skip_self_test: bool,
}

/// Pinned vectors checked before any search starts. If these fail, every
/// derived address would be garbage and the search would spin forever.
fn run_self_test() -> bool {
    println!("[*] Running self-test...");
    let mut all_passed = true;

    // Keccak-256 of the empty string
    let empty = keccak256(b"");
    if hex::encode(empty) != "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470" {
        eprintln!("  [x] Keccak-256 empty-string vector mismatch");
        all_passed = false;
    } else {
        println!("  [+] Keccak-256 vector verified");
    }

    // k = 1 must give the generator
    let one = U256::ONE;
    match secp256k1::pubkey_uncompressed(&one) {
        Some(pubkey) => {
            let gx = hex::encode(&pubkey[1..33]);
            let gy = hex::encode(&pubkey[33..65]);
            if gx != "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
                || gy != "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
            {
                eprintln!("  [x] k=1 public key is not the generator");
                all_passed = false;
            } else {
                println!("  [+] secp256k1 generator verified");
            }
        }
        None => {
            eprintln!("  [x] k=1 produced the point at infinity");
            all_passed = false;
        }
    }

    // Address of private key 1
    let mut key_one = [0u8; 32];
    key_one[31] = 1;
    match derive_address(&key_one, SourceMode::PrivateKey) {
        Some(address) if hex::encode(address) == "7e5f4552091a69125d5dfcb7b8c2659029395bdf" => {
            println!("  [+] address pipeline verified (k=1)");
        }
        _ => {
            eprintln!("  [x] address of k=1 mismatch");
            all_passed = false;
        }
    }

    // Zero entropy maps to abandon x23 + art
    let indices = bip39::entropy_to_indices(&[0u8; 32]);
    if indices[..23] != [0u16; 23] || indices[23] != 102 {
        eprintln!("  [x] BIP39 zero-entropy word indices mismatch");
        all_passed = false;
    } else if bip39::indices_to_entropy(&indices) != Some([0u8; 32]) {
        eprintln!("  [x] BIP39 round-trip failed");
        all_passed = false;
    } else {
        println!("  [+] BIP39 encoding verified");
    }

    if all_passed {
        println!("[+] Self-test passed\n");
    } else {
        eprintln!("[x] SELF-TEST FAILED - results would be unreliable, aborting");
    }
    all_passed
}

#[derive(Serialize)]
struct ResultExport {
    found: bool,
    timed_out: bool,
    source_mode: SourceMode,
    seed: Option<String>,
    address: Option<String>,
    private_key: Option<String>,
    mnemonic: Option<String>,
    found_by_thread: Option<u32>,
    elapsed_secs: f64,
    total_checked: u64,
    speed: f64,
}

impl ResultExport {
    fn from_response(response: &SearchResponse) -> Self {
        Self {
            found: response.found,
            timed_out: response.timed_out,
            source_mode: response.source_mode,
            seed: response.result_seed_hex(),
            address: response.eth_address_hex().map(|a| format!("0x{a}")),
            private_key: response.private_key_hex(),
            mnemonic: response.mnemonic.clone(),
            found_by_thread: response.found_by_thread,
            elapsed_secs: response.elapsed.as_secs_f64(),
            total_checked: response.total_checked,
            speed: response.speed,
        }
    }
}

fn parse_seed(hex_seed: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = hex::decode(hex_seed.trim_start_matches("0x"))
        .context("--seed must be hex")?;
    if bytes.len() != 32 {
        bail!("--seed must be exactly 32 bytes, got {}", bytes.len());
    }
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&bytes);
    Ok(seed)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let condition = match (&args.prefix, &args.suffix, args.leading_zeros, &args.pattern) {
        (Some(prefix), None, None, None) => SearchCondition::Prefix(prefix.clone()),
        (None, Some(suffix), None, None) => SearchCondition::Suffix(suffix.clone()),
        (None, None, Some(zeros), None) if args.exact => SearchCondition::LeadingZerosExact(zeros),
        (None, None, Some(zeros), None) => SearchCondition::LeadingZeros(zeros),
        (None, None, None, Some(pattern)) => SearchCondition::Pattern(pattern.clone()),
        _ => bail!("pass exactly one of --prefix, --suffix, --leading-zeros, --pattern"),
    };

    if !args.skip_self_test && !run_self_test() {
        std::process::exit(1);
    }

    let mut request = SearchRequest::new(condition);
    if let Some(threads) = args.threads {
        request.threads = threads;
    }
    request.check_interval = args.check_interval;
    request.timeout = args.timeout_secs.map(Duration::from_secs);
    if args.private_key {
        request.source_mode = SourceMode::PrivateKey;
    }
    if let Some(seed) = &args.seed {
        request.base_seed = Some(parse_seed(seed)?);
    }

    println!(
        "[*] Searching with {} threads ({:?} mode), check interval {}",
        request.threads, request.source_mode, request.check_interval
    );

    let response = search(request)?;

    println!(
        "[*] Checked {} candidates in {:.2}s ({:.0}/s)",
        response.total_checked,
        response.elapsed.as_secs_f64(),
        response.speed
    );

    if response.found {
        println!("\nFOUND!");
        if let Some(address) = response.eth_address_hex() {
            println!("address     : 0x{address}");
        }
        if let Some(seed) = response.result_seed_hex() {
            println!("seed        : {seed}");
        }
        if let Some(private_key) = response.private_key_hex() {
            println!("private key : {private_key}");
        }
        if let Some(mnemonic) = &response.mnemonic {
            println!("mnemonic    : {mnemonic}");
        }
        if let Some(thread) = response.found_by_thread {
            println!("worker      : {thread}");
        }
    } else if response.timed_out {
        println!("[!] Timed out, no match in the searched range");
    } else {
        println!("[!] Search space exhausted without a match");
    }

    if let Some(path) = &args.json {
        let export = ResultExport::from_response(&response);
        fs::write(path, serde_json::to_string_pretty(&export)?)?;
        println!("[*] Result written to {}", path.display());
    }

    if response.found {
        Ok(())
    } else {
        std::process::exit(2)
    }
}
