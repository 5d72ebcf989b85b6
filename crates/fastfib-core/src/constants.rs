//! Constants for the Fibonacci kernel, digit counting, and size limits.

/// Default threshold (in bits) above which the products of a doubling step
/// run concurrently.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Default ceiling on the decimal digit count of a single result.
///
/// F(n) has roughly `0.209 * n` digits, so this admits indices up to about
/// 239 million.
pub const DEFAULT_MAX_DIGITS: u64 = 50_000_000;

/// Maximum Fibonacci index that fits in a u64.
/// F(93) = 12200160415121876738
pub const MAX_FIB_U64: u64 = 93;

/// Precomputed Fibonacci values for n = 0..=93 (fast path).
///
/// F(93) = 12,200,160,415,121,876,738 is the largest Fibonacci number
/// that fits in `u64`. F(94) = 19,740,274,219,868,223,167 overflows
/// `u64::MAX` (18,446,744,073,709,551,615).
pub const FIB_TABLE: [u64; 94] = {
    let mut table = [0u64; 94];
    table[0] = 0;
    table[1] = 1;
    let mut i = 2;
    while i < 94 {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
};

/// Scale of the fixed-point logarithms below (10^36).
pub const LOG_SCALE: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000;

/// `log10(phi) * 10^36`, truncated.
pub const LOG10_PHI_SCALED: u128 = 208_987_640_249_978_733_769_272_089_237_555_416;

/// `log10(sqrt(5)) * 10^36`, truncated.
pub const LOG10_SQRT5_SCALED: u128 = 349_485_002_168_009_402_393_130_552_637_753_486;

/// Bits per unit of index: `log2(phi)`.
pub const LOG2_PHI: f64 = 0.694_241_913_630_617_3;

/// Largest index for which Binet's formula in `f64` still rounds to the
/// exact value. F(71) is the first index it gets wrong.
pub const BINET_EXACT_LIMIT: u64 = 70;

/// Process exit codes for the command-line front end.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error (I/O, serialization).
    pub const ERROR_GENERIC: i32 = 1;
    /// Negative index, reversed range, or zero workers.
    pub const ERROR_INVALID_ARGUMENT: i32 = 2;
    /// Result would exceed the configured digit ceiling.
    pub const ERROR_OVERSIZED: i32 = 3;
    /// Invalid configuration (worker pool could not be built).
    pub const ERROR_CONFIG: i32 = 4;
}
