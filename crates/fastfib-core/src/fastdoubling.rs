//! Fast Doubling kernel for exact Fibonacci computation.
//!
//! Uses the doubling identities:
//!   F(2k)   = F(k) * (2*F(k+1) - F(k))
//!   F(2k+1) = F(k+1)^2 + F(k)^2
//!
//! Iterates from MSB to LSB: three products per bit, then a swap and one
//! addition when the bit is set. The working set is drawn from a
//! thread-local pool. Only the scratch register keeps its buffer between
//! calls: F(k) and F(k+1) are replaced by fresh products every bit and are
//! moved out as the result.

use std::cell::RefCell;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

use crate::calculator::CoreCalculator;
use crate::options::Options;
use crate::pool;

/// Working set of the doubling loop. Pooled for the scratch register's buffer.
pub struct CalculationState {
    /// Current F(k).
    pub fk: BigUint,
    /// Current F(k+1).
    pub fk1: BigUint,
    /// Scratch register holding `2*F(k+1) - F(k)`.
    pub t: BigUint,
}

impl CalculationState {
    /// Create a new calculation state initialized for F(0)=0, F(1)=1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fk: BigUint::ZERO,
            fk1: BigUint::one(),
            t: BigUint::ZERO,
        }
    }

    /// Reset state for reuse. Keeps the allocation of the scratch register.
    pub fn reset(&mut self) {
        self.fk.set_zero();
        self.fk1.set_one();
        self.t.set_zero();
    }
}

impl Default for CalculationState {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static CALC_STATE_POOL: RefCell<Vec<CalculationState>> = const { RefCell::new(Vec::new()) };
}

const THREAD_LOCAL_POOL_MAX: usize = 4;

fn tl_acquire_state() -> CalculationState {
    CALC_STATE_POOL.with(|p| pool::tl_acquire(p, CalculationState::new, CalculationState::reset))
}

fn tl_release_state(state: CalculationState) {
    CALC_STATE_POOL.with(|p| pool::tl_release(p, THREAD_LOCAL_POOL_MAX, state));
}

/// Fast Doubling kernel over `num-bigint`.
///
/// # Example
/// ```
/// use fastfib_core::calculator::CoreCalculator;
/// use fastfib_core::fastdoubling::FastDoubling;
/// use fastfib_core::options::Options;
///
/// let (f100, f101) = FastDoubling::new().calculate_pair_core(100, &Options::default());
/// assert_eq!(f100.to_string(), "354224848179261915075");
/// assert_eq!(f101.to_string(), "573147844013817084101");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FastDoubling;

impl FastDoubling {
    /// Create a new `FastDoubling` kernel.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Execute the doubling loop, returning `(F(n), F(n+1))`.
    fn execute_doubling_loop(n: u64, parallel_threshold: usize) -> (BigUint, BigUint) {
        let num_bits = 64 - n.leading_zeros();
        debug!(n, num_bits, "fast doubling");

        let mut state = tl_acquire_state();

        for i in (0..num_bits).rev() {
            // t = 2*F(k+1) - F(k), never negative since F(k+1) >= F(k)
            state.t.clone_from(&state.fk1);
            state.t <<= 1u32;
            state.t -= &state.fk;

            let max_bits = usize::try_from(state.fk1.bits()).unwrap_or(usize::MAX);
            let (f2k, f2k1) = if max_bits >= parallel_threshold {
                let (f2k, (fk_sq, fk1_sq)) = rayon::join(
                    || &state.fk * &state.t,
                    || rayon::join(|| &state.fk * &state.fk, || &state.fk1 * &state.fk1),
                );
                (f2k, fk_sq + fk1_sq)
            } else {
                let f2k = &state.fk * &state.t;
                let f2k1 = &state.fk * &state.fk + &state.fk1 * &state.fk1;
                (f2k, f2k1)
            };

            state.fk = f2k;
            state.fk1 = f2k1;

            if (n >> i) & 1 == 1 {
                // (F(2k), F(2k+1)) -> (F(2k+1), F(2k+2))
                std::mem::swap(&mut state.fk, &mut state.fk1);
                state.fk1 += &state.fk;
            }
        }

        let result = (
            std::mem::take(&mut state.fk),
            std::mem::take(&mut state.fk1),
        );
        tl_release_state(state);
        result
    }
}

impl CoreCalculator for FastDoubling {
    fn calculate_pair_core(&self, n: u64, opts: &Options) -> (BigUint, BigUint) {
        Self::execute_doubling_loop(n, opts.parallel_threshold)
    }

    fn name(&self) -> &'static str {
        "FastDoubling"
    }
}
