#![no_main]

use libfuzzer_sys::fuzz_target;

use fastfib_core::calculator::{Calculator, FibCalculator};
use fastfib_core::digits::digit_count;
use fastfib_core::iterator::FibIterator;
use fastfib_core::options::Options;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // First 2 bytes pick n, next 2 a walk length; both small enough for speed.
    let n = u64::from(u16::from_le_bytes([data[0], data[1]])) % 20_000;
    let steps = usize::from(u16::from_le_bytes([data[2], data[3]])) % 64;

    let calc = FibCalculator::default();
    let opts = Options::default();
    let (fn0, fn1) = calc.calculate_pair(n, &opts).unwrap();
    assert_eq!(fn0.to_string().len() as u64, digit_count(n), "digits at n={n}");

    let (idx, walked) = FibIterator::from_pair(n, fn0, fn1).nth(steps).unwrap();
    assert_eq!(idx, n + steps as u64);
    assert_eq!(walked, calc.calculate(idx, &opts).unwrap(), "walk mismatch at n={idx}");
});
