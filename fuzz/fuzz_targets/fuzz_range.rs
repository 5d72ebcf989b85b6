#![no_main]

use libfuzzer_sys::fuzz_target;

use fastfib_batch::{
    BatchOptions, PartitionStrategy, RangeEvaluator, RangeMode, RangeRequest, ThreadConfig,
};
use fastfib_core::fibonacci;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let start = u64::from(u16::from_le_bytes([data[0], data[1]])) % 10_000;
    let len = u64::from(data[2] % 100) + 1;
    let workers = usize::from(data[3] % 8) + 1;
    let flags = data.get(4).copied().unwrap_or(0);

    let evaluator = RangeEvaluator::new(BatchOptions {
        threads: Some(ThreadConfig::new(workers).unwrap()),
        partition: if flags & 1 == 0 {
            PartitionStrategy::WorkWeighted
        } else {
            PartitionStrategy::EqualCount
        },
        mode: if flags & 2 == 0 {
            RangeMode::Incremental
        } else {
            RangeMode::Independent
        },
        ..BatchOptions::default()
    });
    let request = RangeRequest::new(start, start + len - 1).unwrap();
    let values = evaluator.evaluate(&request).unwrap();

    assert_eq!(values.len() as u64, len);
    for (i, value) in values.iter().enumerate() {
        let n = start + i as u64;
        assert_eq!(*value, fibonacci(n).unwrap(), "range mismatch at n={n}");
    }
});
