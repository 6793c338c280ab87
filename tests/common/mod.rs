//! Common test utilities
#![allow(dead_code)]

use minitensor::tensor::{Tensor, unravel_index};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary
///
/// Honors `RUST_LOG`, e.g. `RUST_LOG=minitensor=trace cargo test`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Read every element of `t` in row-major order through `get`
///
/// Goes through the multi-index path rather than `to_vec`, so it checks the
/// stride arithmetic independently.
pub fn flatten_via_get(t: &Tensor) -> Vec<f32> {
    (0..t.numel())
        .map(|i| {
            let index = unravel_index(i, t.shape()).expect("flat index is below numel");
            t.get(&index).expect("unravelled index is in bounds")
        })
        .collect()
}

/// Assert two f32 slices are bit-for-bit equal, NaN included
pub fn assert_same_bits(a: &[f32], b: &[f32], msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert_eq!(
            x.to_bits(),
            y.to_bits(),
            "{}: element {} differs: {} vs {}",
            msg,
            i,
            x,
            y
        );
    }
}
