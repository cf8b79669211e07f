//! Hop traversal implementations.
//!
//! `unchecked` is what the sweep measures. `original` keeps the bounds check
//! and serves as the reference the other variants are verified against.

mod original;
mod unchecked;

pub use original::hop_read_original;
pub use unchecked::hop_read_unchecked;

use super::buffer::IndexBuffer;
use crate::error::ProbeError;
use crate::utils::VariantInfo;

/// Type alias for the traversal signature. Safe functions coerce into it.
pub type HopFn = unsafe fn(&[usize], usize) -> usize;

/// Get all available traversal variants
pub fn available_variants() -> Vec<VariantInfo<HopFn>> {
    vec![
        VariantInfo {
            name: "original",
            description: "Bounds-checked reference traversal",
            function: hop_read_original as HopFn,
        },
        VariantInfo {
            name: "unchecked",
            description: "Unchecked dependent loads (measured)",
            function: hop_read_unchecked as HopFn,
        },
    ]
}

/// Run every variant on `buffer` and compare against `original`.
pub fn verify_variants(buffer: &IndexBuffer, hops: usize) -> Result<(), ProbeError> {
    let expected = hop_read_original(buffer.as_slice(), hops);

    for variant in available_variants() {
        if variant.name == "original" {
            continue;
        }

        // SAFETY: `IndexBuffer` is non-empty and closed over its indices.
        let got = unsafe { (variant.function)(buffer.as_slice(), hops) };
        if got != expected {
            return Err(ProbeError::VariantMismatch {
                variant: variant.name,
                expected,
                got,
            });
        }
    }

    Ok(())
}
