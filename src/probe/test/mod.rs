//! Tests for the sweep, the traversal variants and the hop-count rule.

use crate::probe::buffer::{cycle_len_from_zero, validate, IndexBuffer};
use crate::probe::code::{self, hop_read_original, verify_variants};
use crate::probe::*;
use crate::utils::{Layout, TableWriter};

#[test]
fn test_element_count_for_every_sweep_size() {
    for &size in SWEEP_SIZES.iter() {
        assert_eq!(size % ELEMENT_WIDTH, 0, "size {} not a multiple", size);
        assert_eq!(element_count(size) * ELEMENT_WIDTH, size);
    }
}

#[test]
fn test_sweep_sizes_ascending_powers_of_two() {
    assert_eq!(SWEEP_SIZES.first(), Some(&1024));
    assert_eq!(SWEEP_SIZES.last(), Some(&(256 << 20)));
    for pair in SWEEP_SIZES.windows(2) {
        assert_eq!(pair[1], pair[0] * 2);
    }
}

#[test]
fn test_hop_count_covers_every_element() {
    for &size in SWEEP_SIZES.iter() {
        let n = element_count(size);
        let hops = hop_count(n);
        assert!(hops >= n, "size {}: {} hops < {} elements", size, hops, n);
        assert!(hops >= MIN_HOPS);
    }
    assert_eq!(hop_count(MIN_HOPS + 1), MIN_HOPS + 1);
    assert_eq!(hop_count(0), MIN_HOPS);
}

#[test]
fn test_shuffled_buffer_is_permutation() {
    let buffer = IndexBuffer::shuffled(element_count(4096), 0x5eed).unwrap();
    let mut sorted = buffer.as_slice().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..buffer.len()).collect::<Vec<_>>());
}

#[test]
fn test_shuffled_buffer_is_single_cycle() {
    for seed in [1u64, 2, 3, 0xdead_beef, u64::MAX] {
        let buffer = IndexBuffer::shuffled(1000, seed).unwrap();
        assert_eq!(cycle_len_from_zero(buffer.as_slice()), 1000);
        assert!(validate(buffer.as_slice()).is_ok());
    }
}

#[test]
fn test_traversal_is_deterministic() {
    let buffer = IndexBuffer::shuffled(333, 99).unwrap();
    let before = buffer.clone();

    let a = buffer.hop(10_007);
    let b = buffer.hop(10_007);

    assert_eq!(a, b);
    assert_eq!(buffer, before, "traversal must not mutate the buffer");
}

#[test]
fn test_full_cycle_returns_to_start() {
    let buffer = IndexBuffer::shuffled(777, 1234).unwrap();
    assert_eq!(buffer.hop(777), 0);
    assert_eq!(buffer.hop(777 * 3), 0);
    assert_ne!(buffer.hop(776), 0);
}

#[test]
fn test_all_variants_match_original() {
    for (n, seed) in [(1usize, 1u64), (2, 2), (128, 3), (4096, 4)] {
        let buffer = IndexBuffer::shuffled(n, seed).unwrap();
        verify_variants(&buffer, n * 3 + 1).unwrap();
    }
}

#[test]
fn test_variants_listed() {
    let names: Vec<_> = code::available_variants().iter().map(|v| v.name).collect();
    assert_eq!(names, ["original", "unchecked"]);
}

#[test]
#[should_panic]
fn test_original_panics_on_open_permutation() {
    hop_read_original(&[3, 0], 2);
}

#[test]
fn test_measure_rejects_too_few_hops() {
    let buffer = IndexBuffer::shuffled(64, 5).unwrap();
    let err = measure_buffer(&buffer, 63).unwrap_err();
    assert!(matches!(err, crate::ProbeError::TooFewHops { hops: 63, len: 64 }));
}

#[cfg(target_os = "linux")]
#[test]
fn test_measure_restores_affinity() {
    fn allowed_cpus() -> i32 {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            assert_eq!(
                libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set),
                0
            );
            libc::CPU_COUNT(&set)
        }
    }

    let before = allowed_cpus();
    let buffer = IndexBuffer::shuffled(64, 9).unwrap();
    for _ in 0..3 {
        measure_buffer(&buffer, 1_000).unwrap();
    }
    assert_eq!(allowed_cpus(), before);
}

#[test]
fn test_size_smaller_than_one_cell_is_empty() {
    let err = probe_size_with(ELEMENT_WIDTH - 1, 10, 1).unwrap_err();
    assert!(matches!(err, crate::ProbeError::EmptyBuffer));
}

/// 1 KiB of 8-byte cells, walked with the full production hop count.
#[cfg(target_pointer_width = "64")]
#[test]
fn test_one_kib_end_to_end() {
    assert_eq!(element_count(1024), 128);

    let buffer = IndexBuffer::shuffled(128, crate::utils::time_seed()).unwrap();
    let mut sorted = buffer.as_slice().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..128).collect::<Vec<_>>());

    let (_, result) = measure_buffer(&buffer, 100_000_000).unwrap();
    assert!(result < 128);
    // 100_000_000 is a whole number of laps around a 128-cell cycle
    assert_eq!(result, 0);
}

#[test]
fn test_probe_size_record() {
    let m = probe_size_with(2048, 50_000, 77).unwrap();
    assert_eq!(m.size_bytes, 2048);
    assert_eq!(m.elements, element_count(2048));
    assert_eq!(m.hops, 50_000);
    assert!(m.result < m.elements);
    assert!(m.ticks_per_hop >= 0.0);
}

#[test]
fn test_run_sweep_streams_one_row_per_size() {
    let mut table = TableWriter::new(Vec::new(), Layout::PerSize);
    run_sweep(&[1024, 2048], &mut table).unwrap();

    let out = String::from_utf8(table.into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("1024 "));
    assert!(lines[3].starts_with("2048 "));

    for line in &lines[2..] {
        let cols: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(cols.len(), 3);
        let ticks: f64 = cols[1].parse().unwrap();
        let result: usize = cols[2].parse().unwrap();
        assert!(ticks >= 0.0);
        assert!(result < element_count(cols[0].parse().unwrap()));
    }
}

#[test]
fn test_run_sweep_accumulated_total() {
    let mut table = TableWriter::new(Vec::new(), Layout::Accumulated);
    run_sweep(&[1024], &mut table).unwrap();
    let total = table.total();

    let out = String::from_utf8(table.into_inner()).unwrap();
    assert_eq!(out.lines().last(), Some(format!("(result: {})", total).as_str()));
    assert!(total < element_count(1024));
}

/// Dependent loads over a buffer far beyond any last-level cache should be
/// much slower than over one that fits in L1.
#[test]
#[ignore = "slow: allocates 256 MiB and needs a quiet machine"]
fn test_large_buffer_slower_than_l1() {
    let small = probe_size_with(4 << 10, 70_000_000, 1).unwrap();
    let large = probe_size_with(256 << 20, 70_000_000, 2).unwrap();

    assert!(
        large.ticks_per_hop > small.ticks_per_hop * 10.0,
        "L1-sized: {} ticks/hop, 256 MiB: {} ticks/hop",
        small.ticks_per_hop,
        large.ticks_per_hop
    );
}
