/// Bounds-checked reference traversal.
///
/// Panics if a cell points outside `items`.
#[inline(never)]
pub fn hop_read_original(items: &[usize], hops: usize) -> usize {
    let mut next = 0;
    for _ in 0..hops {
        next = items[next];
    }
    next
}
