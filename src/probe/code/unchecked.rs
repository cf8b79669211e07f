/// Traversal used for measurement: one dependent load per hop, no bounds
/// check in the loop.
///
/// # Safety
///
/// `items` must be non-empty (unless `hops == 0`) and every stored value must
/// be a valid index into `items`. [`IndexBuffer`](crate::probe::IndexBuffer)
/// upholds this for every buffer it hands out.
#[inline(never)]
pub unsafe fn hop_read_unchecked(items: &[usize], hops: usize) -> usize {
    let mut next = 0;
    for _ in 0..hops {
        next = unsafe { *items.get_unchecked(next) };
    }
    next
}
