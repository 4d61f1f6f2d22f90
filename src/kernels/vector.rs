//! AVX2 kernels. Full lanes through views, tails through [`scalar`].

use super::scalar;
use crate::backend::Element;
use crate::cpu::Avx2;
use crate::view::Avx256;

/// Walks `dst` lane by lane with a cursor, loading the matching lane of
/// `src` into a scratch view for `op`. Returns the index where the scalar
/// tail starts.
#[inline(always)]
fn zip_lanes<T: Element>(
    avx: Avx2,
    dst: &mut [T],
    src: &[T],
    mut op: impl FnMut(&mut Avx256<'_, T>, &Avx256<'_, T>),
) -> usize {
    let split = dst.len() / T::LANES * T::LANES;
    if split == 0 {
        return 0;
    }
    let mut view = Avx256::borrow(avx, &mut dst[..split]);
    let mut scratch = Avx256::new(avx);
    for lane in src[..split].chunks_exact(T::LANES) {
        scratch.set(lane);
        op(&mut view, &scratch);
        // SAFETY: at most one past the end of `dst[..split]`.
        unsafe { view.next() };
    }
    split
}

pub(super) fn add_saturating_u8(avx: Avx2, dst: &mut [u8], src: &[u8]) {
    let split = zip_lanes(avx, dst, src, |view, rhs| *view += rhs);
    scalar::add_saturating_u8(&mut dst[split..], &src[split..]);
}

pub(super) fn threshold_u8(avx: Avx2, data: &mut [u8], boundary: u8) {
    let split = data.len() / u8::LANES * u8::LANES;
    if split > 0 {
        let mut bound = Avx256::new(avx);
        bound.fill(boundary);
        let mut view = Avx256::borrow(avx, &mut data[..split]);
        for _ in 0..split / u8::LANES {
            let above = view.is_greater_than(&bound);
            view.set_mask(above);
            // SAFETY: at most one past the end of `data[..split]`.
            unsafe { view.next() };
        }
    }
    scalar::threshold_u8(&mut data[split..], boundary);
}

pub(super) fn abs_diff_u8(avx: Avx2, previous: &[u8], current: &[u8], out: &mut [u8]) {
    out.copy_from_slice(current);
    let split = zip_lanes(avx, out, previous, |view, prev| {
        view.absolute_difference(prev);
    });
    scalar::abs_diff_u8(&previous[split..], &current[split..], &mut out[split..]);
}

pub(super) fn blend_f32(avx: Avx2, dst: &mut [f32], src: &[f32], alpha: f32) {
    let mut keep = Avx256::<f32>::new(avx);
    keep.fill(alpha);
    let mut take = Avx256::<f32>::new(avx);
    take.fill(1.0 - alpha);
    let mut weighted = Avx256::<f32>::new(avx);
    let split = zip_lanes(avx, dst, src, |view, rhs| {
        weighted.copy_from(rhs).mul(&take);
        view.mul(&keep).add(&weighted);
    });
    scalar::blend_f32(&mut dst[split..], &src[split..], alpha);
}

pub(super) fn sum_f32(avx: Avx2, data: &[f32]) -> f32 {
    let split = data.len() / f32::LANES * f32::LANES;
    let mut acc = Avx256::<f32>::new(avx);
    let mut scratch = Avx256::<f32>::new(avx);
    for lane in data[..split].chunks_exact(f32::LANES) {
        scratch.set(lane);
        acc += &scratch;
    }
    acc.sum() + scalar::sum_f32(&data[split..])
}

/// Byte shuffle that swaps B and R for every pixel wholly inside the lane
/// starting `offset` bytes into a 96-byte block. Bytes whose partner lives
/// in the neighbouring lane stay put.
const fn pixel_order(offset: usize) -> [u8; 32] {
    let mut order = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        let p = offset + i;
        let source = match p % 3 {
            0 => p + 2,
            1 => p,
            _ => p - 2,
        };
        order[i] = if source >= offset && source < offset + 32 {
            (source - offset) as u8
        } else {
            i as u8
        };
        i += 1;
    }
    order
}

const ORDER_0: [u8; 32] = pixel_order(0);
const ORDER_1: [u8; 32] = pixel_order(32);
const ORDER_2: [u8; 32] = pixel_order(64);

/// Three lanes cover 32 whole pixels. Two pixels straddle lane boundaries
/// and are fixed up with single byte swaps.
pub(super) fn bgr_to_rgb(avx: Avx2, data: &mut [u8]) {
    const BLOCK: usize = 3 * 32;
    let split = data.len() / BLOCK * BLOCK;
    for block in data[..split].chunks_exact_mut(BLOCK) {
        let (first, rest) = block.split_at_mut(32);
        let (second, third) = rest.split_at_mut(32);
        let mut a = Avx256::borrow(avx, first);
        let mut b = Avx256::borrow(avx, second);
        let mut c = Avx256::borrow(avx, third);
        a.permute8(&ORDER_0);
        b.permute8(&ORDER_1);
        c.permute8(&ORDER_2);
        core::mem::swap(&mut a[30], &mut b[0]);
        core::mem::swap(&mut b[31], &mut c[1]);
    }
    scalar::bgr_to_rgb(&mut data[split..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_order_fixed_points() {
        // Byte 30 is the B of a pixel whose R is in the next lane.
        assert_eq!(ORDER_0[0], 2);
        assert_eq!(ORDER_0[30], 30);
        assert_eq!(ORDER_0[31], 31);
        assert_eq!(ORDER_1[0], 0);
        assert_eq!(ORDER_1[1], 3);
        assert_eq!(ORDER_1[31], 31);
        assert_eq!(ORDER_2[0], 0);
        assert_eq!(ORDER_2[1], 1);
        assert_eq!(ORDER_2[2], 4);
    }
}
