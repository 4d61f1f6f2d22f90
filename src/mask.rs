//! Comparison results.

use crate::backend::{x86, Element};
use core::arch::x86_64::__m256i;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{BitAnd, BitOr, BitXor, Not};

/// Per-element outcome of a comparison.
///
/// Each element of a mask is either all ones (true) or all zeros (false), at
/// the width of the kind `T` that produced it. Masks combine with `&`, `|`,
/// `^` and `!`, and feed back into a view through
/// [`Avx256::set_mask`](crate::Avx256::set_mask).
#[derive(Clone, Copy)]
pub struct Mask<T: Element> {
    bits: __m256i,
    _kind: PhantomData<T>,
}

impl<T: Element> Mask<T> {
    #[inline(always)]
    pub(crate) fn from_bits(bits: __m256i) -> Self {
        Self { bits, _kind: PhantomData }
    }

    #[inline(always)]
    pub(crate) fn bits(self) -> __m256i {
        self.bits
    }

    /// True when no element is set.
    #[inline]
    pub fn is_zero(self) -> bool {
        // SAFETY: a mask only comes out of a view, which required the token.
        unsafe { x86::is_zero(self.bits) }
    }

    /// True when every element is set.
    #[inline]
    pub fn is_all_set(self) -> bool {
        // SAFETY: as above.
        unsafe { x86::is_all_set(self.bits) }
    }

    /// Raw bytes of the mask.
    pub fn to_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        // SAFETY: `out` holds exactly 32 bytes.
        unsafe { x86::store(out.as_mut_ptr(), self.bits) };
        out
    }

    /// One boolean per element.
    pub fn to_bools(self) -> Vec<bool> {
        let width = 32 / T::LANES;
        self.to_bytes().chunks_exact(width).map(|c| c[0] != 0).collect()
    }

    /// Whether element `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= T::LANES`.
    pub fn test(self, index: usize) -> bool {
        assert!(index < T::LANES, "mask index {} out of range for {} lanes", index, T::LANES);
        self.to_bytes()[index * (32 / T::LANES)] != 0
    }

    /// Number of set elements.
    pub fn count(self) -> usize {
        self.to_bools().into_iter().filter(|&b| b).count()
    }
}

impl<T: Element> BitAnd for Mask<T> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        // SAFETY: see `is_zero`.
        Self::from_bits(unsafe { x86::and(self.bits, rhs.bits) })
    }
}

impl<T: Element> BitOr for Mask<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_bits(unsafe { x86::or(self.bits, rhs.bits) })
    }
}

impl<T: Element> BitXor for Mask<T> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self::from_bits(unsafe { x86::xor(self.bits, rhs.bits) })
    }
}

impl<T: Element> Not for Mask<T> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits(unsafe { x86::not(self.bits) })
    }
}

impl<T: Element> PartialEq for Mask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl<T: Element> Eq for Mask<T> {}

impl<T: Element> fmt::Debug for Mask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mask")
            .field("kind", &core::any::type_name::<T>())
            .field("lanes", &self.to_bools())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_of<T: Element>(bytes: [u8; 32]) -> Mask<T> {
        Mask::from_bits(unsafe { x86::load(bytes.as_ptr()) })
    }

    #[test]
    fn test_bools_follow_element_width() {
        if !std::is_x86_feature_detected!("avx2") {
            return;
        }
        let mut bytes = [0u8; 32];
        bytes[8..16].fill(0xFF);
        let m = mask_of::<u64>(bytes);
        assert_eq!(m.to_bools(), vec![false, true, false, false]);
        assert!(m.test(1));
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn test_logic_ops() {
        if !std::is_x86_feature_detected!("avx2") {
            return;
        }
        let mut left = [0u8; 32];
        left[..16].fill(0xFF);
        let mut right = [0u8; 32];
        right[8..24].fill(0xFF);
        let a = mask_of::<u16>(left);
        let b = mask_of::<u16>(right);
        assert_eq!((a & b).count(), 4);
        assert_eq!((a | b).count(), 12);
        assert_eq!((a ^ b).count(), 8);
        assert_eq!((!a).count(), 8);
        assert!((a & !a).is_zero());
        assert!((a | !a).is_all_set());
    }
}
