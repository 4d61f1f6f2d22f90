//! AVX2 dispatch for every element kind.
//!
//! Every function here requires a CPU with AVX2. Nothing checks; callers
//! hold an [`Avx2`](crate::cpu::Avx2) token.

use super::sealed::{
    AbsoluteDifferenceLane, AveragingLane, FloatLane, Lane, SaturatingLane, ShiftLeftLane,
    ShiftLeftVariableLane, ShiftRightLane, ShiftRightVariableLane, SumLane,
};
use super::{Element, Permute32, Permute64, Permute8};
use core::arch::x86_64::*;

// ============================================================================
// Kind-independent operations
// ============================================================================

/// Unaligned load of one lane.
#[inline(always)]
pub(crate) unsafe fn load<T>(ptr: *const T) -> __m256i {
    unsafe { _mm256_loadu_si256(ptr.cast()) }
}

/// Unaligned store of one lane.
#[inline(always)]
pub(crate) unsafe fn store<T>(ptr: *mut T, v: __m256i) {
    unsafe { _mm256_storeu_si256(ptr.cast(), v) }
}

#[inline(always)]
pub(crate) unsafe fn zero() -> __m256i {
    unsafe { _mm256_setzero_si256() }
}

#[inline(always)]
pub(crate) unsafe fn and(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_and_si256(a, b) }
}

#[inline(always)]
pub(crate) unsafe fn or(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_or_si256(a, b) }
}

#[inline(always)]
pub(crate) unsafe fn xor(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_xor_si256(a, b) }
}

#[inline(always)]
pub(crate) unsafe fn not(v: __m256i) -> __m256i {
    unsafe { _mm256_xor_si256(v, _mm256_set1_epi32(-1)) }
}

/// True when every bit is clear.
#[inline(always)]
pub(crate) unsafe fn is_zero(v: __m256i) -> bool {
    unsafe { _mm256_testz_si256(v, v) == 1 }
}

/// True when every bit is set.
#[inline(always)]
pub(crate) unsafe fn is_all_set(v: __m256i) -> bool {
    unsafe { _mm256_testc_si256(v, _mm256_set1_epi32(-1)) == 1 }
}

// ============================================================================
// Permutation
// ============================================================================

/// `dst[i] = src[order[i]]` over four 64-bit elements.
#[inline(always)]
pub(crate) unsafe fn permute64(v: __m256i, order: &[u8; 4]) -> __m256i {
    let half = |i: usize| i32::from(order[i] & 3) * 2;
    unsafe {
        let idx = _mm256_setr_epi32(
            half(0),
            half(0) + 1,
            half(1),
            half(1) + 1,
            half(2),
            half(2) + 1,
            half(3),
            half(3) + 1,
        );
        _mm256_permutevar8x32_epi32(v, idx)
    }
}

/// `dst[i] = src[order[i]]` over eight 32-bit elements.
#[inline(always)]
pub(crate) unsafe fn permute32(v: __m256i, order: &[u8; 8]) -> __m256i {
    let at = |i: usize| i32::from(order[i] & 7);
    unsafe {
        let idx = _mm256_setr_epi32(at(0), at(1), at(2), at(3), at(4), at(5), at(6), at(7));
        _mm256_permutevar8x32_epi32(v, idx)
    }
}

/// `dst[i] = src[order[i]]` over thirty-two bytes, crossing the 128-bit halves.
///
/// `vpshufb` only looks inside its own half, so both halves are broadcast,
/// shuffled with the low four index bits, and blended on bit four.
#[inline(always)]
pub(crate) unsafe fn permute8(v: __m256i, order: &[u8; 32]) -> __m256i {
    unsafe {
        let idx = _mm256_and_si256(load(order.as_ptr()), _mm256_set1_epi8(0x1F));
        let low = _mm256_permute2x128_si256(v, v, 0x00);
        let high = _mm256_permute2x128_si256(v, v, 0x11);
        let local = _mm256_and_si256(idx, _mm256_set1_epi8(0x0F));
        let from_low = _mm256_shuffle_epi8(low, local);
        let from_high = _mm256_shuffle_epi8(high, local);
        let take_high = _mm256_cmpgt_epi8(idx, _mm256_set1_epi8(15));
        _mm256_blendv_epi8(from_low, from_high, take_high)
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

#[inline(always)]
unsafe fn as_ps(v: __m256i) -> __m256 {
    unsafe { _mm256_castsi256_ps(v) }
}

#[inline(always)]
unsafe fn from_ps(v: __m256) -> __m256i {
    unsafe { _mm256_castps_si256(v) }
}

#[inline(always)]
unsafe fn as_pd(v: __m256i) -> __m256d {
    unsafe { _mm256_castsi256_pd(v) }
}

#[inline(always)]
unsafe fn from_pd(v: __m256d) -> __m256i {
    unsafe { _mm256_castpd_si256(v) }
}

/// Shift count register for the uniform shift instructions.
#[inline(always)]
unsafe fn count(amount: u32) -> __m128i {
    unsafe { _mm_cvtsi64_si128(i64::from(amount)) }
}

/// Wrapping sum of eight 32-bit elements.
#[inline(always)]
unsafe fn hsum_epi32(v: __m256i) -> i32 {
    unsafe {
        let s = _mm_add_epi32(_mm256_castsi256_si128(v), _mm256_extracti128_si256(v, 1));
        let s = _mm_add_epi32(s, _mm_shuffle_epi32(s, 0b01_00_11_10));
        let s = _mm_add_epi32(s, _mm_shuffle_epi32(s, 0b10_11_00_01));
        _mm_cvtsi128_si32(s)
    }
}

/// Wrapping sum of four 64-bit elements.
#[inline(always)]
unsafe fn hsum_epi64(v: __m256i) -> i64 {
    unsafe {
        let s = _mm_add_epi64(_mm256_castsi256_si128(v), _mm256_extracti128_si256(v, 1));
        _mm_cvtsi128_si64(s).wrapping_add(_mm_extract_epi64(s, 1))
    }
}

/// Low 64 bits of each 64x64 product, built from 32x32 partial products.
#[inline(always)]
unsafe fn mullo_epi64(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let low = _mm256_mul_epu32(a, b);
        let cross = _mm256_add_epi64(
            _mm256_mul_epu32(_mm256_srli_epi64(a, 32), b),
            _mm256_mul_epu32(a, _mm256_srli_epi64(b, 32)),
        );
        _mm256_add_epi64(low, _mm256_slli_epi64(cross, 32))
    }
}

/// Widens to 16 bits, multiplies, clamps to 255 and packs back.
///
/// Unpack and pack both work per 128-bit half, so the element order survives.
#[inline(always)]
unsafe fn mul_saturate_u8(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let zero = _mm256_setzero_si256();
        let max = _mm256_set1_epi16(0x00FF);
        let low = _mm256_mullo_epi16(_mm256_unpacklo_epi8(a, zero), _mm256_unpacklo_epi8(b, zero));
        let high = _mm256_mullo_epi16(_mm256_unpackhi_epi8(a, zero), _mm256_unpackhi_epi8(b, zero));
        _mm256_packus_epi16(_mm256_min_epu16(low, max), _mm256_min_epu16(high, max))
    }
}

/// Sign-extends to 16 bits, multiplies and packs back with signed saturation.
#[inline(always)]
unsafe fn mul_saturate_i8(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let low = _mm256_mullo_epi16(
            _mm256_srai_epi16(_mm256_unpacklo_epi8(a, a), 8),
            _mm256_srai_epi16(_mm256_unpacklo_epi8(b, b), 8),
        );
        let high = _mm256_mullo_epi16(
            _mm256_srai_epi16(_mm256_unpackhi_epi8(a, a), 8),
            _mm256_srai_epi16(_mm256_unpackhi_epi8(b, b), 8),
        );
        _mm256_packs_epi16(low, high)
    }
}

// ============================================================================
// u8 Implementation
// ============================================================================

impl Lane for u8 {
    #[inline(always)]
    unsafe fn splat(value: u8) -> __m256i {
        unsafe { _mm256_set1_epi8(value as i8) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi8(a, b) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi8(a, b) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { mul_saturate_u8(a, b) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_adds_epu8(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_subs_epu8(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi8(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        // Flip the sign bit so the signed compare orders the full unsigned range.
        unsafe {
            let bias = _mm256_set1_epi8(i8::MIN);
            _mm256_cmpgt_epi8(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
        }
    }
}

impl SaturatingLane for u8 {
    #[inline(always)]
    unsafe fn add_saturate(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_adds_epu8(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_saturate(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_subs_epu8(a, b) }
    }
}

impl SumLane for u8 {
    type Sum = u32;

    #[inline(always)]
    unsafe fn sum(v: __m256i) -> u32 {
        unsafe { hsum_epi64(_mm256_sad_epu8(v, _mm256_setzero_si256())) as u32 }
    }
}

impl AveragingLane for u8 {
    #[inline(always)]
    unsafe fn average(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_avg_epu8(a, b) }
    }
}

impl AbsoluteDifferenceLane for u8 {
    #[inline(always)]
    unsafe fn absolute_difference(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_or_si256(_mm256_subs_epu8(a, b), _mm256_subs_epu8(b, a)) }
    }
}

impl Permute8 for u8 {}

// ============================================================================
// i8 Implementation
// ============================================================================

impl Lane for i8 {
    #[inline(always)]
    unsafe fn splat(value: i8) -> __m256i {
        unsafe { _mm256_set1_epi8(value) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi8(a, b) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi8(a, b) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { mul_saturate_i8(a, b) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_adds_epi8(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_subs_epi8(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi8(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpgt_epi8(a, b) }
    }
}

impl SaturatingLane for i8 {
    #[inline(always)]
    unsafe fn add_saturate(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_adds_epi8(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_saturate(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_subs_epi8(a, b) }
    }
}

impl SumLane for i8 {
    type Sum = i32;

    #[inline(always)]
    unsafe fn sum(v: __m256i) -> i32 {
        // Bias into 0..=255, sum unsigned, then remove the bias.
        unsafe {
            let biased = _mm256_xor_si256(v, _mm256_set1_epi8(i8::MIN));
            let total = hsum_epi64(_mm256_sad_epu8(biased, _mm256_setzero_si256()));
            (total - 128 * Self::LANES as i64) as i32
        }
    }
}

impl AveragingLane for i8 {
    #[inline(always)]
    unsafe fn average(a: __m256i, b: __m256i) -> __m256i {
        unsafe {
            let bias = _mm256_set1_epi8(i8::MIN);
            let mean = _mm256_avg_epu8(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias));
            _mm256_xor_si256(mean, bias)
        }
    }
}

impl Permute8 for i8 {}

// ============================================================================
// u16 Implementation
// ============================================================================

impl Lane for u16 {
    #[inline(always)]
    unsafe fn splat(value: u16) -> __m256i {
        unsafe { _mm256_set1_epi16(value as i16) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_mullo_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_adds_epu16(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_subs_epu16(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        unsafe {
            let bias = _mm256_set1_epi16(i16::MIN);
            _mm256_cmpgt_epi16(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
        }
    }
}

impl SaturatingLane for u16 {
    #[inline(always)]
    unsafe fn add_saturate(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_adds_epu16(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_saturate(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_subs_epu16(a, b) }
    }
}

impl SumLane for u16 {
    type Sum = u32;

    #[inline(always)]
    unsafe fn sum(v: __m256i) -> u32 {
        unsafe {
            let zero = _mm256_setzero_si256();
            let wide = _mm256_add_epi32(_mm256_unpacklo_epi16(v, zero), _mm256_unpackhi_epi16(v, zero));
            hsum_epi32(wide) as u32
        }
    }
}

impl AveragingLane for u16 {
    #[inline(always)]
    unsafe fn average(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_avg_epu16(a, b) }
    }
}

impl AbsoluteDifferenceLane for u16 {
    #[inline(always)]
    unsafe fn absolute_difference(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_or_si256(_mm256_subs_epu16(a, b), _mm256_subs_epu16(b, a)) }
    }
}

impl ShiftLeftLane for u16 {
    #[inline(always)]
    unsafe fn shift_left(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_sll_epi16(v, count(amount)) }
    }
}

impl ShiftRightLane for u16 {
    #[inline(always)]
    unsafe fn shift_right(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_srl_epi16(v, count(amount)) }
    }
}

// ============================================================================
// i16 Implementation
// ============================================================================

impl Lane for i16 {
    #[inline(always)]
    unsafe fn splat(value: i16) -> __m256i {
        unsafe { _mm256_set1_epi16(value) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_mullo_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_adds_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_subs_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpgt_epi16(a, b) }
    }
}

impl SaturatingLane for i16 {
    #[inline(always)]
    unsafe fn add_saturate(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_adds_epi16(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_saturate(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_subs_epi16(a, b) }
    }
}

impl SumLane for i16 {
    type Sum = i32;

    #[inline(always)]
    unsafe fn sum(v: __m256i) -> i32 {
        // Multiply-add against ones sums adjacent pairs into 32 bits.
        unsafe { hsum_epi32(_mm256_madd_epi16(v, _mm256_set1_epi16(1))) }
    }
}

impl AveragingLane for i16 {
    #[inline(always)]
    unsafe fn average(a: __m256i, b: __m256i) -> __m256i {
        unsafe {
            let bias = _mm256_set1_epi16(i16::MIN);
            let mean = _mm256_avg_epu16(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias));
            _mm256_xor_si256(mean, bias)
        }
    }
}

impl ShiftLeftLane for i16 {
    #[inline(always)]
    unsafe fn shift_left(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_sll_epi16(v, count(amount)) }
    }
}

impl ShiftRightLane for i16 {
    #[inline(always)]
    unsafe fn shift_right(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_sra_epi16(v, count(amount)) }
    }
}

// ============================================================================
// u32 Implementation
// ============================================================================

impl Lane for u32 {
    #[inline(always)]
    unsafe fn splat(value: u32) -> __m256i {
        unsafe { _mm256_set1_epi32(value as i32) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_mullo_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        unsafe {
            let bias = _mm256_set1_epi32(i32::MIN);
            _mm256_cmpgt_epi32(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
        }
    }
}

impl SumLane for u32 {
    type Sum = u32;

    #[inline(always)]
    unsafe fn sum(v: __m256i) -> u32 {
        unsafe { hsum_epi32(v) as u32 }
    }
}

impl AbsoluteDifferenceLane for u32 {
    #[inline(always)]
    unsafe fn absolute_difference(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi32(_mm256_max_epu32(a, b), _mm256_min_epu32(a, b)) }
    }
}

impl ShiftLeftLane for u32 {
    #[inline(always)]
    unsafe fn shift_left(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_sll_epi32(v, count(amount)) }
    }
}

impl ShiftRightLane for u32 {
    #[inline(always)]
    unsafe fn shift_right(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_srl_epi32(v, count(amount)) }
    }
}

impl ShiftLeftVariableLane for u32 {
    #[inline(always)]
    unsafe fn shift_left_by(v: __m256i, amounts: __m256i) -> __m256i {
        unsafe { _mm256_sllv_epi32(v, amounts) }
    }
}

impl ShiftRightVariableLane for u32 {
    #[inline(always)]
    unsafe fn shift_right_by(v: __m256i, amounts: __m256i) -> __m256i {
        unsafe { _mm256_srlv_epi32(v, amounts) }
    }
}

impl Permute32 for u32 {}

// ============================================================================
// i32 Implementation
// ============================================================================

impl Lane for i32 {
    #[inline(always)]
    unsafe fn splat(value: i32) -> __m256i {
        unsafe { _mm256_set1_epi32(value) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_mullo_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi32(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpgt_epi32(a, b) }
    }
}

impl SumLane for i32 {
    type Sum = i32;

    #[inline(always)]
    unsafe fn sum(v: __m256i) -> i32 {
        unsafe { hsum_epi32(v) }
    }
}

impl ShiftLeftLane for i32 {
    #[inline(always)]
    unsafe fn shift_left(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_sll_epi32(v, count(amount)) }
    }
}

impl ShiftRightLane for i32 {
    #[inline(always)]
    unsafe fn shift_right(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_sra_epi32(v, count(amount)) }
    }
}

impl ShiftLeftVariableLane for i32 {
    #[inline(always)]
    unsafe fn shift_left_by(v: __m256i, amounts: __m256i) -> __m256i {
        unsafe { _mm256_sllv_epi32(v, amounts) }
    }
}

impl ShiftRightVariableLane for i32 {
    #[inline(always)]
    unsafe fn shift_right_by(v: __m256i, amounts: __m256i) -> __m256i {
        unsafe { _mm256_srav_epi32(v, amounts) }
    }
}

impl Permute32 for i32 {}

// ============================================================================
// u64 Implementation
// ============================================================================

impl Lane for u64 {
    #[inline(always)]
    unsafe fn splat(value: u64) -> __m256i {
        unsafe { _mm256_set1_epi64x(value as i64) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { mullo_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        unsafe {
            let bias = _mm256_set1_epi64x(i64::MIN);
            _mm256_cmpgt_epi64(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
        }
    }
}

impl ShiftLeftLane for u64 {
    #[inline(always)]
    unsafe fn shift_left(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_sll_epi64(v, count(amount)) }
    }
}

impl ShiftRightLane for u64 {
    #[inline(always)]
    unsafe fn shift_right(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_srl_epi64(v, count(amount)) }
    }
}

impl ShiftLeftVariableLane for u64 {
    #[inline(always)]
    unsafe fn shift_left_by(v: __m256i, amounts: __m256i) -> __m256i {
        unsafe { _mm256_sllv_epi64(v, amounts) }
    }
}

impl ShiftRightVariableLane for u64 {
    #[inline(always)]
    unsafe fn shift_right_by(v: __m256i, amounts: __m256i) -> __m256i {
        unsafe { _mm256_srlv_epi64(v, amounts) }
    }
}

impl Permute64 for u64 {}

// ============================================================================
// i64 Implementation
// ============================================================================

impl Lane for i64 {
    #[inline(always)]
    unsafe fn splat(value: i64) -> __m256i {
        unsafe { _mm256_set1_epi64x(value) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        // Two's complement: the low 64 bits match the unsigned product.
        unsafe { mullo_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi64(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpgt_epi64(a, b) }
    }
}

impl ShiftLeftLane for i64 {
    #[inline(always)]
    unsafe fn shift_left(v: __m256i, amount: u32) -> __m256i {
        unsafe { _mm256_sll_epi64(v, count(amount)) }
    }
}

impl ShiftLeftVariableLane for i64 {
    #[inline(always)]
    unsafe fn shift_left_by(v: __m256i, amounts: __m256i) -> __m256i {
        unsafe { _mm256_sllv_epi64(v, amounts) }
    }
}

impl Permute64 for i64 {}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Lane for f32 {
    #[inline(always)]
    unsafe fn splat(value: f32) -> __m256i {
        unsafe { from_ps(_mm256_set1_ps(value)) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_ps(_mm256_add_ps(as_ps(a), as_ps(b))) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_ps(_mm256_sub_ps(as_ps(a), as_ps(b))) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_ps(_mm256_mul_ps(as_ps(a), as_ps(b))) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { Self::add(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { Self::sub(a, b) }
    }

    // Ordered, quiet predicates: NaN compares false and raises nothing.
    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_ps(_mm256_cmp_ps(as_ps(a), as_ps(b), _CMP_EQ_OQ)) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_ps(_mm256_cmp_ps(as_ps(a), as_ps(b), _CMP_GT_OQ)) }
    }

    #[inline(always)]
    unsafe fn cmp_lt(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_ps(_mm256_cmp_ps(as_ps(a), as_ps(b), _CMP_LT_OQ)) }
    }
}

impl FloatLane for f32 {
    #[inline(always)]
    unsafe fn div(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_ps(_mm256_div_ps(as_ps(a), as_ps(b))) }
    }
}

impl SumLane for f32 {
    type Sum = f32;

    #[inline(always)]
    unsafe fn sum(v: __m256i) -> f32 {
        unsafe {
            let v = as_ps(v);
            let s = _mm_add_ps(_mm256_castps256_ps128(v), _mm256_extractf128_ps(v, 1));
            let s = _mm_add_ps(s, _mm_movehl_ps(s, s));
            let s = _mm_add_ss(s, _mm_shuffle_ps(s, s, 0b01_01_01_01));
            _mm_cvtss_f32(s)
        }
    }
}

impl Permute32 for f32 {}

// ============================================================================
// f64 Implementation
// ============================================================================

impl Lane for f64 {
    #[inline(always)]
    unsafe fn splat(value: f64) -> __m256i {
        unsafe { from_pd(_mm256_set1_pd(value)) }
    }

    #[inline(always)]
    unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_pd(_mm256_add_pd(as_pd(a), as_pd(b))) }
    }

    #[inline(always)]
    unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_pd(_mm256_sub_pd(as_pd(a), as_pd(b))) }
    }

    #[inline(always)]
    unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_pd(_mm256_mul_pd(as_pd(a), as_pd(b))) }
    }

    #[inline(always)]
    unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { Self::add(a, b) }
    }

    #[inline(always)]
    unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i {
        unsafe { Self::sub(a, b) }
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_pd(_mm256_cmp_pd(as_pd(a), as_pd(b), _CMP_EQ_OQ)) }
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_pd(_mm256_cmp_pd(as_pd(a), as_pd(b), _CMP_GT_OQ)) }
    }

    #[inline(always)]
    unsafe fn cmp_lt(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_pd(_mm256_cmp_pd(as_pd(a), as_pd(b), _CMP_LT_OQ)) }
    }
}

impl FloatLane for f64 {
    #[inline(always)]
    unsafe fn div(a: __m256i, b: __m256i) -> __m256i {
        unsafe { from_pd(_mm256_div_pd(as_pd(a), as_pd(b))) }
    }
}

impl SumLane for f64 {
    type Sum = f64;

    #[inline(always)]
    unsafe fn sum(v: __m256i) -> f64 {
        unsafe {
            let v = as_pd(v);
            let s = _mm_add_pd(_mm256_castpd256_pd128(v), _mm256_extractf128_pd(v, 1));
            let s = _mm_add_sd(s, _mm_unpackhi_pd(s, s));
            _mm_cvtsd_f64(s)
        }
    }
}

impl Permute64 for f64 {}

// ============================================================================
// Tests
// ============================================================================
