//! # Element Kinds
//!
//! **The type IS the instruction selector.**
//!
//! Every supported element type implements [`Element`], which fixes how many
//! values fit in one 256-bit lane and which instruction carries out each
//! operation for that type. Operations that only make sense for some kinds
//! live in their own capability traits; asking for one on the wrong kind is a
//! type error, never a runtime branch.
//!
//! | kind      | lanes | saturating | div | sum    | average | shl | shr        | permute |
//! |-----------|-------|------------|-----|--------|---------|-----|------------|---------|
//! | `u8`      | 32    | yes        |     | `u32`  | yes     |     |            | 8       |
//! | `i8`      | 32    | yes        |     | `i32`  | yes     |     |            | 8       |
//! | `u16`     | 16    | yes        |     | `u32`  | yes     | yes | logical    |         |
//! | `i16`     | 16    | yes        |     | `i32`  | yes     | yes | arithmetic |         |
//! | `u32`     | 8     |            |     | `u32`  |         | yes | logical    | 32      |
//! | `i32`     | 8     |            |     | `i32`  |         | yes | arithmetic | 32      |
//! | `u64`     | 4     |            |     |        |         | yes | logical    | 64      |
//! | `i64`     | 4     |            |     |        |         | yes |            | 64      |
//! | `f32`     | 8     |            | yes | `f32`  |         |     |            | 32      |
//! | `f64`     | 4     |            | yes | `f64`  |         |     |            | 64      |
//!
//! The per-kind instruction tables live on crate-private traits that every
//! public trait here extends. Only a view can reach them, and a view only
//! exists behind an [`Avx2`](crate::cpu::Avx2) token.
//!
//! ```compile_fail
//! use avx256::Element;
//! use core::arch::x86_64::_mm256_setzero_si256;
//! let zero = unsafe { _mm256_setzero_si256() };
//! let _ = unsafe { <u8 as Element>::add(zero, zero) };
//! ```

use core::fmt::Debug;

pub(crate) mod x86;

/// Width of one lane in bytes.
pub const LANE_BYTES: usize = 32;

/// Raw dispatch tables. Every function requires a CPU with AVX2.
pub(crate) mod sealed {
    use core::arch::x86_64::__m256i;
    use core::fmt::Debug;

    pub trait Lane: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
        /// Broadcasts `value` into every position.
        unsafe fn splat(value: Self) -> __m256i;

        /// Wrapping addition for integers, IEEE addition for floats.
        unsafe fn add(a: __m256i, b: __m256i) -> __m256i;

        /// Wrapping subtraction for integers, IEEE subtraction for floats.
        unsafe fn sub(a: __m256i, b: __m256i) -> __m256i;

        /// Low half of the product; 8-bit kinds saturate instead.
        unsafe fn mul(a: __m256i, b: __m256i) -> __m256i;

        /// The addition used by `+=`. Saturates for 1- and 2-byte integers.
        unsafe fn add_default(a: __m256i, b: __m256i) -> __m256i;

        /// The subtraction used by `-=`. Saturates for 1- and 2-byte integers.
        unsafe fn sub_default(a: __m256i, b: __m256i) -> __m256i;

        /// All-ones where `a == b`.
        unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i;

        /// All-ones where `a > b`.
        unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i;

        /// All-ones where `a < b`.
        unsafe fn cmp_lt(a: __m256i, b: __m256i) -> __m256i {
            unsafe { Self::cmp_gt(b, a) }
        }
    }

    pub trait SaturatingLane: Lane {
        unsafe fn add_saturate(a: __m256i, b: __m256i) -> __m256i;
        unsafe fn sub_saturate(a: __m256i, b: __m256i) -> __m256i;
    }

    pub trait FloatLane: Lane {
        unsafe fn div(a: __m256i, b: __m256i) -> __m256i;
    }

    pub trait SumLane: Lane {
        /// The scalar the lane reduces to.
        type Sum: Copy + Debug + PartialEq + Send + Sync + 'static;

        unsafe fn sum(v: __m256i) -> Self::Sum;
    }

    pub trait AveragingLane: Lane {
        unsafe fn average(a: __m256i, b: __m256i) -> __m256i;
    }

    pub trait ShiftLeftLane: Lane {
        unsafe fn shift_left(v: __m256i, amount: u32) -> __m256i;
    }

    pub trait ShiftRightLane: Lane {
        unsafe fn shift_right(v: __m256i, amount: u32) -> __m256i;
    }

    pub trait ShiftLeftVariableLane: Lane {
        unsafe fn shift_left_by(v: __m256i, amounts: __m256i) -> __m256i;
    }

    pub trait ShiftRightVariableLane: Lane {
        unsafe fn shift_right_by(v: __m256i, amounts: __m256i) -> __m256i;
    }

    pub trait AbsoluteDifferenceLane: Lane {
        unsafe fn absolute_difference(a: __m256i, b: __m256i) -> __m256i;
    }
}

use sealed::{
    AbsoluteDifferenceLane, AveragingLane, FloatLane, Lane, SaturatingLane, ShiftLeftLane,
    ShiftLeftVariableLane, ShiftRightLane, ShiftRightVariableLane, SumLane,
};

/// A numeric type that can be packed into a lane.
///
/// Implemented for the 8/16/32/64-bit integers and for `f32`/`f64`. Sealed.
pub trait Element: Lane + Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    /// Number of elements in one lane.
    const LANES: usize = LANE_BYTES / core::mem::size_of::<Self>();
}

impl<T: Lane> Element for T {}

/// Kinds with clamping add/subtract: the 8- and 16-bit integers.
pub trait Saturating: Element + SaturatingLane {}

impl<T: SaturatingLane> Saturating for T {}

/// Floating point kinds. Only these can divide.
pub trait Float: Element + FloatLane {}

impl<T: FloatLane> Float for T {}

/// Kinds with a horizontal sum.
///
/// 8- and 16-bit integers accumulate in 32 bits and cannot overflow. 32-bit
/// integers accumulate in 32 bits and wrap. 64-bit integers have no sum.
/// The scalar result type is `T::Sum`.
pub trait Summable: Element + SumLane {}

impl<T: SumLane> Summable for T {}

/// Kinds with a rounded mean: the 8- and 16-bit integers.
///
/// Halves round up, toward positive values.
pub trait Averaging: Element + AveragingLane {}

impl<T: AveragingLane> Averaging for T {}

/// Kinds that shift left by one amount shared by every element.
pub trait ShiftLeft: Element + ShiftLeftLane {}

impl<T: ShiftLeftLane> ShiftLeft for T {}

/// Kinds that shift right by one shared amount.
///
/// Unsigned kinds shift in zeros; signed kinds copy the sign bit. `i64` is
/// missing because AVX2 has no 64-bit arithmetic shift.
pub trait ShiftRight: Element + ShiftRightLane {}

impl<T: ShiftRightLane> ShiftRight for T {}

/// Kinds that shift left by a per-element amount.
pub trait ShiftLeftVariable: Element + ShiftLeftVariableLane {}

impl<T: ShiftLeftVariableLane> ShiftLeftVariable for T {}

/// Kinds that shift right by a per-element amount.
pub trait ShiftRightVariable: Element + ShiftRightVariableLane {}

impl<T: ShiftRightVariableLane> ShiftRightVariable for T {}

/// Kinds with an exact per-element `|a - b|`.
pub trait AbsoluteDifference: Element + AbsoluteDifferenceLane {}

impl<T: AbsoluteDifferenceLane> AbsoluteDifference for T {}

/// 64-bit kinds, reordered four elements at a time.
pub trait Permute64: Element {}

/// 32-bit kinds, reordered eight elements at a time.
pub trait Permute32: Element {}

/// 8-bit kinds, reordered thirty-two elements at a time.
pub trait Permute8: Element {}
