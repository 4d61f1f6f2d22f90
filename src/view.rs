//! # The Vector View
//!
//! [`Avx256`] addresses exactly one 256-bit lane of `T` and runs every
//! operation on it with a single AVX2 instruction sequence chosen by `T`.
//!
//! A view either borrows a caller's buffer or owns a private lane-sized
//! buffer. The two states are one enum, so an owning view can never point
//! at foreign memory.
//!
//! ```
//! use avx256::{Avx2, Avx256};
//!
//! if let Some(avx) = Avx2::detect() {
//!     let mut pixels = [250u8; 32];
//!     let bump = Avx256::from_elements(avx, &[10u8; 32]);
//!     let mut view = Avx256::borrow(avx, &mut pixels);
//!     view += &bump; // saturates for 8-bit kinds
//!     assert!(view.as_slice().iter().all(|&p| p == 255));
//! }
//! ```
//!
//! Operations that a kind does not support do not exist for it:
//!
//! ```compile_fail
//! use avx256::{Avx2, Avx256};
//! let avx = Avx2::detect().unwrap();
//! let mut a = Avx256::<i32>::new(avx);
//! let b = Avx256::<i32>::new(avx);
//! a.add_saturate(&b);
//! ```
//!
//! ```compile_fail
//! use avx256::{Avx2, Avx256};
//! let avx = Avx2::detect().unwrap();
//! let mut a = Avx256::<u16>::new(avx);
//! let b = Avx256::<u16>::new(avx);
//! a.div(&b);
//! ```
//!
//! ```compile_fail
//! use avx256::{Avx2, Avx256};
//! let avx = Avx2::detect().unwrap();
//! let a = Avx256::<i64>::new(avx);
//! let _ = a.sum();
//! ```
//!
//! ```compile_fail
//! use avx256::{Avx2, Avx256};
//! let avx = Avx2::detect().unwrap();
//! let mut a = Avx256::<i64>::new(avx);
//! a >>= 3;
//! ```

use crate::backend::{
    x86, AbsoluteDifference, Averaging, Element, Float, Permute32, Permute64, Permute8,
    Saturating, ShiftLeft, ShiftLeftVariable, ShiftRight, ShiftRightVariable, Summable,
    LANE_BYTES,
};
use crate::cpu::Avx2;
use crate::mask::Mask;
use core::arch::x86_64::__m256i;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{
    AddAssign, BitAndAssign, BitOrAssign, BitXorAssign, DivAssign, Index, IndexMut, MulAssign,
    ShlAssign, ShrAssign, SubAssign,
};
use core::ptr::NonNull;

type Binary = unsafe fn(__m256i, __m256i) -> __m256i;

#[repr(C, align(32))]
struct LaneBuffer([u8; LANE_BYTES]);

enum Storage<T> {
    /// Caller memory. Never freed by the view.
    Borrowed(NonNull<T>),
    /// Private lane, freed when the view drops.
    Owned(Box<LaneBuffer>),
}

/// A view over one 256-bit lane of `T`.
///
/// Every constructor takes an [`Avx2`] token, so a view can only exist on a
/// CPU that runs its instructions. Mutating operations write straight
/// through to the addressed memory and return `&mut Self` for chaining.
pub struct Avx256<'a, T: Element> {
    storage: Storage<T>,
    _memory: PhantomData<&'a mut [T]>,
}

// SAFETY: a view is a pointer into memory the caller handed over for `'a`
// (or a private box). It carries no shared state of its own.
unsafe impl<T: Element> Send for Avx256<'_, T> {}
unsafe impl<T: Element> Sync for Avx256<'_, T> {}

// All intrinsic calls below are sound because constructing a view required
// an `Avx2` token, and the addressed memory holds at least one lane.
#[allow(clippy::should_implement_trait)]
impl<'a, T: Element> Avx256<'a, T> {
    /// Elements per lane.
    pub const LANES: usize = T::LANES;

    // ========================================================================
    // Construction & cursor
    // ========================================================================

    fn owned() -> Self {
        Self {
            storage: Storage::Owned(Box::new(LaneBuffer([0; LANE_BYTES]))),
            _memory: PhantomData,
        }
    }

    /// Allocates a private lane. Every element starts at zero.
    pub fn new(_avx: Avx2) -> Self {
        Self::owned()
    }

    /// Allocates a private lane holding `values`, zero padded.
    ///
    /// # Panics
    ///
    /// Panics if `values` is longer than one lane.
    pub fn from_elements(avx: Avx2, values: &[T]) -> Self {
        assert!(
            values.len() <= T::LANES,
            "{} values do not fit in a lane of {} {}",
            values.len(),
            T::LANES,
            core::any::type_name::<T>()
        );
        let mut view = Self::new(avx);
        view.as_mut_slice()[..values.len()].copy_from_slice(values);
        view
    }

    /// Borrows the first lane of `data`.
    ///
    /// The cursor may later walk the rest of `data` with [`next`](Self::next).
    ///
    /// # Panics
    ///
    /// Panics if `data` is shorter than one lane.
    pub fn borrow(_avx: Avx2, data: &'a mut [T]) -> Self {
        assert!(
            data.len() >= T::LANES,
            "buffer of {} elements is shorter than one lane ({})",
            data.len(),
            T::LANES
        );
        Self {
            storage: Storage::Borrowed(NonNull::from(data).cast()),
            _memory: PhantomData,
        }
    }

    /// Borrows the lane starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and address at least one lane of initialized
    /// `T`, readable and writable for `'a`. No alignment is required. Other
    /// views may alias the same memory as long as no two of them are used
    /// at the same time from different threads.
    pub unsafe fn from_ptr(_avx: Avx2, ptr: *mut T) -> Self {
        debug_assert!(!ptr.is_null(), "null lane address");
        Self {
            // SAFETY: non-null per the caller's contract.
            storage: Storage::Borrowed(unsafe { NonNull::new_unchecked(ptr) }),
            _memory: PhantomData,
        }
    }

    /// Advances the view by one lane.
    ///
    /// Owned views never move.
    ///
    /// # Safety
    ///
    /// The new position must lie inside the memory the view was created
    /// over, or exactly one past its end. It must address a full lane
    /// before the view is used again.
    #[inline]
    pub unsafe fn next(&mut self) {
        match &mut self.storage {
            Storage::Borrowed(ptr) => {
                // SAFETY: in bounds or one past the end, per the caller.
                *ptr = unsafe { NonNull::new_unchecked(ptr.as_ptr().add(T::LANES)) };
            }
            Storage::Owned(_) => debug_assert!(false, "owned views have no cursor"),
        }
    }

    /// Moves the view back by one lane.
    ///
    /// Owned views never move.
    ///
    /// # Safety
    ///
    /// Same contract as [`next`](Self::next), in the other direction.
    #[inline]
    pub unsafe fn previous(&mut self) {
        match &mut self.storage {
            Storage::Borrowed(ptr) => {
                // SAFETY: in bounds, per the caller.
                *ptr = unsafe { NonNull::new_unchecked(ptr.as_ptr().sub(T::LANES)) };
            }
            Storage::Owned(_) => debug_assert!(false, "owned views have no cursor"),
        }
    }

    /// Whether the view owns its lane.
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Elements per lane.
    pub fn lanes(&self) -> usize {
        T::LANES
    }

    /// Address of the first element.
    pub fn as_ptr(&self) -> *const T {
        match &self.storage {
            Storage::Borrowed(ptr) => ptr.as_ptr(),
            Storage::Owned(buf) => buf.0.as_ptr().cast(),
        }
    }

    fn as_mut_ptr(&mut self) -> *mut T {
        match &mut self.storage {
            Storage::Borrowed(ptr) => ptr.as_ptr(),
            Storage::Owned(buf) => buf.0.as_mut_ptr().cast(),
        }
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// The addressed elements.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the view addresses one initialized lane.
        unsafe { core::slice::from_raw_parts(self.as_ptr(), T::LANES) }
    }

    /// The addressed elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` keeps this the only live access.
        unsafe { core::slice::from_raw_parts_mut(self.as_mut_ptr(), T::LANES) }
    }

    /// Copies the lane out.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// An owned copy of the current lane, independent of the cursor.
    pub fn snapshot(&self) -> Avx256<'static, T> {
        let mut copy = Avx256::owned();
        copy.store(self.load());
        copy
    }

    #[inline(always)]
    fn load(&self) -> __m256i {
        unsafe { x86::load(self.as_ptr()) }
    }

    #[inline(always)]
    fn store(&mut self, v: __m256i) {
        unsafe { x86::store(self.as_mut_ptr(), v) }
    }

    #[inline(always)]
    fn apply(&mut self, rhs: &Avx256<'_, T>, op: Binary) -> &mut Self {
        let v = unsafe { op(self.load(), rhs.load()) };
        self.store(v);
        self
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Broadcasts `value` into every element.
    pub fn fill(&mut self, value: T) -> &mut Self {
        self.store(unsafe { T::splat(value) });
        self
    }

    /// Copies one lane from `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is shorter than one lane.
    pub fn set(&mut self, values: &[T]) -> &mut Self {
        assert!(values.len() >= T::LANES, "need {} values, got {}", T::LANES, values.len());
        self.store(unsafe { x86::load(values.as_ptr()) });
        self
    }

    /// Copies one lane from `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must address at least one lane of readable `T`.
    pub unsafe fn set_from_ptr(&mut self, ptr: *const T) -> &mut Self {
        self.store(unsafe { x86::load(ptr) });
        self
    }

    /// Copies the contents of another view.
    pub fn copy_from(&mut self, other: &Avx256<'_, T>) -> &mut Self {
        self.store(other.load());
        self
    }

    /// Sets every element to zero.
    pub fn clear(&mut self) -> &mut Self {
        self.store(unsafe { x86::zero() });
        self
    }

    /// Writes a mask: set elements become all ones, the rest zero.
    pub fn set_mask(&mut self, mask: Mask<T>) -> &mut Self {
        self.store(mask.bits());
        self
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Element-wise addition. Integers wrap.
    pub fn add(&mut self, rhs: &Avx256<'_, T>) -> &mut Self {
        self.apply(rhs, T::add)
    }

    /// Element-wise subtraction. Integers wrap.
    pub fn sub(&mut self, rhs: &Avx256<'_, T>) -> &mut Self {
        self.apply(rhs, T::sub)
    }

    /// Element-wise multiplication.
    ///
    /// 16-, 32- and 64-bit integers keep the low bits of the product. 8-bit
    /// integers saturate into their range instead.
    pub fn mul(&mut self, rhs: &Avx256<'_, T>) -> &mut Self {
        self.apply(rhs, T::mul)
    }

    /// Addition clamped to the kind's range.
    pub fn add_saturate(&mut self, rhs: &Avx256<'_, T>) -> &mut Self
    where
        T: Saturating,
    {
        self.apply(rhs, T::add_saturate)
    }

    /// Subtraction clamped to the kind's range.
    pub fn sub_saturate(&mut self, rhs: &Avx256<'_, T>) -> &mut Self
    where
        T: Saturating,
    {
        self.apply(rhs, T::sub_saturate)
    }

    /// Element-wise division.
    pub fn div(&mut self, rhs: &Avx256<'_, T>) -> &mut Self
    where
        T: Float,
    {
        self.apply(rhs, T::div)
    }

    /// Exact `|self - rhs|` per element.
    pub fn absolute_difference(&mut self, rhs: &Avx256<'_, T>) -> &mut Self
    where
        T: AbsoluteDifference,
    {
        self.apply(rhs, T::absolute_difference)
    }

    // ========================================================================
    // Bitwise & shifts
    // ========================================================================

    /// Flips every bit.
    pub fn complement(&mut self) -> &mut Self {
        let v = unsafe { x86::not(self.load()) };
        self.store(v);
        self
    }

    /// Bitwise and. Floats are treated as raw bits.
    pub fn and(&mut self, rhs: &Avx256<'_, T>) -> &mut Self {
        self.apply(rhs, x86::and)
    }

    /// Bitwise or. Floats are treated as raw bits.
    pub fn or(&mut self, rhs: &Avx256<'_, T>) -> &mut Self {
        self.apply(rhs, x86::or)
    }

    /// Bitwise xor. Floats are treated as raw bits.
    pub fn xor(&mut self, rhs: &Avx256<'_, T>) -> &mut Self {
        self.apply(rhs, x86::xor)
    }

    /// Shifts every element left by `amount`. Amounts past the width give 0.
    pub fn shift_left(&mut self, amount: u32) -> &mut Self
    where
        T: ShiftLeft,
    {
        let v = unsafe { T::shift_left(self.load(), amount) };
        self.store(v);
        self
    }

    /// Shifts every element right by `amount`.
    ///
    /// Unsigned kinds fill with zeros, signed kinds with the sign bit.
    pub fn shift_right(&mut self, amount: u32) -> &mut Self
    where
        T: ShiftRight,
    {
        let v = unsafe { T::shift_right(self.load(), amount) };
        self.store(v);
        self
    }

    /// Shifts each element left by the matching element of `amounts`.
    pub fn shift_left_by(&mut self, amounts: &Avx256<'_, T>) -> &mut Self
    where
        T: ShiftLeftVariable,
    {
        self.apply(amounts, T::shift_left_by)
    }

    /// Shifts each element right by the matching element of `amounts`.
    pub fn shift_right_by(&mut self, amounts: &Avx256<'_, T>) -> &mut Self
    where
        T: ShiftRightVariable,
    {
        self.apply(amounts, T::shift_right_by)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Set where `self == rhs`.
    ///
    /// Float comparisons are quiet and ordered: a NaN element is never
    /// equal to anything, itself included.
    pub fn is_equal_to(&self, rhs: &Avx256<'_, T>) -> Mask<T> {
        Mask::from_bits(unsafe { T::cmp_eq(self.load(), rhs.load()) })
    }

    /// Set where `self > rhs`. Unsigned kinds compare over their full range.
    pub fn is_greater_than(&self, rhs: &Avx256<'_, T>) -> Mask<T> {
        Mask::from_bits(unsafe { T::cmp_gt(self.load(), rhs.load()) })
    }

    /// Set where `self < rhs`.
    pub fn is_less_than(&self, rhs: &Avx256<'_, T>) -> Mask<T> {
        Mask::from_bits(unsafe { T::cmp_lt(self.load(), rhs.load()) })
    }

    // ========================================================================
    // Reduction
    // ========================================================================

    /// Sum of every element.
    ///
    /// 8- and 16-bit kinds accumulate in 32 bits and never overflow. 32-bit
    /// integer kinds accumulate in 32 bits and wrap.
    pub fn sum(&self) -> T::Sum
    where
        T: Summable,
    {
        unsafe { T::sum(self.load()) }
    }

    /// Rounded mean with `rhs`, halves rounding up.
    pub fn average(&mut self, rhs: &Avx256<'_, T>) -> &mut Self
    where
        T: Averaging,
    {
        self.apply(rhs, T::average)
    }

    /// True when every bit of the lane is zero.
    ///
    /// For floats this means `+0.0` only; `-0.0` has its sign bit set.
    pub fn is_zero(&self) -> bool {
        unsafe { x86::is_zero(self.load()) }
    }

    // ========================================================================
    // Permutation
    // ========================================================================

    /// Reorders the four elements: element `i` becomes old element `order[i]`.
    pub fn permute64(&mut self, order: &[u8; 4]) -> &mut Self
    where
        T: Permute64,
    {
        debug_assert_order(order, T::LANES);
        let v = unsafe { x86::permute64(self.load(), order) };
        self.store(v);
        self
    }

    /// Reorders the eight elements: element `i` becomes old element `order[i]`.
    pub fn permute32(&mut self, order: &[u8; 8]) -> &mut Self
    where
        T: Permute32,
    {
        debug_assert_order(order, T::LANES);
        let v = unsafe { x86::permute32(self.load(), order) };
        self.store(v);
        self
    }

    /// Reorders the thirty-two bytes: byte `i` becomes old byte `order[i]`.
    ///
    /// Sources may come from either 128-bit half.
    pub fn permute8(&mut self, order: &[u8; 32]) -> &mut Self
    where
        T: Permute8,
    {
        debug_assert_order(order, T::LANES);
        let v = unsafe { x86::permute8(self.load(), order) };
        self.store(v);
        self
    }
}

/// Entries are masked to the lane in release builds.
#[inline(always)]
fn debug_assert_order(order: &[u8], lanes: usize) {
    debug_assert!(
        order.iter().all(|&i| usize::from(i) < lanes),
        "permute index out of range for {} lanes: {:?}",
        lanes,
        order
    );
}

// ============================================================================
// Operators
// ============================================================================

/// `+=` saturates for 8- and 16-bit integers and wraps for wider ones.
impl<T: Element> AddAssign<&Avx256<'_, T>> for Avx256<'_, T> {
    fn add_assign(&mut self, rhs: &Avx256<'_, T>) {
        self.apply(rhs, T::add_default);
    }
}

/// `-=` saturates for 8- and 16-bit integers and wraps for wider ones.
impl<T: Element> SubAssign<&Avx256<'_, T>> for Avx256<'_, T> {
    fn sub_assign(&mut self, rhs: &Avx256<'_, T>) {
        self.apply(rhs, T::sub_default);
    }
}

impl<T: Element> MulAssign<&Avx256<'_, T>> for Avx256<'_, T> {
    fn mul_assign(&mut self, rhs: &Avx256<'_, T>) {
        self.mul(rhs);
    }
}

impl<T: Float> DivAssign<&Avx256<'_, T>> for Avx256<'_, T> {
    fn div_assign(&mut self, rhs: &Avx256<'_, T>) {
        self.div(rhs);
    }
}

impl<T: Element> BitAndAssign<&Avx256<'_, T>> for Avx256<'_, T> {
    fn bitand_assign(&mut self, rhs: &Avx256<'_, T>) {
        self.and(rhs);
    }
}

impl<T: Element> BitOrAssign<&Avx256<'_, T>> for Avx256<'_, T> {
    fn bitor_assign(&mut self, rhs: &Avx256<'_, T>) {
        self.or(rhs);
    }
}

impl<T: Element> BitXorAssign<&Avx256<'_, T>> for Avx256<'_, T> {
    fn bitxor_assign(&mut self, rhs: &Avx256<'_, T>) {
        self.xor(rhs);
    }
}

impl<T: ShiftLeft> ShlAssign<u32> for Avx256<'_, T> {
    fn shl_assign(&mut self, amount: u32) {
        self.shift_left(amount);
    }
}

impl<T: ShiftRight> ShrAssign<u32> for Avx256<'_, T> {
    fn shr_assign(&mut self, amount: u32) {
        self.shift_right(amount);
    }
}

impl<T: Element> Index<usize> for Avx256<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Element> IndexMut<usize> for Avx256<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

/// Element-wise scalar equality; NaN elements are unequal.
impl<T: Element> PartialEq<Avx256<'_, T>> for Avx256<'_, T> {
    fn eq(&self, other: &Avx256<'_, T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Element> fmt::Debug for Avx256<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Avx256")
            .field("kind", &core::any::type_name::<T>())
            .field("owned", &self.is_owned())
            .field("elements", &self.as_slice())
            .finish()
    }
}
