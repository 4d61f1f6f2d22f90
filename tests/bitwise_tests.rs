#![cfg(target_arch = "x86_64")]
//! Bitwise logic and shifts, every kind against its scalar operators.

use avx256::{Avx2, Avx256};

// ============================================================================
// Logic on every kind
// ============================================================================

/// Bit patterns hitting zero, all ones, the sign bit alone and everything
/// but the sign bit, which are MIN and MAX for every integer kind.
macro_rules! patterns {
    ($u:ty, $n:expr, $offset:expr) => {{
        let sign: $u = 1 << (<$u>::BITS - 1);
        (0..$n)
            .map(|i: usize| match (i + $offset) % 6 {
                0 => 0,
                1 => !0,
                2 => sign,
                3 => !sign,
                4 => (0x5A5A_5A5A_5A5A_5A5Au64 as $u).rotate_left(i as u32),
                _ => (0x0123_4567_89AB_CDEFu64 as $u).rotate_right(i as u32),
            })
            .collect::<Vec<$u>>()
    }};
}

macro_rules! logic {
    ($name:ident, $t:ty, $u:ty, from: $from:expr, to: $to:expr) => {
        #[test]
        fn $name() {
            let Some(avx) = Avx2::detect() else { return };
            let from: fn($u) -> $t = $from;
            let to: fn($t) -> $u = $to;
            let n = 32 / core::mem::size_of::<$t>();
            let a = patterns!($u, n, 0);
            let b = patterns!($u, n, 3);
            let left: Vec<$t> = a.iter().map(|&x| from(x)).collect();
            let right: Vec<$t> = b.iter().map(|&x| from(x)).collect();
            let rhs = Avx256::from_elements(avx, &right);

            let mut and = Avx256::from_elements(avx, &left);
            and.and(&rhs);
            let mut or = Avx256::from_elements(avx, &left);
            or.or(&rhs);
            let mut xor = Avx256::from_elements(avx, &left);
            xor.xor(&rhs);
            let mut not = Avx256::from_elements(avx, &left);
            not.complement();

            let mut and_assign = Avx256::from_elements(avx, &left);
            and_assign &= &rhs;
            let mut or_assign = Avx256::from_elements(avx, &left);
            or_assign |= &rhs;
            let mut xor_assign = Avx256::from_elements(avx, &left);
            xor_assign ^= &rhs;

            for i in 0..n {
                assert_eq!(to(and[i]), a[i] & b[i], "and index {}", i);
                assert_eq!(to(or[i]), a[i] | b[i], "or index {}", i);
                assert_eq!(to(xor[i]), a[i] ^ b[i], "xor index {}", i);
                assert_eq!(to(not[i]), !a[i], "not index {}", i);
                assert_eq!(to(and_assign[i]), a[i] & b[i], "&= index {}", i);
                assert_eq!(to(or_assign[i]), a[i] | b[i], "|= index {}", i);
                assert_eq!(to(xor_assign[i]), a[i] ^ b[i], "^= index {}", i);
            }
        }
    };
}

logic!(u8_logic_should_match_scalar, u8, u8, from: |x| x, to: |x| x);
logic!(i8_logic_should_match_scalar, i8, u8, from: |x| x as i8, to: |x| x as u8);
logic!(u16_logic_should_match_scalar, u16, u16, from: |x| x, to: |x| x);
logic!(i16_logic_should_match_scalar, i16, u16, from: |x| x as i16, to: |x| x as u16);
logic!(u32_logic_should_match_scalar, u32, u32, from: |x| x, to: |x| x);
logic!(i32_logic_should_match_scalar, i32, u32, from: |x| x as i32, to: |x| x as u32);
logic!(u64_logic_should_match_scalar, u64, u64, from: |x| x, to: |x| x);
logic!(i64_logic_should_match_scalar, i64, u64, from: |x| x as i64, to: |x| x as u64);
logic!(f32_logic_should_match_raw_bits, f32, u32, from: f32::from_bits, to: f32::to_bits);
logic!(f64_logic_should_match_raw_bits, f64, u64, from: f64::from_bits, to: f64::to_bits);

#[test]
fn complement_should_flip_bits_not_negate() {
    let Some(avx) = Avx2::detect() else { return };
    let mut view = Avx256::from_elements(avx, &[0i8, 1, -1, i8::MIN]);
    view.complement();
    assert_eq!(&view.as_slice()[..4], &[-1, -2, 0, i8::MAX]);
    assert!(view.as_slice()[4..].iter().all(|&x| x == -1));
}

#[test]
fn float_logic_should_work_on_raw_bits() {
    let Some(avx) = Avx2::detect() else { return };
    // Clearing the sign bit is abs().
    let mut view = Avx256::from_elements(avx, &[-1.5f64, 2.0, -0.0, f64::NEG_INFINITY]);
    let mut magnitude = Avx256::new(avx);
    magnitude.fill(f64::from_bits(!(1u64 << 63)));
    view &= &magnitude;
    assert_eq!(view.to_vec(), vec![1.5, 2.0, 0.0, f64::INFINITY]);
    assert_eq!(view[2].to_bits(), 0);

    let mut sign = Avx256::new(avx);
    sign.fill(-0.0f64);
    view.xor(&sign);
    assert_eq!(view.to_vec(), vec![-1.5, -2.0, -0.0, f64::NEG_INFINITY]);
}

// ============================================================================
// Shifts on every kind that has them
// ============================================================================

/// MIN, MAX, zero, one and a few mixed values.
macro_rules! shift_values {
    ($t:ty) => {{
        let n = 32 / core::mem::size_of::<$t>();
        (0..n)
            .map(|i: usize| match i % 6 {
                0 => <$t>::MIN,
                1 => <$t>::MAX,
                2 => 1,
                3 => (0x5A5A_5A5A_5A5A_5A5Au64 as $t).rotate_left(i as u32),
                4 => (0x8123_4567_89AB_CDEFu64 as $t).rotate_right(i as u32),
                _ => (i as $t).wrapping_neg(),
            })
            .collect::<Vec<$t>>()
    }};
}

macro_rules! uniform_left {
    ($name:ident, $t:ty) => {
        #[test]
        fn $name() {
            let Some(avx) = Avx2::detect() else { return };
            let values = shift_values!($t);
            for amount in 0..=<$t>::BITS {
                let mut view = Avx256::from_elements(avx, &values);
                view.shift_left(amount);
                let mut assigned = Avx256::from_elements(avx, &values);
                assigned <<= amount;
                for (i, &x) in values.iter().enumerate() {
                    let expected = x.checked_shl(amount).unwrap_or(0);
                    assert_eq!(view[i], expected, "{:?} << {}", x, amount);
                    assert_eq!(assigned[i], expected, "{:?} <<= {}", x, amount);
                }
            }
        }
    };
}

uniform_left!(u16_shift_left_should_match_scalar, u16);
uniform_left!(i16_shift_left_should_match_scalar, i16);
uniform_left!(u32_shift_left_should_match_scalar, u32);
uniform_left!(i32_shift_left_should_match_scalar, i32);
uniform_left!(u64_shift_left_should_match_scalar, u64);
uniform_left!(i64_shift_left_should_match_scalar, i64);

macro_rules! uniform_right {
    ($name:ident, $t:ty, $scalar:expr) => {
        #[test]
        fn $name() {
            let Some(avx) = Avx2::detect() else { return };
            let scalar: fn($t, u32) -> $t = $scalar;
            let values = shift_values!($t);
            for amount in 0..=<$t>::BITS {
                let mut view = Avx256::from_elements(avx, &values);
                view.shift_right(amount);
                let mut assigned = Avx256::from_elements(avx, &values);
                assigned >>= amount;
                for (i, &x) in values.iter().enumerate() {
                    let expected = scalar(x, amount);
                    assert_eq!(view[i], expected, "{:?} >> {}", x, amount);
                    assert_eq!(assigned[i], expected, "{:?} >>= {}", x, amount);
                }
            }
        }
    };
}

// Unsigned kinds shift in zeros; signed kinds keep filling with the sign.
uniform_right!(u16_shift_right_should_match_scalar, u16, |x, n| x.checked_shr(n).unwrap_or(0));
uniform_right!(i16_shift_right_should_match_scalar, i16, |x, n| x >> n.min(15));
uniform_right!(u32_shift_right_should_match_scalar, u32, |x, n| x.checked_shr(n).unwrap_or(0));
uniform_right!(i32_shift_right_should_match_scalar, i32, |x, n| x >> n.min(31));
uniform_right!(u64_shift_right_should_match_scalar, u64, |x, n| x.checked_shr(n).unwrap_or(0));

/// Runs every amount from 0 to the element width through every position,
/// one lane's worth of amounts at a time.
macro_rules! variable {
    ($name:ident, $t:ty, $method:ident, $scalar:expr) => {
        #[test]
        fn $name() {
            let Some(avx) = Avx2::detect() else { return };
            let scalar: fn($t, u32) -> $t = $scalar;
            let values = shift_values!($t);
            let n = values.len();
            let width = <$t>::BITS as usize + 1;
            for round in 0..width {
                let amounts: Vec<u32> = (0..n).map(|i| ((round + i) % width) as u32).collect();
                let lane: Vec<$t> = amounts.iter().map(|&a| a as $t).collect();
                let mut view = Avx256::from_elements(avx, &values);
                view.$method(&Avx256::from_elements(avx, &lane));
                for i in 0..n {
                    assert_eq!(
                        view[i],
                        scalar(values[i], amounts[i]),
                        "{:?} by {}",
                        values[i],
                        amounts[i]
                    );
                }
            }
        }
    };
}

variable!(u32_shift_left_by_should_match_scalar, u32, shift_left_by, |x, n| x.checked_shl(n).unwrap_or(0));
variable!(i32_shift_left_by_should_match_scalar, i32, shift_left_by, |x, n| x.checked_shl(n).unwrap_or(0));
variable!(u64_shift_left_by_should_match_scalar, u64, shift_left_by, |x, n| x.checked_shl(n).unwrap_or(0));
variable!(i64_shift_left_by_should_match_scalar, i64, shift_left_by, |x, n| x.checked_shl(n).unwrap_or(0));
variable!(u32_shift_right_by_should_match_scalar, u32, shift_right_by, |x, n| x.checked_shr(n).unwrap_or(0));
variable!(i32_shift_right_by_should_match_scalar, i32, shift_right_by, |x, n| x >> n.min(31));
variable!(u64_shift_right_by_should_match_scalar, u64, shift_right_by, |x, n| x.checked_shr(n).unwrap_or(0));

#[test]
fn oversized_uniform_shifts_should_fill() {
    let Some(avx) = Avx2::detect() else { return };
    let mut logical = Avx256::from_elements(avx, &[u64::MAX; 4]);
    logical.shift_right(64);
    assert!(logical.is_zero());

    let mut arithmetic = Avx256::from_elements(avx, &[-5i32, 5, -5, 5, 0, 0, 0, 0]);
    arithmetic.shift_right(100);
    assert_eq!(arithmetic.to_vec(), vec![-1, 0, -1, 0, 0, 0, 0, 0]);
}

#[test]
fn variable_shifts_should_use_each_amount() {
    let Some(avx) = Avx2::detect() else { return };
    let amounts32 = Avx256::from_elements(avx, &[0u32, 1, 2, 3, 31, 32, 33, 8]);
    let mut u = Avx256::from_elements(avx, &[0x8000_0001u32; 8]);
    u.shift_right_by(&amounts32);
    assert_eq!(
        u.to_vec(),
        vec![0x8000_0001, 0x4000_0000, 0x2000_0000, 0x1000_0000, 1, 0, 0, 0x0080_0000]
    );

    let amounts_i32 = Avx256::from_elements(avx, &[0i32, 1, 4, 31, 32, 40, 2, 3]);
    let mut s = Avx256::from_elements(avx, &[-64i32; 8]);
    s.shift_right_by(&amounts_i32);
    assert_eq!(s.to_vec(), vec![-64, -32, -4, -1, -1, -1, -16, -8]);
}
