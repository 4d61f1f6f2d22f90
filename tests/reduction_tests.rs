#![cfg(target_arch = "x86_64")]
//! Sum, average and zero tests.

use avx256::{Avx2, Avx256};
use proptest::prelude::*;

#[test]
fn u8_sum_should_widen() {
    let Some(avx) = Avx2::detect() else { return };
    let view = Avx256::from_elements(avx, &[255u8; 32]);
    assert_eq!(view.sum(), 8160u32);
}

#[test]
fn narrow_signed_sums_should_widen() {
    let Some(avx) = Avx2::detect() else { return };
    assert_eq!(Avx256::from_elements(avx, &[i8::MIN; 32]).sum(), -4096);
    assert_eq!(Avx256::from_elements(avx, &[i8::MAX; 32]).sum(), 4064);
    assert_eq!(Avx256::from_elements(avx, &[i16::MIN; 16]).sum(), -524_288);
    assert_eq!(Avx256::from_elements(avx, &[u16::MAX; 16]).sum(), 1_048_560u32);
}

#[test]
fn i32_sum_should_wrap() {
    let Some(avx) = Avx2::detect() else { return };
    let view = Avx256::from_elements(avx, &[i32::MAX, 1]);
    assert_eq!(view.sum(), i32::MIN);
    let view = Avx256::from_elements(avx, &[u32::MAX, 2]);
    assert_eq!(view.sum(), 1u32);
}

#[test]
fn float_sums_should_add_every_lane() {
    let Some(avx) = Avx2::detect() else { return };
    let view = Avx256::from_elements(avx, &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    assert_eq!(view.sum(), 36.0);
    let view = Avx256::from_elements(avx, &[0.5f64, -1.25, 100.0, 0.75]);
    assert_eq!(view.sum(), 100.0);
}

#[test]
fn u8_average_should_round_half_up() {
    let Some(avx) = Avx2::detect() else { return };
    let mut view = Avx256::from_elements(avx, &[0u8, 1, 2, 254]);
    view.average(&Avx256::from_elements(avx, &[255u8, 2, 2, 255]));
    assert_eq!(&view.as_slice()[..4], &[128, 2, 2, 255]);
}

#[test]
fn signed_average_should_round_toward_positive() {
    let Some(avx) = Avx2::detect() else { return };
    let mut view = Avx256::from_elements(avx, &[i8::MIN, -3, 3, -1]);
    view.average(&Avx256::from_elements(avx, &[i8::MAX, 0, 0, 0]));
    // -0.5 -> 0, -1.5 -> -1, 1.5 -> 2, -0.5 -> 0
    assert_eq!(&view.as_slice()[..4], &[0, -1, 2, 0]);

    let mut wide = Avx256::from_elements(avx, &[i16::MIN, i16::MAX, -7]);
    wide.average(&Avx256::from_elements(avx, &[i16::MIN, i16::MAX, 2]));
    assert_eq!(&wide.as_slice()[..3], &[i16::MIN, i16::MAX, -2]);
}

#[test]
fn is_zero_should_see_every_bit() {
    let Some(avx) = Avx2::detect() else { return };
    let mut view = Avx256::<u64>::new(avx);
    assert!(view.is_zero());
    view[3] = 1 << 63;
    assert!(!view.is_zero());

    let negative_zero = Avx256::from_elements(avx, &[-0.0f32]);
    assert!(!negative_zero.is_zero());
}

proptest! {
    #[test]
    fn u8_sum_matches_scalar(a in prop::array::uniform32(any::<u8>())) {
        let Some(avx) = Avx2::detect() else { return Ok(()) };
        let expected: u32 = a.iter().map(|&x| u32::from(x)).sum();
        prop_assert_eq!(Avx256::from_elements(avx, &a).sum(), expected);
    }

    #[test]
    fn i16_sum_matches_scalar(a in prop::array::uniform16(any::<i16>())) {
        let Some(avx) = Avx2::detect() else { return Ok(()) };
        let expected: i32 = a.iter().map(|&x| i32::from(x)).sum();
        prop_assert_eq!(Avx256::from_elements(avx, &a).sum(), expected);
    }

    #[test]
    fn u16_average_matches_scalar(
        a in prop::array::uniform16(any::<u16>()),
        b in prop::array::uniform16(any::<u16>()),
    ) {
        let Some(avx) = Avx2::detect() else { return Ok(()) };
        let mut view = Avx256::from_elements(avx, &a);
        view.average(&Avx256::from_elements(avx, &b));
        for i in 0..16 {
            let expected = ((u32::from(a[i]) + u32::from(b[i]) + 1) / 2) as u16;
            prop_assert_eq!(view[i], expected);
        }
    }

    #[test]
    fn i8_average_matches_scalar(
        a in prop::array::uniform32(any::<i8>()),
        b in prop::array::uniform32(any::<i8>()),
    ) {
        let Some(avx) = Avx2::detect() else { return Ok(()) };
        let mut view = Avx256::from_elements(avx, &a);
        view.average(&Avx256::from_elements(avx, &b));
        for i in 0..32 {
            let expected = (i16::from(a[i]) + i16::from(b[i]) + 1).div_euclid(2) as i8;
            prop_assert_eq!(view[i], expected);
        }
    }
}
