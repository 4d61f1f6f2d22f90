//! # AVX256
//!
//! Type-driven 256-bit vector views over caller buffers.
//!
//! ## Design Philosophy
//!
//! **The type IS the instruction selector.**
//!
//! - `Avx256<u8>`: 32 lanes, `+=` saturates, sums widen to `u32`
//! - `Avx256<i32>`: 8 lanes, `+=` wraps, arithmetic right shift
//! - `Avx256<f64>`: 4 lanes, IEEE arithmetic, division
//!
//! An operation a kind cannot perform correctly does not compile for it.
//!
//! ## Capability
//!
//! Nothing here runs without AVX2. Query once with [`cpu::has_avx2_support`]
//! or take an [`Avx2`] token from [`Avx2::detect`]; every view constructor
//! requires the token.
//!
//! ## Buffers
//!
//! A view covers exactly one lane. Walk larger buffers with the cursor and
//! finish the tail with a scalar loop, as the routines in `kernels` do.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

/// Kernel configuration.
pub mod config;
pub mod cpu;

#[cfg(target_arch = "x86_64")]
pub mod backend;
/// Buffer-level routines built on views.
#[cfg(target_arch = "x86_64")]
pub mod kernels;
#[cfg(target_arch = "x86_64")]
pub mod mask;
#[cfg(target_arch = "x86_64")]
pub mod view;

pub use config::Config;
pub use cpu::{has_avx2_support, Avx2, CpuFeatures};

#[cfg(target_arch = "x86_64")]
pub use backend::{
    AbsoluteDifference, Averaging, Element, Float, Permute32, Permute64, Permute8, Saturating,
    ShiftLeft, ShiftLeftVariable, ShiftRight, ShiftRightVariable, Summable,
};
#[cfg(target_arch = "x86_64")]
pub use kernels::{KernelError, Kernels, Path};
#[cfg(target_arch = "x86_64")]
pub use mask::Mask;
#[cfg(target_arch = "x86_64")]
pub use view::Avx256;
