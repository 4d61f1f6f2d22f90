//! # Buffer Kernels
//!
//! Whole-buffer routines built on [`Avx256`](crate::Avx256): full lanes go
//! through a view and its cursor, and the residual tail goes through the
//! matching routine in [`scalar`], which produces the same bits per element.
//!
//! [`Kernels`] decides once, at construction, whether the vector path may be
//! used at all.

use crate::config::Config;
use crate::cpu::Avx2;
use log::info;
use thiserror::Error;

pub mod scalar;
mod vector;

/// Errors reported by the buffer kernels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Two buffers that are processed element by element differ in length.
    #[error("Buffer lengths differ: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first buffer.
        left: usize,
        /// Length of the second buffer.
        right: usize,
    },
    /// A packed pixel buffer ends part way through a pixel.
    #[error("{len} bytes is not a whole number of {channels}-byte pixels")]
    PartialPixel {
        /// Buffer length in bytes.
        len: usize,
        /// Bytes per pixel.
        channels: usize,
    },
}

/// Which implementation the kernels run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Path {
    /// AVX2 views for full lanes, scalar for the tail.
    Vector(Avx2),
    /// Scalar only.
    Scalar,
}

/// The buffer kernels, bound to one execution path.
#[derive(Debug, Clone, Copy)]
pub struct Kernels {
    path: Path,
    min_vector_len: usize,
}

impl Default for Kernels {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Kernels {
    /// Picks the path from `config` and the running CPU.
    pub fn new(config: &Config) -> Self {
        let path = match Avx2::detect() {
            Some(avx) if !config.force_scalar => Path::Vector(avx),
            _ => Path::Scalar,
        };
        info!(
            "Buffer kernels using {:?} path (min_vector_len={})",
            path, config.min_vector_len
        );
        Self {
            path,
            min_vector_len: config.min_vector_len,
        }
    }

    /// Kernels that never touch the vector unit.
    pub fn scalar() -> Self {
        Self {
            path: Path::Scalar,
            min_vector_len: usize::MAX,
        }
    }

    /// The chosen path.
    pub fn path(&self) -> Path {
        self.path
    }

    fn vector(&self, len: usize) -> Option<Avx2> {
        match self.path {
            Path::Vector(avx) if len >= self.min_vector_len => Some(avx),
            _ => None,
        }
    }

    /// `dst[i] = dst[i] + src[i]`, clamped to 255.
    pub fn add_saturating_u8(&self, dst: &mut [u8], src: &[u8]) -> Result<(), KernelError> {
        same_len(dst.len(), src.len())?;
        match self.vector(dst.len()) {
            Some(avx) => vector::add_saturating_u8(avx, dst, src),
            None => scalar::add_saturating_u8(dst, src),
        }
        Ok(())
    }

    /// Binary threshold: bytes above `boundary` become 255, the rest 0.
    pub fn threshold_u8(&self, data: &mut [u8], boundary: u8) {
        match self.vector(data.len()) {
            Some(avx) => vector::threshold_u8(avx, data, boundary),
            None => scalar::threshold_u8(data, boundary),
        }
    }

    /// `out[i] = |current[i] - previous[i]|`, the frame difference.
    pub fn abs_diff_u8(
        &self,
        previous: &[u8],
        current: &[u8],
        out: &mut [u8],
    ) -> Result<(), KernelError> {
        same_len(previous.len(), current.len())?;
        same_len(current.len(), out.len())?;
        match self.vector(out.len()) {
            Some(avx) => vector::abs_diff_u8(avx, previous, current, out),
            None => scalar::abs_diff_u8(previous, current, out),
        }
        Ok(())
    }

    /// `dst[i] = dst[i] * alpha + src[i] * (1 - alpha)`.
    pub fn blend_f32(&self, dst: &mut [f32], src: &[f32], alpha: f32) -> Result<(), KernelError> {
        same_len(dst.len(), src.len())?;
        match self.vector(dst.len()) {
            Some(avx) => vector::blend_f32(avx, dst, src, alpha),
            None => scalar::blend_f32(dst, src, alpha),
        }
        Ok(())
    }

    /// Sum of every element.
    ///
    /// The vector path adds in a different order, so the last bits may
    /// differ from the scalar path.
    pub fn sum_f32(&self, data: &[f32]) -> f32 {
        match self.vector(data.len()) {
            Some(avx) => vector::sum_f32(avx, data),
            None => scalar::sum_f32(data),
        }
    }

    /// Swaps the first and third byte of every 3-byte pixel in place.
    pub fn bgr_to_rgb(&self, data: &mut [u8]) -> Result<(), KernelError> {
        if data.len() % 3 != 0 {
            return Err(KernelError::PartialPixel {
                len: data.len(),
                channels: 3,
            });
        }
        match self.vector(data.len()) {
            Some(avx) => vector::bgr_to_rgb(avx, data),
            None => scalar::bgr_to_rgb(data),
        }
        Ok(())
    }
}

fn same_len(left: usize, right: usize) -> Result<(), KernelError> {
    if left == right {
        Ok(())
    } else {
        Err(KernelError::LengthMismatch { left, right })
    }
}
