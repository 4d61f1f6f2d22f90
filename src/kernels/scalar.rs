//! Scalar references for the buffer kernels.
//!
//! These handle the residual tail of the vector path and serve as the
//! whole-buffer fallback. Slices are assumed to have matching lengths.

/// `dst[i] = dst[i].saturating_add(src[i])`.
pub fn add_saturating_u8(dst: &mut [u8], src: &[u8]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = d.saturating_add(s);
    }
}

/// Bytes above `boundary` become 255, the rest 0.
pub fn threshold_u8(data: &mut [u8], boundary: u8) {
    for x in data {
        *x = if *x > boundary { u8::MAX } else { 0 };
    }
}

/// `out[i] = |current[i] - previous[i]|`.
pub fn abs_diff_u8(previous: &[u8], current: &[u8], out: &mut [u8]) {
    for ((o, &p), &c) in out.iter_mut().zip(previous).zip(current) {
        *o = c.abs_diff(p);
    }
}

/// `dst[i] = dst[i] * alpha + src[i] * (1 - alpha)`, two roundings, no fusing.
pub fn blend_f32(dst: &mut [f32], src: &[f32], alpha: f32) {
    let beta = 1.0 - alpha;
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = *d * alpha + s * beta;
    }
}

/// Sequential sum.
pub fn sum_f32(data: &[f32]) -> f32 {
    data.iter().sum()
}

/// Swaps bytes 0 and 2 of every 3-byte pixel. A trailing partial pixel is
/// left alone.
pub fn bgr_to_rgb(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }
}
