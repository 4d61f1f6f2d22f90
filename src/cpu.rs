//! CPU capability detection.
//!
//! The vector core must never run on a CPU without AVX2. Detection happens
//! once per process; the result is exposed both as a plain boolean and as
//! the [`Avx2`] token that every core constructor requires.

use bitflags::bitflags;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Vector-relevant instruction set extensions reported by the CPU.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CpuFeatures: u32 {
        /// The CPUID instruction itself. Always present on x86_64.
        const CPUID = 1 << 0;
        /// Baseline 128-bit vectors.
        const SSE2 = 1 << 1;
        /// 128-bit extract/insert used by the 64-bit reductions.
        const SSE41 = 1 << 2;
        /// 256-bit floating point operations.
        const AVX = 1 << 3;
        /// 256-bit integer operations. Required by the vector core.
        const AVX2 = 1 << 4;
        /// Fused multiply-add. Reported, not required.
        const FMA = 1 << 5;
    }
}

impl CpuFeatures {
    /// Queries the running CPU.
    #[cfg(target_arch = "x86_64")]
    pub fn detect() -> Self {
        let mut features = CpuFeatures::CPUID;
        features.set(CpuFeatures::SSE2, std::is_x86_feature_detected!("sse2"));
        features.set(CpuFeatures::SSE41, std::is_x86_feature_detected!("sse4.1"));
        features.set(CpuFeatures::AVX, std::is_x86_feature_detected!("avx"));
        features.set(CpuFeatures::AVX2, std::is_x86_feature_detected!("avx2"));
        features.set(CpuFeatures::FMA, std::is_x86_feature_detected!("fma"));
        features
    }

    /// Queries the running CPU. Nothing is reported off x86_64.
    #[cfg(not(target_arch = "x86_64"))]
    pub fn detect() -> Self {
        CpuFeatures::empty()
    }

    /// Whether every instruction the vector core emits is available.
    pub fn supports_core(self) -> bool {
        self.contains(CpuFeatures::AVX | CpuFeatures::AVX2 | CpuFeatures::SSE41)
    }
}

static FEATURES: Lazy<CpuFeatures> = Lazy::new(|| {
    let features = CpuFeatures::detect();
    debug!("Detected CPU features: {:?}", features);
    features
});

/// Features of the running CPU, detected on first use.
pub fn features() -> CpuFeatures {
    *FEATURES
}

/// Returns true when the vector core may be used on this machine.
///
/// Hosts call this once before touching any view. When it returns false the
/// core must not be exercised; telling the user is the host's job.
pub fn has_avx2_support() -> bool {
    features().supports_core()
}

/// Proof that the running CPU supports AVX2.
///
/// The token is zero-sized and can only be obtained from [`Avx2::detect`],
/// so any value holding one was built after a successful capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avx2 {
    _private: (),
}

impl Avx2 {
    /// Returns the token if the CPU supports the vector core.
    pub fn detect() -> Option<Self> {
        if has_avx2_support() {
            Some(Avx2 { _private: () })
        } else {
            debug!("AVX2 unavailable; vector core disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_detection_is_stable() {
        assert_eq!(features(), features());
        assert_eq!(has_avx2_support(), Avx2::detect().is_some());
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_cpuid_always_reported() {
        assert!(CpuFeatures::detect().contains(CpuFeatures::CPUID));
        // x86_64 guarantees SSE2.
        assert!(CpuFeatures::detect().contains(CpuFeatures::SSE2));
    }

    #[test]
    fn test_supports_core_needs_avx2() {
        let without = CpuFeatures::CPUID | CpuFeatures::AVX | CpuFeatures::SSE41;
        assert!(!without.supports_core());
        assert!((without | CpuFeatures::AVX2).supports_core());
    }

    #[test]
    fn test_features_serialize() {
        let features = CpuFeatures::SSE2 | CpuFeatures::AVX2;
        let json = serde_json::to_string(&features).unwrap();
        let back: CpuFeatures = serde_json::from_str(&json).unwrap();
        assert_eq!(back, features);
    }
}
