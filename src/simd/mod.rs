//! Backend selection
//!
//! The lane width is resolved at build time from the enabled target features:
//!
//! | Backend  | Target feature | Lanes | Lane type         |
//! |----------|----------------|-------|-------------------|
//! | `AVX`    | `avx`          | 4     | `numeric::F64x4`  |
//! | `SSE`    | `sse2`         | 2     | `numeric::F64x2`  |
//! | `NEON`   | `neon`         | 2     | `numeric::F64x2`  |
//! | `Scalar` | none           | 1     | `f64`             |
//!
//! The `force-scalar` cargo feature pins the scalar row. x86_64 builds get
//! SSE by default; build with `-C target-feature=+avx` (or
//! `-C target-cpu=native`) for the 4-lane kernels.

mod detect;

pub use detect::{cpu_features, CpuFeatures};

use std::fmt;
use std::sync::OnceLock;

use crate::numeric::Numeric;

#[cfg(all(target_arch = "x86_64", target_feature = "avx", not(feature = "force-scalar")))]
pub type NativeLane = crate::numeric::F64x4;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "sse2",
    not(target_feature = "avx"),
    not(feature = "force-scalar")
))]
pub type NativeLane = crate::numeric::F64x2;

#[cfg(all(target_arch = "aarch64", target_feature = "neon", not(feature = "force-scalar")))]
pub type NativeLane = crate::numeric::F64x2;

#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "avx", not(feature = "force-scalar")),
    all(target_arch = "x86_64", target_feature = "sse2", not(feature = "force-scalar")),
    all(target_arch = "aarch64", target_feature = "neon", not(feature = "force-scalar"))
)))]
pub type NativeLane = f64;

/// Lane width of [`NativeLane`]: 4, 2 or 1
pub const LANE_WIDTH: usize = <NativeLane as Numeric>::LANES;

static BACKEND: OnceLock<Backend> = OnceLock::new();

/// Vector instruction family the kernels were compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Avx,
    Sse,
    Neon,
    Scalar,
}

impl Backend {
    /// Backend matching [`NativeLane`]
    pub const fn compiled() -> Self {
        if cfg!(all(target_arch = "x86_64", target_feature = "avx", not(feature = "force-scalar"))) {
            Backend::Avx
        } else if cfg!(all(target_arch = "x86_64", target_feature = "sse2", not(feature = "force-scalar"))) {
            Backend::Sse
        } else if cfg!(all(target_arch = "aarch64", target_feature = "neon", not(feature = "force-scalar"))) {
            Backend::Neon
        } else {
            Backend::Scalar
        }
    }

    /// Diagnostic name
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Avx => "AVX",
            Backend::Sse => "SSE",
            Backend::Neon => "NEON",
            Backend::Scalar => "Scalar",
        }
    }

    /// f64 elements per vector instruction
    pub const fn lanes(self) -> usize {
        match self {
            Backend::Avx => 4,
            Backend::Sse | Backend::Neon => 2,
            Backend::Scalar => 1,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Active backend, resolved once per process
pub fn backend() -> Backend {
    *BACKEND.get_or_init(|| {
        let compiled = Backend::compiled();
        let host = cpu_features();
        tracing::debug!(
            backend = compiled.name(),
            lanes = compiled.lanes(),
            host_max_lanes = host.max_lanes(),
            "resolved simd backend"
        );
        if host.max_lanes() > compiled.lanes() {
            tracing::debug!(
                "host supports {} lanes but kernels were built for {}; enable the wider target feature to use them",
                host.max_lanes(),
                compiled.lanes()
            );
        }
        compiled
    })
}

/// Name of the active backend: `"AVX"`, `"SSE"`, `"NEON"` or `"Scalar"`
pub fn simd_backend() -> &'static str {
    backend().name()
}
