//! Chunked traversal: one vectorized main loop plus scalar tail for every kernel.
//!
//! A kernel defines its per-element step once, generically over [`Numeric`].
//! The helpers below instantiate that step with the lane type for the
//! `LANES`-wide main loop and with `f64` for the `len % LANES` remainder, then
//! run the kernel's combine step. No remainder padding is needed, so kernels
//! like min/max see only real elements.

use crate::numeric::Numeric;

/// Elementwise kernel over one input
pub trait Map {
    fn apply<T: Numeric>(&self, x: T) -> T;
}

/// Elementwise kernel over two inputs
pub trait ZipMap {
    fn apply<T: Numeric>(&self, a: T, b: T) -> T;
}

/// Reduction kernel over one input
pub trait Fold {
    /// Neutral element of `step` and `merge`
    const IDENTITY: f64;

    fn step<T: Numeric>(&self, acc: T, x: T) -> T;

    /// Collapse the per-lane partial accumulators into one scalar
    fn horizontal<T: Numeric>(acc: T) -> f64;

    /// Combine the horizontal result with the scalar tail accumulator
    fn merge(vector: f64, tail: f64) -> f64;
}

/// Reduction kernel over two inputs
pub trait ZipFold {
    const IDENTITY: f64;

    fn step<T: Numeric>(&self, acc: T, a: T, b: T) -> T;

    fn horizontal<T: Numeric>(acc: T) -> f64;

    fn merge(vector: f64, tail: f64) -> f64;
}

/// `out[i] = kernel(input[i])` over the common prefix of `input` and `out`
#[inline(always)]
pub fn map<L: Numeric, K: Map>(input: &[f64], out: &mut [f64], kernel: &K) {
    let n = input.len().min(out.len());
    let (input, out) = (&input[..n], &mut out[..n]);

    let mut src = input.chunks_exact(L::LANES);
    let mut dst = out.chunks_exact_mut(L::LANES);
    for (s, d) in (&mut src).zip(&mut dst) {
        kernel.apply(L::load(s)).store(d);
    }

    for (s, d) in src.remainder().iter().zip(dst.into_remainder()) {
        *d = kernel.apply(*s);
    }
}

/// `out[i] = kernel(a[i], b[i])` over the common prefix of all three buffers
#[inline(always)]
pub fn zip_map<L: Numeric, K: ZipMap>(a: &[f64], b: &[f64], out: &mut [f64], kernel: &K) {
    let n = a.len().min(b.len()).min(out.len());
    let (a, b, out) = (&a[..n], &b[..n], &mut out[..n]);

    let mut ca = a.chunks_exact(L::LANES);
    let mut cb = b.chunks_exact(L::LANES);
    let mut dst = out.chunks_exact_mut(L::LANES);
    for ((sa, sb), d) in (&mut ca).zip(&mut cb).zip(&mut dst) {
        kernel.apply(L::load(sa), L::load(sb)).store(d);
    }

    let tail = ca.remainder().iter().zip(cb.remainder());
    for ((xa, xb), d) in tail.zip(dst.into_remainder()) {
        *d = kernel.apply(*xa, *xb);
    }
}

/// Reduce `data` with `kernel`; an empty slice yields `K::IDENTITY`.
#[inline(always)]
pub fn fold<L: Numeric, K: Fold>(data: &[f64], kernel: &K) -> f64 {
    let mut acc = L::splat(K::IDENTITY);
    let chunks = data.chunks_exact(L::LANES);
    let tail = chunks.remainder();
    for chunk in chunks {
        acc = kernel.step(acc, L::load(chunk));
    }

    let mut tail_acc = K::IDENTITY;
    for &x in tail {
        tail_acc = kernel.step(tail_acc, x);
    }

    K::merge(K::horizontal(acc), tail_acc)
}

/// Reduce the common prefix of `a` and `b` with `kernel`.
#[inline(always)]
pub fn zip_fold<L: Numeric, K: ZipFold>(a: &[f64], b: &[f64], kernel: &K) -> f64 {
    let n = a.len().min(b.len());
    let (a, b) = (&a[..n], &b[..n]);

    let mut acc = L::splat(K::IDENTITY);
    let ca = a.chunks_exact(L::LANES);
    let cb = b.chunks_exact(L::LANES);
    let (ta, tb) = (ca.remainder(), cb.remainder());
    for (sa, sb) in ca.zip(cb) {
        acc = kernel.step(acc, L::load(sa), L::load(sb));
    }

    let mut tail_acc = K::IDENTITY;
    for (&xa, &xb) in ta.iter().zip(tb) {
        tail_acc = kernel.step(tail_acc, xa, xb);
    }

    K::merge(K::horizontal(acc), tail_acc)
}
