use std::ops::{Deref, DerefMut};

/// Read-only view over a caller-owned contiguous f64 array
///
/// The engine never copies, owns or mutates the underlying memory. A view
/// built from a null pointer or a zero length is simply empty, which every
/// primitive treats as a silent no-op / `0.0` result.
///
/// # Examples
///
/// ```
/// use quantstream::core::NumericBuffer;
/// use quantstream::stats::vector_sum;
///
/// let prices = vec![1.0, 2.0, 3.0];
/// let view = NumericBuffer::new(&prices);
/// assert_eq!(vector_sum(&view), 6.0);
///
/// let empty = unsafe { NumericBuffer::from_raw_parts(std::ptr::null(), 8) };
/// assert!(empty.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericBuffer<'a> {
    data: &'a [f64],
}

impl<'a> NumericBuffer<'a> {
    #[inline]
    pub const fn new(data: &'a [f64]) -> Self {
        Self { data }
    }

    /// Wrap a raw `(ptr, len)` pair handed over by a host runtime
    ///
    /// # Safety
    ///
    /// Unless `ptr` is null or `len` is zero, `ptr` must be aligned for
    /// `f64` and valid for `len` reads, and the memory must stay alive and
    /// unmodified for `'a`.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: *const f64, len: usize) -> Self {
        if ptr.is_null() || len == 0 {
            return Self { data: &[] };
        }
        // SAFETY: upheld by the caller per the contract above.
        Self { data: unsafe { std::slice::from_raw_parts(ptr, len) } }
    }

    #[inline]
    pub const fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Deref for NumericBuffer<'_> {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        self.data
    }
}

impl<'a> From<&'a [f64]> for NumericBuffer<'a> {
    fn from(data: &'a [f64]) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a Vec<f64>> for NumericBuffer<'a> {
    fn from(data: &'a Vec<f64>) -> Self {
        Self::new(data.as_slice())
    }
}

/// Writable view over a caller-supplied output array
#[derive(Debug, Default)]
pub struct NumericBufferMut<'a> {
    data: &'a mut [f64],
}

impl<'a> NumericBufferMut<'a> {
    #[inline]
    pub fn new(data: &'a mut [f64]) -> Self {
        Self { data }
    }

    /// Wrap a raw `(ptr, len)` output pair handed over by a host runtime
    ///
    /// # Safety
    ///
    /// Unless `ptr` is null or `len` is zero, `ptr` must be aligned for
    /// `f64`, valid for `len` writes, and not aliased by any other live
    /// reference for `'a`.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: *mut f64, len: usize) -> Self {
        if ptr.is_null() || len == 0 {
            return Self { data: &mut [] };
        }
        // SAFETY: upheld by the caller per the contract above.
        Self { data: unsafe { std::slice::from_raw_parts_mut(ptr, len) } }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Deref for NumericBufferMut<'_> {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        self.data
    }
}

impl DerefMut for NumericBufferMut<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f64] {
        self.data
    }
}
