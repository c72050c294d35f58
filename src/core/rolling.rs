/// Fixed-capacity ring buffer of f64 values
///
/// This is the backing store for the push-based streaming trackers. It
/// provides O(1) insertions with automatic eviction of the oldest value. The
/// capacity is chosen at runtime (it is the window size), and the storage is
/// allocated once at construction.
///
/// # Examples
///
/// ```
/// use quantstream::core::RollingBuffer;
///
/// let mut buffer = RollingBuffer::with_capacity(3);
///
/// assert_eq!(buffer.push(1.0), None);      // No eviction
/// assert_eq!(buffer.push(2.0), None);      // No eviction
/// assert_eq!(buffer.push(3.0), None);      // No eviction
/// assert_eq!(buffer.push(4.0), Some(1.0)); // Evicts oldest (1.0)
/// assert_eq!(buffer.len(), 3);
/// assert!(buffer.is_full());
/// ```
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    values: Box<[f64]>,
    head: usize,
    count: usize,
}

impl RollingBuffer {
    /// Create a new empty rolling buffer
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Callers validate window sizes first.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "rolling buffer capacity must be positive");
        Self {
            values: vec![0.0; capacity].into_boxed_slice(),
            head: 0,
            count: 0,
        }
    }

    /// Add a new value to the buffer
    ///
    /// Returns the evicted value if the buffer was full, otherwise `None`.
    ///
    /// # Complexity
    ///
    /// O(1) - Constant time regardless of window size
    #[inline(always)]
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let capacity = self.values.len();
        let evicted = if self.count >= capacity {
            Some(self.values[self.head])
        } else {
            self.count += 1;
            None
        };

        self.values[self.head] = value;
        self.head += 1;
        if self.head == capacity {
            self.head = 0;
        }

        evicted
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the buffer holds `capacity()` elements.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.count >= self.values.len()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Reset the buffer to empty state
    ///
    /// This does not zero the underlying storage, just resets the cursors.
    #[inline]
    pub fn reset(&mut self) {
        self.head = 0;
        self.count = 0;
    }

    /// Get a value by index (0 = oldest, len-1 = newest)
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        let capacity = self.values.len();
        let start = if self.count < capacity { 0 } else { self.head };
        Some(self.values[(start + index) % capacity])
    }

    #[inline]
    pub fn newest(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let index = if self.head == 0 { self.values.len() - 1 } else { self.head - 1 };
        Some(self.values[index])
    }

    #[inline]
    pub fn oldest(&self) -> Option<f64> {
        self.get(0)
    }

    /// Iterate over all active values in insertion order
    pub fn iter(&self) -> RollingBufferIter<'_> {
        RollingBufferIter {
            buffer: self,
            index: 0,
        }
    }
}

/// Iterator over rolling buffer values in insertion order (oldest to newest)
pub struct RollingBufferIter<'a> {
    buffer: &'a RollingBuffer,
    index: usize,
}

impl Iterator for RollingBufferIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.buffer.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RollingBufferIter<'_> {}
