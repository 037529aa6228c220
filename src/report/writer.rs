//! Bounded text output.
//!
//! [`BoundedWriter`] is a `core::fmt::Write` sink over a fixed
//! `heapless::String<N>`.  It never grows past `N` bytes: a write that does
//! not fit stores the longest prefix ending on a char boundary, latches the
//! `truncated` flag and reports `fmt::Error`.
//!
//! Document renderers avoid hitting that path at all by measuring each
//! fragment first with [`measure`] and only writing what fits.

use core::fmt::{self, Write};

/// Fixed-capacity `fmt::Write` sink.
#[derive(Debug, Clone, Default)]
pub struct BoundedWriter<const N: usize> {
    buf: heapless::String<N>,
    truncated: bool,
}

impl<const N: usize> BoundedWriter<N> {
    pub fn new() -> Self {
        Self {
            buf: heapless::String::new(),
            truncated: false,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        N - self.buf.len()
    }

    /// Whether `len` more bytes fit.
    pub fn fits(&self, len: usize) -> bool {
        len <= self.remaining()
    }

    /// True once any write has been cut short.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    pub fn into_inner(self) -> heapless::String<N> {
        self.buf
    }
}

impl<const N: usize> Write for BoundedWriter<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.buf.push_str(s).is_ok() {
            return Ok(());
        }
        let mut cut = self.remaining();
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        // Cannot fail: `cut` bytes fit by construction.
        let _ = self.buf.push_str(&s[..cut]);
        self.truncated = true;
        Err(fmt::Error)
    }
}

/// `fmt::Write` sink that only counts bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteCounter {
    count: usize,
}

impl Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.len();
        Ok(())
    }
}

/// Length in bytes of whatever `render` writes.
pub fn measure(render: impl FnOnce(&mut dyn Write) -> fmt::Result) -> usize {
    let mut counter = ByteCounter::default();
    // ByteCounter never fails; a renderer error only stops counting early.
    let _ = render(&mut counter);
    counter.count
}
