//! Fixed-capacity inline text and byte buffers.
//!
//! Events are plain `Copy` values, so payload fields that would naturally be
//! strings (dropped file paths, DOM key codes, gamepad names) are stored
//! inline with an explicit length. Input longer than the capacity is cut at
//! the last character boundary that fits and the buffer remembers that it
//! was truncated.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Inline UTF-8 string holding at most `N` bytes.
#[derive(Clone, Copy)]
pub struct FixedStr<const N: usize> {
    bytes: [u8; N],
    len: u16,
    truncated: bool,
}

impl<const N: usize> FixedStr<N> {
    /// Maximum number of bytes stored.
    pub const CAPACITY: usize = N;

    /// An empty string.
    pub const fn empty() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Copy `text` in, truncating on a character boundary if it does not fit.
    pub fn new(text: &str) -> Self {
        let mut end = text.len().min(N).min(u16::MAX as usize);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let mut bytes = [0; N];
        bytes[..end].copy_from_slice(&text.as_bytes()[..end]);
        Self {
            bytes,
            len: end as u16,
            truncated: end < text.len(),
        }
    }

    /// The stored text.
    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    /// The stored bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the source text did not fit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const N: usize> PartialEq for FixedStr<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes() && self.truncated == other.truncated
    }
}

impl<const N: usize> Eq for FixedStr<N> {}

impl<const N: usize> Hash for FixedStr<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
        self.truncated.hash(state);
    }
}

impl<const N: usize> PartialEq<str> for FixedStr<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for FixedStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.truncated {
            write!(f, "{:?}…", self.as_str())
        } else {
            write!(f, "{:?}", self.as_str())
        }
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> From<&str> for FixedStr<N> {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Inline byte buffer holding at most `N` bytes.
#[derive(Clone, Copy)]
pub struct FixedBytes<const N: usize> {
    bytes: [u8; N],
    len: u16,
    truncated: bool,
}

impl<const N: usize> FixedBytes<N> {
    /// Maximum number of bytes stored.
    pub const CAPACITY: usize = N;

    /// Copy `data` in, keeping the first `N` bytes.
    pub fn new(data: &[u8]) -> Self {
        let end = data.len().min(N).min(u16::MAX as usize);
        let mut bytes = [0; N];
        bytes[..end].copy_from_slice(&data[..end]);
        Self {
            bytes,
            len: end as u16,
            truncated: end < data.len(),
        }
    }

    /// The stored bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the source data did not fit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }
}

impl<const N: usize> PartialEq for FixedBytes<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice() && self.truncated == other.truncated
    }
}

impl<const N: usize> Eq for FixedBytes<N> {}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedBytes")
            .field("len", &self.len)
            .field("truncated", &self.truncated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits() {
        let s = FixedStr::<16>::new("hello");
        assert_eq!(s.as_str(), "hello");
        assert_eq!(s.len(), 5);
        assert!(!s.is_truncated());
        assert_eq!(s, "hello");
    }

    #[test]
    fn truncates_on_char_boundary() {
        // 'é' is two bytes, so the second one would end at byte 6
        let s = FixedStr::<5>::new("abéé");
        assert_eq!(s.as_str(), "abé");
        assert!(s.is_truncated());
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn empty_and_default() {
        let s = FixedStr::<8>::default();
        assert!(s.is_empty());
        assert_eq!(s.as_str(), "");
        assert_eq!(FixedStr::<0>::new("x").as_str(), "");
        assert!(FixedStr::<0>::new("x").is_truncated());
    }

    #[test]
    fn bytes_truncate() {
        let b = FixedBytes::<3>::new(&[1, 2, 3, 4]);
        assert_eq!(b.as_slice(), &[1, 2, 3]);
        assert!(b.is_truncated());
        assert_eq!(FixedBytes::<8>::new(&[9]).as_slice(), &[9]);
    }
}
