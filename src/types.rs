//! Core types: Symbol, Date

use std::fmt;

/// Calendar date of a panel row.
pub type Date = chrono::NaiveDate;

/// Maximum byte length of a [`Symbol`].
pub const SYMBOL_CAPACITY: usize = 16;

/// Instrument identifier stored inline (no heap allocation).
///
/// Holds up to [`SYMBOL_CAPACITY`] bytes of UTF-8, enough for exchange-suffixed
/// tickers such as `VOW3.DE` or `7203.T`. Being `Copy`, symbols can be used freely
/// as map keys and in weight vectors.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    len: u8,
    bytes: [u8; SYMBOL_CAPACITY],
}

impl Symbol {
    /// Create a symbol, returning `None` if `s` is empty or longer than
    /// [`SYMBOL_CAPACITY`] bytes.
    pub fn try_new(s: &str) -> Option<Self> {
        let raw = s.as_bytes();
        if raw.is_empty() || raw.len() > SYMBOL_CAPACITY {
            return None;
        }
        let mut bytes = [0u8; SYMBOL_CAPACITY];
        bytes[..raw.len()].copy_from_slice(raw);
        Some(Self {
            len: raw.len() as u8,
            bytes,
        })
    }

    /// Create a symbol from a literal.
    ///
    /// # Panics
    ///
    /// Panics if `s` is empty or exceeds [`SYMBOL_CAPACITY`] bytes. Use
    /// [`Symbol::try_new`] for untrusted input.
    pub fn new(s: &str) -> Self {
        match Self::try_new(s) {
            Some(sym) => sym,
            None => panic!("invalid symbol {s:?}: must be 1..={SYMBOL_CAPACITY} bytes"),
        }
    }

    /// The symbol text.
    #[inline]
    pub fn as_str(&self) -> &str {
        // Constructed only from a &str prefix, so always valid UTF-8.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Symbol {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Symbol::try_new(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "symbol {s:?} must be 1..={SYMBOL_CAPACITY} bytes"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_roundtrip_text() {
        let sym = Symbol::new("VOW3.DE");
        assert_eq!(sym.as_str(), "VOW3.DE");
        assert_eq!(format!("{sym}"), "VOW3.DE");
        assert_eq!(format!("{sym:?}"), "Symbol(VOW3.DE)");
    }

    #[test]
    fn symbol_rejects_empty_and_long() {
        assert!(Symbol::try_new("").is_none());
        assert!(Symbol::try_new("ABCDEFGHIJKLMNOPQ").is_none());
        assert!(Symbol::try_new("ABCDEFGHIJKLMNOP").is_some());
    }

    #[test]
    #[should_panic(expected = "invalid symbol")]
    fn symbol_new_panics_on_invalid() {
        let _ = Symbol::new("");
    }

    #[test]
    fn symbol_ordering_and_equality() {
        assert_eq!(Symbol::new("TSLA"), Symbol::new("TSLA"));
        assert_ne!(Symbol::new("TSLA"), Symbol::new("TSL"));
        assert!(Symbol::new("BMW.DE") < Symbol::new("F"));
    }
}
