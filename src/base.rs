//! Base codec: maps input bytes to nucleotide codes and back.
//!
//! Only the four uppercase symbols `A`, `C`, `G` and `T` are bases. `>` starts an
//! identifier line; every other byte (including `N`, lowercase letters, digits and
//! punctuation) is ambiguous and breaks the current run. Newlines are handled by
//! the scanner and never reach [`encode`].

use crate::error::InvalidBaseCodeError;

/// A nucleotide, with codes in ascending lexicographic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Base {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

/// The result of classifying one input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// One of the four canonical bases.
    Base(Base),
    /// `N` or any unrecognized byte.
    Ambiguous,
    /// `>`, the first byte of an identifier line.
    IdentifierStart,
}

impl Base {
    /// All bases in code order.
    pub const ALL: [Self; 4] = [Self::A, Self::C, Self::G, Self::T];

    /// The integer code of this base (0..=3), usable as an array index.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The array index of this base.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts a code back into a base.
    pub const fn from_code(code: u8) -> Result<Self, InvalidBaseCodeError> {
        match code {
            0 => Ok(Self::A),
            1 => Ok(Self::C),
            2 => Ok(Self::G),
            3 => Ok(Self::T),
            _ => Err(InvalidBaseCodeError { code }),
        }
    }

    /// The uppercase ASCII letter for this base.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::A => b'A',
            Self::C => b'C',
            Self::G => b'G',
            Self::T => b'T',
        }
    }

    /// The uppercase letter for this base.
    #[must_use]
    pub const fn to_char(self) -> char {
        self.to_byte() as char
    }
}

impl TryFrom<u8> for Base {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match encode(value) {
            Symbol::Base(base) => Ok(base),
            _ => Err(value),
        }
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Classifies an input byte.
#[must_use]
pub const fn encode(byte: u8) -> Symbol {
    match byte {
        b'A' => Symbol::Base(Base::A),
        b'C' => Symbol::Base(Base::C),
        b'G' => Symbol::Base(Base::G),
        b'T' => Symbol::Base(Base::T),
        b'>' => Symbol::IdentifierStart,
        _ => Symbol::Ambiguous,
    }
}

/// Decodes a base code into its ASCII letter.
///
/// This is the strict inverse of [`encode`] for codes 0..=3.
pub const fn decode(code: u8) -> Result<u8, InvalidBaseCodeError> {
    match Base::from_code(code) {
        Ok(base) => Ok(base.to_byte()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_canonical_bases_in_order() {
        assert_eq!(encode(b'A'), Symbol::Base(Base::A));
        assert_eq!(encode(b'C'), Symbol::Base(Base::C));
        assert_eq!(encode(b'G'), Symbol::Base(Base::G));
        assert_eq!(encode(b'T'), Symbol::Base(Base::T));
        assert_eq!(Base::A.code(), 0);
        assert_eq!(Base::T.code(), 3);
    }

    #[test]
    fn n_and_identifier_are_not_bases() {
        assert_eq!(encode(b'N'), Symbol::Ambiguous);
        assert_eq!(encode(b'>'), Symbol::IdentifierStart);
    }

    #[test]
    fn lowercase_digits_and_punctuation_are_ambiguous() {
        for byte in [b'a', b'c', b'g', b't', b'n', b'0', b'9', b'-', b'*', b'\r', b' '] {
            assert_eq!(encode(byte), Symbol::Ambiguous, "byte {byte:#x}");
        }
    }

    #[test]
    fn decode_inverts_encode() {
        for byte in [b'A', b'C', b'G', b'T'] {
            let Symbol::Base(base) = encode(byte) else {
                panic!("{} should encode to a base", byte as char);
            };
            assert_eq!(decode(base.code()), Ok(byte));
        }
    }

    #[test]
    fn decode_rejects_codes_outside_alphabet() {
        assert_eq!(decode(4), Err(InvalidBaseCodeError { code: 4 }));
        assert_eq!(decode(255), Err(InvalidBaseCodeError { code: 255 }));
    }

    #[test]
    fn try_from_byte() {
        assert_eq!(Base::try_from(b'G'), Ok(Base::G));
        assert_eq!(Base::try_from(b'N'), Err(b'N'));
    }
}
