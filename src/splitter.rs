//! A mechanism for splitting pseudo-file records into fixed-arity fields
//!
//! Most procfs pseudo-files that we care about hold a single record, made of a
//! fixed number of whitespace-separated columns whose meaning is given by their
//! position (see proc(5)). Decoding them always follows the same steps:
//!
//! - Split the text into columns, possibly after some format-specific
//!   preprocessing (splitting "a/b" pairs, extracting a parenthesized command
//!   name...)
//! - Check that at least as many columns as the format's arity are present.
//!   Newer kernels may append columns, which we ignore, but a record which is
//!   too short means that the read was truncated or that the kernel format is
//!   not the one we know, and must be reported as such before we even try to
//!   interpret the columns.
//! - Convert each column to its declared type, reporting the position and
//!   name of the first column that fails to convert.
//!
//! The Fields cursor provided by this module takes care of the last two steps.

use crate::error::DecodeError;
use std::borrow::Cow;
use std::str::FromStr;


/// Cursor over the fields of a pseudo-file record whose arity was checked
///
/// The underlying iterator must be cloneable, because the fields are counted
/// in a first pass before being converted in a second pass.
///
pub(crate) struct Fields<I> {
    /// Iterator over the raw text of the remaining fields
    fields: I,

    /// Fixed number of fields that the record is made of
    arity: usize,

    /// Number of fields which were consumed so far
    position: usize,
}
//
impl<'a, I> Fields<I>
    where I: Iterator<Item = &'a str> + Clone
{
    /// Prepare to decode a record, failing if it is too short
    pub fn new(fields: I, arity: usize) -> Result<Self, DecodeError> {
        let parsed = fields.clone().take(arity).count();
        if parsed < arity {
            return Err(DecodeError::ShortRead { parsed, expected: arity });
        }
        Ok(
            Self {
                fields,
                arity,
                position: 0,
            }
        )
    }

    /// Extract the raw text of the next field
    pub fn next_raw(&mut self) -> &'a str {
        debug_assert!(self.position < self.arity,
                      "Attempted to decode more fields than the record has");
        self.position += 1;

        // Arity was checked on construction, so this field is there
        self.fields.next().unwrap_or("")
    }

    /// Decode the next field using a custom conversion
    pub fn next_with<T, F>(&mut self,
                           field: &'static str,
                           convert: F) -> Result<T, DecodeError>
        where F: FnOnce(&'a str) -> Option<T>
    {
        let token = self.next_raw();
        convert(token).ok_or_else(|| DecodeError::FieldConversion {
            index: self.position,
            field,
            token: token.to_owned(),
        })
    }

    /// Decode the next field as an integer (or anything else with FromStr)
    pub fn next<T: FromStr>(&mut self,
                            field: &'static str) -> Result<T, DecodeError> {
        self.next_with(field, |token| token.parse().ok())
    }

    /// Decode the next field as a finite, non-negative decimal number
    ///
    /// The kernel prints these with "%lu.%02lu"-style formats, so anything
    /// which does not start with a digit (signs, "inf", "NaN"...) is rejected
    /// even though Rust's float parser would happily accept it. So are
    /// exponents which overflow the target type.
    ///
    pub fn next_decimal<T: Decimal>(&mut self,
                                    field: &'static str) -> Result<T, DecodeError> {
        self.next_with(field, |token| {
            if !token.starts_with(|c: char| c.is_ascii_digit()) {
                return None;
            }
            token.parse().ok().filter(|value: &T| value.is_finite())
        })
    }
}


/// Floating-point types which decimal fields can be decoded into
pub(crate) trait Decimal: FromStr {
    /// Truth that the value is neither infinite nor NaN
    fn is_finite(&self) -> bool;
}
//
impl Decimal for f32 {
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}
//
impl Decimal for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}


/// Interpret the raw bytes of a pseudo-file as text
///
/// Procfs is ASCII outside of user-controlled strings such as command names,
/// where invalid UTF-8 gets replaced. Numeric fields which contain invalid
/// bytes will then fail to convert, as they should.
///
pub(crate) fn as_text(contents: &[u8]) -> Cow<str> {
    String::from_utf8_lossy(contents)
}


/// Unit tests
#[cfg(test)]
mod tests {
    use crate::error::DecodeError;
    use super::{as_text, Fields};

    /// Check that records which are too short are reported as such
    #[test]
    fn short_records() {
        match Fields::new("".split_whitespace(), 2) {
            Err(err) => assert_eq!(err,
                                   DecodeError::ShortRead { parsed: 0,
                                                            expected: 2 }),
            Ok(_) => panic!("Empty record should be too short"),
        }
        match Fields::new("1 x".split_whitespace(), 3) {
            Err(err) => assert_eq!(err,
                                   DecodeError::ShortRead { parsed: 2,
                                                            expected: 3 }),
            Ok(_) => panic!("Two fields should be too short"),
        }
    }

    /// Check that fields are decoded in order, and extra fields ignored
    #[test]
    fn decode_fields() {
        let mut fields = Fields::new("42  -7 ab\n99 extra".split_whitespace(), 4)
                                .expect("Record should be long enough");
        assert_eq!(fields.next::<u8>("first"), Ok(42));
        assert_eq!(fields.next::<i64>("second"), Ok(-7));
        assert_eq!(fields.next_raw(), "ab");
        assert_eq!(fields.next::<u32>("fourth"), Ok(99));
    }

    /// Check that conversion failures tell which field went wrong
    #[test]
    fn conversion_failures() {
        let mut fields = Fields::new("12 -3 300".split_whitespace(), 3)
                                .expect("Record should be long enough");
        assert_eq!(fields.next::<u32>("a"), Ok(12));
        assert_eq!(fields.next::<u32>("b"),
                   Err(DecodeError::FieldConversion { index: 2,
                                                      field: "b",
                                                      token: "-3".to_owned() }));
        assert_eq!(fields.next::<u8>("c"),
                   Err(DecodeError::FieldConversion { index: 3,
                                                      field: "c",
                                                      token: "300".to_owned() }));
    }

    /// Check that decimal fields only accept what the kernel would print
    #[test]
    fn decimal_fields() {
        let mut fields =
            Fields::new("13.52 3. -1.0 inf NaN .5 1e38 1e39 1e308 1e400"
                           .split_whitespace(), 10)
                   .expect("Record should be long enough");
        assert_eq!(fields.next_decimal::<f64>("plain"), Ok(13.52));
        assert_eq!(fields.next_decimal::<f64>("trailing dot"), Ok(3.0));
        assert!(fields.next_decimal::<f64>("negative").is_err());
        assert!(fields.next_decimal::<f64>("infinite").is_err());
        assert!(fields.next_decimal::<f32>("not a number").is_err());
        assert!(fields.next_decimal::<f32>("leading dot").is_err());
        assert_eq!(fields.next_decimal::<f32>("large f32"), Ok(1e38));
        assert_eq!(fields.next_decimal::<f32>("overflowing f32"),
                   Err(DecodeError::FieldConversion { index: 8,
                                                      field: "overflowing f32",
                                                      token: "1e39".to_owned() }));
        assert_eq!(fields.next_decimal::<f64>("large f64"), Ok(1e308));
        assert_eq!(fields.next_decimal::<f64>("overflowing f64"),
                   Err(DecodeError::FieldConversion { index: 10,
                                                      field: "overflowing f64",
                                                      token: "1e400".to_owned() }));
    }

    /// Check that invalid UTF-8 does not prevent decoding
    #[test]
    fn lossy_text() {
        assert_eq!(as_text(b"1 2"), "1 2");
        assert_eq!(as_text(b"a\xffb"), "a\u{fffd}b");
    }
}
