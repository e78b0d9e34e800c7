//! Ordered header list handed to the compressor.

use crate::config::BINARY_HEADER_SUFFIX;
use crate::error::Error;

/// One header. `never_index` keeps it out of the dynamic tables of this
/// hop and of every intermediary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: Vec<u8>,
    value: Vec<u8>,
    never_index: bool,
}

impl HeaderField {
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn is_never_index(&self) -> bool {
        self.never_index
    }

    /// Binary headers carry opaque octets, by naming convention.
    pub fn is_binary(&self) -> bool {
        self.name.ends_with(BINARY_HEADER_SUFFIX.as_bytes())
    }
}

/// Headers of one request or response, in wire order.
#[derive(Debug, Clone, Default)]
pub struct HeaderList {
    fields: Vec<HeaderField>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from (name, value) pairs, stopping at the first
    /// invalid one.
    pub fn from_pairs<I, N, V>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let mut list = Self::new();
        for (name, value) in pairs {
            list.append(name, value)?;
        }
        Ok(list)
    }

    pub fn append(
        &mut self,
        name: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
    ) -> Result<&mut Self, Error> {
        self.push(name.as_ref(), value.as_ref(), false)
    }

    /// Append a header that must never be put in a dynamic table, such as
    /// credentials or values of high cardinality.
    pub fn append_never_indexed(
        &mut self,
        name: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
    ) -> Result<&mut Self, Error> {
        self.push(name.as_ref(), value.as_ref(), true)
    }

    fn push(&mut self, name: &[u8], value: &[u8], never_index: bool) -> Result<&mut Self, Error> {
        check_name(name)?;
        if !name.ends_with(BINARY_HEADER_SUFFIX.as_bytes()) {
            check_text_value(value)?;
        }
        self.fields.push(HeaderField {
            name: name.to_vec(),
            value: value.to_vec(),
            never_index,
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeaderField> {
        self.fields.iter()
    }

    /// Total octets of names and values before compression.
    pub fn uncompressed_size(&self) -> usize {
        self.fields
            .iter()
            .map(|f| f.name.len() + f.value.len())
            .sum()
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = &'a HeaderField;
    type IntoIter = std::slice::Iter<'a, HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// Lowercase token characters, with an optional leading ':' for
// pseudo-headers.
fn check_name(name: &[u8]) -> Result<(), Error> {
    let body = name.strip_prefix(b":").unwrap_or(name);
    if body.is_empty() {
        return Err(Error::InvalidHeader("empty name"));
    }
    for &c in body {
        if c.is_ascii_uppercase() {
            return Err(Error::InvalidHeader("uppercase character in name"));
        }
        if !is_token_char(c) {
            return Err(Error::InvalidHeader("illegal character in name"));
        }
    }
    Ok(())
}

fn is_token_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&c)
}

fn check_text_value(value: &[u8]) -> Result<(), Error> {
    if value.iter().any(|&c| matches!(c, b'\0' | b'\r' | b'\n')) {
        return Err(Error::InvalidHeader("illegal character in value"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order() {
        let list = HeaderList::from_pairs([("b", "1"), ("a", "2"), ("b", "3")]).unwrap();
        let names: Vec<&[u8]> = list.iter().map(|f| f.name()).collect();
        assert_eq!(names, [&b"b"[..], &b"a"[..], &b"b"[..]]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.uncompressed_size(), 6);
    }

    #[test]
    fn chained_append() {
        let mut list = HeaderList::new();
        list.append(":path", "/pkg.Svc/Call")
            .unwrap()
            .append_never_indexed("authorization", "Bearer x")
            .unwrap();
        let flags: Vec<bool> = list.iter().map(|f| f.is_never_index()).collect();
        assert_eq!(flags, [false, true]);
    }

    #[test]
    fn rejects_bad_names() {
        let mut list = HeaderList::new();
        assert_eq!(
            list.append("", "v").err(),
            Some(Error::InvalidHeader("empty name"))
        );
        assert_eq!(
            list.append(":", "v").err(),
            Some(Error::InvalidHeader("empty name"))
        );
        assert_eq!(
            list.append("Content-Type", "v").err(),
            Some(Error::InvalidHeader("uppercase character in name"))
        );
        assert_eq!(
            list.append("a b", "v").err(),
            Some(Error::InvalidHeader("illegal character in name"))
        );
        assert!(list.is_empty());
    }

    #[test]
    fn binary_values_are_opaque() {
        let mut list = HeaderList::new();
        assert!(list.append("x-trace", "a\r\nb").is_err());
        assert!(list.append("x-trace-bin", b"a\r\n\0b").is_ok());
        assert!(list.iter().next().unwrap().is_binary());
    }

    #[test]
    fn from_pairs_stops_at_error() {
        let err = HeaderList::from_pairs([("a", "1"), ("B", "2")]).unwrap_err();
        assert!(err.is_bad_input());
    }
}
