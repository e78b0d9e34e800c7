use std::borrow::Cow;

use crate::base64;
use crate::dynamic_table::DynamicTable;
use crate::error::Error;
use crate::huffman;
use crate::metadata::HeaderField;
use crate::static_table;

/// Largest integer we put on the wire.
pub const MAX_INT: usize = u32::MAX as usize;

/// One header field (or table instruction) as it goes on the wire.
#[derive(Debug, PartialEq, Eq)]
pub enum Representation<'a> {
    /// Indexed header field representation
    ///
    /// ```text
    ///   0   1   2   3   4   5   6   7
    /// +---+---+---+---+---+---+---+---+
    /// | 1 |        Index (7+)         |
    /// +---+---------------------------+
    /// ```
    Indexed(usize),

    /// Literal header field whose name is taken from the static or dynamic
    /// table. Either with incremental indexing:
    ///
    /// ```text
    ///   0   1   2   3   4   5   6   7
    /// +---+---+---+---+---+---+---+---+
    /// | 0 | 1 |      Index (6+)       |
    /// +---+---+-----------------------+
    /// | H |     Value Length (7+)     |
    /// +---+---------------------------+
    /// | Value String (Length octets)  |
    /// +-------------------------------+
    /// ```
    ///
    /// or never indexed, where the first octet is `0001` and a 4-bit
    /// prefix index.
    LiteralWithNameIndex {
        index: usize,
        value: Literal<'a>,
        never_index: bool,
    },

    /// Literal header field with a literal name; the index field is 0 and
    /// the name string follows before the value string.
    LiteralFull {
        name: Literal<'a>,
        value: Literal<'a>,
        never_index: bool,
    },

    /// Dynamic table size update
    ///
    /// ```text
    ///   0   1   2   3   4   5   6   7
    /// +---+---+---+---+---+---+---+---+
    /// | 0 | 0 | 1 |   Max size (5+)   |
    /// +---+---------------------------+
    /// ```
    SizeUpdate(usize),
}

/// A string literal and whether it goes Huffman coded.
#[derive(Debug, PartialEq, Eq)]
pub struct Literal<'a> {
    pub bytes: &'a [u8],
    pub huffman: bool,
}

impl<'a> Literal<'a> {
    /// Huffman code only if allowed and strictly shorter.
    pub fn new(bytes: &'a [u8], allow_huffman: bool) -> Self {
        Self {
            bytes,
            huffman: allow_huffman && huffman::is_worth(bytes),
        }
    }

    pub fn raw(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            huffman: false,
        }
    }

    fn encode(&self, dst: &mut Vec<u8>) -> Result<(), Error> {
        if self.huffman {
            encode_int(huffman::encoded_len(self.bytes), 7, 0x80, dst)?;
            huffman::encode(self.bytes, dst);
        } else {
            encode_int(self.bytes.len(), 7, 0x00, dst)?;
            dst.extend_from_slice(self.bytes);
        }
        Ok(())
    }
}

impl Representation<'_> {
    pub fn encode(&self, dst: &mut Vec<u8>) -> Result<(), Error> {
        match self {
            Representation::Indexed(index) => encode_int(*index, 7, 0x80, dst),
            Representation::LiteralWithNameIndex {
                index,
                value,
                never_index,
            } => {
                literal_head(*index, *never_index, dst)?;
                value.encode(dst)
            }
            Representation::LiteralFull {
                name,
                value,
                never_index,
            } => {
                literal_head(0, *never_index, dst)?;
                name.encode(dst)?;
                value.encode(dst)
            }
            Representation::SizeUpdate(size) => encode_int(*size, 5, 0x20, dst),
        }
    }
}

fn literal_head(index: usize, never_index: bool, dst: &mut Vec<u8>) -> Result<(), Error> {
    if never_index {
        encode_int(index, 4, 0x10, dst)
    } else {
        encode_int(index, 6, 0x40, dst)
    }
}

/// Encodes header fields against one dynamic table.
pub struct FieldEncoder<'t> {
    table: &'t mut DynamicTable,
    huffman_text: bool,
    true_binary: bool,
}

impl<'t> FieldEncoder<'t> {
    pub fn new(table: &'t mut DynamicTable, huffman_text: bool, true_binary: bool) -> Self {
        Self {
            table,
            huffman_text,
            true_binary,
        }
    }

    /// Append the representation of `field` to `dst`, then record it in
    /// the dynamic table unless it is never-indexed.
    pub fn encode(&mut self, field: &HeaderField, dst: &mut Vec<u8>) -> Result<(), Error> {
        let value = self.wire_value(field);
        let value: &[u8] = &value;

        let repr = self.represent(field, value);
        trace!(
            "encode {:?}: {:?}",
            String::from_utf8_lossy(field.name()),
            repr
        );
        repr.encode(dst)?;

        if !matches!(repr, Representation::Indexed(_)) && !field.is_never_index() {
            self.table.add(field.name(), value);
        }
        Ok(())
    }

    // The value octets the peer decodes, which is also what its table
    // stores. Binary values are either marked with a leading zero octet
    // or escaped with base64.
    fn wire_value<'f>(&self, field: &'f HeaderField) -> Cow<'f, [u8]> {
        if !field.is_binary() {
            return Cow::Borrowed(field.value());
        }
        if self.true_binary {
            let mut v = Vec::with_capacity(field.value().len() + 1);
            v.push(0);
            v.extend_from_slice(field.value());
            Cow::Owned(v)
        } else {
            let mut v = Vec::with_capacity(base64::encoded_len(field.value().len()));
            base64::encode(field.value(), &mut v);
            Cow::Owned(v)
        }
    }

    fn represent<'a>(&self, field: &'a HeaderField, value: &'a [u8]) -> Representation<'a> {
        let name = field.name();

        if let Some(index) = static_table::find_exact(name, value) {
            return Representation::Indexed(index);
        }
        if let Some(index) = self.table.find_exact(name, value) {
            return Representation::Indexed(index);
        }

        let value = if !field.is_binary() {
            Literal::new(value, self.huffman_text)
        } else if self.true_binary {
            Literal::raw(value)
        } else {
            Literal::new(value, true)
        };
        let never_index = field.is_never_index();

        match static_table::find_name(name).or_else(|| self.table.find_name(name)) {
            Some(index) => Representation::LiteralWithNameIndex {
                index,
                value,
                never_index,
            },
            None => Representation::LiteralFull {
                name: Literal::new(name, self.huffman_text),
                value,
                never_index,
            },
        }
    }
}

/// Encode an integer into the given destination buffer
pub fn encode_int(
    mut value: usize, // The integer to encode
    prefix_bits: u8,  // The number of bits in the prefix
    first_byte: u8,   // The base upon which to start encoding the int
    dst: &mut Vec<u8>,
) -> Result<(), Error> {
    if value > MAX_INT {
        return Err(Error::IntegerOverflow(value));
    }

    if encode_int_one_byte(value, prefix_bits) {
        dst.push(first_byte | value as u8);
        return Ok(());
    }

    let low = (1 << prefix_bits) - 1;

    value -= low;

    dst.push(first_byte | low as u8);

    while value >= 128 {
        dst.push(0b1000_0000 | value as u8);

        value >>= 7;
    }

    dst.push(value as u8);
    Ok(())
}

/// Returns true if the in the int can be fully encoded in the first byte.
fn encode_int_one_byte(value: usize, prefix_bits: u8) -> bool {
    value < (1 << prefix_bits) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_HEADER_TABLE_SIZE;
    use crate::metadata::HeaderList;

    fn int(value: usize, prefix_bits: u8) -> Vec<u8> {
        let mut dst = Vec::new();
        encode_int(value, prefix_bits, 0, &mut dst).unwrap();
        dst
    }

    fn hex(s: &str) -> Vec<u8> {
        let s: String = s.split_whitespace().collect();
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn encode_list(
        table: &mut DynamicTable,
        huffman_text: bool,
        true_binary: bool,
        headers: &HeaderList,
    ) -> Vec<u8> {
        let mut dst = Vec::new();
        let mut encoder = FieldEncoder::new(table, huffman_text, true_binary);
        for field in headers {
            encoder.encode(field, &mut dst).unwrap();
        }
        dst
    }

    #[test]
    fn rfc7541_integers() {
        assert_eq!(int(10, 5), [0x0a]);
        assert_eq!(int(1337, 5), [0x1f, 0x9a, 0x0a]);
        assert_eq!(int(42, 8), [0x2a]);
        assert_eq!(int(30, 5), [0x1e]);
        assert_eq!(int(31, 5), [0x1f, 0x00]);
        assert_eq!(int(127, 7), [0x7f, 0x00]);
        assert_eq!(int(199, 7), [0x7f, 0x48]);
    }

    #[test]
    fn first_byte_is_kept() {
        let mut dst = Vec::new();
        encode_int(62, 7, 0x80, &mut dst).unwrap();
        encode_int(4096, 5, 0x20, &mut dst).unwrap();
        assert_eq!(dst, [0xbe, 0x3f, 0xe1, 0x1f]);
    }

    #[test]
    fn integer_range() {
        let mut dst = Vec::new();
        encode_int(MAX_INT, 7, 0, &mut dst).unwrap();
        assert_eq!(dst, [0x7f, 0x80, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn integer_overflow_rejected() {
        let mut dst = Vec::new();
        assert_eq!(
            encode_int(MAX_INT + 1, 7, 0, &mut dst),
            Err(Error::IntegerOverflow(MAX_INT + 1))
        );
        assert!(dst.is_empty());
    }

    // RFC 7541 C.3: requests without Huffman coding
    #[test]
    fn rfc7541_requests_raw() {
        let mut table = DynamicTable::new(DEFAULT_HEADER_TABLE_SIZE);

        let first = HeaderList::from_pairs([
            (":method", "GET"),
            (":scheme", "http"),
            (":path", "/"),
            (":authority", "www.example.com"),
        ])
        .unwrap();
        assert_eq!(
            encode_list(&mut table, false, false, &first),
            hex("8286 8441 0f77 7777 2e65 7861 6d70 6c65 2e63 6f6d")
        );
        assert_eq!(table.size(), 57);

        let second = HeaderList::from_pairs([
            (":method", "GET"),
            (":scheme", "http"),
            (":path", "/"),
            (":authority", "www.example.com"),
            ("cache-control", "no-cache"),
        ])
        .unwrap();
        assert_eq!(
            encode_list(&mut table, false, false, &second),
            hex("8286 84be 5808 6e6f 2d63 6163 6865")
        );
        assert_eq!(table.size(), 110);

        let third = HeaderList::from_pairs([
            (":method", "GET"),
            (":scheme", "https"),
            (":path", "/index.html"),
            (":authority", "www.example.com"),
            ("custom-key", "custom-value"),
        ])
        .unwrap();
        assert_eq!(
            encode_list(&mut table, false, false, &third),
            hex("8287 85bf 400a 6375 7374 6f6d 2d6b 6579 0c63 7573 746f 6d2d 7661 6c75 65")
        );
        assert_eq!(table.size(), 164);
    }

    // RFC 7541 C.4: the same requests with Huffman coding
    #[test]
    fn rfc7541_requests_huffman() {
        let mut table = DynamicTable::new(DEFAULT_HEADER_TABLE_SIZE);

        let first = HeaderList::from_pairs([
            (":method", "GET"),
            (":scheme", "http"),
            (":path", "/"),
            (":authority", "www.example.com"),
        ])
        .unwrap();
        assert_eq!(
            encode_list(&mut table, true, false, &first),
            hex("8286 8441 8cf1 e3c2 e5f2 3a6b a0ab 90f4 ff")
        );

        let third = HeaderList::from_pairs([
            (":method", "GET"),
            (":scheme", "https"),
            (":path", "/index.html"),
            (":authority", "www.example.com"),
            ("custom-key", "custom-value"),
        ])
        .unwrap();
        assert_eq!(
            encode_list(&mut table, true, false, &third),
            hex("8287 85be 4088 25a8 49e9 5ba9 7d7f 8925 a849 e95b b8e8 b4bf")
        );
    }

    #[test]
    fn never_indexed_leaves_table_alone() {
        let mut table = DynamicTable::new(DEFAULT_HEADER_TABLE_SIZE);
        let mut headers = HeaderList::new();
        headers.append_never_indexed("password", "secret").unwrap();
        headers.append_never_indexed("authorization", "token").unwrap();

        assert_eq!(
            encode_list(&mut table, false, false, &headers),
            hex("10 0870 6173 7377 6f72 64 0673 6563 7265 74 1f08 0574 6f6b 656e")
        );
        assert!(table.is_empty());
    }

    #[test]
    fn name_from_dynamic_table() {
        let mut table = DynamicTable::new(DEFAULT_HEADER_TABLE_SIZE);
        let headers = HeaderList::from_pairs([("grpc-status", "0"), ("grpc-status", "1")]).unwrap();

        assert_eq!(
            encode_list(&mut table, false, false, &headers),
            hex("40 0b67 7270 632d 7374 6174 7573 0130 7e 0131")
        );
        assert_eq!(table.find_exact(b"grpc-status", b"1"), Some(62));
        assert_eq!(table.find_exact(b"grpc-status", b"0"), Some(63));
    }

    #[test]
    fn true_binary_value() {
        let mut table = DynamicTable::new(DEFAULT_HEADER_TABLE_SIZE);
        let mut headers = HeaderList::new();
        headers.append("x-bin", [0xffu8, 0x00, 0x61]).unwrap();

        assert_eq!(
            encode_list(&mut table, false, true, &headers),
            hex("40 0578 2d62 696e 04 00ff 0061")
        );
        assert_eq!(table.find_exact(b"x-bin", &[0x00, 0xff, 0x00, 0x61]), Some(62));

        // same header in true binary mode is a table hit
        assert_eq!(encode_list(&mut table, false, true, &headers), [0xbe]);
    }

    #[test]
    fn escaped_binary_value() {
        let mut table = DynamicTable::new(DEFAULT_HEADER_TABLE_SIZE);
        let mut headers = HeaderList::new();
        headers.append("x-bin", [0xffu8, 0xfe]).unwrap();

        // "//4": '/' is 6 bits and '4' is 6 bits, 18 bits in total, no gain
        assert_eq!(
            encode_list(&mut table, false, false, &headers),
            hex("40 0578 2d62 696e 03 2f2f 34")
        );
        assert_eq!(table.find_exact(b"x-bin", b"//4"), Some(62));
    }

    #[test]
    fn escaped_binary_value_huffman() {
        let mut table = DynamicTable::new(DEFAULT_HEADER_TABLE_SIZE);
        let mut headers = HeaderList::new();
        headers.append("data-bin", [0u8; 12]).unwrap();

        let mut dst = Vec::new();
        FieldEncoder::new(&mut table, false, false)
            .encode(headers.iter().next().unwrap(), &mut dst)
            .unwrap();

        // 16 'A's at 6 bits each
        let mut expected = hex("40 0864 6174 612d 6269 6e 8c");
        huffman::encode(b"AAAAAAAAAAAAAAAA", &mut expected);
        assert_eq!(dst, expected);
        assert_eq!(table.find_exact(b"data-bin", b"AAAAAAAAAAAAAAAA"), Some(62));
    }
}
