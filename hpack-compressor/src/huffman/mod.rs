mod table;

use self::table::ENCODE_TABLE;

/// Number of bits the Huffman code of `src` takes, without padding.
pub fn encoded_bits(src: &[u8]) -> usize {
    src.iter().map(|&b| ENCODE_TABLE[b as usize].0).sum()
}

/// Number of octets the Huffman code of `src` takes, padding included.
pub fn encoded_len(src: &[u8]) -> usize {
    (encoded_bits(src) + 7) / 8
}

/// Returns true if the Huffman form of `src` is strictly shorter than
/// the raw octets. Ties stay raw.
pub fn is_worth(src: &[u8]) -> bool {
    encoded_len(src) < src.len()
}

pub fn encode(src: &[u8], dst: &mut Vec<u8>) {
    let mut bits: u64 = 0;
    let mut bits_left = 40;

    for &b in src {
        let (nbits, code) = ENCODE_TABLE[b as usize];

        bits |= code << (bits_left - nbits);
        bits_left -= nbits;

        while bits_left <= 32 {
            dst.push((bits >> 32) as u8);

            bits <<= 8;
            bits_left += 8;
        }
    }

    if bits_left != 40 {
        // pad with the most significant bits of EOS, which are all ones
        bits |= (1 << bits_left) - 1;
        dst.push((bits >> 32) as u8);
    }
}
