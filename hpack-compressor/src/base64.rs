//! Unpadded base64 for binary header values sent as text.

pub(crate) fn encode(input: &[u8], output: &mut Vec<u8>) {
    for chunk in input.chunks(3) {
        output.push(BASE64_TABLE[((chunk[0] >> 2) & 0x3f) as usize]);
        match chunk.len() {
            3 => {
                output.push(BASE64_TABLE[(((chunk[0] & 0x3) << 4) | (chunk[1] >> 4)) as usize]);
                output.push(BASE64_TABLE[(((chunk[1] & 0xf) << 2) | (chunk[2] >> 6)) as usize]);
                output.push(BASE64_TABLE[(chunk[2] & 0x3f) as usize]);
            }
            2 => {
                output.push(BASE64_TABLE[(((chunk[0] & 0x3) << 4) | (chunk[1] >> 4)) as usize]);
                output.push(BASE64_TABLE[((chunk[1] & 0xf) << 2) as usize]);
            }
            _ => output.push(BASE64_TABLE[((chunk[0] & 0x3) << 4) as usize]),
        }
    }
}

pub(crate) fn encoded_len(input_len: usize) -> usize {
    input_len / 3 * 4
        + match input_len % 3 {
            0 => 0,
            1 => 2,
            _ => 3,
        }
}

static BASE64_TABLE: [u8; 64] = [
    // 0     1     2     3     4     5     6     7
    b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', // 0
    b'I', b'J', b'K', b'L', b'M', b'N', b'O', b'P', // 1
    b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', // 2
    b'Y', b'Z', b'a', b'b', b'c', b'd', b'e', b'f', // 3
    b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', // 4
    b'o', b'p', b'q', b'r', b's', b't', b'u', b'v', // 5
    b'w', b'x', b'y', b'z', b'0', b'1', b'2', b'3', // 6
    b'4', b'5', b'6', b'7', b'8', b'9', b'+', b'/', // 7
];
