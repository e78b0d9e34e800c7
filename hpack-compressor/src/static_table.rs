//! HPACK static table (RFC 7541 Appendix A).

/// Number of entries. Dynamic table indices start right after it.
pub const LEN: usize = 61;

const ENTRIES: [(&[u8], &[u8]); LEN] = [
    (b":authority", b""),
    (b":method", b"GET"),
    (b":method", b"POST"),
    (b":path", b"/"),
    (b":path", b"/index.html"),
    (b":scheme", b"http"),
    (b":scheme", b"https"),
    (b":status", b"200"),
    (b":status", b"204"),
    (b":status", b"206"),
    (b":status", b"304"),
    (b":status", b"400"),
    (b":status", b"404"),
    (b":status", b"500"),
    (b"accept-charset", b""),
    (b"accept-encoding", b"gzip, deflate"),
    (b"accept-language", b""),
    (b"accept-ranges", b""),
    (b"accept", b""),
    (b"access-control-allow-origin", b""),
    (b"age", b""),
    (b"allow", b""),
    (b"authorization", b""),
    (b"cache-control", b""),
    (b"content-disposition", b""),
    (b"content-encoding", b""),
    (b"content-language", b""),
    (b"content-length", b""),
    (b"content-location", b""),
    (b"content-range", b""),
    (b"content-type", b""),
    (b"cookie", b""),
    (b"date", b""),
    (b"etag", b""),
    (b"expect", b""),
    (b"expires", b""),
    (b"from", b""),
    (b"host", b""),
    (b"if-match", b""),
    (b"if-modified-since", b""),
    (b"if-none-match", b""),
    (b"if-range", b""),
    (b"if-unmodified-since", b""),
    (b"last-modified", b""),
    (b"link", b""),
    (b"location", b""),
    (b"max-forwards", b""),
    (b"proxy-authenticate", b""),
    (b"proxy-authorization", b""),
    (b"range", b""),
    (b"referer", b""),
    (b"refresh", b""),
    (b"retry-after", b""),
    (b"server", b""),
    (b"set-cookie", b""),
    (b"strict-transport-security", b""),
    (b"transfer-encoding", b""),
    (b"user-agent", b""),
    (b"vary", b""),
    (b"via", b""),
    (b"www-authenticate", b""),
];

/// 1-based index of the entry matching both name and value.
pub fn find_exact(name: &[u8], value: &[u8]) -> Option<usize> {
    ENTRIES
        .iter()
        .position(|&(n, v)| n == name && v == value)
        .map(|i| i + 1)
}

/// 1-based index of the first entry with this name.
pub fn find_name(name: &[u8]) -> Option<usize> {
    ENTRIES.iter().position(|&(n, _)| n == name).map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_indices() {
        assert_eq!(find_exact(b":method", b"GET"), Some(2));
        assert_eq!(find_exact(b":method", b"POST"), Some(3));
        assert_eq!(find_exact(b":status", b"200"), Some(8));
        assert_eq!(find_exact(b"www-authenticate", b""), Some(LEN));
        assert_eq!(find_exact(b":status", b"201"), None);
    }

    #[test]
    fn name_only() {
        assert_eq!(find_name(b":status"), Some(8));
        assert_eq!(find_name(b"content-type"), Some(31));
        assert_eq!(find_name(b"grpc-status"), None);
    }
}
