// SETTINGS_HEADER_TABLE_SIZE initial value.
pub const DEFAULT_HEADER_TABLE_SIZE: usize = 4096;

// SETTINGS_MAX_FRAME_SIZE initial value.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 16 * 1024;

// The frame length field is 24 bits.
pub const MAX_FRAME_SIZE_LIMIT: usize = (1 << 24) - 1;

// Headers whose name ends with this carry binary values.
pub const BINARY_HEADER_SUFFIX: &str = "-bin";

/// Compressor configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub(crate) max_table_size: usize,
    pub(crate) huffman_text: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            max_table_size: DEFAULT_HEADER_TABLE_SIZE,
            huffman_text: false,
        }
    }

    /// Initial capacity of the dynamic table. It is also the initial
    /// usable maximum, until the peer's settings say otherwise.
    pub fn max_table_size(mut self, size: usize) -> Self {
        self.max_table_size = size;
        self
    }

    /// Whether header names and text values may be Huffman coded.
    ///
    /// Disabled by default: the peer sees text octets verbatim. Escaped
    /// binary values are always Huffman coded when it saves space.
    pub fn huffman_text(mut self, enable: bool) -> Self {
        self.huffman_text = enable;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
