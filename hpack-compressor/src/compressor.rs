use crate::config::{Config, DEFAULT_HEADER_TABLE_SIZE, MAX_FRAME_SIZE_LIMIT};
use crate::dynamic_table::DynamicTable;
use crate::error::Error;
use crate::hpack_encoder::{FieldEncoder, Representation};
use crate::http2::{Frame, FrameWriter, OutputSink};
use crate::metadata::HeaderList;

/// Counters of one direction of a stream. Only ever added to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransportStats {
    /// Octets of names and values before compression.
    pub header_bytes: u64,
    /// Octets of the HPACK blocks.
    pub compressed_bytes: u64,
    /// Octets of frame heads.
    pub framing_bytes: u64,
}

/// Options of one `encode_headers()` call.
#[derive(Debug)]
pub struct EncodeHeaderOptions<'a> {
    /// Written to the frame heads as is, reserved bit included.
    pub stream_id: u32,
    /// Set END_STREAM on the HEADERS frame.
    pub is_eof: bool,
    /// The peer accepts binary header values without base64.
    pub use_true_binary_metadata: bool,
    pub max_frame_size: usize,
    pub stats: Option<&'a mut TransportStats>,
}

impl EncodeHeaderOptions<'_> {
    fn check(&self) -> Result<(), Error> {
        if self.stream_id == 0 {
            return Err(Error::InvalidOptions("stream id 0"));
        }
        if self.max_frame_size == 0 || self.max_frame_size > MAX_FRAME_SIZE_LIMIT {
            return Err(Error::InvalidOptions("max frame size out of range"));
        }
        Ok(())
    }
}

/// Sender side HPACK context of one connection.
///
/// The dynamic table lives as long as the compressor and changes with
/// every call, in the same order the peer's decoder sees the blocks. So
/// the blocks must be put on the wire in the order they are encoded, and
/// calls must not interleave.
#[derive(Debug)]
pub struct Compressor {
    table: DynamicTable,
    huffman_text: bool,

    // capacity we would like to use
    wanted_table_size: usize,
    // upper bound set by the peer's SETTINGS_HEADER_TABLE_SIZE
    max_usable_size: usize,

    // smallest capacity since the last block, if it changed
    pending_min_size: Option<usize>,

    // a failed encode may leave the table ahead of the peer's
    broken: bool,

    block: Vec<u8>,
}

impl Compressor {
    pub fn new() -> Self {
        Self::with_config(Config::new())
    }

    pub fn with_config(config: Config) -> Self {
        let mut compressor = Self {
            table: DynamicTable::new(DEFAULT_HEADER_TABLE_SIZE),
            huffman_text: config.huffman_text,
            wanted_table_size: config.max_table_size,
            max_usable_size: DEFAULT_HEADER_TABLE_SIZE,
            pending_min_size: None,
            broken: false,
            block: Vec::new(),
        };
        compressor.apply_table_size();
        compressor
    }

    pub fn dynamic_table(&self) -> &DynamicTable {
        &self.table
    }

    /// The peer's SETTINGS_HEADER_TABLE_SIZE.
    pub fn set_max_usable_size(&mut self, size: usize) {
        self.max_usable_size = size;
        self.apply_table_size();
    }

    /// Choose the dynamic table capacity. It must not be larger than what
    /// the peer allows.
    pub fn set_max_table_size(&mut self, size: usize) -> Result<(), Error> {
        if size > self.max_usable_size {
            error!(
                "table size {} above negotiated maximum {}",
                size, self.max_usable_size
            );
            return Err(Error::Invariant("table size above negotiated maximum"));
        }
        self.wanted_table_size = size;
        self.apply_table_size();
        Ok(())
    }

    fn apply_table_size(&mut self) {
        let size = self.wanted_table_size.min(self.max_usable_size);
        if size == self.table.capacity() {
            return;
        }
        debug!("table capacity {} -> {}", self.table.capacity(), size);

        self.table.set_capacity(size);
        self.pending_min_size = Some(match self.pending_min_size {
            Some(min) => min.min(size),
            None => size,
        });
    }

    /// Compress `headers` into one header block and write it as frames.
    ///
    /// Invalid options are rejected before anything changes. Any later
    /// failure breaks the compressor for good, since the table may no
    /// longer match the peer's.
    pub fn encode_headers<S: OutputSink>(
        &mut self,
        options: EncodeHeaderOptions,
        headers: &HeaderList,
        sink: &mut S,
    ) -> Result<(), Error> {
        if self.broken {
            error!("compressor used after a failed encode");
            return Err(Error::Invariant("compressor used after a failed encode"));
        }
        options.check()?;

        self.block.clear();
        if let Err(err) = self.encode_block(headers, options.use_true_binary_metadata) {
            self.broken = true;
            error!("fail in encode header block: {}", err);
            return Err(err);
        }

        let frames = FrameWriter::new(options.stream_id, options.is_eof, options.max_frame_size)
            .write(&self.block, sink)?;

        if let Some(stats) = options.stats {
            stats.header_bytes += headers.uncompressed_size() as u64;
            stats.compressed_bytes += self.block.len() as u64;
            stats.framing_bytes += (frames * Frame::HEAD_SIZE) as u64;
        }
        Ok(())
    }

    fn encode_block(&mut self, headers: &HeaderList, true_binary: bool) -> Result<(), Error> {
        // table size updates go first in the block
        if let Some(min) = self.pending_min_size.take() {
            let size = self.table.capacity();
            if min < size {
                Representation::SizeUpdate(min).encode(&mut self.block)?;
            }
            Representation::SizeUpdate(size).encode(&mut self.block)?;
        }

        let mut encoder = FieldEncoder::new(&mut self.table, self.huffman_text, true_binary);
        for field in headers {
            encoder.encode(field, &mut self.block)?;
        }
        Ok(())
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}
