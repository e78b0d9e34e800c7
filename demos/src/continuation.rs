// Encode one large header and show how the block is split into frames.
//
// Usage: continuation [VALUE_LEN] [MAX_FRAME_SIZE]

use anyhow::Context;
use hpack_compressor::{Compressor, EncodeHeaderOptions, Frame, HeaderList};

fn arg_or(index: usize, default: usize) -> anyhow::Result<usize> {
    match std::env::args().nth(index) {
        Some(arg) => arg.parse().with_context(|| format!("invalid number: {arg}")),
        None => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let value_len = arg_or(1, 399)?;
    let max_frame_size = arg_or(2, 150)?;

    let headers = HeaderList::from_pairs([("key", "b".repeat(value_len))])?;

    let mut output = Vec::new();
    Compressor::new().encode_headers(
        EncodeHeaderOptions {
            stream_id: 1,
            is_eof: true,
            use_true_binary_metadata: false,
            max_frame_size,
            stats: None,
        },
        &headers,
        &mut output,
    )?;

    for frame in Frame::parse_all(&output) {
        println!(
            "{:?}: len={} end_stream={} end_headers={}",
            frame.kind,
            frame.len,
            frame.flags.is_end_stream(),
            frame.flags.is_end_headers()
        );
    }
    Ok(())
}
