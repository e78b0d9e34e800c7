// Build the frames of two gRPC unary responses on one connection and dump
// them. The second response's headers are all dynamic table hits.
//
// Run with `RUST_LOG=trace` to see each header representation.

use hpack_compressor::{
    Compressor, EncodeHeaderOptions, Frame, FrameKind, HeaderList, TransportStats,
    DEFAULT_MAX_FRAME_SIZE,
};
use log::info;
use prost::Message;

#[derive(Clone, PartialEq, Message)]
struct HelloReply {
    #[prost(string, tag = "1")]
    message: String,
}

fn build_response(
    compressor: &mut Compressor,
    stream_id: u32,
    reply: &HelloReply,
    stats: &mut TransportStats,
    output: &mut Vec<u8>,
) -> anyhow::Result<()> {
    // HEADERS
    let headers = HeaderList::from_pairs([(":status", "200"), ("content-type", "application/grpc")])?;
    compressor.encode_headers(
        EncodeHeaderOptions {
            stream_id,
            is_eof: false,
            use_true_binary_metadata: false,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            stats: Some(&mut *stats),
        },
        &headers,
        output,
    )?;

    // DATA, with the gRPC length-prefixed message
    let mut payload = vec![0; 5];
    reply.encode(&mut payload)?;
    let msg_len = (payload.len() - 5) as u32;
    payload[1..5].copy_from_slice(&msg_len.to_be_bytes());

    output.extend_from_slice(&Frame::build_head(
        payload.len(),
        FrameKind::Data,
        0,
        stream_id,
    ));
    output.extend_from_slice(&payload);

    // trailers
    let mut trailers = HeaderList::new();
    trailers.append("grpc-status", "0")?;
    trailers.append_never_indexed("x-request-id-bin", stream_id.to_be_bytes())?;
    compressor.encode_headers(
        EncodeHeaderOptions {
            stream_id,
            is_eof: true,
            use_true_binary_metadata: true,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            stats: Some(&mut *stats),
        },
        &trailers,
        output,
    )?;
    Ok(())
}

fn dump(output: &[u8]) {
    for frame in Frame::parse_all(output) {
        let hex: Vec<String> = frame.payload.iter().map(|b| format!("{b:02x}")).collect();
        info!(
            "{:?} stream={} flags={:#x} len={}: {}",
            frame.kind,
            frame.stream_id,
            frame.flags.bits(),
            frame.len,
            hex.join(" ")
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut compressor = Compressor::new();
    let mut stats = TransportStats::default();

    for (stream_id, name) in [(1, "world"), (3, "again")] {
        let reply = HelloReply {
            message: format!("Hello {name}!"),
        };
        let mut output = Vec::new();
        build_response(&mut compressor, stream_id, &reply, &mut stats, &mut output)?;

        println!("stream {stream_id}: {} bytes", output.len());
        dump(&output);
    }

    println!(
        "headers {} bytes, compressed {} bytes, frame heads {} bytes, table {} entries",
        stats.header_bytes,
        stats.compressed_bytes,
        stats.framing_bytes,
        compressor.dynamic_table().len()
    );
    Ok(())
}
