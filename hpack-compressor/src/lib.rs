//! Sender side HPACK compressor for gRPC over HTTP/2.
//!
//! Turns the ordered header list of one request or response into an HPACK
//! header block, and slices the block into a HEADERS frame followed by
//! CONTINUATION frames when it does not fit in one frame.
//!
//! # Compression
//!
//! Each header is represented by, in order of preference:
//!
//! - an index into the static table, if it has the exact header;
//! - an index into the dynamic table, if an earlier header was the same;
//! - a literal, whose name is an index if any table has the name.
//!
//! Literals go into the dynamic table so that the next occurrence is an
//! index, except the ones appended with
//! [`HeaderList::append_never_indexed()`].
//!
//! Values of headers whose name ends with `-bin` are opaque octets. If the
//! peer supports *true binary* metadata they are sent as they are, behind
//! a zero octet. Otherwise they are base64 escaped and Huffman coded.
//!
//! # Connection state
//!
//! The dynamic table belongs to the connection and lives in
//! [`Compressor`]. The peer's decoder keeps its own copy, which only
//! matches ours if the header blocks reach it in the order we encode
//! them. So there is no locking inside: the caller owns the compressor
//! and encodes the blocks of one connection one after another.
//!
//! # Example
//!
//! ```
//! use hpack_compressor::{Compressor, EncodeHeaderOptions, HeaderList};
//!
//! let mut compressor = Compressor::new();
//! let mut headers = HeaderList::new();
//! headers.append(":status", "200")?;
//! headers.append("content-type", "application/grpc")?;
//!
//! let mut output = Vec::new();
//! let options = EncodeHeaderOptions {
//!     stream_id: 1,
//!     is_eof: false,
//!     use_true_binary_metadata: false,
//!     max_frame_size: 16384,
//!     stats: None,
//! };
//! compressor.encode_headers(options, &headers, &mut output)?;
//! # Ok::<(), hpack_compressor::Error>(())
//! ```

#[macro_use]
mod macros;

mod base64;
mod compressor;
mod config;
mod error;
mod metadata;

pub mod dynamic_table;
pub mod hpack_encoder;
pub mod http2;
pub mod huffman;
pub mod static_table;

pub use compressor::{Compressor, EncodeHeaderOptions, TransportStats};
pub use config::*;
pub use error::Error;
pub use http2::{Frame, FrameKind, HeadFlags, OutputSink};
pub use metadata::{HeaderField, HeaderList};
