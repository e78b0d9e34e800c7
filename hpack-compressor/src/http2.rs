use crate::error::Error;

const FRAME_HEAD_SIZE: usize = 9;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameKind {
    Data = 0,
    Headers = 1,
    Continuation = 9,
    Unknown,
}

impl FrameKind {
    pub fn from(byte: u8) -> Self {
        match byte {
            0 => FrameKind::Data,
            1 => FrameKind::Headers,
            9 => FrameKind::Continuation,
            _ => FrameKind::Unknown,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HeadFlags(u8);
impl HeadFlags {
    pub const END_STREAM: u8 = 0x1;
    pub const END_HEADERS: u8 = 0x4;

    pub fn from(flag: u8) -> Self {
        Self(flag)
    }
    pub fn bits(self) -> u8 {
        self.0
    }
    pub fn is_end_stream(self) -> bool {
        self.0 & Self::END_STREAM != 0
    }
    pub fn is_end_headers(self) -> bool {
        self.0 & Self::END_HEADERS != 0
    }
}

/// A frame read back from the output, mostly for checking it.
#[derive(Debug)]
pub struct Frame<'a> {
    pub len: usize,
    pub flags: HeadFlags,
    pub kind: FrameKind,
    pub stream_id: u32,
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    pub const HEAD_SIZE: usize = FRAME_HEAD_SIZE;

    // return None if the input buf is not complete
    pub fn parse(buf: &'a [u8]) -> Option<Self> {
        if buf.len() < Self::HEAD_SIZE {
            return None;
        }

        let tmp: [u8; 4] = [0, buf[0], buf[1], buf[2]];
        let len = u32::from_be_bytes(tmp) as usize;
        if buf.len() - Self::HEAD_SIZE < len {
            return None;
        }

        Some(Self {
            len,
            kind: FrameKind::from(buf[3]),
            flags: HeadFlags::from(buf[4]),
            stream_id: parse_u32(&buf[5..]),
            payload: &buf[Frame::HEAD_SIZE..Frame::HEAD_SIZE + len],
        })
    }

    /// Split a buffer into frames. Stops at the first incomplete one.
    pub fn parse_all(mut buf: &'a [u8]) -> Vec<Self> {
        let mut frames = Vec::new();
        while let Some(frame) = Frame::parse(buf) {
            buf = &buf[Frame::HEAD_SIZE + frame.len..];
            frames.push(frame);
        }
        frames
    }

    pub fn build_head(len: usize, kind: FrameKind, flags: u8, stream_id: u32) -> [u8; FRAME_HEAD_SIZE] {
        let mut output = [0; FRAME_HEAD_SIZE];

        let tmp = (len as u32).to_be_bytes();
        output[..3].copy_from_slice(&tmp[1..]);

        output[3] = kind as u8;
        output[4] = flags;

        build_u32(stream_id, &mut output[5..9]);
        output
    }
}

/// Append-only destination of the frames. It does not need to know
/// frame boundaries.
pub trait OutputSink {
    fn put_slice(&mut self, bytes: &[u8]);
}

impl OutputSink for Vec<u8> {
    fn put_slice(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum WriterState {
    FirstFrame,
    Continuation,
    Done,
}

/// Slices one header block into a HEADERS frame and as many
/// CONTINUATION frames as needed.
///
/// Every frame but the last carries exactly `max_frame_size` octets.
/// END_STREAM can only be set on the HEADERS frame, END_HEADERS only on
/// the last frame. An empty block still makes one HEADERS frame.
#[derive(Debug)]
pub struct FrameWriter {
    stream_id: u32,
    is_eof: bool,
    max_frame_size: usize,
    state: WriterState,
}

impl FrameWriter {
    pub fn new(stream_id: u32, is_eof: bool, max_frame_size: usize) -> Self {
        Self {
            stream_id,
            is_eof,
            max_frame_size,
            state: WriterState::FirstFrame,
        }
    }

    /// Write the whole block, returning the number of frames.
    pub fn write<S: OutputSink>(&mut self, block: &[u8], sink: &mut S) -> Result<usize, Error> {
        if self.max_frame_size == 0 {
            return Err(Error::Invariant("zero max frame size in frame writer"));
        }

        let mut rest = block;
        let mut count = 0;
        loop {
            let (chunk, tail) = rest.split_at(rest.len().min(self.max_frame_size));
            let is_last = tail.is_empty();

            let (kind, mut flags) = match self.state {
                WriterState::FirstFrame => {
                    let flags = if self.is_eof { HeadFlags::END_STREAM } else { 0 };
                    (FrameKind::Headers, flags)
                }
                WriterState::Continuation => (FrameKind::Continuation, 0),
                WriterState::Done => {
                    return Err(Error::Invariant("header block already written"));
                }
            };
            if is_last {
                flags |= HeadFlags::END_HEADERS;
            }

            sink.put_slice(&Frame::build_head(chunk.len(), kind, flags, self.stream_id));
            sink.put_slice(chunk);
            count += 1;
            trace!(
                "write {:?} frame, stream {}, len {}, flags {:#x}",
                kind,
                self.stream_id,
                chunk.len(),
                flags
            );

            if is_last {
                self.state = WriterState::Done;
                return Ok(count);
            }
            self.state = WriterState::Continuation;
            rest = tail;
        }
    }
}

fn parse_u32(buf: &[u8]) -> u32 {
    let tmp: [u8; 4] = [buf[0], buf[1], buf[2], buf[3]];
    u32::from_be_bytes(tmp)
}
fn build_u32(n: u32, buf: &mut [u8]) {
    let tmp = n.to_be_bytes();
    buf.copy_from_slice(&tmp);
}
