// src/core/protocol/command_codec.rs

//! Implements the server side framing: incoming command lines and outgoing JSON responses.
//!
//! Commands are newline-delimited (`\n`, optionally preceded by `\r`). A line is only
//! decoded once its newline has arrived, however the bytes were split across reads. An
//! unterminated tail is taken as a command only at end of stream, when the peer has
//! half-closed its side.

use super::Response;
use crate::core::FwGateError;
use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// The default maximum size of one command line, in bytes.
pub const DEFAULT_MAX_COMMAND_LENGTH: usize = 1024;

/// A `tokio_util::codec` implementation decoding command lines and encoding `Response`s.
#[derive(Debug, Clone)]
pub struct CommandLineCodec {
    max_length: usize,
}

impl Default for CommandLineCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMMAND_LENGTH)
    }
}

impl CommandLineCodec {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Validates one raw line and returns it trimmed, or `None` if it is blank.
    fn finish_line(&self, raw: &[u8]) -> Result<Option<String>, FwGateError> {
        if raw.len() > self.max_length {
            return Err(FwGateError::CommandTooLong(self.max_length));
        }
        let text = std::str::from_utf8(raw).map_err(|_| FwGateError::InvalidUtf8)?;
        let line = text.trim();
        if line.is_empty() {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }
}

impl Decoder for CommandLineCodec {
    type Item = String;
    type Error = FwGateError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(pos) = src.iter().position(|b| *b == b'\n') {
            let line = src.split_to(pos + 1);
            // Blank lines carry no command; keep scanning the buffer.
            if let Some(command) = self.finish_line(&line[..pos])? {
                return Ok(Some(command));
            }
        }

        // No newline yet. Wait for more bytes unless the partial line is already too long.
        if src.len() > self.max_length {
            return Err(FwGateError::CommandTooLong(self.max_length));
        }
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(command) = self.decode(src)? {
            return Ok(Some(command));
        }
        if src.is_empty() {
            return Ok(None);
        }
        let tail = src.split_to(src.len());
        self.finish_line(&tail)
    }
}

impl Encoder<Response> for CommandLineCodec {
    type Error = FwGateError;

    /// Encodes a `Response` as a single JSON object followed by a newline.
    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let body = serde_json::to_vec(&item)
            .map_err(|e| FwGateError::Internal(format!("failed to encode response: {e}")))?;
        dst.reserve(body.len() + 1);
        dst.put_slice(&body);
        dst.put_u8(b'\n');
        Ok(())
    }
}
