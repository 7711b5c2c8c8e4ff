//! Script text → strings file

use super::lexer::Lexer;
use crate::common::{RomError, RomResult, Span};
use tracing::debug;

/// Every message starts on a word boundary
const MESSAGE_ALIGN: usize = 4;
/// The strings file as a whole ends on a 16-byte boundary
const FILE_ALIGN: usize = 16;

/// `[xxxx]:` without the optional space that follows
const PREFIX_LEN: usize = 7;

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptMessage {
    /// 1-based line number in the script
    pub line: usize,
    /// Encoded message body, without terminator
    pub bytes: Vec<u8>,
}

/// A freshly laid out strings file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlob {
    /// File contents, padded to its final size
    pub data: Vec<u8>,
    /// Offset of each message within `data`, in table order
    pub offsets: Vec<u32>,
}

/// Split `[xxxx]: body` into the printed index and the byte offset of the body
fn parse_prefix(line: &str) -> Option<(usize, usize)> {
    let bytes = line.as_bytes();
    if bytes.len() < PREFIX_LEN || bytes[0] != b'[' || &bytes[5..PREFIX_LEN] != b"]:" {
        return None;
    }

    let digits = line.get(1..5)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let index = usize::from_str_radix(digits, 16).ok()?;

    let body = if bytes.get(PREFIX_LEN) == Some(&b' ') {
        PREFIX_LEN + 1
    } else {
        PREFIX_LEN
    };
    Some((index, body))
}

/// Split on `\n`, `\r\n` or a lone `\r`, keeping each line's byte offset
fn split_lines(source: &str) -> Vec<(usize, &str)> {
    let bytes = source.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' | b'\n' => {
                lines.push((start, &source[start..i]));
                let crlf = bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n');
                i += if crlf { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push((start, &source[start..]));
    }
    lines
}

/// Parse a script into messages, in table order.
///
/// Messages are assigned to table entries by line order. The printed index
/// must agree with that order so an edited script cannot silently shift
/// text onto the wrong entry. Blank lines are ignored.
pub fn parse_script(source: &str, max_entries: usize) -> RomResult<Vec<ScriptMessage>> {
    let mut messages: Vec<ScriptMessage> = Vec::new();

    for (number, (base, line)) in split_lines(source).into_iter().enumerate() {
        let line_no = number + 1;
        if line.is_empty() {
            continue;
        }

        let Some((index, body_start)) = parse_prefix(line) else {
            let end = line
                .char_indices()
                .nth(PREFIX_LEN)
                .map_or(line.len(), |(end, _)| end);
            return Err(RomError::MalformedLine {
                line: line_no,
                span: Span::new(base, base + end),
            });
        };

        let expected = messages.len();
        if expected >= max_entries {
            return Err(RomError::TooManyEntries {
                line: line_no,
                capacity: max_entries,
                span: Span::new(base, base + line.len()),
            });
        }
        if index != expected {
            return Err(RomError::IndexMismatch {
                line: line_no,
                expected,
                found: index,
                span: Span::new(base + 1, base + 5),
            });
        }

        let body = &line[body_start..];
        let bytes = Lexer::new(body, base + body_start, line_no).encode_all()?;
        messages.push(ScriptMessage {
            line: line_no,
            bytes,
        });
    }

    Ok(messages)
}

fn pad_to(data: &mut Vec<u8>, align: usize) {
    let len = data.len().next_multiple_of(align);
    data.resize(len, 0);
}

/// Lay out messages as a strings file no larger than `capacity` bytes
pub fn build_blob(messages: &[ScriptMessage], capacity: usize) -> RomResult<EncodedBlob> {
    let mut data = Vec::with_capacity(capacity);
    let mut offsets = Vec::with_capacity(messages.len());

    for message in messages {
        offsets.push(data.len() as u32);
        data.extend_from_slice(&message.bytes);
        data.push(0);
        pad_to(&mut data, MESSAGE_ALIGN);
    }
    pad_to(&mut data, FILE_ALIGN);

    if data.len() > capacity {
        return Err(RomError::capacity_exceeded(data.len(), capacity));
    }
    debug!("strings file: {} messages, {:#x} bytes", offsets.len(), data.len());

    Ok(EncodedBlob { data, offsets })
}
