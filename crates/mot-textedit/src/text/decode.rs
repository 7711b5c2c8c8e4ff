//! Strings file → script text

use super::control::{END_OF_MESSAGE, is_printable, parameter_len};
use crate::common::{RomError, RomResult};
use crate::rom::{CartridgeImage, OFFSET_MASK, TextLayout};
use std::fmt::Write;

fn push_escape(out: &mut String, byte: u8) {
    let _ = write!(out, "\\x{byte:02x}");
}

/// Append the script form of the message at the start of `bytes` to `out`.
///
/// Stops after a NUL or the end-of-message code. Returns the number of bytes
/// consumed, or `None` if `bytes` ends before the message does.
pub fn transcode_message(bytes: &[u8], out: &mut String) -> Option<usize> {
    let mut pos = 0;
    loop {
        let byte = *bytes.get(pos)?;
        pos += 1;

        match byte {
            0x00 => return Some(pos),
            b if is_printable(b) => out.push(char::from(b)),
            END_OF_MESSAGE => {
                push_escape(out, byte);
                return Some(pos);
            }
            code => {
                push_escape(out, code);
                // Parameters are raw values, NUL included
                let params = bytes.get(pos..pos + parameter_len(code))?;
                for &param in params {
                    push_escape(out, param);
                }
                pos += params.len();
            }
        }
    }
}

/// Dump every message of the table, one `[iiii]: text` line each
pub fn decode_table(image: &CartridgeImage, layout: &TextLayout) -> RomResult<String> {
    let strings = layout.dma().start(image)? as usize;
    let mut out = String::new();

    for index in 0..layout.entry_count() {
        let offset = image.read_be32(layout.pointer_offset(index))? & OFFSET_MASK;
        if offset & 3 != 0 {
            return Err(RomError::MalformedOffset { index, offset });
        }

        let start = strings + offset as usize;
        let bytes = image.tail(start)?;
        let _ = write!(out, "[{index:04x}]: ");
        if transcode_message(bytes, &mut out).is_none() {
            return Err(RomError::out_of_bounds(start, bytes.len() + 1, image.len()));
        }
        out.push('\n');
    }

    Ok(out)
}
