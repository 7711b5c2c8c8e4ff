//! Message text codec
//!
//! Converts between the binary strings file and the editable script format:
//!
//! ```text
//! [0000]: Hi!\x02
//! [0001]: \x05\x41Red text\x05\x40 and back\x02
//! ```
//!
//! Printable characters appear as themselves; every other byte is a
//! `\xhh` escape. Decoding knows how many parameter bytes each control code
//! carries; encoding simply turns every escape back into one byte.

pub mod control;
mod decode;
mod encode;
pub mod lexer;

pub use decode::{decode_table, transcode_message};
pub use encode::{EncodedBlob, ScriptMessage, build_blob, parse_script};
