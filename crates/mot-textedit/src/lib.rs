//! mot-textedit - text dumper and injector for the Master of Time romhack
//!
//! Reads the message table of a decompressed 64 MiB Ocarina of Time
//! "Master of Time" image into an editable script, and writes an edited
//! script back, resizing the strings file and refreshing the CIC checksum.
//!
//! ## Architecture
//!
//! - **ROM** (`rom/`): image buffer, text layout, CIC detection and checksum
//! - **Text** (`text/`): strings file ⇄ script codec
//! - **Driver** (`driver/`): dump and inject operations over an image
//! - **IO** (`io`): whole-file load and save
//! - **Common** (`common/`): errors, spans and diagnostics

pub mod common;
pub mod rom;
pub mod text;
pub mod driver;
pub mod io;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use common::{DiagnosticReporter, RomError, RomResult, Span};
pub use driver::{Editor, InjectReport};
pub use rom::{CartridgeImage, ChecksumStatus, ChecksumVerdict, CicVariant, TextLayout};
