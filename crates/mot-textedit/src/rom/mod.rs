//! Cartridge image access for the decompressed Master of Time ROM
//!
//! This layer knows about:
//! - The 64 MiB image buffer and its bounds-checked big-endian accessors
//! - The fixed offsets of the text table and strings file (`layout`)
//! - CIC boot code detection and the header checksum (`cic`, `checksum`)

mod image;
mod layout;
mod crc32;
mod cic;
mod checksum;

pub use image::{CartridgeImage, IMAGE_SIZE};
pub use layout::{DmaEntry, TextLayout, OFFSET_MASK, TABLE_ENTRY_SIZE};
pub use crc32::crc32;
pub use cic::{CicVariant, boot_code_crc};
pub use checksum::{
    ChecksumStatus, ChecksumVerdict, calculate_checksum, checksum_words, stored_checksum,
    update_checksum, verify_checksum,
};

#[cfg(test)]
pub(crate) use crc32::forge_suffix;
