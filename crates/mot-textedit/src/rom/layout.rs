//! Fixed layout of the text data inside the Master of Time image
//!
//! The message table is an array of 8-byte entries: a 4-byte id/flags word
//! that this tool never touches, followed by a segmented pointer
//! `0xSSoooooo` whose low 24 bits are an offset into the strings file.
//! The strings file itself is found through its dmadata entry.

use super::CartridgeImage;
use crate::common::RomResult;

/// Size of one message table entry
pub const TABLE_ENTRY_SIZE: usize = 8;

/// Mask selecting the strings-file offset of a segmented pointer
pub const OFFSET_MASK: u32 = 0x00FF_FFFF;

/// Where the text lives in a particular image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    /// Image offset of the message table
    pub table_start: usize,
    /// Length of the message table in bytes
    pub table_len: usize,
    /// Image offset of the strings file's dmadata entry
    pub dma_entry: usize,
    /// Room reserved for the strings file; anything larger spills into the next file
    pub strings_max: usize,
    /// Segment number stored in the top byte of every message pointer
    pub segment: u8,
}

impl TextLayout {
    /// Number of entries in the message table
    pub fn entry_count(&self) -> usize {
        self.table_len / TABLE_ENTRY_SIZE
    }

    /// Image offset of the pointer word of table entry `index`
    pub fn pointer_offset(&self, index: usize) -> usize {
        self.table_start + index * TABLE_ENTRY_SIZE + 4
    }

    /// Segmented pointer for a strings-file offset
    pub fn pointer(&self, offset: u32) -> u32 {
        (u32::from(self.segment) << 24) | (offset & OFFSET_MASK)
    }

    pub fn dma(&self) -> DmaEntry {
        DmaEntry::at(self.dma_entry)
    }
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            table_start: 0x00B8_49EC,
            table_len: 0x4388,
            dma_entry: 0x7590,
            strings_max: 0x39000,
            segment: 0x07,
        }
    }
}

/// A dmadata record: virtual start and end of one file in the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmaEntry {
    offset: usize,
}

impl DmaEntry {
    pub fn at(offset: usize) -> Self {
        Self { offset }
    }

    /// Virtual start of the file, which is also its location in a decompressed image
    pub fn start(&self, image: &CartridgeImage) -> RomResult<u32> {
        image.read_be32(self.offset)
    }

    pub fn end(&self, image: &CartridgeImage) -> RomResult<u32> {
        image.read_be32(self.offset + 4)
    }

    /// Record a new file size by moving the virtual end
    pub fn set_len(&self, image: &mut CartridgeImage, len: u32) -> RomResult<()> {
        let start = self.start(image)?;
        image.write_be32(self.offset + 4, start.wrapping_add(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_geometry() {
        let layout = TextLayout::default();
        // 0x4388 bytes of 8-byte entries
        assert_eq!(layout.entry_count(), 2161);
        assert_eq!(layout.pointer_offset(0), 0x00B8_49F0);
        let last = layout.pointer_offset(layout.entry_count() - 1);
        assert_eq!(last, 0x00B8_49EC + 0x4388 - 4);
    }

    #[test]
    fn test_pointer_tags_segment() {
        let layout = TextLayout::default();
        assert_eq!(layout.pointer(0), 0x0700_0000);
        assert_eq!(layout.pointer(0x38FF0), 0x0703_8FF0);
    }

    #[test]
    fn test_dma_set_len() {
        let mut image = CartridgeImage::blank();
        let dma = DmaEntry::at(0x7590);
        image.write_be32(0x7590, 0x0100_0000).unwrap();
        image.write_be32(0x7594, 0x0100_1234).unwrap();

        dma.set_len(&mut image, 0x2A0).unwrap();

        assert_eq!(dma.start(&image).unwrap(), 0x0100_0000);
        assert_eq!(dma.end(&image).unwrap(), 0x0100_02A0);
    }
}
