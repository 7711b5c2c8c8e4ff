//! Owned cartridge image with bounds-checked accessors

use crate::common::{RomError, RomResult};

/// Size of a decompressed cartridge image (64 MiB)
pub const IMAGE_SIZE: usize = 0x0400_0000;

/// A decompressed cartridge image.
///
/// The buffer is always exactly [`IMAGE_SIZE`] bytes; every offset-based
/// access is checked and reports [`RomError::OutOfBounds`] instead of
/// panicking.
#[derive(Clone, PartialEq, Eq)]
pub struct CartridgeImage {
    data: Vec<u8>,
}

impl CartridgeImage {
    /// Take ownership of a raw dump, rejecting anything that is not 64 MiB
    pub fn from_bytes(data: Vec<u8>) -> RomResult<Self> {
        if data.len() != IMAGE_SIZE {
            return Err(RomError::InvalidImageSize {
                expected: IMAGE_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// An all-zero image
    pub fn blank() -> Self {
        Self {
            data: vec![0u8; IMAGE_SIZE],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Check that `len` bytes starting at `offset` lie inside the image
    pub fn check_range(&self, offset: usize, len: usize) -> RomResult<()> {
        match offset.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(RomError::out_of_bounds(offset, len, self.data.len())),
        }
    }

    pub fn slice(&self, offset: usize, len: usize) -> RomResult<&[u8]> {
        self.check_range(offset, len)?;
        Ok(&self.data[offset..offset + len])
    }

    pub fn slice_mut(&mut self, offset: usize, len: usize) -> RomResult<&mut [u8]> {
        self.check_range(offset, len)?;
        Ok(&mut self.data[offset..offset + len])
    }

    /// Everything from `offset` to the end of the image
    pub fn tail(&self, offset: usize) -> RomResult<&[u8]> {
        self.data
            .get(offset..)
            .ok_or_else(|| RomError::out_of_bounds(offset, 0, self.data.len()))
    }

    /// Read a big-endian 32-bit word
    pub fn read_be32(&self, offset: usize) -> RomResult<u32> {
        let bytes = self.slice(offset, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Write a big-endian 32-bit word
    pub fn write_be32(&mut self, offset: usize, value: u32) -> RomResult<()> {
        self.slice_mut(offset, 4)?.copy_from_slice(&value.to_be_bytes());
        Ok(())
    }
}

impl std::fmt::Debug for CartridgeImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartridgeImage")
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_size() {
        let err = CartridgeImage::from_bytes(vec![0u8; 0x0200_0000]).unwrap_err();
        assert!(matches!(
            err,
            RomError::InvalidImageSize {
                expected: IMAGE_SIZE,
                actual: 0x0200_0000
            }
        ));

        let err = CartridgeImage::from_bytes(vec![0u8; IMAGE_SIZE + 1]).unwrap_err();
        assert!(matches!(err, RomError::InvalidImageSize { .. }));
    }

    #[test]
    fn test_be32_round_trip() {
        let mut image = CartridgeImage::blank();
        image.write_be32(0x7590, 0x0103_5A40).unwrap();
        assert_eq!(&image.as_bytes()[0x7590..0x7594], &[0x01, 0x03, 0x5A, 0x40]);
        assert_eq!(image.read_be32(0x7590).unwrap(), 0x0103_5A40);
    }

    #[test]
    fn test_last_word_is_accessible() {
        let mut image = CartridgeImage::blank();
        image.write_be32(IMAGE_SIZE - 4, 0xDEAD_BEEF).unwrap();
        assert_eq!(image.read_be32(IMAGE_SIZE - 4).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut image = CartridgeImage::blank();
        assert!(matches!(
            image.read_be32(IMAGE_SIZE - 3),
            Err(RomError::OutOfBounds { offset, len: 4, .. }) if offset == IMAGE_SIZE - 3
        ));
        assert!(image.write_be32(usize::MAX - 1, 0).is_err());
        assert!(image.slice(IMAGE_SIZE, 1).is_err());
        assert!(image.tail(IMAGE_SIZE).unwrap().is_empty());
        assert!(image.tail(IMAGE_SIZE + 1).is_err());
    }
}
