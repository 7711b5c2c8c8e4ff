//! N64 header checksum calculation
//!
//! The two checksum words at 0x10 and 0x14 are a rolling sum over the first
//! megabyte of the game after the boot code (0x1000..0x101000). The IPL3
//! recomputes them at boot and halts on a mismatch, so they must be refreshed
//! after any edit to that range. Seed and final combination depend on the
//! CIC variant.

use super::CartridgeImage;
use super::cic::{BOOT_CODE_START, CicVariant, boot_code_crc};
use tracing::{debug, warn};

/// Header offsets of the two checksum words
const CRC1_OFFSET: usize = 0x10;
const CRC2_OFFSET: usize = 0x14;

/// Region covered by the checksum
const CHECKSUM_START: usize = 0x0000_1000;
const CHECKSUM_LENGTH: usize = 0x0010_0000;

/// Outcome of [`update_checksum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumStatus {
    /// The checksum words were rewritten
    Updated { cic: CicVariant, crc: [u32; 2] },
    /// The boot code is not one we know how to checksum; the header is unchanged
    Skipped { boot_crc: u32 },
}

/// Outcome of [`verify_checksum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumVerdict {
    Valid { cic: CicVariant, crc: [u32; 2] },
    Mismatch {
        cic: CicVariant,
        stored: [u32; 2],
        computed: [u32; 2],
    },
    Unrecognized { boot_crc: u32 },
}

impl ChecksumVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

fn word_at(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Run the checksum algorithm for a specific CIC variant
pub fn checksum_words(image: &CartridgeImage, cic: CicVariant) -> [u32; 2] {
    let data = image.as_bytes();
    let seed = cic.seed();
    let (mut t1, mut t2, mut t3, mut t4, mut t5, mut t6) = (seed, seed, seed, seed, seed, seed);

    let region = &data[CHECKSUM_START..CHECKSUM_START + CHECKSUM_LENGTH];
    for (n, chunk) in region.chunks_exact(4).enumerate() {
        let d = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);

        let (sum, carry) = t6.overflowing_add(d);
        if carry {
            t4 = t4.wrapping_add(1);
        }
        t6 = sum;
        t3 ^= d;
        let r = d.rotate_left(d & 0x1F);
        t5 = t5.wrapping_add(r);
        if t2 > d {
            t2 ^= r;
        } else {
            t2 ^= t6 ^ d;
        }

        if cic == CicVariant::Cic6105 {
            let i = CHECKSUM_START + n * 4;
            let key = word_at(data, BOOT_CODE_START + 0x0710 + (i & 0xFF));
            t1 = t1.wrapping_add(key ^ d);
        } else {
            t1 = t1.wrapping_add(t5 ^ d);
        }
    }

    match cic {
        CicVariant::Cic6103 => [
            (t6 ^ t4).wrapping_add(t3),
            (t5 ^ t2).wrapping_add(t1),
        ],
        CicVariant::Cic6106 => [
            t6.wrapping_mul(t4).wrapping_add(t3),
            t5.wrapping_mul(t2).wrapping_add(t1),
        ],
        _ => [t6 ^ t4 ^ t3, t5 ^ t2 ^ t1],
    }
}

/// Compute the checksum the header should carry, if the CIC is recognized
pub fn calculate_checksum(image: &CartridgeImage) -> Option<(CicVariant, [u32; 2])> {
    let cic = CicVariant::detect(image)?;
    Some((cic, checksum_words(image, cic)))
}

/// Checksum words currently stored in the header
pub fn stored_checksum(image: &CartridgeImage) -> [u32; 2] {
    let data = image.as_bytes();
    [word_at(data, CRC1_OFFSET), word_at(data, CRC2_OFFSET)]
}

/// Recompute the checksum and write it into the header.
///
/// An unrecognized boot code is not an error: some CICs cannot be handled by
/// this algorithm, and the image is left as it was.
pub fn update_checksum(image: &mut CartridgeImage) -> ChecksumStatus {
    let Some((cic, crc)) = calculate_checksum(image) else {
        let boot_crc = boot_code_crc(image);
        warn!("unrecognized boot code (crc32 {boot_crc:08x}); checksum left unchanged");
        return ChecksumStatus::Skipped { boot_crc };
    };

    let data = image.as_bytes_mut();
    data[CRC1_OFFSET..CRC1_OFFSET + 4].copy_from_slice(&crc[0].to_be_bytes());
    data[CRC2_OFFSET..CRC2_OFFSET + 4].copy_from_slice(&crc[1].to_be_bytes());
    debug!("{cic}: checksum {:08x} {:08x}", crc[0], crc[1]);

    ChecksumStatus::Updated { cic, crc }
}

/// Compare the stored checksum against a fresh calculation
pub fn verify_checksum(image: &CartridgeImage) -> ChecksumVerdict {
    let Some((cic, computed)) = calculate_checksum(image) else {
        return ChecksumVerdict::Unrecognized {
            boot_crc: boot_code_crc(image),
        };
    };

    let stored = stored_checksum(image);
    if stored == computed {
        ChecksumVerdict::Valid { cic, crc: computed }
    } else {
        ChecksumVerdict::Mismatch {
            cic,
            stored,
            computed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::forge_boot_code;
    use pretty_assertions::assert_eq;

    fn image_for(cic: CicVariant) -> CartridgeImage {
        let mut image = CartridgeImage::blank();
        forge_boot_code(&mut image, cic);
        image
    }

    #[test]
    fn test_zero_data_6102() {
        // d == 0 throughout: only t1 moves, by the seed, once per word
        let image = image_for(CicVariant::Cic6102);
        assert_eq!(
            checksum_words(&image, CicVariant::Cic6102),
            [0xF8CA_4DDC, 0x303A_4DDC]
        );
    }

    #[test]
    fn test_zero_data_6103() {
        let image = image_for(CicVariant::Cic6103);
        assert_eq!(
            checksum_words(&image, CicVariant::Cic6103),
            [0xA388_6759, 0x40EC_6759]
        );
    }

    #[test]
    fn test_variants_disagree_on_same_data() {
        let mut image = CartridgeImage::blank();
        for (i, byte) in image.as_bytes_mut()[CHECKSUM_START..CHECKSUM_START + 0x400]
            .iter_mut()
            .enumerate()
        {
            *byte = (i * 7 + 3) as u8;
        }
        let a = checksum_words(&image, CicVariant::Cic6102);
        let b = checksum_words(&image, CicVariant::Cic6105);
        let c = checksum_words(&image, CicVariant::Cic6106);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, checksum_words(&image, CicVariant::Cic6101));
    }

    #[test]
    fn test_update_writes_header() {
        let mut image = image_for(CicVariant::Cic6102);
        let status = update_checksum(&mut image);
        assert_eq!(
            status,
            ChecksumStatus::Updated {
                cic: CicVariant::Cic6102,
                crc: [0xF8CA_4DDC, 0x303A_4DDC],
            }
        );
        assert_eq!(
            &image.as_bytes()[0x10..0x18],
            &[0xF8, 0xCA, 0x4D, 0xDC, 0x30, 0x3A, 0x4D, 0xDC]
        );
        assert!(verify_checksum(&image).is_valid());
    }

    #[test]
    fn test_update_is_idempotent() {
        for cic in CicVariant::ALL {
            let mut image = image_for(cic);
            image.as_bytes_mut()[0x2000] = 0x42;
            update_checksum(&mut image);
            let first = image.clone();
            update_checksum(&mut image);
            assert!(image == first, "{cic}");
        }
    }

    #[test]
    fn test_unknown_boot_code_is_skipped() {
        let mut image = CartridgeImage::blank();
        image.as_bytes_mut()[0x10..0x18].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let status = update_checksum(&mut image);
        assert!(matches!(status, ChecksumStatus::Skipped { .. }));
        assert_eq!(&image.as_bytes()[0x10..0x18], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(matches!(
            verify_checksum(&image),
            ChecksumVerdict::Unrecognized { .. }
        ));
    }

    #[test]
    fn test_verify_detects_edit() {
        let mut image = image_for(CicVariant::Cic6105);
        update_checksum(&mut image);
        image.as_bytes_mut()[0x8000] ^= 0xFF;
        assert!(matches!(
            verify_checksum(&image),
            ChecksumVerdict::Mismatch { cic: CicVariant::Cic6105, .. }
        ));
    }
}
