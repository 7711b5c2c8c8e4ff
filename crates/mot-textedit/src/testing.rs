//! Synthetic images for unit tests

use crate::rom::{CartridgeImage, CicVariant, TextLayout, forge_suffix};

/// Where test images keep their strings file
pub(crate) const STRINGS_START: u32 = 0x0100_0000;

/// A blank image whose dmadata points the strings file at [`STRINGS_START`]
pub(crate) fn blank_image() -> CartridgeImage {
    let mut image = CartridgeImage::blank();
    image
        .write_be32(TextLayout::default().dma_entry, STRINGS_START)
        .unwrap();
    image
}

/// Patch the last word of the boot code so the image is detected as `cic`
pub(crate) fn forge_boot_code(image: &mut CartridgeImage, cic: CicVariant) {
    let boot = &mut image.as_bytes_mut()[0x40..0x1000];
    let (prefix, suffix) = boot.split_at_mut(boot.len() - 4);
    suffix.copy_from_slice(&forge_suffix(prefix, cic.boot_crc()));
}
