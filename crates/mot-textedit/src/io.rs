//! Whole-file load and save

use crate::common::{RomError, RomResult};
use crate::rom::CartridgeImage;
use std::fs;
use std::path::Path;

/// Read a cartridge image, rejecting anything that is not a decompressed dump
pub fn load_image(path: &Path) -> RomResult<CartridgeImage> {
    let data = fs::read(path).map_err(|e| RomError::io(path, e))?;
    CartridgeImage::from_bytes(data)
}

pub fn save_image(path: &Path, image: &CartridgeImage) -> RomResult<()> {
    fs::write(path, image.as_bytes()).map_err(|e| RomError::io(path, e))
}

pub fn read_text(path: &Path) -> RomResult<String> {
    fs::read_to_string(path).map_err(|e| RomError::io(path, e))
}

pub fn write_text(path: &Path, text: &str) -> RomResult<()> {
    fs::write(path, text).map_err(|e| RomError::io(path, e))
}
