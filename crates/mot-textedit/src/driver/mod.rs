//! Dump and inject orchestration

use crate::common::{RomError, RomResult};
use crate::rom::{CartridgeImage, ChecksumStatus, TextLayout, update_checksum};
use crate::text::{build_blob, decode_table, parse_script};
use tracing::{debug, info, warn};

/// Result of a successful injection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectReport {
    /// Messages written to the table
    pub messages: usize,
    /// Size of the new strings file
    pub strings_len: usize,
    /// What happened to the header checksum
    pub checksum: ChecksumStatus,
}

/// Text editor bound to one image layout
pub struct Editor {
    layout: TextLayout,
}

impl Editor {
    pub fn new(layout: TextLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Decode the whole message table to script text
    pub fn dump(&self, image: &CartridgeImage) -> RomResult<String> {
        let text = decode_table(image, &self.layout)?;
        info!("dumped {} messages", self.layout.entry_count());
        Ok(text)
    }

    /// Replace the game text with `script` and refresh the checksum.
    ///
    /// The script is fully parsed and laid out before the image is touched,
    /// so on error the image is unchanged.
    pub fn inject(&self, image: &mut CartridgeImage, script: &str) -> RomResult<InjectReport> {
        let layout = &self.layout;
        let messages = parse_script(script, layout.entry_count())?;
        let blob = build_blob(&messages, layout.strings_max)?;

        let dma = layout.dma();
        let strings = dma.start(image)? as usize;
        image.check_range(strings, layout.strings_max)?;
        image.check_range(layout.table_start, layout.table_len)?;
        debug!("strings file at {strings:#010x}, table at {:#010x}", layout.table_start);

        let region = image.slice_mut(strings, layout.strings_max)?;
        region.fill(0);
        region[..blob.data.len()].copy_from_slice(&blob.data);

        for (index, &offset) in blob.offsets.iter().enumerate() {
            image.write_be32(layout.pointer_offset(index), layout.pointer(offset))?;
        }
        if messages.len() < layout.entry_count() {
            warn!(
                "script has {} of {} messages; the remaining table entries were left as they were",
                messages.len(),
                layout.entry_count()
            );
        }

        let strings_len = u32::try_from(blob.data.len())
            .map_err(|_| RomError::capacity_exceeded(blob.data.len(), layout.strings_max))?;
        dma.set_len(image, strings_len)?;

        let checksum = update_checksum(image);
        info!(
            "injected {} messages ({:#x} of {:#x} bytes)",
            messages.len(),
            blob.data.len(),
            layout.strings_max
        );

        Ok(InjectReport {
            messages: messages.len(),
            strings_len: blob.data.len(),
            checksum,
        })
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(TextLayout::default())
    }
}
