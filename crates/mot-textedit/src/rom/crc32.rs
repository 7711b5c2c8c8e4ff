//! Standard CRC-32 (IEEE, reflected), used to fingerprint the IPL3 boot code

const POLY: u32 = 0xEDB8_8320;

static TABLE: [u32; 256] = make_table();

const fn make_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ POLY } else { crc >> 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Advance a raw (non-inverted) CRC register over `data`
fn update(mut crc: u32, data: &[u8]) -> u32 {
    for &byte in data {
        crc = (crc >> 8) ^ TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize];
    }
    crc
}

/// CRC-32 of `data` with the usual `0xFFFFFFFF` pre- and post-inversion
pub fn crc32(data: &[u8]) -> u32 {
    !update(!0, data)
}

/// Four bytes that, appended to `prefix`, make the CRC-32 of the whole equal `target`
#[cfg(test)]
pub(crate) fn forge_suffix(prefix: &[u8], target: u32) -> [u8; 4] {
    let mut state = !target;
    for _ in 0..4 {
        let top = state >> 24;
        let index = (0..256u32)
            .find(|&k| TABLE[k as usize] >> 24 == top)
            .expect("CRC-32 table top bytes are unique");
        state = ((state ^ TABLE[index as usize]) << 8) | index;
    }
    (state ^ update(!0, prefix)).to_le_bytes()
}
