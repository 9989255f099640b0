//! utils.rs
//! Checksums over logical stream data.

use crate::buffer::Element;

/// CRC-32 of `data`.
pub fn compute_checksum(data: &[u8]) -> u32 {
    update_checksum(0, data)
}

/// Continue a running CRC-32 with `data`.
pub fn update_checksum(crc: u32, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(crc);
    hasher.update(data);
    hasher.finalize()
}

/// Continue a running CRC-32 with the little-endian bytes of `units`.
pub fn update_checksum_units<T: Element>(crc: u32, units: &[T]) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(crc);
    let mut scratch = vec![0u8; T::WIDTH];
    for unit in units {
        unit.write_le(&mut scratch);
        hasher.update(&scratch[..T::WIDTH]);
    }
    hasher.finalize()
}
