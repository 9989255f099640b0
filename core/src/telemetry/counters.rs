//! telemetry/counters.rs
//! Mutable counters updated while a stream runs.
//!
//! Summary: counts units crossing each boundary of the adapter
//! (source, codec, sink) plus a CRC-32 of the logical data per direction.
use serde::{Deserialize, Serialize};

use crate::buffer::Element;
use crate::utils::update_checksum_units;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    /// Compressed units pulled from the source.
    pub units_pulled: u64,
    /// Logical units produced by the decompressor.
    pub units_decoded: u64,
    /// Logical units handed to the compressor.
    pub units_encoded: u64,
    /// Compressed units pushed to the sink.
    pub units_pushed: u64,
    pub decode_calls: u64,
    pub encode_calls: u64,
    /// Final (end of stream) codec calls.
    pub flushes: u64,
    pub decoded_crc32: u32,
    pub encoded_crc32: u32,
}

impl StreamCounters {
    pub fn record_pull(&mut self, units: usize) {
        self.units_pulled += units as u64;
    }

    /// Record one decompressor call and the units it produced.
    pub fn record_decode<T: Element>(&mut self, decoded: &[T], flush: bool) {
        self.decode_calls += 1;
        self.units_decoded += decoded.len() as u64;
        self.decoded_crc32 = update_checksum_units(self.decoded_crc32, decoded);
        if flush {
            self.flushes += 1;
        }
    }

    /// Record one compressor call and the units handed to it.
    pub fn record_encode<T: Element>(&mut self, window: &[T], flush: bool) {
        self.encode_calls += 1;
        self.units_encoded += window.len() as u64;
        self.encoded_crc32 = update_checksum_units(self.encoded_crc32, window);
        if flush {
            self.flushes += 1;
        }
    }

    pub fn record_push(&mut self, units: usize) {
        self.units_pushed += units as u64;
    }

    /// Compressed over logical units, per direction that saw data.
    pub fn compression_ratio(&self) -> Option<f64> {
        let (compressed, logical) = if self.units_encoded > 0 {
            (self.units_pushed, self.units_encoded)
        } else {
            (self.units_pulled, self.units_decoded)
        };
        if logical == 0 {
            None
        } else {
            Some(compressed as f64 / logical as f64)
        }
    }

    // Counts add up; checksums are per stream and are kept from `self`
    // unless `self` has not seen data in that direction yet.
    pub fn merge(&mut self, other: &StreamCounters) {
        if self.units_decoded == 0 {
            self.decoded_crc32 = other.decoded_crc32;
        }
        if self.units_encoded == 0 {
            self.encoded_crc32 = other.encoded_crc32;
        }
        self.units_pulled += other.units_pulled;
        self.units_decoded += other.units_decoded;
        self.units_encoded += other.units_encoded;
        self.units_pushed += other.units_pushed;
        self.decode_calls += other.decode_calls;
        self.encode_calls += other.encode_calls;
        self.flushes += other.flushes;
    }
}
