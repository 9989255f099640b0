//! compression/constants.rs
//! Stable codec IDs, default levels and status codes.

/// Stable codec IDs (u16) for configuration and the command line.
pub mod codec_ids {
    pub const NONE: u16    = 0x0000;
    pub const DEFLATE: u16 = 0x0003;
    pub const FAIL: u16    = 0x00ff;
}

/// Default compression level (balanced).
pub const DEFAULT_LEVEL_DEFLATE: u32 = 6;
pub const MAX_LEVEL_DEFLATE: u32 = 9;

/// Status codes reported by codec adapters (zlib numbering).
pub mod status {
    pub const OK: i32           = 0;
    pub const STREAM_END: i32   = 1;
    pub const ERRNO: i32        = -1;
    pub const STREAM_ERROR: i32 = -2;
    pub const DATA_ERROR: i32   = -3;
    pub const MEM_ERROR: i32    = -4;
    pub const BUF_ERROR: i32    = -5;
}

/// Output room requested from the destination per engine round.
pub const ENGINE_OUT_CHUNK: usize = 16 * 1024;
