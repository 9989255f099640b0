//! constants.rs
//! Buffer sizing and stream defaults shared by every layer.

/// Default window size for the read and write sides of a stream (in units).
pub const BUFSZ: usize = 4096;

/// Smallest capacity a growable buffer allocates on first growth.
pub const MIN_CAPACITY: usize = 128;

/// Doubling stops here; larger requests are rounded to multiples of this.
pub const GROWTH_STEP: usize = 4096;

/// Defaults when a config field is left out
pub const DEFAULT_WINDOW_SIZE: usize = BUFSZ;
pub const DEFAULT_READ_CHUNK: usize = BUFSZ;

/// Staged bytes needed before a codec is invoked without a flush.
pub const DEFAULT_BATCH_SIZE: usize = 2 * BUFSZ;

/// Sanity bound for window, read chunk and batch sizes (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;
