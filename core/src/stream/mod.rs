//! stream/mod.rs
//! Stream layer: source/sink traits and the stream adapter.

pub mod buf;
pub mod io;
pub mod reader;
pub mod writer;

pub use buf::ZStreamBuf;
pub use io::{Sink, Source};
pub use reader::ZReader;
pub use writer::ZWriter;
