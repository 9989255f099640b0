//! buffer/mod.rs
//! Growable storage and the typed view the codecs and streams work on.

pub mod element;
pub mod growable;
pub mod typed;

pub use element::Element;
pub use growable::{next_capacity, BufferError, GrowableBuffer};
pub use typed::TypedBuffer;
