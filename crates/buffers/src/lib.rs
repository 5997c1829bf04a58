//! Byte sink/source primitives used by the php-pack codec.
//!
//! [`Writer`] is an auto-growing in-memory byte sink; [`Reader`] is a
//! bounds-checked cursor over a byte slice. The codec only relies on the
//! "write bytes" / "read exactly N bytes" contract these types expose.

mod error;
mod reader;
mod writer;

pub use error::BufferError;
pub use reader::Reader;
pub use writer::Writer;
