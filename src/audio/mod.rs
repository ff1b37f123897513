//! Audio input sources.

pub mod reader;
pub mod wav;

pub use reader::{ChunkReader, RawChunkReader};
pub use wav::WavChunkReader;
