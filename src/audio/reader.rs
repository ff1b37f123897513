//! Fixed-size chunk reading from a byte stream.

use crate::defaults::BYTES_PER_SAMPLE;
use crate::error::Result;
use std::io::Read;

/// Source of fixed-size sample chunks for the recognizer.
///
/// Pairs with StreamingRecognizer for processing - this handles audio input.
pub trait ChunkReader {
    /// Read the next chunk of samples.
    ///
    /// Returns `Ok(None)` when the stream is exhausted. A returned chunk is
    /// never empty but may be shorter than the configured size at end of
    /// stream.
    fn next_chunk(&mut self) -> Result<Option<Vec<i16>>>;
}

/// Chunk reader over raw little-endian 16-bit mono PCM.
///
/// Fills a fixed-size byte buffer per call, looping over short reads so a
/// chunk only comes up short at end of stream. A trailing odd byte cannot
/// form a sample and is dropped.
pub struct RawChunkReader<R: Read> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: Read> RawChunkReader<R> {
    /// Create a reader serving `chunk_bytes` of audio per call.
    pub fn new(inner: R, chunk_bytes: usize) -> Self {
        // At least one sample per chunk
        let chunk_bytes = chunk_bytes.max(BYTES_PER_SAMPLE);
        Self {
            inner,
            buf: vec![0u8; chunk_bytes],
        }
    }

    /// Fill the buffer from the underlying reader, stopping at end of stream.
    fn fill_buf(&mut self) -> Result<usize> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.inner.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> ChunkReader for RawChunkReader<R> {
    fn next_chunk(&mut self) -> Result<Option<Vec<i16>>> {
        let filled = self.fill_buf()?;
        if filled == 0 {
            return Ok(None);
        }

        let samples: Vec<i16> = self.buf[..filled]
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        if samples.is_empty() {
            // Lone odd byte at end of stream
            return Ok(None);
        }
        Ok(Some(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn bytes_for(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_reads_full_chunks() {
        let data = bytes_for(&[1i16, 2, 3, 4, 5, 6]);
        let mut reader = RawChunkReader::new(Cursor::new(data), 4);

        assert_eq!(reader.next_chunk().unwrap(), Some(vec![1i16, 2]));
        assert_eq!(reader.next_chunk().unwrap(), Some(vec![3i16, 4]));
        assert_eq!(reader.next_chunk().unwrap(), Some(vec![5i16, 6]));
        assert_eq!(reader.next_chunk().unwrap(), None);
    }

    #[test]
    fn test_short_final_chunk() {
        let data = bytes_for(&[10i16, 20, 30]);
        let mut reader = RawChunkReader::new(Cursor::new(data), 4);

        assert_eq!(reader.next_chunk().unwrap(), Some(vec![10i16, 20]));
        assert_eq!(reader.next_chunk().unwrap(), Some(vec![30i16]));
        assert_eq!(reader.next_chunk().unwrap(), None);
    }

    #[test]
    fn test_empty_stream_yields_none_immediately() {
        let mut reader = RawChunkReader::new(Cursor::new(Vec::new()), 4000);
        assert_eq!(reader.next_chunk().unwrap(), None);
    }

    #[test]
    fn test_chunk_count_is_ceil_of_length_over_chunk_bytes() {
        // 9000 bytes with 4000-byte chunks → 3 submissions
        let data = vec![0u8; 9000];
        let mut reader = RawChunkReader::new(Cursor::new(data), 4000);

        let mut chunks = 0;
        while reader.next_chunk().unwrap().is_some() {
            chunks += 1;
        }
        assert_eq!(chunks, 3);
    }

    #[test]
    fn test_trailing_odd_byte_is_dropped() {
        let mut data = bytes_for(&[7i16, 8]);
        data.push(0xFF);
        let mut reader = RawChunkReader::new(Cursor::new(data), 4);

        assert_eq!(reader.next_chunk().unwrap(), Some(vec![7i16, 8]));
        // The lone trailing byte does not surface as a chunk
        assert_eq!(reader.next_chunk().unwrap(), None);
    }

    #[test]
    fn test_little_endian_sample_decoding() {
        let data = vec![0x34, 0x12, 0x00, 0x80];
        let mut reader = RawChunkReader::new(Cursor::new(data), 4);

        assert_eq!(reader.next_chunk().unwrap(), Some(vec![0x1234i16, i16::MIN]));
    }

    #[test]
    fn test_fills_buffer_across_short_reads() {
        // Reader that returns one byte at a time
        struct OneByte(Cursor<Vec<u8>>);
        impl Read for OneByte {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                let n = 1.min(buf.len());
                self.0.read(&mut buf[..n])
            }
        }

        let data = bytes_for(&[1i16, 2, 3]);
        let mut reader = RawChunkReader::new(OneByte(Cursor::new(data)), 6);

        // A single chunk despite six one-byte reads underneath
        assert_eq!(reader.next_chunk().unwrap(), Some(vec![1i16, 2, 3]));
        assert_eq!(reader.next_chunk().unwrap(), None);
    }

    #[test]
    fn test_read_error_propagates() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "stream gone",
                ))
            }
        }

        let mut reader = RawChunkReader::new(FailingReader, 4000);
        assert!(reader.next_chunk().is_err());
    }

    #[test]
    fn test_tiny_chunk_size_is_clamped_to_one_sample() {
        let data = bytes_for(&[42i16]);
        let mut reader = RawChunkReader::new(Cursor::new(data), 1);

        assert_eq!(reader.next_chunk().unwrap(), Some(vec![42i16]));
    }
}
