//! WAV container input for pipe mode.

use crate::audio::reader::ChunkReader;
use crate::defaults::BYTES_PER_SAMPLE;
use crate::error::{Result, VoskpipeError};
use std::io::Read;

/// Chunk reader that decodes a WAV stream up front.
/// Supports arbitrary sample rates and channels, downmixing to mono and
/// resampling to the recognizer's configured rate.
pub struct WavChunkReader {
    samples: Vec<i16>,
    position: usize,
    chunk_samples: usize,
}

impl WavChunkReader {
    /// Create from any reader (stdin, file, or an in-memory cursor in tests).
    pub fn from_reader(
        reader: Box<dyn Read>,
        target_rate: u32,
        chunk_bytes: usize,
    ) -> Result<Self> {
        let mut wav_reader =
            hound::WavReader::new(reader).map_err(|e| VoskpipeError::InvalidAudio {
                message: format!("Failed to parse WAV stream: {}", e),
            })?;

        let spec = wav_reader.spec();
        let source_rate = spec.sample_rate;
        let source_channels = spec.channels;

        if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
            return Err(VoskpipeError::InvalidAudio {
                message: format!(
                    "Only 16-bit integer WAV is supported, got {}-bit {:?}",
                    spec.bits_per_sample, spec.sample_format
                ),
            });
        }

        // Read all samples from the WAV stream
        let raw_samples: Vec<i16> = wav_reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VoskpipeError::InvalidAudio {
                message: format!("Failed to read WAV samples: {}", e),
            })?;

        // Downmix to mono by averaging each frame across its channels
        let mono_samples = match source_channels as usize {
            0 => {
                return Err(VoskpipeError::InvalidAudio {
                    message: "WAV stream reports zero channels".to_string(),
                });
            }
            1 => raw_samples,
            n => raw_samples
                .chunks_exact(n)
                .map(|frame| {
                    let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                    (sum / n as i32) as i16
                })
                .collect(),
        };

        // Resample if the container rate differs from the recognizer's rate
        let samples = if source_rate != target_rate {
            resample(&mono_samples, source_rate, target_rate)
        } else {
            mono_samples
        };

        let chunk_samples = (chunk_bytes / BYTES_PER_SAMPLE).max(1);

        Ok(Self {
            samples,
            position: 0,
            chunk_samples,
        })
    }

    /// Create from stdin.
    pub fn from_stdin(target_rate: u32, chunk_bytes: usize) -> Result<Self> {
        use std::io::Cursor;

        // Read all data from stdin into memory first; WAV needs a complete
        // header and hound wants ownership of the reader
        let mut buffer = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buffer)?;

        Self::from_reader(Box::new(Cursor::new(buffer)), target_rate, chunk_bytes)
    }
}

impl ChunkReader for WavChunkReader {
    fn next_chunk(&mut self) -> Result<Option<Vec<i16>>> {
        if self.position >= self.samples.len() {
            return Ok(None);
        }

        let end = std::cmp::min(self.position + self.chunk_samples, self.samples.len());
        let chunk = self.samples[self.position..end].to_vec();
        self.position = end;

        Ok(Some(chunk))
    }
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
