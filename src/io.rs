//! Reading and writing RIFF/WAVE audio files.
//!
//! Integer PCM at 16, 24 and 32 bit and IEEE float at 32 and 64 bit are
//! supported. Integer samples are scaled to `[-1, 1)`; values outside that
//! range are clipped when writing.

use std::fs;
use std::path::Path;

use ndarray::Array2;

use crate::deprecation::{DeprecationGate, registry};
use crate::{AcousticError, AcousticResult, Signal};

const RIFF_MAGIC: &[u8; 4] = b"RIFF";
const WAVE_MAGIC: &[u8; 4] = b"WAVE";
const FORMAT_PCM: u16 = 0x0001;
const FORMAT_IEEE_FLOAT: u16 = 0x0003;
const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Sample encoding of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavSubtype {
    /// Signed 16 bit integer.
    Pcm16,
    /// Signed 24 bit integer.
    Pcm24,
    /// Signed 32 bit integer.
    Pcm32,
    /// 32 bit float.
    Float32,
    /// 64 bit float.
    #[default]
    Float64,
}

impl WavSubtype {
    const fn bits_per_sample(self) -> u16 {
        match self {
            Self::Pcm16 => 16,
            Self::Pcm24 => 24,
            Self::Pcm32 | Self::Float32 => 32,
            Self::Float64 => 64,
        }
    }

    const fn format_tag(self) -> u16 {
        match self {
            Self::Pcm16 | Self::Pcm24 | Self::Pcm32 => FORMAT_PCM,
            Self::Float32 | Self::Float64 => FORMAT_IEEE_FLOAT,
        }
    }

    const fn bytes_per_sample(self) -> usize {
        self.bits_per_sample() as usize / 8
    }

    fn from_format(format_tag: u16, bits: u16) -> AcousticResult<Self> {
        match (format_tag, bits) {
            (FORMAT_PCM, 16) => Ok(Self::Pcm16),
            (FORMAT_PCM, 24) => Ok(Self::Pcm24),
            (FORMAT_PCM, 32) => Ok(Self::Pcm32),
            (FORMAT_IEEE_FLOAT, 32) => Ok(Self::Float32),
            (FORMAT_IEEE_FLOAT, 64) => Ok(Self::Float64),
            (tag, bits) => Err(AcousticError::UnsupportedFormat(format!(
                "WAV format tag {tag:#06x} with {bits} bits per sample"
            ))),
        }
    }

    fn encode(self, value: f64, buffer: &mut Vec<u8>) {
        match self {
            Self::Pcm16 => {
                let scaled = (value * 32768.0).round().clamp(-32768.0, 32767.0) as i16;
                buffer.extend_from_slice(&scaled.to_le_bytes());
            }
            Self::Pcm24 => {
                let scaled = (value * 8_388_608.0).round().clamp(-8_388_608.0, 8_388_607.0) as i32;
                buffer.extend_from_slice(&scaled.to_le_bytes()[..3]);
            }
            Self::Pcm32 => {
                let scaled = (value * 2_147_483_648.0)
                    .round()
                    .clamp(-2_147_483_648.0, 2_147_483_647.0) as i32;
                buffer.extend_from_slice(&scaled.to_le_bytes());
            }
            Self::Float32 => buffer.extend_from_slice(&(value as f32).to_le_bytes()),
            Self::Float64 => buffer.extend_from_slice(&value.to_le_bytes()),
        }
    }

    fn decode(self, bytes: &[u8]) -> f64 {
        match self {
            Self::Pcm16 => f64::from(i16::from_le_bytes([bytes[0], bytes[1]])) / 32768.0,
            Self::Pcm24 => {
                // sign-extend through the top byte
                let value = i32::from_le_bytes([0, bytes[0], bytes[1], bytes[2]]) >> 8;
                f64::from(value) / 8_388_608.0
            }
            Self::Pcm32 => {
                f64::from(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
                    / 2_147_483_648.0
            }
            Self::Float32 => {
                f64::from(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            Self::Float64 => f64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
        }
    }
}

/// Encode a signal as a complete WAV file.
pub fn encode_wav(signal: &Signal, subtype: WavSubtype) -> AcousticResult<Vec<u8>> {
    let sampling_rate = signal.sampling_rate();
    if sampling_rate.fract() != 0.0 || sampling_rate > f64::from(u32::MAX) {
        return Err(AcousticError::UnsupportedFormat(format!(
            "WAV files need an integer sampling rate, got {sampling_rate} Hz"
        )));
    }
    let n_channels = u16::try_from(signal.n_channels()).map_err(|_| {
        AcousticError::UnsupportedFormat(format!(
            "WAV files hold at most {} channels",
            u16::MAX
        ))
    })?;

    let too_large = |what: &str| {
        AcousticError::UnsupportedFormat(format!("{what} does not fit a WAV header"))
    };
    let block_align = u16::try_from(usize::from(n_channels) * subtype.bytes_per_sample())
        .map_err(|_| too_large("Frame size"))?;
    let data_len = signal
        .n_samples()
        .checked_mul(usize::from(block_align))
        .and_then(|len| u32::try_from(len).ok())
        .ok_or_else(|| too_large("Signal length"))?;
    let riff_len = data_len
        .checked_add(36)
        .ok_or_else(|| too_large("Signal length"))?;
    let sampling_rate = sampling_rate as u32;
    let byte_rate = sampling_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(|| too_large("Byte rate"))?;

    let mut buffer = Vec::with_capacity(44 + data_len as usize);
    buffer.extend_from_slice(RIFF_MAGIC);
    buffer.extend_from_slice(&riff_len.to_le_bytes());
    buffer.extend_from_slice(WAVE_MAGIC);

    buffer.extend_from_slice(b"fmt ");
    buffer.extend_from_slice(&16u32.to_le_bytes());
    buffer.extend_from_slice(&subtype.format_tag().to_le_bytes());
    buffer.extend_from_slice(&n_channels.to_le_bytes());
    buffer.extend_from_slice(&sampling_rate.to_le_bytes());
    buffer.extend_from_slice(&byte_rate.to_le_bytes());
    buffer.extend_from_slice(&block_align.to_le_bytes());
    buffer.extend_from_slice(&subtype.bits_per_sample().to_le_bytes());

    buffer.extend_from_slice(b"data");
    buffer.extend_from_slice(&data_len.to_le_bytes());
    // frames are interleaved across channels
    for frame in signal.time().columns() {
        for &value in frame {
            subtype.encode(value, &mut buffer);
        }
    }
    Ok(buffer)
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

struct Format {
    subtype: WavSubtype,
    n_channels: usize,
    sampling_rate: u32,
}

fn parse_format(chunk: &[u8]) -> AcousticResult<Format> {
    if chunk.len() < 16 {
        return Err(AcousticError::UnsupportedFormat(
            "fmt chunk is too short".to_string(),
        ));
    }
    let mut format_tag = read_u16(chunk, 0);
    let n_channels = usize::from(read_u16(chunk, 2));
    let sampling_rate = read_u32(chunk, 4);
    let bits = read_u16(chunk, 14);

    if format_tag == FORMAT_EXTENSIBLE {
        // the sub-format GUID starts with the actual format tag
        if chunk.len() < 26 {
            return Err(AcousticError::UnsupportedFormat(
                "Extensible fmt chunk is too short".to_string(),
            ));
        }
        format_tag = read_u16(chunk, 24);
    }
    if n_channels == 0 {
        return Err(AcousticError::UnsupportedFormat(
            "WAV file declares zero channels".to_string(),
        ));
    }
    Ok(Format {
        subtype: WavSubtype::from_format(format_tag, bits)?,
        n_channels,
        sampling_rate,
    })
}

/// Decode a complete WAV file.
pub fn decode_wav(bytes: &[u8]) -> AcousticResult<(Signal, WavSubtype)> {
    if bytes.len() < 12 || &bytes[0..4] != RIFF_MAGIC || &bytes[8..12] != WAVE_MAGIC {
        return Err(AcousticError::UnsupportedFormat(
            "Not a RIFF/WAVE file".to_string(),
        ));
    }

    let mut format = None;
    let mut data = None;
    let mut offset = 12;
    while offset + 8 <= bytes.len() {
        let id = &bytes[offset..offset + 4];
        let size = read_u32(bytes, offset + 4) as usize;
        let start = offset + 8;
        let end = start.saturating_add(size).min(bytes.len());
        match id {
            b"fmt " => format = Some(parse_format(&bytes[start..end])?),
            b"data" => data = Some(&bytes[start..end]),
            other => tracing::debug!(
                chunk = %String::from_utf8_lossy(other),
                size,
                "skipping WAV chunk"
            ),
        }
        // chunks are padded to an even size
        offset = start.saturating_add(size).saturating_add(size % 2);
    }

    let format = format.ok_or_else(|| {
        AcousticError::UnsupportedFormat("WAV file has no fmt chunk".to_string())
    })?;
    let data = data.ok_or_else(|| {
        AcousticError::UnsupportedFormat("WAV file has no data chunk".to_string())
    })?;

    let frame_size = format.n_channels * format.subtype.bytes_per_sample();
    let n_samples = data.len() / frame_size;
    let mut time = Array2::zeros((format.n_channels, n_samples));
    for (n, frame) in data.chunks_exact(frame_size).enumerate() {
        for (channel, bytes) in frame
            .chunks_exact(format.subtype.bytes_per_sample())
            .enumerate()
        {
            time[[channel, n]] = format.subtype.decode(bytes);
        }
    }

    let signal = Signal::new(time, f64::from(format.sampling_rate))?;
    Ok((signal, format.subtype))
}

/// Read a WAV file.
pub fn read_audio(path: impl AsRef<Path>) -> AcousticResult<Signal> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let (signal, subtype) = decode_wav(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        ?subtype,
        n_channels = signal.n_channels(),
        n_samples = signal.n_samples(),
        "read audio file"
    );
    Ok(signal)
}

/// Write a signal to a WAV file.
pub fn write_audio(
    signal: &Signal,
    path: impl AsRef<Path>,
    subtype: WavSubtype,
) -> AcousticResult<()> {
    let path = path.as_ref();
    fs::write(path, encode_wav(signal, subtype)?)?;
    tracing::debug!(path = %path.display(), ?subtype, "wrote audio file");
    Ok(())
}

/// Deprecated alias of [`read_audio`].
pub fn read_wav(gate: &DeprecationGate, path: impl AsRef<Path>) -> AcousticResult<Signal> {
    gate.guard(&registry::READ_WAV)?;
    read_audio(path)
}

/// Deprecated alias of [`write_audio`].
pub fn write_wav(
    gate: &DeprecationGate,
    signal: &Signal,
    path: impl AsRef<Path>,
    subtype: WavSubtype,
) -> AcousticResult<()> {
    gate.guard(&registry::WRITE_WAV)?;
    write_audio(signal, path, subtype)
}
