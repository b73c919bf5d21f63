//! Audio durations and album tagging.
//!
//! Both read the file through lofty: the container is guessed from the file
//! contents, falling back to the extension. Files lofty does not recognize
//! are untaggable and have no known duration.

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::TaggedFile;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use tracing::trace;

use crate::error::{ExtractError, Result};

/// Read the container and tags of `path`, or `None` when it is not a
/// recognizable media file.
fn read_tagged(path: &Path) -> Option<TaggedFile> {
    let read = Probe::open(path)
        .and_then(|p| p.guess_file_type().map_err(Into::into))
        .and_then(|p| p.read());
    match read {
        Ok(tagged) => Some(tagged),
        Err(e) => {
            trace!("{} is not readable media: {}", path.display(), e);
            None
        }
    }
}

/// Set the album tag of `path` to `album` unless one is already present.
///
/// Files that are not a taggable media type are silently skipped.
pub fn tag_file(path: &Path, album: &str) -> Result<()> {
    let Some(mut tagged) = read_tagged(path) else {
        return Ok(());
    };
    if tagged.tags().iter().any(|t| t.album().is_some()) {
        return Ok(());
    }

    let tag_type = tagged.primary_tag_type();
    if tagged.tag(tag_type).is_none() {
        tagged.insert_tag(Tag::new(tag_type));
    }
    let Some(tag) = tagged.tag_mut(tag_type) else {
        trace!("Not tagging {}: no writable tag", path.display());
        return Ok(());
    };
    tag.set_album(album.to_string());
    tag.save_to_path(path, WriteOptions::default())
        .map_err(|source| ExtractError::Tag {
            path: path.to_path_buf(),
            source,
        })
}

/// Duration of the media in `path`, in seconds.
///
/// Unrecognized files and streams of unknown length report infinity so that
/// they always pass a minimum-duration check.
pub fn audio_duration(path: &Path) -> f64 {
    let Some(tagged) = read_tagged(path) else {
        return f64::INFINITY;
    };
    let duration = tagged.properties().duration();
    if duration.is_zero() {
        f64::INFINITY
    } else {
        duration.as_secs_f64()
    }
}

/// Whether `path` is long enough to keep.
pub fn meets_min_duration(path: &Path, min_duration: u32) -> bool {
    audio_duration(path) >= f64::from(min_duration)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use lofty::prelude::*;
    use lofty::probe::Probe;

    const RATE: u32 = 8000;

    fn write_fixture(path: &Path, bytes: Vec<u8>) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, bytes).unwrap();
    }

    /// Write a mono 8-bit PCM WAV of `seconds` length at 8 kHz.
    pub fn write_wav(path: &Path, seconds: u32) {
        let data_len = RATE * seconds;
        let mut bytes = Vec::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&RATE.to_le_bytes());
        bytes.extend_from_slice(&RATE.to_le_bytes()); // byte rate
        bytes.extend_from_slice(&1u16.to_le_bytes()); // block align
        bytes.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(44 + data_len as usize, 0x80);
        write_fixture(path, bytes);
    }

    fn ogg_crc(data: &[u8]) -> u32 {
        let mut crc: u32 = 0;
        for &byte in data {
            crc ^= u32::from(byte) << 24;
            for _ in 0..8 {
                crc = if crc & 0x8000_0000 != 0 {
                    (crc << 1) ^ 0x04C1_1DB7
                } else {
                    crc << 1
                };
            }
        }
        crc
    }

    fn ogg_page(flags: u8, granule: u64, sequence: u32, packets: &[&[u8]]) -> Vec<u8> {
        let mut lacing = Vec::new();
        let mut body = Vec::new();
        for packet in packets {
            let mut left = packet.len();
            while left >= 255 {
                lacing.push(255u8);
                left -= 255;
            }
            lacing.push(left as u8);
            body.extend_from_slice(packet);
        }

        let mut page = Vec::new();
        page.extend_from_slice(b"OggS");
        page.push(0); // version
        page.push(flags);
        page.extend_from_slice(&granule.to_le_bytes());
        page.extend_from_slice(&0x5647_4D58u32.to_le_bytes()); // serial
        page.extend_from_slice(&sequence.to_le_bytes());
        page.extend_from_slice(&0u32.to_le_bytes()); // crc placeholder
        page.push(lacing.len() as u8);
        page.extend_from_slice(&lacing);
        page.extend_from_slice(&body);

        let crc = ogg_crc(&page);
        page[22..26].copy_from_slice(&crc.to_le_bytes());
        page
    }

    /// Write a mono Ogg Vorbis stream of `seconds` length at 8 kHz.
    ///
    /// Only the headers and page granule positions are meaningful; the audio
    /// packet is a placeholder, which is all duration reads and tagging look at.
    pub fn write_ogg(path: &Path, seconds: u32) {
        let mut ident = b"\x01vorbis".to_vec();
        ident.extend_from_slice(&0u32.to_le_bytes()); // version
        ident.push(1); // channels
        ident.extend_from_slice(&RATE.to_le_bytes());
        ident.extend_from_slice(&0i32.to_le_bytes()); // bitrate max
        ident.extend_from_slice(&24_000i32.to_le_bytes()); // bitrate nominal
        ident.extend_from_slice(&0i32.to_le_bytes()); // bitrate min
        ident.push(0xB8); // block sizes 256 / 2048
        ident.push(1); // framing

        let vendor = b"vgmx test";
        let mut comments = b"\x03vorbis".to_vec();
        comments.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
        comments.extend_from_slice(vendor);
        comments.extend_from_slice(&0u32.to_le_bytes());
        comments.push(1);

        let setup = b"\x05vorbis\x00\x00\x00\x00\x01".to_vec();
        let audio = vec![0u8; 16];

        let mut bytes = ogg_page(0x02, 0, 0, &[ident.as_slice()]);
        bytes.extend(ogg_page(0x00, 0, 1, &[comments.as_slice(), setup.as_slice()]));
        bytes.extend(ogg_page(0x04, u64::from(RATE * seconds), 2, &[audio.as_slice()]));
        write_fixture(path, bytes);
    }

    /// Album tag of any media file lofty can read.
    pub fn album_of(path: &Path) -> Option<String> {
        let tagged = Probe::open(path).ok()?.guess_file_type().ok()?.read().ok()?;
        tagged
            .tags()
            .iter()
            .find_map(|t| t.album().map(|a| a.into_owned()))
    }
}
