//! Parser for Spotify's per-account metadata index file
//!
//! The file is line oriented and made of three sections in fixed order,
//! Artists, Albums and Tracks, each terminated by a blank line. Record
//! fields are separated by the control byte `0x01`; a track's extra artist
//! references are chained with `0x02`. The first line is a version marker
//! with no semantic value.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use crate::{
    domain::{hash::RecordHash, track::TrackInfo},
    metadata::error::LookupError,
};

/// Separates the fields of a record line.
pub const FIELD_DELIMITER: char = '\u{1}';
/// Chains additional artist references inside a track record.
pub const ARTIST_SEPARATOR: char = '\u{2}';

// Track record fields by position. Artist and album records only use the
// first two (hash, name).
const NAME: usize = 1;
const TRACK_ARTISTS: usize = 2;
const TRACK_DURATION: usize = 4;
const TRACK_ALBUM_HASH: usize = 6;
const TRACK_FIELD_COUNT: usize = 7;

/// Line reader over a metadata file that can remember and revisit a
/// section start, which the album pass needs.
struct RecordReader {
    inner: BufReader<File>,
    buf: String,
}

impl RecordReader {
    fn new(file: File) -> Self {
        Self {
            inner: BufReader::new(file),
            buf: String::new(),
        }
    }

    /// Next line without its terminator; `None` at end of file.
    fn next_line(&mut self) -> std::io::Result<Option<&str>> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.buf.trim_end_matches(['\r', '\n'])))
    }

    /// Advances past the rest of the current section, consuming its blank
    /// terminator line.
    fn skip_section(&mut self) -> std::io::Result<()> {
        while let Some(line) = self.next_line()? {
            if line.is_empty() {
                break;
            }
        }
        Ok(())
    }

    fn position(&mut self) -> std::io::Result<u64> {
        self.inner.stream_position()
    }

    fn seek_to(&mut self, position: u64) -> std::io::Result<()> {
        self.inner.seek(SeekFrom::Start(position)).map(|_| ())
    }
}

/// Looks up `track` by `artist` in a single metadata file.
///
/// Name matching is a case-sensitive literal prefix comparison against the
/// record's name field, so a query can match a longer name sharing its
/// prefix. A track only counts as a match when one of its artist references
/// resolves to the queried artist.
pub fn lookup_in_file(
    path: &Path,
    artist: &str,
    track: &str,
) -> Result<TrackInfo, LookupError> {
    let file = File::open(path).map_err(|source| LookupError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = RecordReader::new(file);

    // Version marker line; an empty or absent one means the file holds
    // no records at all
    match reader.next_line()? {
        Some(marker) if !marker.is_empty() => {}
        _ => {
            return Err(LookupError::ArtistNotFound {
                artist: artist.to_owned(),
            });
        }
    }

    let Some(artist_hash) = scan_artist_section(&mut reader, artist)? else {
        return Err(LookupError::ArtistNotFound {
            artist: artist.to_owned(),
        });
    };

    // Finish the artists section, then remember where the albums section
    // starts; the album name pass comes back here after the track scan
    reader.skip_section()?;
    let albums_start = reader.position()?;
    reader.skip_section()?;

    let Some((raw_duration, album_hash)) =
        scan_track_section(&mut reader, track, &artist_hash)?
    else {
        return Err(LookupError::TrackNotFound {
            artist: artist.to_owned(),
            track: track.to_owned(),
        });
    };

    let duration_secs = raw_duration
        .parse::<u32>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or(LookupError::InvalidDuration { raw: raw_duration })?;

    // A track without a resolvable album still counts as found
    let album = match album_hash {
        Some(hash) => {
            reader.seek_to(albums_start)?;
            scan_album_section(&mut reader, &hash)?.unwrap_or_default()
        }
        None => String::new(),
    };

    Ok(TrackInfo {
        duration_secs,
        album,
    })
}

/// Scans artist records until the section ends, returning the hash of the
/// first record whose name starts with `artist`.
fn scan_artist_section(
    reader: &mut RecordReader,
    artist: &str,
) -> Result<Option<RecordHash>, LookupError> {
    while let Some(line) = reader.next_line()? {
        if line.is_empty() {
            break;
        }

        let mut fields = line.split(FIELD_DELIMITER);
        let (Some(hash), Some(name)) = (fields.next(), fields.next()) else {
            continue;
        };

        if !name.starts_with(artist) {
            continue;
        }

        match RecordHash::parse(hash) {
            Some(hash) => return Ok(Some(hash)),
            None => log::debug!("artist record '{name}' has malformed hash, skipping"),
        }
    }

    Ok(None)
}

/// Scans track records for the first one whose title starts with `track`
/// and whose artist-reference chain contains `artist_hash`. Returns the raw
/// duration field and the album hash of that record. Stops at the first
/// full match even if its duration turns out invalid.
fn scan_track_section(
    reader: &mut RecordReader,
    track: &str,
    artist_hash: &RecordHash,
) -> Result<Option<(String, Option<RecordHash>)>, LookupError> {
    while let Some(line) = reader.next_line()? {
        if line.is_empty() {
            break;
        }

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();

        if fields.len() < TRACK_FIELD_COUNT {
            log::debug!(
                "skipping malformed track record with {} fields",
                fields.len()
            );
            continue;
        }

        if !fields[NAME].starts_with(track) {
            continue;
        }

        // A name match alone is not enough; the record must reference the
        // resolved artist somewhere in its chain
        if !fields[TRACK_ARTISTS]
            .split(ARTIST_SEPARATOR)
            .any(|reference| reference == artist_hash.as_str())
        {
            continue;
        }

        let album_hash = RecordHash::parse(fields[TRACK_ALBUM_HASH]);
        return Ok(Some((fields[TRACK_DURATION].to_owned(), album_hash)));
    }

    Ok(None)
}

/// Scans album records for the one keyed by `album_hash` and returns its
/// name. `None` when the section holds no such record.
fn scan_album_section(
    reader: &mut RecordReader,
    album_hash: &RecordHash,
) -> Result<Option<String>, LookupError> {
    while let Some(line) = reader.next_line()? {
        if line.is_empty() {
            break;
        }

        let mut fields = line.split(FIELD_DELIMITER);
        let (Some(hash), Some(name)) = (fields.next(), fields.next()) else {
            continue;
        };

        if hash == album_hash.as_str() {
            return Ok(Some(name.to_owned()));
        }
    }

    Ok(None)
}
