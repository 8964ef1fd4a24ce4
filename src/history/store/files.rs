//! On-disk layout of the history directory.
//!
//! Each day's log is `YYYY-MM-DD.jsonl` with one JSON turn per line. The
//! index is a single `index.json` document mapping dates to entries.

use super::error::{HistoryError, HistoryResult};
use crate::history::domain::{DayIndexEntry, Turn};
use cap_std::fs::OpenOptions;
use cap_std::fs_utf8::{Dir, File};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::warn;

/// Index file name inside the history directory.
pub const INDEX_FILE_NAME: &str = "index.json";

const LOG_SUFFIX: &str = ".jsonl";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Deserialize)]
struct IndexDocument {
    #[serde(default)]
    dates: BTreeMap<NaiveDate, DayIndexEntry>,
}

#[derive(Debug, Serialize)]
struct IndexDocumentRef<'a> {
    dates: &'a BTreeMap<NaiveDate, DayIndexEntry>,
}

pub(super) fn log_file_name(date: NaiveDate) -> String {
    format!("{}{LOG_SUFFIX}", date.format(DATE_FORMAT))
}

/// Appends `turns` to the day's log as one write.
///
/// A log left without a trailing newline by a torn write gets one first, so
/// the new turns start on their own line.
pub(super) fn append_log(dir: &Dir, date: NaiveDate, turns: &[&Turn]) -> HistoryResult<()> {
    let file_name = log_file_name(date);
    let mut payload = String::new();
    for turn in turns {
        let line =
            serde_json::to_string(turn).map_err(|err| HistoryError::encode(&file_name, err))?;
        payload.push_str(&line);
        payload.push('\n');
    }

    let mut options = OpenOptions::new();
    options.read(true).append(true).create(true);
    let mut file = dir
        .open_with(&file_name, &options)
        .map_err(|err| HistoryError::io("open", &file_name, err))?;
    if ends_mid_line(&mut file).map_err(|err| HistoryError::io("inspect", &file_name, err))? {
        warn!(file = %file_name, "log ends with a partial line; starting a new one");
        payload.insert(0, '\n');
    }
    file.write_all(payload.as_bytes())
        .map_err(|err| HistoryError::io("append to", &file_name, err))
}

fn ends_mid_line(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    let mut last = [0_u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last != *b"\n")
}

/// Reads a day's log, skipping lines that do not decode as turns.
///
/// Lines are decoded one at a time, so a write torn inside a multi-byte
/// character only loses that line.
pub(super) fn read_log(dir: &Dir, date: NaiveDate) -> HistoryResult<Vec<Turn>> {
    let file_name = log_file_name(date);
    let raw = match dir.read(&file_name) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(HistoryError::io("read", file_name, err)),
    };

    let mut turns = Vec::new();
    for (number, bytes) in raw.split(|byte| *byte == b'\n').enumerate() {
        let decoded = std::str::from_utf8(bytes)
            .map_err(|err| err.to_string())
            .and_then(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                serde_json::from_str::<Turn>(trimmed)
                    .map(Some)
                    .map_err(|err| err.to_string())
            });
        match decoded {
            Ok(Some(turn)) => turns.push(turn),
            Ok(None) => {}
            Err(error) => warn!(
                file = %file_name,
                line = number + 1,
                %error,
                "skipping malformed history line"
            ),
        }
    }
    Ok(turns)
}

/// Lists the dates that have a log file, in ascending order.
pub(super) fn log_dates(dir: &Dir) -> HistoryResult<Vec<NaiveDate>> {
    let entries = dir
        .entries()
        .map_err(|err| HistoryError::io("list", ".", err))?;

    let mut dates = Vec::new();
    for entry in entries {
        let name = entry
            .and_then(|found| found.file_name())
            .map_err(|err| HistoryError::io("list", ".", err))?;
        let parsed = name
            .strip_suffix(LOG_SUFFIX)
            .and_then(|stem| NaiveDate::parse_from_str(stem, DATE_FORMAT).ok());
        if let Some(date) = parsed {
            dates.push(date);
        }
    }
    dates.sort_unstable();
    Ok(dates)
}

/// Reads the index file.
///
/// Returns `None` when the file is missing or cannot be decoded, so the
/// caller can rebuild it from the logs.
pub(super) fn read_index(dir: &Dir) -> HistoryResult<Option<BTreeMap<NaiveDate, DayIndexEntry>>> {
    let raw = match dir.read_to_string(INDEX_FILE_NAME) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(HistoryError::io("read", INDEX_FILE_NAME, err)),
    };

    match serde_json::from_str::<IndexDocument>(&raw) {
        Ok(document) => Ok(Some(document.dates)),
        Err(err) => {
            warn!(error = %err, "history index is unreadable; it will be rebuilt");
            Ok(None)
        }
    }
}

/// Rewrites the index file in full.
pub(super) fn write_index(
    dir: &Dir,
    dates: &BTreeMap<NaiveDate, DayIndexEntry>,
) -> HistoryResult<()> {
    let mut payload = serde_json::to_string_pretty(&IndexDocumentRef { dates })
        .map_err(|err| HistoryError::encode(INDEX_FILE_NAME, err))?;
    payload.push('\n');
    dir.write(INDEX_FILE_NAME, payload)
        .map_err(|err| HistoryError::io("write", INDEX_FILE_NAME, err))
}
