//! Generic fixed-size record store
//!
//! A store is one file holding back-to-back records of a single type. Every
//! operation opens the file, works sequentially and closes it again; nothing
//! is cached except the id high-water mark.
//!
//! The store assumes it is the only writer. Two processes sharing a data
//! directory can lose updates or interleave appends.

use std::cell::Cell;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::codec::{decode_record, encode_record, Keyed, Record};
use crate::error::{StorekeepError, StorekeepResult};

/// Opaque handle to a record's slot, obtained from [`RecordStore::find_first`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordPosition {
    index: u64,
}

impl RecordPosition {
    /// Zero-based record index within the store
    pub fn index(&self) -> u64 {
        self.index
    }

    fn byte_offset<R: Record>(&self) -> u64 {
        self.index * R::SIZE as u64
    }
}

/// A record together with the slot it was read from
#[derive(Debug, Clone)]
pub struct Located<R> {
    pub record: R,
    pub position: RecordPosition,
}

/// File-backed store of fixed-size records
pub struct RecordStore<R> {
    path: PathBuf,
    /// Largest id seen or handed out by this handle; never decreases
    high_water: Cell<u32>,
    _marker: PhantomData<R>,
}

impl<R: Record> RecordStore<R> {
    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file exists yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn unavailable(&self, err: io::Error) -> StorekeepError {
        StorekeepError::StoreUnavailable {
            store: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Append one record at the end of the store, creating the file if needed
    ///
    /// A partial record left at the end of the file is cut off first, so the
    /// new record starts on a record boundary.
    pub fn append(&self, record: &R) -> StorekeepResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;

        let len = file.metadata()?.len();
        let aligned = len - len % R::SIZE as u64;
        if aligned != len {
            warn!(
                store = %self.path.display(),
                bytes = len - aligned,
                "Truncating partial record before append"
            );
            file.set_len(aligned)?;
        }
        file.seek(SeekFrom::Start(aligned))?;

        file.write_all(&encode_record(record))
            .map_err(|e| StorekeepError::Io(format!("Failed to append {}: {}", R::KIND, e)))?;
        file.flush()
            .map_err(|e| StorekeepError::Io(format!("Failed to flush {}: {}", R::KIND, e)))?;

        debug!(store = %self.path.display(), kind = R::KIND, "Appended record");
        Ok(())
    }

    /// Iterate every record in storage order
    ///
    /// Fails with `StoreUnavailable` when the file cannot be opened, including
    /// when it does not exist yet.
    pub fn scan_all(&self) -> StorekeepResult<RecordIter<R>> {
        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        Ok(RecordIter::new(file, self.path.clone()))
    }

    /// Scan, treating a store that does not exist yet as empty
    fn scan_existing(&self) -> StorekeepResult<Option<RecordIter<R>>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(RecordIter::new(file, self.path.clone()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.unavailable(e)),
        }
    }

    /// Read every record into memory; a missing store is empty
    pub fn load_all(&self) -> StorekeepResult<Vec<R>> {
        match self.scan_existing()? {
            Some(iter) => iter.map(|entry| entry.map(|located| located.record)).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Number of records in the store; a missing store holds none
    pub fn count(&self) -> StorekeepResult<usize> {
        match self.scan_existing()? {
            Some(iter) => {
                let mut count = 0;
                for entry in iter {
                    entry?;
                    count += 1;
                }
                Ok(count)
            }
            None => Ok(0),
        }
    }

    /// First record matching `predicate`, with its position
    ///
    /// A store that does not exist yet matches nothing.
    pub fn find_first<F>(&self, mut predicate: F) -> StorekeepResult<Option<Located<R>>>
    where
        F: FnMut(&R) -> bool,
    {
        let Some(iter) = self.scan_existing()? else {
            return Ok(None);
        };
        for entry in iter {
            let located = entry?;
            if predicate(&located.record) {
                return Ok(Some(located));
            }
        }
        Ok(None)
    }

    /// Overwrite the record at `position` with `record`
    ///
    /// `position` must come from `find_first` on this store. Positions beyond
    /// the end of the file are rejected.
    pub fn rewrite_at(&self, position: RecordPosition, record: &R) -> StorekeepResult<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;

        let offset = position.byte_offset::<R>();
        let len = file.metadata()?.len();
        if offset + R::SIZE as u64 > len {
            return Err(StorekeepError::Storage(format!(
                "{} position {} is past the end of {}",
                R::KIND,
                position.index,
                self.path.display()
            )));
        }

        file.seek(SeekFrom::Start(offset))?;
        file.write_all(&encode_record(record))
            .map_err(|e| StorekeepError::Io(format!("Failed to rewrite {}: {}", R::KIND, e)))?;
        file.flush()?;

        debug!(store = %self.path.display(), index = position.index, "Rewrote record");
        Ok(())
    }

    /// Remove every record matching `predicate`, returning how many were removed
    ///
    /// Survivors are copied in order to a sibling temp file which is then
    /// renamed over the original. When nothing matches, the store is left
    /// untouched. A missing store removes nothing.
    pub fn delete_where<F>(&self, mut predicate: F) -> StorekeepResult<usize>
    where
        F: FnMut(&R) -> bool,
    {
        let Some(iter) = self.scan_existing()? else {
            return Ok(0);
        };

        let temp_path = self.temp_path();
        let temp = File::create(&temp_path).map_err(|e| self.unavailable(e))?;
        let mut writer = BufWriter::new(temp);
        let mut removed = 0;

        let copied = (|| -> StorekeepResult<()> {
            for entry in iter {
                let located = entry?;
                if predicate(&located.record) {
                    removed += 1;
                } else {
                    writer.write_all(&encode_record(&located.record))?;
                }
            }
            writer.flush()?;
            writer.get_ref().sync_all()?;
            Ok(())
        })();

        if let Err(e) = copied {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        drop(writer);

        if removed == 0 {
            let _ = fs::remove_file(&temp_path);
            return Ok(0);
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorekeepError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(store = %self.path.display(), removed, "Deleted records");
        Ok(removed)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<R: Keyed> RecordStore<R> {
    /// Open a handle, seeding the id high-water mark from the file
    pub fn open(path: PathBuf) -> StorekeepResult<Self> {
        let store = Self {
            path,
            high_water: Cell::new(0),
            _marker: PhantomData,
        };
        store.high_water.set(store.max_stored_id()?);
        Ok(store)
    }

    fn max_stored_id(&self) -> StorekeepResult<u32> {
        let mut max = 0;
        if let Some(iter) = self.scan_existing()? {
            for entry in iter {
                max = max.max(entry?.record.key());
            }
        }
        Ok(max)
    }

    /// Allocate the next id: one more than the largest id ever seen
    ///
    /// Re-scans the file on every call, so records added behind this
    /// handle's back are honoured, but the high-water mark never decreases,
    /// so ids freed by deletes are not reused while this handle lives.
    pub fn next_id(&self) -> StorekeepResult<u32> {
        let max = self.max_stored_id()?.max(self.high_water.get());
        let next = max
            .checked_add(1)
            .ok_or_else(|| StorekeepError::Storage(format!("{} ids exhausted", R::KIND)))?;
        self.high_water.set(next);
        Ok(next)
    }

    /// Current high-water mark
    pub fn high_water_mark(&self) -> u32 {
        self.high_water.get()
    }

    /// Find a record by id
    pub fn find_by_key(&self, key: u32) -> StorekeepResult<Option<Located<R>>> {
        self.find_first(|record| record.key() == key)
    }
}

impl<R: Record> RecordStore<R> {
    /// Open a handle for a record type without ids
    pub fn open_unkeyed(path: PathBuf) -> Self {
        Self {
            path,
            high_water: Cell::new(0),
            _marker: PhantomData,
        }
    }
}

/// Lazy iterator over a store file
///
/// A trailing partial record ends the scan, the same way a short read would.
pub struct RecordIter<R> {
    reader: BufReader<File>,
    path: PathBuf,
    index: u64,
    buf: Vec<u8>,
    done: bool,
    _marker: PhantomData<R>,
}

impl<R: Record> RecordIter<R> {
    fn new(file: File, path: PathBuf) -> Self {
        Self {
            reader: BufReader::new(file),
            path,
            index: 0,
            buf: vec![0; R::SIZE],
            done: false,
            _marker: PhantomData,
        }
    }

    /// Fill the buffer; returns bytes read (less than SIZE only at EOF)
    fn fill(&mut self) -> io::Result<usize> {
        let mut filled = 0;
        while filled < R::SIZE {
            match self.reader.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Record> Iterator for RecordIter<R> {
    type Item = StorekeepResult<Located<R>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let filled = match self.fill() {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Some(Err(StorekeepError::Io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                ))));
            }
        };

        if filled < R::SIZE {
            self.done = true;
            if filled > 0 {
                warn!(
                    store = %self.path.display(),
                    bytes = filled,
                    "Ignoring partial record at end of store"
                );
            }
            return None;
        }

        let position = RecordPosition { index: self.index };
        self.index += 1;
        Some(decode_record::<R>(&self.buf).map(|record| Located { record, position }))
    }
}
