//! Byte-addressed durable settings storage.

use thiserror::Error;

/// Value of a never-written EEPROM cell.
pub const ERASED_BYTE: u8 = 0xFF;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Address {address} out of range (capacity {capacity})")]
    AddressOutOfRange { address: u16, capacity: usize },

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Power-cycle durable byte store.
///
/// Writes are synchronous and wear the underlying medium, so callers only
/// write when a value actually changes.
pub trait SettingsStore {
    /// # Errors
    ///
    /// Returns an error if the address is outside the store.
    fn read_byte(&mut self, address: u16) -> StoreResult<u8>;

    /// # Errors
    ///
    /// Returns an error if the address is outside the store or the
    /// medium rejected the write.
    fn write_byte(&mut self, address: u16, value: u8) -> StoreResult<()>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn read_byte(&mut self, address: u16) -> StoreResult<u8> {
        (**self).read_byte(address)
    }

    fn write_byte(&mut self, address: u16, value: u8) -> StoreResult<()> {
        (**self).write_byte(address, value)
    }
}

/// In-memory store that starts out erased and logs every write.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    cells: Vec<u8>,
    writes: Vec<(u16, u8)>,
    fail_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: vec![ERASED_BYTE; capacity],
            writes: Vec::new(),
            fail_writes: false,
        }
    }

    /// Create a store pre-loaded with `bytes`; capacity equals their length.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            cells: bytes.to_vec(),
            writes: Vec::new(),
            fail_writes: false,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Peek at a cell without going through the trait.
    #[must_use]
    pub fn get(&self, address: u16) -> Option<u8> {
        self.cells.get(usize::from(address)).copied()
    }

    #[must_use]
    pub fn writes(&self) -> &[(u16, u8)] {
        &self.writes
    }

    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    pub fn clear_write_log(&mut self) {
        self.writes.clear();
    }

    /// Make every subsequent write fail, as a worn-out cell would.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn out_of_range(&self, address: u16) -> StoreError {
        StoreError::AddressOutOfRange {
            address,
            capacity: self.cells.len(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(64)
    }
}

impl SettingsStore for MemoryStore {
    fn read_byte(&mut self, address: u16) -> StoreResult<u8> {
        self.get(address).ok_or_else(|| self.out_of_range(address))
    }

    fn write_byte(&mut self, address: u16, value: u8) -> StoreResult<()> {
        if self.fail_writes {
            return Err(StoreError::WriteFailed(format!(
                "cell {address} rejected write"
            )));
        }
        let err = self.out_of_range(address);
        let cell = self.cells.get_mut(usize::from(address)).ok_or(err)?;
        *cell = value;
        self.writes.push((address, value));
        Ok(())
    }
}
