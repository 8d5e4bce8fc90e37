//! In-process key/blob gateway.
//!
//! Used by tests and by hosts that do not want on-disk persistence. The
//! failure switch lets error-path tests exercise the logged, non-rollback
//! write policy without a real broken backend.

use super::{PersistenceGateway, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryGateway {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `read` fail until switched back.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `write` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceGateway for MemoryGateway {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("injected read failure".to_string()));
        }
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("injected write failure".to_string()));
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
