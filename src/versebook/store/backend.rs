use crate::error::Result;

/// Abstract interface for raw key-value persistence.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::StudyStore`] and [`crate::preferences::PreferenceStore`] handle the
/// "what" (which keys, what shape, how failures degrade).
///
/// Values are opaque strings; callers store JSON.
pub trait StorageBackend {
    /// Read a value. Returns Ok(None) when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for std::rc::Rc<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
