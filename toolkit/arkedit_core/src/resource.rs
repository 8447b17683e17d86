//! Close-hook ownership for entities that must finalize exactly once.
//!
//! A [`Resource`] owns a value plus an optional deleter. Dropping the
//! wrapper runs the deleter once; [`Resource::release`] hands the value
//! back to the caller and suppresses the deleter. Rust's move semantics
//! already guarantee at most one live owner, so unlike the pointer-based
//! original there is no released-flag to track across moves — a moved-from
//! wrapper simply no longer exists.

/// Finalizer invoked when a [`Resource`] is dropped without being released.
pub trait Deleter<T> {
    /// Finalize the owned value. Called at most once.
    fn delete(&mut self, value: &mut T);
}

impl<T, F: FnMut(&mut T)> Deleter<T> for F {
    fn delete(&mut self, value: &mut T) {
        self(value);
    }
}

/// A value with an exactly-once finalizer.
///
/// `Resource` is not `Clone`: the deleter must fire once per underlying
/// value, never once per copy.
pub struct Resource<T> {
    /// `Some` for the wrapper's whole life; cleared only by drop/release.
    value: Option<T>,
    deleter: Option<Box<dyn Deleter<T> + Send>>,
}

impl<T> Resource<T> {
    /// Wrap a value with no finalizer.
    pub fn new(value: T) -> Self {
        Resource {
            value: Some(value),
            deleter: None,
        }
    }

    /// Wrap a value with a finalizer to run on drop.
    pub fn with_deleter(value: T, deleter: impl Deleter<T> + Send + 'static) -> Self {
        Resource {
            value: Some(value),
            deleter: Some(Box::new(deleter)),
        }
    }

    /// Replace the finalizer, dropping any previous one unfired.
    pub fn set_deleter(&mut self, deleter: impl Deleter<T> + Send + 'static) {
        self.deleter = Some(Box::new(deleter));
    }

    /// Borrow the owned value.
    pub fn get(&self) -> &T {
        match self.value.as_ref() {
            Some(value) => value,
            // Drop and release() are the only writers of the slot, and
            // both consume the wrapper.
            None => unreachable!("resource accessed after release"),
        }
    }

    /// Mutably borrow the owned value.
    pub fn get_mut(&mut self) -> &mut T {
        match self.value.as_mut() {
            Some(value) => value,
            None => unreachable!("resource accessed after release"),
        }
    }

    /// Take the value out, suppressing the finalizer.
    ///
    /// The escape hatch for callers that hand responsibility for the
    /// underlying value to someone else.
    pub fn release(mut self) -> T {
        self.deleter = None;
        match self.value.take() {
            Some(value) => value,
            None => unreachable!("resource released twice"),
        }
    }
}

impl<T> Drop for Resource<T> {
    fn drop(&mut self) {
        if let Some(mut value) = self.value.take() {
            if let Some(mut deleter) = self.deleter.take() {
                deleter.delete(&mut value);
            }
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("value", &self.value)
            .field("has_deleter", &self.deleter.is_some())
            .finish()
    }
}
