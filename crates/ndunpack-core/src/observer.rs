//! Notification hooks fired during an unpack.

use std::path::Path;

/// Receives notifications at the two observable points of an unpack.
///
/// Both methods default to doing nothing. Implementations must not rely on
/// being called for correctness, and cannot influence the outcome: the
/// orchestrator ignores everything they do.
///
/// # Examples
///
/// ```
/// use ndunpack_core::UnpackObserver;
/// use std::path::Path;
///
/// struct PrintObserver;
///
/// impl UnpackObserver for PrintObserver {
///     fn on_unpacking(&self, artifact: &Path, directory: &Path) {
///         println!("unpacking {} into {}", artifact.display(), directory.display());
///     }
/// }
/// ```
pub trait UnpackObserver {
    /// Called when the target already carries a completion marker and the
    /// strategy is skipped.
    fn on_already_unpacked(&self, _directory: &Path) {}

    /// Called right before the strategy is invoked.
    fn on_unpacking(&self, _artifact: &Path, _directory: &Path) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl UnpackObserver for NoopObserver {}

impl<T: UnpackObserver + ?Sized> UnpackObserver for &T {
    fn on_already_unpacked(&self, directory: &Path) {
        (**self).on_already_unpacked(directory);
    }

    fn on_unpacking(&self, artifact: &Path, directory: &Path) {
        (**self).on_unpacking(artifact, directory);
    }
}

/// Observer built from two plain callbacks.
///
/// # Examples
///
/// ```
/// use ndunpack_core::observer::FnObserver;
/// use std::cell::Cell;
///
/// let skipped = Cell::new(false);
/// let observer = FnObserver::new(|_dir| skipped.set(true), |_artifact, _dir| {});
/// # let _ = observer;
/// ```
pub struct FnObserver<A, U>
where
    A: Fn(&Path),
    U: Fn(&Path, &Path),
{
    already_unpacked: A,
    unpacking: U,
}

impl<A, U> FnObserver<A, U>
where
    A: Fn(&Path),
    U: Fn(&Path, &Path),
{
    /// Creates an observer from an already-unpacked and an unpacking callback.
    pub const fn new(already_unpacked: A, unpacking: U) -> Self {
        Self {
            already_unpacked,
            unpacking,
        }
    }
}

impl<A, U> UnpackObserver for FnObserver<A, U>
where
    A: Fn(&Path),
    U: Fn(&Path, &Path),
{
    fn on_already_unpacked(&self, directory: &Path) {
        (self.already_unpacked)(directory);
    }

    fn on_unpacking(&self, artifact: &Path, directory: &Path) {
        (self.unpacking)(artifact, directory);
    }
}
