//! Mutex-guarded Bevy `App` shareable between rspec examples.

use bevy::prelude::App;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An `App` that rspec fixtures can clone and move between closures.
#[derive(Debug)]
pub struct GuardedApp(pub App);

// SAFETY: rspec fixtures must be `Send + Sync`. Suites run through
// `run_serial` and every access goes through the mutex below.
unsafe impl Send for GuardedApp {}
unsafe impl Sync for GuardedApp {}

/// Shared pointer type for the guarded app.
pub type SharedApp = Arc<Mutex<GuardedApp>>;

/// Wraps a configured app.
pub fn share(app: App) -> SharedApp {
    Arc::new(Mutex::new(GuardedApp(app)))
}

/// Locks the shared app, recovering from a poisoned mutex.
pub fn lock(app: &SharedApp) -> MutexGuard<'_, GuardedApp> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}
