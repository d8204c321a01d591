//! Application state management

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use floodsafe_core::{Database, Error, Result, SessionUser};
use tracing::warn;

use crate::navigator::Navigator;

/// Main application state
///
/// The explicit session context: who is using the app right now, plus the
/// shared database handle. Constructed once by the embedding shell and
/// passed into every service call; there is no ambient global.
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    current_user: Mutex<Option<SessionUser>>,
    ready: AtomicBool,
    navigator: Arc<dyn Navigator>,
}

impl AppState {
    /// Open the on-disk database and wrap it in a fresh context
    pub fn new(navigator: Arc<dyn Navigator>) -> Result<Self> {
        let db_path = Self::data_path()?.join("floodsafe.db");

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self::with_database(Database::open(&db_path)?, navigator))
    }

    /// Wrap an already-open database (tests use an in-memory one)
    pub fn with_database(db: Database, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            current_user: Mutex::new(None),
            ready: AtomicBool::new(false),
            navigator,
        }
    }

    fn data_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "floodsafe", "floodsafe").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    /// Load the persisted session into the in-memory mirror
    ///
    /// Always leaves the context ready: a failed lookup is logged and treated
    /// as "nobody signed in", so startup is never blocked.
    pub fn initialize(&self) {
        let loaded = self.db.lock().unwrap().session().load();
        match loaded {
            Ok(user) => *self.current_user.lock().unwrap() = user,
            Err(e) => {
                warn!(error = %e, "Session lookup failed at startup");
                *self.current_user.lock().unwrap() = None;
            }
        }
        self.ready.store(true, Ordering::SeqCst);
    }

    /// True once the initial session lookup has completed
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// The in-memory mirror of the signed-in user
    pub fn current_user(&self) -> Option<SessionUser> {
        self.current_user.lock().unwrap().clone()
    }

    /// Update the mirror after login, registration, or a profile update
    ///
    /// Persistence has already happened in the auth service.
    pub fn set_user(&self, user: SessionUser) {
        *self.current_user.lock().unwrap() = Some(user);
    }

    /// Drop the mirror and send the UI back to the unauthenticated flow
    pub fn clear(&self) {
        *self.current_user.lock().unwrap() = None;
        self.navigator.reset_to_unauthenticated();
    }
}
