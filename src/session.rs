//! Operator sessions.
//!
//! Users are drawn from a fixed table of demo accounts, one per role, which all share the same
//! password. A logged-in [`Session`] is an explicit value which is persisted through a
//! [`SessionStore`] rather than held in global state.
use crate::access::{Page, Role, can_access, pages_for};
use crate::get_fleetsim_config_dir;
use anyhow::{Context, Result, bail};
use chrono::Local;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// The file the current session is stored in, within the program config dir
const SESSION_FILE_NAME: &str = "session.toml";

/// The password shared by every demo account
const DEMO_PASSWORD: &str = "demo123";

/// A row of the demo user table
struct DemoUser {
    id: &'static str,
    username: &'static str,
    name: &'static str,
    role: Role,
    terminal: Option<&'static str>,
}

/// The demo accounts
const DEMO_USERS: [DemoUser; 11] = [
    DemoUser {
        id: "1",
        username: "ops1",
        name: "Sarah Johnson",
        role: Role::OperationsSupervisor,
        terminal: Some("Terminal A"),
    },
    DemoUser {
        id: "2",
        username: "workshop1",
        name: "Mike Chen",
        role: Role::WorkshopManager,
        terminal: None,
    },
    DemoUser {
        id: "3",
        username: "depot1",
        name: "Lisa Rodriguez",
        role: Role::DepotManager,
        terminal: None,
    },
    DemoUser {
        id: "4",
        username: "engineer1",
        name: "David Kumar",
        role: Role::RollingStockEngineer,
        terminal: None,
    },
    DemoUser {
        id: "5",
        username: "brand1",
        name: "Emma Thompson",
        role: Role::BrandingManager,
        terminal: None,
    },
    DemoUser {
        id: "6",
        username: "admin1",
        name: "Alex Wang",
        role: Role::SystemAdmin,
        terminal: None,
    },
    DemoUser {
        id: "7",
        username: "maintenance1",
        name: "Rajesh Patel",
        role: Role::MaintenanceManager,
        terminal: None,
    },
    DemoUser {
        id: "8",
        username: "cleaning1",
        name: "Priya Sharma",
        role: Role::CleaningManager,
        terminal: None,
    },
    DemoUser {
        id: "9",
        username: "tech1",
        name: "John Smith",
        role: Role::WorkerTechnician,
        terminal: None,
    },
    DemoUser {
        id: "10",
        username: "cleaner1",
        name: "Maria Garcia",
        role: Role::WorkerCleaning,
        terminal: None,
    },
    DemoUser {
        id: "11",
        username: "platform1",
        name: "Arun Kumar",
        role: Role::PlatformSupervisor,
        terminal: None,
    },
];

/// A user of the depot console
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: String,
    /// The name the user logs in with
    pub username: String,
    /// The user's full name
    pub name: String,
    /// The user's job role
    pub role: Role,
    /// The terminal the user is stationed at, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
}

impl User {
    /// The pages this user may open
    pub fn pages(&self) -> &'static [Page] {
        pages_for(self.role)
    }

    /// Whether this user may open the given page
    pub fn can_access(&self, page: Page) -> bool {
        can_access(self.role, page)
    }
}

impl From<&DemoUser> for User {
    fn from(user: &DemoUser) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.into(),
            name: user.name.into(),
            role: user.role,
            terminal: user.terminal.map(String::from),
        }
    }
}

/// Iterate over every known user
pub fn users() -> impl Iterator<Item = User> {
    DEMO_USERS.iter().map(User::from)
}

/// Check a username and password against the user table.
///
/// Usernames are matched exactly.
pub fn authenticate(username: &str, password: &str) -> Option<User> {
    if password != DEMO_PASSWORD {
        return None;
    }

    DEMO_USERS
        .iter()
        .find(|user| user.username == username)
        .map(User::from)
}

/// A logged-in user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// When the session started (RFC 3339)
    pub started: String,
    /// Who is logged in
    pub user: User,
}

impl Session {
    /// Start a new session for `user` now
    pub fn new(user: User) -> Self {
        Self {
            started: Local::now().to_rfc3339(),
            user,
        }
    }
}

/// Somewhere a session can be kept between invocations
pub trait SessionStore {
    /// The stored session, if there is one
    fn load(&mut self) -> Result<Option<Session>>;

    /// Store `session`, replacing any existing one
    fn save(&mut self, session: &Session) -> Result<()>;

    /// Remove the stored session, if any
    fn clear(&mut self) -> Result<()>;
}

/// Log in, storing the new session.
///
/// Any existing session is replaced.
pub fn login<S: SessionStore>(store: &mut S, username: &str, password: &str) -> Result<Session> {
    let Some(user) = authenticate(username, password) else {
        bail!("Invalid username or password");
    };

    let session = Session::new(user);
    store.save(&session)?;

    Ok(session)
}

/// Log out, returning the session which was ended (if any)
pub fn logout<S: SessionStore>(store: &mut S) -> Result<Option<Session>> {
    let session = store.load()?;
    store.clear()?;

    Ok(session)
}

/// Stores the session as a TOML file
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// A store using the session file in the program config dir
    pub fn new() -> Self {
        Self::with_path(get_fleetsim_config_dir().join(SESSION_FILE_NAME))
    }

    /// A store using the session file at `path`
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&mut self) -> Result<Option<Session>> {
        if !self.path.is_file() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read session file {}", self.path.display()))?;
        match toml::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                warn!(
                    "Discarding unreadable session file {}: {err}",
                    self.path.display()
                );
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        fs::write(&self.path, toml::to_string(session)?)
            .with_context(|| format!("Could not write session file {}", self.path.display()))
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.is_file() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Could not remove session file {}", self.path.display())
            })?;
        }

        Ok(())
    }
}

/// Keeps the session in memory only
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Option<Session>,
}

impl SessionStore for MemorySessionStore {
    fn load(&mut self) -> Result<Option<Session>> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.session = None;
        Ok(())
    }
}
