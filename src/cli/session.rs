//! CLI commands for logging in and out
use crate::session::{FileSessionStore, Session, SessionStore, login, logout};
use anyhow::Result;
use clap::Subcommand;
use itertools::Itertools;

/// Subcommands for the session
#[derive(Subcommand)]
pub enum SessionSubcommands {
    /// Log in as one of the depot users
    Login {
        /// The username to log in as
        username: String,
        /// The user's password
        #[arg(long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show who is logged in and which pages they can open
    Show,
}

impl SessionSubcommands {
    /// Execute the supplied session subcommand
    pub fn execute(self) -> Result<()> {
        let mut store = FileSessionStore::new();
        match self {
            Self::Login { username, password } => {
                let session = login(&mut store, &username, &password)?;
                println!("Logged in as {}", describe(&session));
            }
            Self::Logout => match logout(&mut store)? {
                Some(session) => println!("Logged out {}", session.user.name),
                None => println!("Not logged in"),
            },
            Self::Show => match store.load()? {
                Some(session) => println!("{}", describe(&session)),
                None => println!("Not logged in"),
            },
        }

        Ok(())
    }
}

/// A one-line description of who is logged in and what they can see
fn describe(session: &Session) -> String {
    let user = &session.user;
    let terminal = user
        .terminal
        .as_ref()
        .map_or_else(String::new, |terminal| format!(" at {terminal}"));

    format!(
        "{} ({}{terminal}), since {}. Pages: {}",
        user.name,
        user.role,
        session.started,
        user.pages().iter().join(", ")
    )
}
