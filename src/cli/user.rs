//! User and session CLI commands
//!
//! Passwords are read from `--password` or prompted for without echo.

use clap::Subcommand;

use crate::audit::AuditContext;
use crate::config::Settings;
use crate::error::{GalleryError, GalleryResult};
use crate::services::{SessionService, UserService};
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create an account
    Create {
        /// Login name
        username: String,
        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Role to grant; repeat for several
        #[arg(short, long = "role")]
        roles: Vec<String>,
    },
    /// Change an account's password
    Passwd {
        /// Login name
        username: String,
        /// New password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List accounts
    List,
}

/// Read a password from the argument or an interactive prompt
pub fn read_password(provided: Option<String>, prompt: &str) -> GalleryResult<String> {
    match provided {
        Some(password) => Ok(password),
        None => rpassword::prompt_password(prompt)
            .map_err(|e| GalleryError::Io(format!("Failed to read password: {}", e))),
    }
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    ctx: &AuditContext,
    settings: &Settings,
    cmd: UserCommands,
) -> GalleryResult<()> {
    let service = UserService::new(storage, ctx);

    match cmd {
        UserCommands::Create {
            username,
            password,
            roles,
        } => {
            let password = read_password(password, "Password: ")?;
            let roles = if roles.is_empty() {
                vec![settings.default_user_role.clone()]
            } else {
                roles
            };

            let user = service.create(&username, &password, roles)?;
            println!(
                "Created user '{}' ({})",
                user.username,
                user.effective_roles().join(", ")
            );
        }

        UserCommands::Passwd { username, password } => {
            let password = read_password(password, "New password: ")?;
            let user = service.change_password(&username, &password)?;
            println!("Password changed for '{}'", user.username);
        }

        UserCommands::List => {
            let users = service.list()?;

            if users.is_empty() {
                println!("No users found.");
                return Ok(());
            }

            println!("{:>5} {:25} {}", "ID", "Username", "Roles");
            println!("{}", "-".repeat(60));
            for user in &users {
                println!(
                    "{:>5} {:25} {}",
                    user.id.unwrap_or_default(),
                    user.username,
                    user.effective_roles().join(",")
                );
            }
        }
    }

    Ok(())
}

/// Sign in and store the session
pub fn handle_login(
    storage: &Storage,
    ctx: &AuditContext,
    username: &str,
    password: Option<String>,
) -> GalleryResult<()> {
    let password = read_password(password, "Password: ")?;
    let session = SessionService::new(storage, ctx).login(username, &password)?;
    println!("Logged in as {}", session.username);
    Ok(())
}

/// Sign out; always recorded, even without a session
pub fn handle_logout(storage: &Storage, ctx: &AuditContext) -> GalleryResult<()> {
    match SessionService::new(storage, ctx).logout()? {
        Some(session) => println!("Logged out {}", session.username),
        None => println!("Not logged in."),
    }
    Ok(())
}

/// Show the signed-in user
pub fn handle_whoami(ctx: &AuditContext) -> GalleryResult<()> {
    match ctx.principal() {
        Some(principal) => println!("{} ({})", principal.username(), principal.roles().join(", ")),
        None => println!("Not logged in."),
    }
    Ok(())
}
