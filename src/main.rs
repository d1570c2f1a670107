use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use gallery::audit::{ActivityLogSubscriber, AuditContext};
use gallery::cli::{
    handle_artist_command, handle_exhibition_command, handle_log_command, handle_login,
    handle_logout, handle_setting_command, handle_tour_command, handle_user_command,
    handle_whoami,
};
use gallery::config::{paths::GalleryPaths, settings::Settings};
use gallery::models::ROLE_ADMIN;
use gallery::services::{SessionService, UserService};
use gallery::storage::Storage;

#[derive(Parser)]
#[command(
    name = "gallery",
    version,
    about = "Back office for a museum and gallery",
    long_about = "Gallery manages tour bookings, exhibitions, artists, site settings \
                  and staff accounts from the command line. Every change is recorded \
                  in an activity log together with who made it and from where."
)]
struct Cli {
    /// Increase diagnostic output (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Client address recorded in the activity log
    #[arg(long, global = true, env = "GALLERY_CLIENT_IP")]
    ip: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init {
        /// Create an administrator account with this username
        #[arg(long)]
        admin: Option<String>,
        /// Administrator password (prompted if omitted)
        #[arg(long, requires = "admin")]
        password: Option<String>,
    },

    /// Show current configuration and paths
    Config,

    /// Sign in
    Login {
        /// Login name
        username: String,
        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Tour booking commands
    #[command(subcommand)]
    Tour(gallery::cli::TourCommands),

    /// Exhibition catalogue commands
    #[command(subcommand)]
    Exhibition(gallery::cli::ExhibitionCommands),

    /// Artist commands
    #[command(subcommand)]
    Artist(gallery::cli::ArtistCommands),

    /// Site setting commands
    #[command(subcommand)]
    Setting(gallery::cli::SettingCommands),

    /// User account commands
    #[command(subcommand)]
    User(gallery::cli::UserCommands),

    /// Activity log commands
    #[command(subcommand)]
    Log(gallery::cli::LogCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    gallery::logging::init(cli.verbose)?;

    // Initialize paths and settings
    let paths = GalleryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Open storage with activity logging on every commit
    let mut storage = Storage::open(paths.clone())?;
    storage.register_listener(ActivityLogSubscriber::from_settings(&settings.audit));

    // Resolve who is acting, and from where
    let mut ctx = AuditContext::empty();
    if let Some(ip) = cli.ip {
        ctx = ctx.with_client_ip(ip);
    }
    if let Some(principal) = SessionService::new(&storage, &ctx).principal()? {
        ctx = ctx.with_principal(principal);
    }

    match cli.command {
        Some(Commands::Init { admin, password }) => {
            println!("Initializing Gallery at: {}", paths.base_dir().display());
            settings.save(&paths)?;

            if let Some(username) = admin {
                let password =
                    gallery::cli::user::read_password(password, "Administrator password: ")?;
                let user = UserService::new(&storage, &ctx).create(
                    &username,
                    &password,
                    vec![ROLE_ADMIN.to_string()],
                )?;
                println!("Created administrator '{}'", user.username);
            }

            println!("Initialization complete!");
            println!();
            println!("Run 'gallery login <username>' to sign in.");
        }
        Some(Commands::Config) => {
            println!("Gallery Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Database file:    {}", paths.database_file().display());
            println!("Session file:     {}", paths.session_file().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Date format:         {}", settings.datetime_format);
            println!("  Default log limit:   {}", settings.default_log_limit);
            println!("  Default user role:   {}", settings.default_user_role);
            println!("  Audit value length:  {}", settings.audit.max_value_length);
            if !settings.audit.extra_ignored_fields.is_empty() {
                println!(
                    "  Audit ignores:       {}",
                    settings.audit.extra_ignored_fields.join(", ")
                );
            }
        }
        Some(Commands::Login { username, password }) => {
            handle_login(&storage, &ctx, &username, password)?;
        }
        Some(Commands::Logout) => {
            handle_logout(&storage, &ctx)?;
        }
        Some(Commands::Whoami) => {
            handle_whoami(&ctx)?;
        }
        Some(Commands::Tour(cmd)) => {
            handle_tour_command(&storage, &ctx, &settings, cmd)?;
        }
        Some(Commands::Exhibition(cmd)) => {
            handle_exhibition_command(&storage, &ctx, cmd)?;
        }
        Some(Commands::Artist(cmd)) => {
            handle_artist_command(&storage, &ctx, cmd)?;
        }
        Some(Commands::Setting(cmd)) => {
            handle_setting_command(&storage, &ctx, cmd)?;
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, &ctx, &settings, cmd)?;
        }
        Some(Commands::Log(cmd)) => {
            handle_log_command(&storage, &settings, cmd)?;
        }
        None => {
            println!("Gallery - museum and gallery back office");
            println!();
            println!("Run 'gallery --help' for usage information.");
        }
    }

    Ok(())
}
