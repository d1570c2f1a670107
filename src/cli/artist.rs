//! Artist CLI commands

use clap::Subcommand;

use crate::audit::AuditContext;
use crate::display::clip_column;
use crate::error::GalleryResult;
use crate::services::{ArtistDetails, ArtistService, ArtistUpdate};
use crate::storage::Storage;

/// Artist subcommands
#[derive(Subcommand)]
pub enum ArtistCommands {
    /// Add an artist
    Create {
        /// Artist name
        name: String,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },
    /// List artists
    List {
        /// Include inactive artists
        #[arg(short, long)]
        all: bool,
    },
    /// Edit an artist
    Edit {
        /// Artist ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        website: Option<String>,
        /// Mark the artist active or inactive
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete an artist
    Delete {
        /// Artist ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an artist command
pub fn handle_artist_command(
    storage: &Storage,
    ctx: &AuditContext,
    cmd: ArtistCommands,
) -> GalleryResult<()> {
    let service = ArtistService::new(storage, ctx);

    match cmd {
        ArtistCommands::Create {
            name,
            bio,
            email,
            website,
        } => {
            let artist = service.create(ArtistDetails {
                name,
                bio,
                email,
                website,
                image_path: None,
            })?;
            println!(
                "Created artist #{}: {}",
                artist.id.unwrap_or_default(),
                artist.name
            );
        }

        ArtistCommands::List { all } => {
            let artists = service.list(all)?;

            if artists.is_empty() {
                println!("No artists found.");
                return Ok(());
            }

            println!("{:>5} {:30} {:30} {:8}", "ID", "Name", "Website", "Status");
            println!("{}", "-".repeat(76));

            for artist in &artists {
                println!(
                    "{:>5} {:30} {:30} {:8}",
                    artist.id.unwrap_or_default(),
                    clip_column(&artist.name, 30),
                    clip_column(artist.website.as_deref().unwrap_or("-"), 30),
                    if artist.is_active { "active" } else { "inactive" }
                );
            }

            println!("\nTotal: {} artists", artists.len());
        }

        ArtistCommands::Edit {
            id,
            name,
            bio,
            email,
            website,
            active,
        } => {
            let artist = service.update(
                id,
                ArtistUpdate {
                    name,
                    bio,
                    email,
                    website,
                    image_path: None,
                    is_active: active,
                },
            )?;
            println!("Updated artist: {}", artist.name);
        }

        ArtistCommands::Delete { id, force } => {
            let artist = service.require(id)?;

            if !force {
                println!("About to delete artist: {}", artist.name);
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(id)?;
            println!("Deleted artist: {}", artist.name);
        }
    }

    Ok(())
}
