//! Exhibition CLI commands

use clap::Subcommand;

use crate::audit::AuditContext;
use crate::display::{format_exhibition_details, format_exhibition_list};
use crate::error::GalleryResult;
use crate::services::{parse_date, ExhibitionDetails, ExhibitionService, ExhibitionUpdate};
use crate::storage::Storage;

/// Exhibition subcommands
#[derive(Subcommand)]
pub enum ExhibitionCommands {
    /// Add an exhibition
    Create {
        /// Exhibition title
        title: String,
        /// Exhibition type, e.g. permanent or temporary
        #[arg(long = "type")]
        exhibition_type: Option<String>,
        /// Art period
        #[arg(long)]
        period: Option<String>,
        /// Featured artists
        #[arg(long)]
        artists: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },
    /// List exhibitions
    List {
        /// Include closed exhibitions
        #[arg(short, long)]
        all: bool,
        /// Only exhibitions running on this day (YYYY-MM-DD)
        #[arg(long, conflicts_with = "all")]
        on: Option<String>,
    },
    /// Show exhibition details
    Show {
        /// Exhibition ID
        id: i64,
    },
    /// Edit exhibition fields
    Edit {
        /// Exhibition ID
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "type")]
        exhibition_type: Option<String>,
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        artists: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Open an exhibition for bookings
    Activate {
        /// Exhibition ID
        id: i64,
    },
    /// Close an exhibition for bookings
    Deactivate {
        /// Exhibition ID
        id: i64,
    },
    /// Delete an exhibition
    Delete {
        /// Exhibition ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an exhibition command
pub fn handle_exhibition_command(
    storage: &Storage,
    ctx: &AuditContext,
    cmd: ExhibitionCommands,
) -> GalleryResult<()> {
    let service = ExhibitionService::new(storage, ctx);

    match cmd {
        ExhibitionCommands::Create {
            title,
            exhibition_type,
            period,
            artists,
            description,
            start,
            end,
        } => {
            let exhibition = service.create(ExhibitionDetails {
                title,
                exhibition_type,
                period,
                artists,
                description,
                image_path: None,
                start_date: start.as_deref().map(parse_date).transpose()?,
                end_date: end.as_deref().map(parse_date).transpose()?,
            })?;
            println!(
                "Created exhibition #{}: {}",
                exhibition.id.unwrap_or_default(),
                exhibition.title
            );
        }

        ExhibitionCommands::List { all, on } => {
            let exhibitions = match on {
                Some(day) => service.running_on(parse_date(&day)?)?,
                None => service.list(!all)?,
            };
            print!("{}", format_exhibition_list(&exhibitions));
            if exhibitions.is_empty() {
                println!();
            }
        }

        ExhibitionCommands::Show { id } => {
            print!("{}", format_exhibition_details(&service.require(id)?));
        }

        ExhibitionCommands::Edit {
            id,
            title,
            exhibition_type,
            period,
            artists,
            description,
            start,
            end,
        } => {
            let exhibition = service.update(
                id,
                ExhibitionUpdate {
                    title,
                    exhibition_type,
                    period,
                    artists,
                    description,
                    image_path: None,
                    start_date: start.as_deref().map(parse_date).transpose()?,
                    end_date: end.as_deref().map(parse_date).transpose()?,
                },
            )?;
            println!("Updated exhibition: {}", exhibition.title);
        }

        ExhibitionCommands::Activate { id } => {
            let exhibition = service.set_active(id, true)?;
            println!("Opened exhibition: {}", exhibition.title);
        }

        ExhibitionCommands::Deactivate { id } => {
            let exhibition = service.set_active(id, false)?;
            println!("Closed exhibition: {}", exhibition.title);
        }

        ExhibitionCommands::Delete { id, force } => {
            let exhibition = service.require(id)?;

            if !force {
                println!("About to delete exhibition: {}", exhibition.title);
                println!("Tours visiting it will be unlinked.");
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(id)?;
            println!("Deleted exhibition: {}", exhibition.title);
        }
    }

    Ok(())
}
