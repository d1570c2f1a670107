//! Tour CLI commands
//!
//! Implements CLI commands for booking and reviewing tours.

use clap::Subcommand;

use crate::audit::AuditContext;
use crate::config::Settings;
use crate::display::{format_timestamp, format_tour_details, format_tour_list};
use crate::error::{GalleryError, GalleryResult};
use crate::models::TourStatus;
use crate::services::{TourBooking, TourService, TourUpdate};
use crate::storage::Storage;

use super::parse_datetime;

/// Tour subcommands
#[derive(Subcommand)]
pub enum TourCommands {
    /// Book a new tour
    Book {
        /// Visitor name
        name: String,
        /// Contact email
        email: String,
        /// Visit date and time (YYYY-MM-DD HH:MM)
        #[arg(short, long)]
        date: String,
        /// Number of guests
        #[arg(short, long, default_value = "1")]
        guests: u32,
        /// Contact phone number
        #[arg(short, long)]
        phone: Option<String>,
        /// Exhibition ID to visit
        #[arg(short, long)]
        exhibition: Option<i64>,
        /// Free-text exhibition request
        #[arg(short, long)]
        request: Option<String>,
        /// Notes for staff
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List tours
    List {
        /// Only show tours with this status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show tour details
    Show {
        /// Tour ID
        id: i64,
    },
    /// Edit booking details
    Edit {
        /// Tour ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Visit date and time (YYYY-MM-DD HH:MM)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        guests: Option<u32>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        exhibition: Option<i64>,
        #[arg(long)]
        request: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List your own bookings, latest first
    Mine,
    /// Edit one of your own bookings (email and status stay as booked)
    EditMine {
        /// Tour ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// Visit date and time (YYYY-MM-DD HH:MM)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        guests: Option<u32>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        exhibition: Option<i64>,
        #[arg(long)]
        request: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Set the booking status (pending, confirmed, cancelled)
    Status {
        /// Tour ID
        id: i64,
        /// New status
        status: String,
    },
    /// Delete a tour
    Delete {
        /// Tour ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_status(s: &str) -> GalleryResult<TourStatus> {
    TourStatus::parse(s).ok_or_else(|| {
        GalleryError::Validation(format!(
            "Invalid status '{}'. Valid statuses: pending, confirmed, cancelled",
            s
        ))
    })
}

/// Handle a tour command
pub fn handle_tour_command(
    storage: &Storage,
    ctx: &AuditContext,
    settings: &Settings,
    cmd: TourCommands,
) -> GalleryResult<()> {
    let service = TourService::new(storage, ctx);

    match cmd {
        TourCommands::Book {
            name,
            email,
            date,
            guests,
            phone,
            exhibition,
            request,
            notes,
        } => {
            let tour = service.book(TourBooking {
                name,
                email,
                phone_number: phone,
                number_of_guests: guests,
                date: parse_datetime(&date)?,
                notes,
                exhibition_id: exhibition,
                requested_exhibition: request,
            })?;

            println!(
                "Booked tour #{} for {} on {}",
                tour.id.unwrap_or_default(),
                tour.name,
                format_timestamp(&tour.date, &settings.datetime_format)
            );
        }

        TourCommands::List { status } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let tours = service.list(status)?;
            print!("{}", format_tour_list(&tours, &settings.datetime_format));
            if tours.is_empty() {
                println!();
            }
        }

        TourCommands::Show { id } => {
            let tour = service.require(id)?;
            print!("{}", format_tour_details(&tour, &settings.datetime_format));
        }

        TourCommands::Edit {
            id,
            name,
            email,
            date,
            guests,
            phone,
            exhibition,
            request,
            notes,
        } => {
            let date = date.as_deref().map(parse_datetime).transpose()?;
            let tour = service.update(
                id,
                TourUpdate {
                    name,
                    email,
                    phone_number: phone,
                    number_of_guests: guests,
                    date,
                    notes,
                    exhibition_id: exhibition,
                    requested_exhibition: request,
                },
            )?;
            println!("Updated tour #{}", tour.id.unwrap_or(id));
        }

        TourCommands::Mine => {
            let tours = service.mine()?;
            print!("{}", format_tour_list(&tours, &settings.datetime_format));
            if tours.is_empty() {
                println!();
            }
        }

        TourCommands::EditMine {
            id,
            name,
            date,
            guests,
            phone,
            exhibition,
            request,
            notes,
        } => {
            let date = date.as_deref().map(parse_datetime).transpose()?;
            let tour = service.update_own(
                id,
                TourUpdate {
                    name,
                    email: None,
                    phone_number: phone,
                    number_of_guests: guests,
                    date,
                    notes,
                    exhibition_id: exhibition,
                    requested_exhibition: request,
                },
            )?;
            println!("Updated your booking #{}", tour.id.unwrap_or(id));
        }

        TourCommands::Status { id, status } => {
            let tour = service.set_status(id, parse_status(&status)?)?;
            println!("Tour #{} is now {}", id, tour.status);
        }

        TourCommands::Delete { id, force } => {
            let tour = service.require(id)?;

            if !force {
                println!("About to delete tour #{} ({})", id, tour.name);
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(id)?;
            println!("Deleted tour #{}", id);
        }
    }

    Ok(())
}
