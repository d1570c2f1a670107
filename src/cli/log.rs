//! Activity log CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_activity_log;
use crate::error::GalleryResult;
use crate::services::{parse_date, ActivityLogService, LogFilter};
use crate::storage::Storage;

/// Activity log subcommands
#[derive(Subcommand)]
pub enum LogCommands {
    /// Search the activity log, newest first
    List {
        /// Action name, e.g. CREATE or logout
        #[arg(short, long)]
        action: Option<String>,
        /// Part of the acting username
        #[arg(short, long)]
        user: Option<String>,
        /// Day the action happened (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,
        /// One block per entry instead of a table
        #[arg(long)]
        long: bool,
    },
}

/// Handle an activity log command
pub fn handle_log_command(
    storage: &Storage,
    settings: &Settings,
    cmd: LogCommands,
) -> GalleryResult<()> {
    let service = ActivityLogService::new(storage);

    match cmd {
        LogCommands::List {
            action,
            user,
            date,
            limit,
            long,
        } => {
            let filter = LogFilter {
                action,
                user,
                date: date.as_deref().map(parse_date).transpose()?,
                limit: Some(limit.unwrap_or(settings.default_log_limit)),
            };

            let logs = service.search(&filter)?;
            if long && !logs.is_empty() {
                for log in &logs {
                    println!("{}\n", log.format_human_readable());
                }
            } else {
                print!("{}", format_activity_log(&logs, &settings.datetime_format));
            }
            if logs.is_empty() {
                println!();
            } else {
                println!(
                    "\nShowing {} of {} matching entries",
                    logs.len(),
                    service.count_matching(&filter)?
                );
            }
        }
    }

    Ok(())
}
