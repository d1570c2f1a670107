//! Setting CLI commands

use clap::Subcommand;

use crate::audit::AuditContext;
use crate::display::clip_column;
use crate::error::GalleryResult;
use crate::services::SettingService;
use crate::storage::Storage;

/// Setting subcommands
#[derive(Subcommand)]
pub enum SettingCommands {
    /// Create a setting
    Create {
        /// Unique key, without spaces
        key: String,
        /// Initial value
        value: Option<String>,
        /// Group name (default: general)
        #[arg(short, long)]
        group: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List settings
    List {
        /// Only show one group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// List setting groups
    Groups,
    /// Change a setting's value
    Set {
        /// Setting key
        key: String,
        /// New value; omit to clear
        value: Option<String>,
    },
    /// Enable a setting
    Enable {
        /// Setting key
        key: String,
    },
    /// Disable a setting
    Disable {
        /// Setting key
        key: String,
    },
    /// Delete a setting
    Delete {
        /// Setting key
        key: String,
    },
}

/// Handle a setting command
pub fn handle_setting_command(
    storage: &Storage,
    ctx: &AuditContext,
    cmd: SettingCommands,
) -> GalleryResult<()> {
    let service = SettingService::new(storage, ctx);

    match cmd {
        SettingCommands::Create {
            key,
            value,
            group,
            description,
        } => {
            let setting = service.create(&key, value, group.as_deref(), description)?;
            println!(
                "Created setting '{}' in group '{}'",
                setting.key_name, setting.group_name
            );
        }

        SettingCommands::List { group } => {
            let settings = service.list(group.as_deref())?;

            if settings.is_empty() {
                println!("No settings found.");
                return Ok(());
            }

            println!("{:15} {:25} {:30} {}", "Group", "Key", "Value", "Active");
            println!("{}", "-".repeat(78));

            for setting in &settings {
                println!(
                    "{:15} {:25} {:30} {}",
                    clip_column(&setting.group_name, 15),
                    clip_column(&setting.key_name, 25),
                    clip_column(setting.value.as_deref().unwrap_or(""), 30),
                    if setting.is_active { "yes" } else { "no" }
                );
            }
        }

        SettingCommands::Groups => {
            for group in service.groups()? {
                println!("{}", group);
            }
        }

        SettingCommands::Set { key, value } => {
            let setting = service.set_value(&key, value)?;
            println!(
                "{} = {}",
                setting.key_name,
                setting.value.as_deref().unwrap_or("(empty)")
            );
        }

        SettingCommands::Enable { key } => {
            service.set_active(&key, true)?;
            println!("Enabled setting '{}'", key.trim());
        }

        SettingCommands::Disable { key } => {
            service.set_active(&key, false)?;
            println!("Disabled setting '{}'", key.trim());
        }

        SettingCommands::Delete { key } => {
            let setting = service.delete(&key)?;
            println!("Deleted setting '{}'", setting.key_name);
        }
    }

    Ok(())
}
