//! Tour display formatting
//!
//! Formats tour bookings for terminal output in table and detail views.

use crate::models::Tour;

use super::{clip_column, format_timestamp};

/// Format a list of tours as a table
pub fn format_tour_list(tours: &[Tour], datetime_format: &str) -> String {
    if tours.is_empty() {
        return "No tours found.".to_string();
    }

    let name_width = tours
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<16}  {:<name_width$}  {:>6}  {:<9}  {}\n",
        "ID",
        "Date",
        "Name",
        "Guests",
        "Status",
        "Exhibition",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:->5}  {:-<16}  {:-<name_width$}  {:->6}  {:-<9}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for tour in tours {
        output.push_str(&format!(
            "{:>5}  {:<16}  {:<name_width$}  {:>6}  {:<9}  {}\n",
            tour.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            format_timestamp(&tour.date, datetime_format),
            clip_column(&tour.name, name_width),
            tour.number_of_guests,
            tour.status,
            exhibition_label(tour),
            name_width = name_width,
        ));
    }

    output.push_str(&format!("\nTotal: {} tours\n", tours.len()));
    output
}

/// Format a single tour's details
pub fn format_tour_details(tour: &Tour, datetime_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Tour #{}\n",
        tour.id.map_or_else(|| "-".to_string(), |id| id.to_string())
    ));
    output.push_str(&format!("  Name:        {}\n", tour.name));
    output.push_str(&format!("  Email:       {}\n", tour.email));
    if let Some(phone) = &tour.phone_number {
        output.push_str(&format!("  Phone:       {}\n", phone));
    }
    output.push_str(&format!("  Guests:      {}\n", tour.number_of_guests));
    output.push_str(&format!(
        "  Date:        {}\n",
        format_timestamp(&tour.date, datetime_format)
    ));
    output.push_str(&format!("  Status:      {}\n", tour.status));
    output.push_str(&format!("  Exhibition:  {}\n", exhibition_label(tour)));
    if let Some(notes) = &tour.notes {
        output.push_str(&format!("  Notes:       {}\n", notes));
    }
    output.push_str(&format!(
        "  Created:     {}\n",
        format_timestamp(&tour.created_at.naive_utc(), datetime_format)
    ));
    output.push_str(&format!(
        "  Updated:     {}\n",
        format_timestamp(&tour.updated_at.naive_utc(), datetime_format)
    ));

    output
}

fn exhibition_label(tour: &Tour) -> String {
    match (&tour.exhibition, &tour.requested_exhibition) {
        (Some(link), _) => link.label(),
        (None, Some(requested)) => format!("{} (requested)", requested),
        (None, None) => "-".to_string(),
    }
}
