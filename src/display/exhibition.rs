//! Exhibition display formatting

use crate::models::Exhibition;

use super::clip_column;

/// Format a list of exhibitions as a table
pub fn format_exhibition_list(exhibitions: &[Exhibition]) -> String {
    if exhibitions.is_empty() {
        return "No exhibitions found.".to_string();
    }

    let title_width = exhibitions
        .iter()
        .map(|e| e.title.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 40);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<title_width$}  {:<23}  {}\n",
        "ID",
        "Title",
        "Runs",
        "Status",
        title_width = title_width,
    ));
    output.push_str(&format!(
        "{:->5}  {:-<title_width$}  {:-<23}  {:-<8}\n",
        "",
        "",
        "",
        "",
        title_width = title_width,
    ));

    for exhibition in exhibitions {
        output.push_str(&format!(
            "{:>5}  {:<title_width$}  {:<23}  {}\n",
            exhibition
                .id
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            clip_column(&exhibition.title, title_width),
            date_range(exhibition),
            if exhibition.is_active { "Active" } else { "Closed" },
            title_width = title_width,
        ));
    }

    output
}

/// Format a single exhibition's details
pub fn format_exhibition_details(exhibition: &Exhibition) -> String {
    let mut output = String::new();

    output.push_str(&format!("Exhibition: {}\n", exhibition.title));
    if let Some(id) = exhibition.id {
        output.push_str(&format!("  ID:          {}\n", id));
    }
    if let Some(kind) = &exhibition.exhibition_type {
        output.push_str(&format!("  Type:        {}\n", kind));
    }
    if let Some(period) = &exhibition.period {
        output.push_str(&format!("  Period:      {}\n", period));
    }
    if let Some(artists) = &exhibition.artists {
        output.push_str(&format!("  Artists:     {}\n", artists));
    }
    output.push_str(&format!("  Runs:        {}\n", date_range(exhibition)));
    output.push_str(&format!(
        "  Active:      {}\n",
        if exhibition.is_active { "Yes" } else { "No" }
    ));
    if let Some(description) = &exhibition.description {
        output.push_str(&format!("\n{}\n", description));
    }

    output
}

fn date_range(exhibition: &Exhibition) -> String {
    match (exhibition.start_date, exhibition.end_date) {
        (Some(start), Some(end)) => format!("{} – {}", start, end),
        (Some(start), None) => format!("from {}", start),
        (None, Some(end)) => format!("until {}", end),
        (None, None) => "open-ended".to_string(),
    }
}
