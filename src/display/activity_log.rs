//! Activity log display formatting

use crate::audit::ActivityLog;

use super::format_timestamp;

/// Format activity log rows as a table, newest first as given
pub fn format_activity_log(logs: &[ActivityLog], datetime_format: &str) -> String {
    if logs.is_empty() {
        return "No activity found.".to_string();
    }

    let user_width = logs
        .iter()
        .map(|l| l.username().map_or(1, |u| u.chars().count()))
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16}  {:<8}  {:<user_width$}  {:<15}  {}\n",
        "When",
        "Action",
        "User",
        "IP",
        "Target",
        user_width = user_width,
    ));
    output.push_str(&format!(
        "{:-<16}  {:-<8}  {:-<user_width$}  {:-<15}  {:-<6}\n",
        "",
        "",
        "",
        "",
        "",
        user_width = user_width,
    ));

    for log in logs {
        output.push_str(&format!(
            "{:<16}  {:<8}  {:<user_width$}  {:<15}  {}\n",
            format_timestamp(&log.created_at().naive_utc(), datetime_format),
            log.action().to_string(),
            log.username().unwrap_or("-"),
            log.ip_address().unwrap_or("-"),
            log.target_data().unwrap_or(""),
            user_width = user_width,
        ));
    }

    output
}
