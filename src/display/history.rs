//! History display formatting
//!
//! Formats history rows and change payloads for terminal output.

use crate::audit::ChangePayload;
use crate::storage::StoredHistoryRow;

/// Format history rows as a table
pub fn format_history_list(rows: &[StoredHistoryRow]) -> String {
    if rows.is_empty() {
        return "No history found.".to_string();
    }

    let type_width = rows
        .iter()
        .map(|r| r.entry.object_type.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let id_width = rows
        .iter()
        .map(|r| r.entry.object_id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let user_width = rows
        .iter()
        .map(|r| r.entry.user.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:<6}  {:<type_width$}  {:<id_width$}  {:<user_width$}  {}\n",
        "Rev",
        "Status",
        "Type",
        "ID",
        "User",
        "Recorded",
        type_width = type_width,
        id_width = id_width,
        user_width = user_width,
    ));

    output.push_str(&format!(
        "{:->6}  {:-<6}  {:-<type_width$}  {:-<id_width$}  {:-<user_width$}  {:-<20}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        type_width = type_width,
        id_width = id_width,
        user_width = user_width,
    ));

    for row in rows {
        output.push_str(&format!(
            "{:>6}  {:<6}  {:<type_width$}  {:<id_width$}  {:<user_width$}  {}\n",
            row.revision_id,
            row.entry.status.to_string(),
            row.entry.object_type,
            row.entry.object_id.to_string(),
            row.entry.user,
            row.recorded_at.format("%Y-%m-%d %H:%M:%S UTC"),
            type_width = type_width,
            id_width = id_width,
            user_width = user_width,
        ));
    }

    output
}

/// Format a change payload as indented JSON
pub fn format_change_payload(payload: &ChangePayload) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string())
}

/// Format one history row with its decoded payload
pub fn format_history_details(row: &StoredHistoryRow) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Revision {}: {} {} {}\n",
        row.revision_id, row.entry.status, row.entry.object_type, row.entry.object_id
    ));
    output.push_str(&format!("  User:     {}\n", row.entry.user));
    output.push_str(&format!(
        "  Recorded: {}\n",
        row.recorded_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    match row.entry.payload() {
        Ok(payload) => {
            for line in format_change_payload(&payload).lines() {
                output.push_str(&format!("  {}\n", line));
            }
        }
        Err(e) => output.push_str(&format!("  (unreadable payload: {})\n", e)),
    }

    output
}
