//! Backup display formatting

use chrono::Local;

use crate::backup::BackupInfo;

/// Format snapshots (newest first) with age and size
pub fn format_backup_list(backups: &[BackupInfo], verbose: bool) -> String {
    if backups.is_empty() {
        return "No backups found.\n".to_string();
    }

    let mut output = String::new();
    for (i, backup) in backups.iter().enumerate() {
        let age = format_duration(Local::now().signed_duration_since(backup.modified));
        if verbose {
            output.push_str(&format!(
                "{}. {}\n   Modified: {}\n   Size: {}\n   Age: {}\n\n",
                i + 1,
                backup.filename,
                backup.modified.format("%Y-%m-%d %H:%M:%S"),
                format_size(backup.size_bytes),
                age,
            ));
        } else {
            output.push_str(&format!(
                "  {}. {} ({} ago, {})\n",
                i + 1,
                backup.filename,
                age,
                format_size(backup.size_bytes),
            ));
        }
    }

    output.push_str(&format!("\nTotal: {} backup(s)\n", backups.len()));
    output
}

/// Format a duration in a human-readable way
pub fn format_duration(duration: chrono::Duration) -> String {
    let secs = duration.num_seconds().max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86_400)
    }
}

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
