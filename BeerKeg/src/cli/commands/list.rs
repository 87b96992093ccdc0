//! CLI command for listing archive contents

use std::path::Path;

use crate::archive::ArchiveOperations;

/// Format byte size for human-readable output
fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}K", bytes as f64 / 1024.0)
    } else {
        format!("{bytes}")
    }
}

pub fn execute(source: &Path) -> anyhow::Result<()> {
    let directory = ArchiveOperations::list(source)?;

    println!("{:<14}  {:>10}  {:>5}  {:>10}", "NAME", "SIZE", "FLAGS", "OFFSET");
    for entry in &directory.entries {
        println!(
            "{:<14}  {:>10}  {:>5}  {:#010x}",
            entry.name, entry.size, entry.flags, entry.offset
        );
    }

    let total: u64 = directory.entries.iter().map(|e| u64::from(e.size)).sum();
    println!();
    println!(
        "{} entries, {} total (reserved: {:#06x} {:#06x})",
        directory.entries.len(),
        format_size(total),
        directory.header.reserved_a,
        directory.header.reserved_b
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512");
        assert_eq!(format_size(2048), "2.0K");
        assert_eq!(format_size(3 * 1_048_576), "3.0M");
    }
}
