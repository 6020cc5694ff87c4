use crate::classifier::JumpCountTable;

/// One human-readable line per range, in configuration order.
pub fn summary_lines(table: &JumpCountTable, asset: &str) -> Vec<String> {
    table
        .iter()
        .map(|(range, count)| {
            format!(
                "{} had a jump between {}% and {}% in a single day {} times.",
                asset, range.low, range.high, count
            )
        })
        .collect()
}

/// Text bar chart for terminal display.
///
/// Lists every configured range, zero counts included, in the same order as
/// the bars of the chart image.
pub fn text_histogram(table: &JumpCountTable, asset: &str) -> String {
    let total = table.total();
    let mut report = format!(
        "{} Jumps Frequency\nClassified: {} | Unclassified: {}\n",
        asset,
        total,
        table.unclassified()
    );

    for (range, count) in table.iter() {
        let percentage = if total > 0 {
            (count as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        // Scale: 1 character per 2% of classified changes.
        let bar_len = (percentage / 2.0).round() as usize;
        let bar = "█".repeat(bar_len);

        let label = format!("{}%", range);
        report.push_str(&format!(
            "{:<10}: {:<50} {:>6} ({:.1}%)\n",
            label, bar, count, percentage
        ));
    }

    if total == 0 {
        report.push_str("   (No jumps fell into the configured ranges)\n");
    }
    report
}
