use std::time::Duration;

use article_share_core::ArticleRecord;
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Article Share".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Extract an article and draft a share summary\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{step}/{total}]").dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print a labelled value under the current step
pub fn print_field(label: &str, value: &str) {
    eprintln!("  {} {}", format!("{label}:").dimmed(), value.bright_white());
}

/// Print what extraction found
pub fn print_article_details(record: &ArticleRecord) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Article".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    print_field("Title", if record.title.is_empty() { "(none)" } else { &record.title });
    print_field("Byline", &record.metadata_line());
    print_field("Words", &record.word_count().to_string());
    eprintln!();
}

/// Print per-stage timings; slow stages are highlighted
pub fn print_timing_summary(timings: &[(&str, Duration)]) {
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Timing Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    let mut total = Duration::ZERO;
    for (label, duration) in timings {
        total += *duration;
        let ms = duration.as_secs_f64() * 1000.0;
        let label = format!("{label}:");
        if ms < 100.0 {
            eprintln!("  {} {:>8.2}ms", label.dimmed(), ms);
        } else {
            eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_yellow());
        }
    }

    eprintln!("  {} {:>8.2}ms\n", "Total:".bold().dimmed(), total.as_secs_f64() * 1000.0);
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
