use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Resolution of the bar; progress fractions are scaled to this.
const PROGRESS_SCALE: u64 = 1000;
const TIP: &str = "Press Ctrl-C to stop after the current wave";

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} [{bar:32.green/bright_black}] {percent:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▆▁")
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
}

/// Styles `span` as the scan progress bar. Call before entering it.
pub fn prepare(span: &Span) {
    span.pb_set_style(&bar_style());
    span.pb_set_length(PROGRESS_SCALE);
    span.pb_set_message(&format!("{}", TIP.italic().white()));
}

/// Progress callback for the scanner, moving the bar of `span`.
pub fn reporter(span: Span) -> impl FnMut(f64) + Send + 'static {
    move |fraction: f64| {
        let position = (fraction.clamp(0.0, 1.0) * PROGRESS_SCALE as f64).round() as u64;
        span.pb_set_position(position);
    }
}

pub fn report_found(span: &Span, count: usize) {
    span.pb_set_message(&format!(
        "Identified {} hubs so far...",
        count.to_string().green().bold()
    ));
}
