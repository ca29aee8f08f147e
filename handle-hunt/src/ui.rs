//! Terminal display logic for the `check` and `platforms` subcommands.
//!
//! Colored verdict lines, grouped batch output, the spinner, headers, and
//! the summary bar. Uses only the `console` crate.

use console::{pad_str, style, Alignment, Term};
use handle_hunt_lib::Verdict;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const PLATFORM_WIDTH: usize = 12;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: String) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

pub fn print_header(handle: &str, platform_count: usize, timeout: Duration) {
    println!(
        "{} {} {}",
        style("handle-hunt").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "Checking '{}' on {} platform{}",
            handle,
            platform_count,
            plural(platform_count)
        ))
        .dim(),
    );
    println!(
        "{}",
        style(format!("Timeout: {}s per platform", timeout.as_secs())).dim()
    );
    println!();
}

// ── Single result line ───────────────────────────────────────────────────────

/// Print one verdict line.
///
/// If `counter` is Some((current, total)), a progress prefix like `[3/8]` is shown.
pub fn print_result(verdict: &Verdict, counter: Option<(usize, usize)>) {
    let padded = pad_str(verdict.platform(), PLATFORM_WIDTH, Alignment::Left, Some(".."));

    let prefix = match counter {
        Some((cur, total)) => format!("{} ", style(format!("[{}/{}]", cur, total)).dim()),
        None => String::new(),
    };

    println!(
        "  {}{}  {}  {}",
        prefix,
        style(&padded).white(),
        status_label(verdict),
        style(detail(verdict)).dim(),
    );
}

// ── Grouped batch output ─────────────────────────────────────────────────────

/// Print verdicts grouped by status. Empty sections are omitted.
pub fn print_grouped_results(verdicts: &[Verdict]) {
    let available: Vec<&Verdict> = verdicts
        .iter()
        .filter(|v| v.available() == Some(true))
        .collect();
    let taken: Vec<&Verdict> = verdicts
        .iter()
        .filter(|v| v.available() == Some(false))
        .collect();
    let unknown: Vec<&Verdict> = verdicts
        .iter()
        .filter(|v| v.available().is_none())
        .collect();

    let sections = [
        ("Available", available, style("●").green()),
        ("Taken", taken, style("●").red()),
        ("Unknown", unknown, style("●").yellow()),
    ];

    for (title, group, bullet) in sections {
        if group.is_empty() {
            continue;
        }
        println!("  {} {} ({})", bullet, style(title).bold(), group.len());
        for verdict in group {
            let padded = pad_str(verdict.platform(), PLATFORM_WIDTH, Alignment::Left, Some(".."));
            println!("    {}  {}", style(&padded).white(), style(detail(verdict)).dim());
        }
        println!();
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with colored counts.
pub fn print_summary(verdicts: &[Verdict], duration: Duration) {
    let total = verdicts.len();
    let available = verdicts.iter().filter(|v| v.available() == Some(true)).count();
    let taken = verdicts.iter().filter(|v| v.available() == Some(false)).count();
    let unknown = total - available - taken;

    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} platform{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(total).bold(),
        plural(total),
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", available)).green(),
        style("|").dim(),
        style(format!("{} taken", taken)).red(),
        style("|").dim(),
        style(format!("{} unknown", unknown)).yellow(),
    );
}

/// Print the platform list, one id per line.
pub fn print_platforms(platforms: &[String]) {
    for platform in platforms {
        println!("{}", platform);
    }
}

fn status_label(verdict: &Verdict) -> String {
    match verdict.available() {
        Some(true) => style("AVAILABLE").green().bold().to_string(),
        Some(false) => style("TAKEN").red().bold().to_string(),
        None if verdict.is_unsupported() => style("UNSUPPORTED").dim().to_string(),
        None => style("UNKNOWN").yellow().to_string(),
    }
}

/// Profile URL for decided verdicts, the message otherwise.
fn detail(verdict: &Verdict) -> &str {
    match (verdict.available(), verdict.profile_url()) {
        (Some(_), Some(url)) => url,
        _ => verdict.message(),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
