use std::time::Duration;

use crate::compare::MatchStatus;

pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

/// One-line description of a status, without colors.
pub fn describe(status: &MatchStatus, tolerance: u64) -> String {
    match status {
        MatchStatus::Match { diff_pixels: 0 } => "identical".to_string(),
        MatchStatus::Match { diff_pixels } => {
            format!("{diff_pixels} pixels, within tolerance {tolerance}")
        }
        MatchStatus::Mismatch {
            dimension_mismatch: Some((rw, rh, cw, ch)),
            ..
        } => format!("dimensions changed: {rw}x{rh} -> {cw}x{ch}"),
        MatchStatus::Mismatch {
            diff_pixels, score, ..
        } => format!("{diff_pixels} pixels, {score:.4}"),
        MatchStatus::Error(msg) => msg.clone(),
    }
}

/// Print a single comparison result line.
pub fn print_line(name: &str, status: &MatchStatus, tolerance: u64, elapsed: Duration) {
    let time_suffix = format!("  \x1b[2m{}\x1b[0m", format_duration(elapsed));
    let detail = describe(status, tolerance);

    match status {
        MatchStatus::Match { .. } => {
            println!("  \x1b[32mPASS\x1b[0m  {name}  ({detail}){time_suffix}");
        }
        MatchStatus::Mismatch { .. } => {
            println!("  \x1b[31mFAIL\x1b[0m  {name}  ({detail}){time_suffix}");
        }
        MatchStatus::Error(_) => {
            println!("  \x1b[31m ERR\x1b[0m  {name}  ({detail}){time_suffix}");
        }
    }
}

/// Print a watch-mode state change.
pub fn print_transition(poll: u64, status: &MatchStatus, tolerance: u64) {
    let label = if status.is_match() {
        "\x1b[32m   MATCH\x1b[0m"
    } else {
        "\x1b[31mMISMATCH\x1b[0m"
    };
    println!("  #{poll:<5} {label}  ({})", describe(status, tolerance));
}

/// Print the final watch summary.
pub fn print_watch_summary(polls: u64, changes: u64, errors: u64, elapsed: Duration) {
    println!();
    print!("Watch:  {polls} polls, {changes} state changes");
    if errors > 0 {
        print!(", \x1b[31m{errors} errored\x1b[0m");
    }
    println!();
    println!("Time:   {}", format_duration(elapsed));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_switch_to_seconds() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
    }

    #[test]
    fn describes_each_status() {
        assert_eq!(describe(&MatchStatus::Match { diff_pixels: 0 }, 0), "identical");
        assert_eq!(
            describe(&MatchStatus::Match { diff_pixels: 3 }, 15),
            "3 pixels, within tolerance 15"
        );
        assert_eq!(
            describe(
                &MatchStatus::Mismatch {
                    diff_pixels: 20,
                    score: 0.1,
                    dimension_mismatch: None
                },
                15
            ),
            "20 pixels, 0.1000"
        );
        assert_eq!(
            describe(
                &MatchStatus::Mismatch {
                    diff_pixels: 20,
                    score: 0.1,
                    dimension_mismatch: Some((6, 31, 6, 30))
                },
                15
            ),
            "dimensions changed: 6x31 -> 6x30"
        );
    }
}
