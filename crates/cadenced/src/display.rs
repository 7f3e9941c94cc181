//! Human-readable rendering of events and snapshots

use cadence_api::{ActivityItem, EventPayload, Phase, SessionSnapshot};
use cadence_util::{format_countdown, format_duration};

const BAR_WIDTH: usize = 20;

fn item_name(items: &[ActivityItem], index: Option<usize>) -> &str {
    index
        .and_then(|i| items.get(i))
        .map_or("?", |item| item.name.as_str())
}

/// One line describing an event, or None for events not worth printing
pub fn describe_event(payload: &EventPayload, items: &[ActivityItem]) -> Option<String> {
    let line = match payload {
        EventPayload::SessionStarted {
            item_count,
            total_duration,
            ..
        } => format!(
            "Session started: {} items, {}",
            item_count,
            format_duration(*total_duration)
        ),
        EventPayload::PhaseEntered {
            phase,
            item_index,
            duration,
            ..
        } => match phase {
            Phase::Preparing => format!("Get ready ({})", format_duration(*duration)),
            Phase::Active => format!(
                "Go: {} ({}/{}, {})",
                item_name(items, *item_index),
                item_index.map_or(0, |i| i + 1),
                items.len(),
                format_duration(*duration)
            ),
            Phase::Resting => {
                let next = item_name(items, item_index.map(|i| i + 1));
                format!("Rest ({}), next: {}", format_duration(*duration), next)
            }
            Phase::Idle | Phase::Completed => return None,
        },
        EventPayload::Paused { time_remaining, .. } => {
            format!("Paused with {} left", format_countdown(*time_remaining))
        }
        EventPayload::Resumed { time_remaining, .. } => {
            format!("Resumed, {} left", format_countdown(*time_remaining))
        }
        EventPayload::SessionCompleted {
            total_active,
            items_completed,
            ..
        } => format!(
            "Done! {} items in {}",
            items_completed,
            format_duration(*total_active)
        ),
        EventPayload::SessionStopped { phase, .. } => format!("Stopped during {}", phase),
        EventPayload::Shutdown => return None,
    };
    Some(line)
}

/// Compact status line for the current snapshot
pub fn status_line(snapshot: &SessionSnapshot, items: &[ActivityItem]) -> String {
    let label = match snapshot.phase {
        Phase::Active => item_name(items, snapshot.item_index).to_string(),
        phase => phase.to_string(),
    };
    let paused = if snapshot.is_paused { " (paused)" } else { "" };

    format!(
        "{:<16} {:>8}{} [{}] {:>3}%",
        label,
        format_countdown(snapshot.time_remaining),
        paused,
        progress_bar(snapshot.segment_progress, BAR_WIDTH),
        (snapshot.overall_progress * 100.0).round() as u32
    )
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_util::SessionId;
    use std::time::Duration;

    fn items() -> Vec<ActivityItem> {
        vec![
            ActivityItem::new("squats", "Squats"),
            ActivityItem::new("plank", "Plank"),
        ]
    }

    #[test]
    fn describes_active_and_rest() {
        let items = items();
        let active = EventPayload::PhaseEntered {
            session_id: SessionId::new(),
            phase: Phase::Active,
            item_index: Some(0),
            duration: Duration::from_secs(30),
        };
        assert_eq!(
            describe_event(&active, &items).as_deref(),
            Some("Go: Squats (1/2, 30s)")
        );

        let rest = EventPayload::PhaseEntered {
            session_id: SessionId::new(),
            phase: Phase::Resting,
            item_index: Some(0),
            duration: Duration::from_secs(10),
        };
        assert_eq!(
            describe_event(&rest, &items).as_deref(),
            Some("Rest (10s), next: Plank")
        );
    }

    #[test]
    fn skips_silent_events() {
        assert!(describe_event(&EventPayload::Shutdown, &items()).is_none());
    }

    #[test]
    fn status_line_shows_countdown_and_progress() {
        let snapshot = SessionSnapshot {
            phase: Phase::Active,
            item_index: Some(1),
            item_count: 2,
            time_remaining: Duration::from_secs(15),
            phase_duration: Duration::from_secs(30),
            segment_progress: 0.5,
            overall_progress: 0.75,
            is_paused: true,
            ..SessionSnapshot::idle(2)
        };

        let line = status_line(&snapshot, &items());
        assert!(line.starts_with("Plank"));
        assert!(line.contains("00:15 (paused)"));
        assert!(line.contains("[##########----------]"));
        assert!(line.ends_with(" 75%"));
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "----");
        assert_eq!(progress_bar(1.0, 4), "####");
        assert_eq!(progress_bar(7.0, 4), "####");
    }
}
