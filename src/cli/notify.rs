//! Notification CLI commands
//!
//! Due-date alerts are generated on every start; `watch` keeps checking on
//! an interval until interrupted or a tick budget runs out.

use std::time::Duration;

use clap::Subcommand;
use tracing::{debug, info};

use crate::config::Settings;
use crate::display::format_notification_list;
use crate::error::{PocketError, PocketResult};
use crate::models::Notification;
use crate::services::Ticker;
use crate::tracker::Tracker;

/// Notification subcommands
#[derive(Subcommand)]
pub enum NotifyCommands {
    /// Run a due-date check now
    Check,

    /// List notifications, newest first
    List {
        /// Only show unread notifications
        #[arg(short, long)]
        unread: bool,
    },

    /// Mark notifications as read
    Read {
        /// Notification ID
        #[arg(required_unless_present = "all")]
        id: Option<String>,

        /// Mark every notification as read
        #[arg(short, long)]
        all: bool,
    },

    /// Remove all notifications
    Clear,

    /// Keep checking for due-date alerts on an interval
    Watch {
        /// Seconds between checks (defaults to the configured interval)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many checks
        #[arg(short, long)]
        count: Option<u32>,
    },
}

/// Handle a notification command
pub fn handle_notify_command(
    tracker: &mut Tracker,
    settings: &Settings,
    cmd: NotifyCommands,
) -> PocketResult<()> {
    match cmd {
        NotifyCommands::Check => {
            let added = tracker.check_notifications();
            if added == 0 {
                println!("No new notifications.");
            } else {
                println!("{} new notification(s):", added);
                let fresh: Vec<&Notification> = tracker.notifications().iter().take(added).collect();
                print!("{}", format_notification_list(&fresh));
            }
        }

        NotifyCommands::List { unread } => {
            let notifications: Vec<&Notification> = tracker
                .notifications()
                .iter()
                .filter(|n| !unread || !n.read)
                .collect();
            println!("{}", format_notification_list(&notifications).trim_end());
            println!();
            println!("{} unread", tracker.unread_count());
        }

        NotifyCommands::Read { id, all } => {
            if all {
                let changed = tracker.mark_all_notifications_read();
                println!("Marked {} notification(s) as read", changed);
            } else if let Some(reference) = id {
                let id = tracker
                    .notifications()
                    .iter()
                    .map(|n| n.id)
                    .find(|id| id.matches(&reference))
                    .ok_or_else(|| PocketError::notification_not_found(reference.as_str()))?;
                tracker.mark_notification_read(id)?;
                println!("Marked notification as read");
            }
        }

        NotifyCommands::Clear => {
            let removed = tracker.clear_notifications();
            println!("Removed {} notification(s)", removed);
        }

        NotifyCommands::Watch { interval, count } => {
            let interval = interval
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| settings.check_interval());
            watch(tracker, interval, count);
        }
    }

    Ok(())
}

/// Check for due-date alerts on every tick, printing new ones as they appear
fn watch(tracker: &mut Tracker, interval: Duration, count: Option<u32>) {
    println!(
        "Watching for due dates every {}s (Ctrl+C to stop)",
        interval.as_secs()
    );

    let ticker = Ticker::start(interval);
    let mut checks = 0u32;
    while count.map_or(true, |limit| checks < limit) {
        let Some(at) = ticker.next_tick() else {
            break;
        };
        checks += 1;
        debug!(?at, checks, "due-date check");

        let added = tracker.check_notifications();
        if added > 0 {
            info!(added, "new due-date alerts");
            for notification in tracker.notifications().iter().take(added) {
                println!("{}", notification.message);
            }
        }
    }
}
