//! Dashboard and notification display formatting

use crate::models::Notification;
use crate::services::Dashboard;

/// Format the overview screen
pub fn format_dashboard(dashboard: &Dashboard, symbol: &str) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("Overview for {}\n", dashboard.month.label()));
    output.push_str(&format!("{}\n", "=".repeat(40)));
    output.push_str(&format!("Monthly expenses:  {:>14}\n", money(dashboard.total_monthly)));
    output.push_str(&format!("Income this month: {:>14}\n", money(dashboard.month_income)));
    output.push_str(&format!("Balance:           {:>14}\n", money(dashboard.balance)));
    if dashboard.balance.is_negative() {
        output.push_str("Warning: expenses exceed this month's income\n");
    }
    output.push_str(&format!(
        "Expenses: {} active of {} ({} paid this month)\n",
        dashboard.active_count, dashboard.expense_count, dashboard.paid_count
    ));
    if dashboard.unread_notifications > 0 {
        output.push_str(&format!(
            "Unread notifications: {}\n",
            dashboard.unread_notifications
        ));
    }
    if dashboard.active_goals > 0 {
        output.push_str(&format!("Active goals: {}\n", dashboard.active_goals));
    }

    output.push('\n');
    output.push_str("By category\n");
    output.push_str(&format!("{}\n", "-".repeat(40)));
    for (category, total) in &dashboard.category_totals {
        let share = total.percent_of(dashboard.total_monthly);
        output.push_str(&format!(
            "{:<14} {:>14}  {:>5.1}%\n",
            category.label(),
            money(*total),
            share
        ));
    }

    output.push('\n');
    output.push_str("Upcoming\n");
    output.push_str(&format!("{}\n", "-".repeat(40)));
    if dashboard.upcoming.is_empty() {
        output.push_str("Nothing due in the next few days.\n");
    }
    for item in &dashboard.upcoming {
        let when = match item.days_until_due {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };
        output.push_str(&format!(
            "{} {:<20} {:>12}  {} ({})\n",
            if item.paid { "[x]" } else { "[ ]" },
            item.name,
            money(item.value),
            when,
            item.due_date
        ));
    }

    output
}

/// Format notifications, newest first
pub fn format_notification_list(notifications: &[&Notification]) -> String {
    if notifications.is_empty() {
        return "No notifications.".to_string();
    }

    let mut output = String::new();
    for notification in notifications {
        output.push_str(&format!(
            "{} {}  {}  {}\n",
            if notification.read { " " } else { "*" },
            notification.id,
            notification.date.format("%Y-%m-%d %H:%M"),
            notification.message
        ));
    }
    output
}
