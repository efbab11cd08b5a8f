use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::registry::{ExchangeDefinition, MarketRegistry};

/// Countdown label of continuous markets.
pub const CONTINUOUS_LABEL: &str = "24/7";

/// Per-exchange session state, recomputed from scratch on every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub exchange_name: String,
    pub is_open: bool,
    /// Open-close window rendered in the viewer's zone, `HH:MM–HH:MM`.
    pub local_hours_label: String,
    /// `24/7`, `closes in HH:MM:SS`, or `opens in HH:MM:SS`.
    pub countdown_label: String,
}

/// Resolve a wall-clock (hour, minute) on `date` in `tz` to an instant.
///
/// DST gaps resolve to the earliest valid interpretation; the UTC reading is
/// the total fallback for the (validated, so unreachable) invalid-time case.
fn local_at(tz: Tz, date: NaiveDate, (hour, minute): (u32, u32)) -> DateTime<Tz> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Decompose a remaining duration into zero-padded `HH:MM:SS`.
///
/// Hours are whole hours and may exceed 24 (weekend countdowns). Negative
/// inputs clamp to zero; no negative countdown ever surfaces.
fn fmt_hms(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

fn fmt_hours_label(open: DateTime<Tz>, close: DateTime<Tz>, viewer_zone: Tz) -> String {
    format!(
        "{}–{}",
        open.with_timezone(&viewer_zone).format("%H:%M"),
        close.with_timezone(&viewer_zone).format("%H:%M"),
    )
}

/// Evaluate one exchange at `now`.
///
/// Pure and total over definitions that passed registry validation: same
/// inputs, same output, no error paths.
pub fn evaluate(now: DateTime<Utc>, def: &ExchangeDefinition, viewer_zone: Tz) -> SessionView {
    let now_local = now.with_timezone(&def.time_zone);
    let today = now_local.date_naive();
    let open_today = local_at(def.time_zone, today, def.open_time);
    let close_today = local_at(def.time_zone, today, def.close_time);

    if def.always_open {
        // Continuous markets never transition; hours are display-only.
        return SessionView {
            exchange_name: def.name.clone(),
            is_open: true,
            local_hours_label: fmt_hours_label(open_today, close_today, viewer_zone),
            countdown_label: CONTINUOUS_LABEL.to_string(),
        };
    }

    let is_trading_day = def.active_weekdays.contains(&now_local.weekday());
    let local_hours_label = fmt_hours_label(open_today, close_today, viewer_zone);

    // Closed interval: the exact open and close instants both count as open.
    if is_trading_day && now_local >= open_today && now_local <= close_today {
        return SessionView {
            exchange_name: def.name.clone(),
            is_open: true,
            local_hours_label,
            countdown_label: format!("closes in {}", fmt_hms(close_today - now_local)),
        };
    }

    let next_open = if is_trading_day && now_local < open_today {
        open_today
    } else {
        // The scan cannot miss for validated definitions; 24h is the safety default.
        next_open_after(def, today).unwrap_or(open_today + Duration::hours(24))
    };

    SessionView {
        exchange_name: def.name.clone(),
        is_open: false,
        local_hours_label,
        countdown_label: format!("opens in {}", fmt_hms(next_open - now_local)),
    }
}

/// First open instant strictly after `today`, scanning up to 7 days ahead
/// for a weekday in the exchange's active set.
fn next_open_after(def: &ExchangeDefinition, today: NaiveDate) -> Option<DateTime<Tz>> {
    for ahead in 1..=7u64 {
        let Some(date) = today.checked_add_days(Days::new(ahead)) else {
            continue;
        };
        if def.active_weekdays.contains(&date.weekday()) {
            return Some(local_at(def.time_zone, date, def.open_time));
        }
    }
    None
}

/// Evaluate every exchange in registry order.
pub fn evaluate_all(now: DateTime<Utc>, registry: &MarketRegistry, viewer_zone: Tz) -> Vec<SessionView> {
    registry.iter().map(|def| evaluate(now, def, viewer_zone)).collect()
}
