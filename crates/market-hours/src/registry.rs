use std::collections::HashSet;

use chrono::Weekday;
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketHoursError {
    #[error("Exchange '{0}': active weekday set is empty")]
    EmptyWeekdays(String),

    #[error("Exchange '{0}': open time must be before close time")]
    InvertedHours(String),

    #[error("Exchange '{0}': invalid time of day {1:02}:{2:02}")]
    InvalidTime(String, u32, u32),

    #[error("Duplicate exchange name: '{0}'")]
    DuplicateName(String),
}

/// Immutable schedule of one trading venue.
///
/// `open_time`/`close_time` are (hour, minute) on the exchange's own
/// wall-clock. Overnight sessions are not modeled: open must precede close
/// within the same local day.
#[derive(Debug, Clone)]
pub struct ExchangeDefinition {
    pub name: String,
    pub time_zone: Tz,
    pub open_time: (u32, u32),
    pub close_time: (u32, u32),
    pub active_weekdays: HashSet<Weekday>,
    /// Continuous markets (crypto). Gating fields are display-only then.
    pub always_open: bool,
}

impl ExchangeDefinition {
    /// Venue trading a fixed local window on the given weekdays.
    pub fn weekdays(
        name: &str,
        time_zone: Tz,
        open_time: (u32, u32),
        close_time: (u32, u32),
        days: &[Weekday],
    ) -> Self {
        Self {
            name: name.to_string(),
            time_zone,
            open_time,
            close_time,
            active_weekdays: days.iter().copied().collect(),
            always_open: false,
        }
    }

    /// 24/7 venue. Display hours span the whole day.
    pub fn continuous(name: &str, time_zone: Tz) -> Self {
        Self {
            name: name.to_string(),
            time_zone,
            open_time: (0, 0),
            close_time: (23, 59),
            active_weekdays: [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ]
            .into_iter()
            .collect(),
            always_open: true,
        }
    }
}

const WEEKDAYS_MON_FRI: &[Weekday] = &[
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Fixed, ordered set of exchange definitions. Validated once at
/// construction; read-only afterwards. Order is display order.
#[derive(Debug, Clone)]
pub struct MarketRegistry {
    exchanges: Vec<ExchangeDefinition>,
}

impl MarketRegistry {
    pub fn new(exchanges: Vec<ExchangeDefinition>) -> Result<Self, MarketHoursError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for def in &exchanges {
            if !seen.insert(def.name.as_str()) {
                return Err(MarketHoursError::DuplicateName(def.name.clone()));
            }
            for (hour, minute) in [def.open_time, def.close_time] {
                if hour > 23 || minute > 59 {
                    return Err(MarketHoursError::InvalidTime(def.name.clone(), hour, minute));
                }
            }
            let open_minutes = def.open_time.0 * 60 + def.open_time.1;
            let close_minutes = def.close_time.0 * 60 + def.close_time.1;
            if open_minutes >= close_minutes {
                return Err(MarketHoursError::InvertedHours(def.name.clone()));
            }
            if !def.always_open && def.active_weekdays.is_empty() {
                return Err(MarketHoursError::EmptyWeekdays(def.name.clone()));
            }
        }
        Ok(Self { exchanges })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExchangeDefinition> {
        self.exchanges.iter()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

/// The dashboard's default venue set.
pub fn default_markets() -> Vec<ExchangeDefinition> {
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::{Hong_Kong, Tokyo};
    use chrono_tz::Europe::{Berlin, London, Zurich};

    vec![
        ExchangeDefinition::weekdays("NYSE/Nasdaq", New_York, (9, 30), (16, 0), WEEKDAYS_MON_FRI),
        ExchangeDefinition::weekdays("Xetra (Frankfurt)", Berlin, (9, 0), (17, 30), WEEKDAYS_MON_FRI),
        ExchangeDefinition::weekdays("LSE (London)", London, (8, 0), (16, 30), WEEKDAYS_MON_FRI),
        ExchangeDefinition::weekdays("SIX (Zurich)", Zurich, (9, 0), (17, 30), WEEKDAYS_MON_FRI),
        ExchangeDefinition::weekdays("Tokyo (TSE)", Tokyo, (9, 0), (15, 0), WEEKDAYS_MON_FRI),
        ExchangeDefinition::weekdays("Hong Kong (HKEX)", Hong_Kong, (9, 30), (16, 0), WEEKDAYS_MON_FRI),
        ExchangeDefinition::continuous("Crypto (BTC/ETH)", chrono_tz::UTC),
    ]
}
