//! Per-collection schedule gate.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// How a run was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunTrigger {
    Manual,
    Scheduled,
}

impl RunTrigger {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled)
    }
}

impl fmt::Display for RunTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => f.write_str("Manual"),
            Self::Scheduled => f.write_str("Scheduled"),
        }
    }
}

/// When a collection is refreshed by scheduled runs.
///
/// Accepts either a table (`{ type = "weekly", day_of_week = "friday" }`) or
/// a shorthand string (`"daily"`, `"never"`, `"weekly(friday)"`,
/// `"monthly(15)"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "ScheduleRepr")]
pub enum Schedule {
    #[default]
    Daily,
    Weekly {
        day: Weekday,
    },
    Monthly {
        day: u32,
    },
    Never,
}

impl Schedule {
    /// Whether the collection is due on `today`. A monthly schedule on a day
    /// the month does not have never fires that month.
    pub fn should_run(&self, today: NaiveDate) -> bool {
        match self {
            Self::Daily => true,
            Self::Never => false,
            Self::Weekly { day } => today.weekday() == *day,
            Self::Monthly { day } => today.day() == *day,
        }
    }

    /// Gate applied by the run orchestrator. Manual runs bypass the schedule.
    pub fn is_due(&self, trigger: RunTrigger, today: NaiveDate) -> bool {
        !trigger.is_scheduled() || self.should_run(today)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.write_str("daily"),
            Self::Never => f.write_str("never"),
            Self::Weekly { day } => write!(f, "weekly({})", weekday_name(*day)),
            Self::Monthly { day } => write!(f, "monthly({day})"),
        }
    }
}

impl Serialize for Schedule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (kind, arg) = match s.split_once('(') {
            Some((kind, rest)) => {
                let arg = rest
                    .strip_suffix(')')
                    .ok_or_else(|| format!("unbalanced parenthesis in schedule '{s}'"))?;
                (kind.trim().to_string(), Some(arg.trim().to_string()))
            }
            None => (s.clone(), None),
        };
        build(&kind, arg.as_deref(), arg.as_deref())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScheduleRepr {
    Short(String),
    Full(ScheduleTable),
}

#[derive(Deserialize)]
struct ScheduleTable {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, alias = "dayOfWeek")]
    day_of_week: Option<String>,
    #[serde(default, alias = "dayOfMonth")]
    day_of_month: Option<u32>,
}

impl TryFrom<ScheduleRepr> for Schedule {
    type Error = String;

    fn try_from(repr: ScheduleRepr) -> Result<Self, Self::Error> {
        match repr {
            ScheduleRepr::Short(s) => s.parse(),
            ScheduleRepr::Full(table) => {
                let day_of_month = table.day_of_month.map(|d| d.to_string());
                build(
                    &table.kind.to_lowercase(),
                    table.day_of_week.as_deref(),
                    day_of_month.as_deref(),
                )
            }
        }
    }
}

fn build(kind: &str, weekday: Option<&str>, month_day: Option<&str>) -> Result<Schedule, String> {
    match kind {
        "daily" => Ok(Schedule::Daily),
        "never" => Ok(Schedule::Never),
        "weekly" => {
            let day = match weekday {
                Some(name) => parse_weekday(name)?,
                None => Weekday::Sun,
            };
            Ok(Schedule::Weekly { day })
        }
        "monthly" => {
            let day = match month_day {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| format!("invalid day of month '{raw}'"))?,
                None => 1,
            };
            if !(1..=31).contains(&day) {
                return Err(format!("day of month {day} is outside 1..=31"));
            }
            Ok(Schedule::Monthly { day })
        }
        other => Err(format!(
            "unknown schedule type '{other}' (expected daily, weekly, monthly or never)"
        )),
    }
}

fn parse_weekday(name: &str) -> Result<Weekday, String> {
    let lower = name.trim().to_lowercase();
    // chrono also accepts "mon"; only full names are valid here.
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .find(|d| weekday_name(*d) == lower)
    .ok_or_else(|| format!("unknown weekday '{name}'"))
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
