use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{ReceiptsError, Result};

/// Timezone the export's wall-clock timestamps are written in.
pub const DEFAULT_TIMEZONE: &str = "Europe/Stockholm";

/// Layout of `transactionTimestamp` values.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Timezone lookup ───────────────────────────────────────────────────────────

/// Resolve an IANA timezone name such as `"Europe/Stockholm"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ReceiptsError::Config(format!("unknown timezone: {name}")))
}

// ── Local timestamp parsing ───────────────────────────────────────────────────

/// Parse a zone-less `YYYY-MM-DD HH:MM:SS` string as wall-clock time in `tz`.
///
/// During a DST fall-back overlap the later instant (standard time) wins. A
/// time that falls into a spring-forward gap is read with the offset in force
/// before the transition, which moves it forward by the length of the gap.
pub fn parse_local_timestamp(raw: &str, tz: Tz) -> Result<DateTime<Tz>> {
    let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|e| {
        ReceiptsError::TimestampParse {
            raw: raw.to_string(),
            reason: e.to_string(),
        }
    })?;

    resolve_local(naive, tz).ok_or_else(|| ReceiptsError::TimestampParse {
        raw: raw.to_string(),
        reason: format!("not representable in {}", tz.name()),
    })
}

/// Map a local wall-clock time in `tz` to a single instant.
fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(_, latest) => Some(latest),
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(naive - chrono::Duration::days(1)))
                .fix();
            debug!("{} falls into a DST gap in {}, using {}", naive, tz.name(), before);
            before
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&tz))
        }
    }
}

// ── Window ────────────────────────────────────────────────────────────────────

/// Half-open interval `[from, to)` together with the timezone that local
/// timestamps are interpreted in.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub tz: Tz,
    pub from: DateTime<Tz>,
    pub to: DateTime<Tz>,
}

impl Window {
    /// Window between two instants; timestamps are read in `from`'s zone.
    ///
    /// `from > to` is accepted and simply contains nothing.
    pub fn new(from: DateTime<Tz>, to: DateTime<Tz>) -> Self {
        Self {
            tz: from.timezone(),
            from,
            to: to.with_timezone(&from.timezone()),
        }
    }

    /// Window from local midnight of `from` up to local midnight of `to`.
    pub fn from_dates(tz: Tz, from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(ReceiptsError::Config(format!(
                "window start {from} is after window end {to}"
            )));
        }
        Ok(Self::new(local_midnight(from, tz)?, local_midnight(to, tz)?))
    }

    /// The whole calendar year `year` in `tz`.
    pub fn calendar_year(tz: Tz, year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| ReceiptsError::Config(format!("year out of range: {year}")))?;
        let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)
            .ok_or_else(|| ReceiptsError::Config(format!("year out of range: {year}")))?;
        Self::from_dates(tz, start, end)
    }

    /// `true` when `from <= instant < to`.
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        *instant >= self.from && *instant < self.to
    }
}

fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Tz>> {
    resolve_local(date.and_time(chrono::NaiveTime::MIN), tz)
        .ok_or_else(|| ReceiptsError::Config(format!("{date} has no midnight in {}", tz.name())))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
