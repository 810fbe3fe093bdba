//! Time formatting and parsing helpers
//!
//! Timestamps travel through templates as RFC3339 strings; every helper
//! here accepts that form or a number of epoch seconds.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, SecondsFormat, Timelike};
use chrono_tz::Tz;
use serde_json::Value as Json;
use tracing::debug;

use super::args::Args;
use crate::error::{Result, TemplateError};
use crate::value::format_rfc3339;

const SHORT: &str = "%-m/%d/%Y %-I:%M:%S %p";
const SHORT_DATE: &str = "%-m/%d/%Y";
const MEDIUM: &str = "%b %d, %Y %-I:%M:%S %p";
const KITCHEN: &str = "%-I:%M%p";
const MONTH_DAY: &str = "%-m/%-d";

fn formatted(args: &Args<'_>, format: &str) -> Result<Json> {
    let t = args.time(0)?;
    Ok(Json::String(t.format(format).to_string()))
}

pub(super) fn unix(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(args.time(0)?.timestamp().to_string()))
}

pub(super) fn rfc3339(args: &Args<'_>) -> Result<Json> {
    Ok(Json::String(args.time(0)?.to_rfc3339_opts(SecondsFormat::Secs, true)))
}

pub(super) fn short(args: &Args<'_>) -> Result<Json> {
    formatted(args, SHORT)
}

pub(super) fn short_date(args: &Args<'_>) -> Result<Json> {
    formatted(args, SHORT_DATE)
}

pub(super) fn medium(args: &Args<'_>) -> Result<Json> {
    formatted(args, MEDIUM)
}

pub(super) fn kitchen(args: &Args<'_>) -> Result<Json> {
    formatted(args, KITCHEN)
}

pub(super) fn month_day(args: &Args<'_>) -> Result<Json> {
    formatted(args, MONTH_DAY)
}

/// `in ZONE TIME` converts a timestamp into an IANA zone
pub(super) fn in_zone(args: &Args<'_>) -> Result<Json> {
    let zone = args.str(0)?;
    let t = args.time(1)?;
    let converted = convert_zone(zone, t)?;
    Ok(Json::String(format_rfc3339(&converted)))
}

pub(crate) fn convert_zone(zone: &str, t: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>> {
    debug!(%zone, "convert_zone: called");
    match zone {
        "" | "UTC" => Ok(t.to_utc().fixed_offset()),
        "Local" => Ok(t.with_timezone(&Local).fixed_offset()),
        name => {
            let tz: Tz = name.parse().map_err(|_| TemplateError::TimeZoneLookup {
                zone: name.to_string(),
            })?;
            Ok(t.with_timezone(&tz).fixed_offset())
        }
    }
}

/// `time FORMAT VALUE` parses a string with a strftime-style format
///
/// Formats without an offset are read as UTC; date-only formats as midnight.
pub(super) fn time(args: &Args<'_>) -> Result<Json> {
    let format = args.str(0)?;
    let input = args.str(1)?;
    let t = parse_time(format, input)?;
    Ok(Json::String(format_rfc3339(&t)))
}

pub(crate) fn parse_time(format: &str, input: &str) -> Result<DateTime<FixedOffset>> {
    let with_offset = DateTime::parse_from_str(input, format);
    if let Ok(t) = with_offset {
        return Ok(t);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Some(naive) = NaiveDate::parse_from_str(input, format)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc().fixed_offset());
    }

    Err(TemplateError::TimeParse {
        input: input.to_string(),
        format: format.to_string(),
        message: with_offset.map(|_| String::new()).unwrap_or_else(|e| e.to_string()),
    })
}

/// `time_unix "SECONDS"` parses epoch seconds from a string
pub(super) fn time_unix(args: &Args<'_>) -> Result<Json> {
    let input = args.str(0)?;
    let secs: i64 = input.trim().parse().map_err(|e: std::num::ParseIntError| TemplateError::NumberParse {
        input: input.to_string(),
        message: e.to_string(),
    })?;
    let t = DateTime::from_timestamp(secs, 0).ok_or_else(|| TemplateError::NumberParse {
        input: input.to_string(),
        message: "timestamp out of range".to_string(),
    })?;
    Ok(Json::String(format_rfc3339(&t)))
}

pub(super) fn year(args: &Args<'_>) -> Result<Json> {
    Ok(Json::from(args.time(0)?.year()))
}

pub(super) fn month(args: &Args<'_>) -> Result<Json> {
    Ok(Json::from(args.time(0)?.month()))
}

pub(super) fn day(args: &Args<'_>) -> Result<Json> {
    Ok(Json::from(args.time(0)?.day()))
}

pub(super) fn hour(args: &Args<'_>) -> Result<Json> {
    Ok(Json::from(args.time(0)?.hour()))
}

pub(super) fn minute(args: &Args<'_>) -> Result<Json> {
    Ok(Json::from(args.time(0)?.minute()))
}

pub(super) fn second(args: &Args<'_>) -> Result<Json> {
    Ok(Json::from(args.time(0)?.second()))
}

pub(super) fn millisecond(args: &Args<'_>) -> Result<Json> {
    Ok(Json::from(args.time(0)?.timestamp_subsec_millis()))
}
