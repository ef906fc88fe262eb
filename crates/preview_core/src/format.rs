//! Value formatting shared by the dispatch tables: durations, amounts, and
//! template lookups that never fail.

use preview_logging::preview_warn;

use crate::template::{Arg, Localizer, TemplateId};
use crate::text::FormattedText;

/// Formats `id`, falling back to the bare phrase when substitution fails.
pub fn format_or_bare(lang: &dyn Localizer, id: TemplateId, args: &[Arg]) -> FormattedText {
    match lang.format(id, args) {
        Ok(text) => text,
        Err(err) => {
            preview_warn!("Falling back to bare template {id:?}: {err}");
            FormattedText::plain(lang.string(id))
        }
    }
}

/// Plural counterpart of [`format_or_bare`].
pub fn plural_or_bare(lang: &dyn Localizer, id: TemplateId, count: i64, args: &[Arg]) -> FormattedText {
    match lang.plural(id, count, args) {
        Ok(text) => text,
        Err(err) => {
            preview_warn!("Falling back to bare plural template {id:?}: {err}");
            FormattedText::plain(lang.string(id))
        }
    }
}

/// Clock-style duration: `m:ss`, or `h:mm:ss` past the hour.
pub fn format_duration(seconds: i32) -> String {
    let seconds = seconds.max(0);
    let minutes = seconds / 60;
    if minutes > 60 {
        format!("{}:{:02}:{:02}", seconds / 3600, minutes % 60, seconds % 60)
    } else {
        format!("{}:{:02}", minutes, seconds % 60)
    }
}

/// Compact duration of a finished call or video chat ("2 min 5 sec").
pub fn call_duration(lang: &dyn Localizer, seconds: i32) -> String {
    if seconds < 60 {
        return plural_or_bare(lang, TemplateId::XSec, i64::from(seconds), &[]).text;
    }
    if seconds < 3600 {
        let minutes = plural_or_bare(lang, TemplateId::XMin, i64::from(seconds / 60), &[]).text;
        let rest = seconds % 60;
        if rest == 0 {
            return minutes;
        }
        let rest = plural_or_bare(lang, TemplateId::XSec, i64::from(rest), &[]).text;
        return format_or_bare(
            lang,
            TemplateId::FormatMinutesAndSeconds,
            &[Arg::Text(minutes), Arg::Text(rest)],
        )
        .text;
    }
    format_duration(seconds)
}

/// Spelled-out duration ("5 minutes"), clock style past the hour.
pub fn full_duration(lang: &dyn Localizer, seconds: i32) -> String {
    if seconds < 60 {
        plural_or_bare(lang, TemplateId::XSeconds, i64::from(seconds), &[]).text
    } else if seconds < 3600 {
        plural_or_bare(lang, TemplateId::XMinutes, i64::from(seconds / 60), &[]).text
    } else {
        format_duration(seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
}

/// Largest unit with a non-zero whole count; a month counts as 30 days.
pub fn largest_unit(seconds: i64) -> (DurationUnit, i64) {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let weeks = days / 7;
    let months = days / 30;
    if months > 0 {
        (DurationUnit::Months, months)
    } else if weeks > 0 {
        (DurationUnit::Weeks, weeks)
    } else if days > 0 {
        (DurationUnit::Days, days)
    } else if hours > 0 {
        (DurationUnit::Hours, hours)
    } else if minutes > 0 {
        (DurationUnit::Minutes, minutes)
    } else {
        (DurationUnit::Seconds, seconds)
    }
}

fn currency_exponent(currency: &str) -> u32 {
    match currency {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX" | "VND"
        | "VUV" | "XAF" | "XOF" | "XPF" | "XTR" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    let symbol = match currency {
        "USD" => "$",
        "EUR" => "\u{20AC}",
        "GBP" => "\u{00A3}",
        "JPY" => "\u{00A5}",
        "INR" => "\u{20B9}",
        "RUB" => "\u{20BD}",
        "UAH" => "\u{20B4}",
        "KRW" => "\u{20A9}",
        "TRY" => "\u{20BA}",
        _ => return None,
    };
    Some(symbol)
}

/// Renders an amount given in the currency's smallest units ("$12.50").
pub fn format_amount(currency: &str, minor_units: i64) -> String {
    let exponent = currency_exponent(currency);
    let sign = if minor_units < 0 { "-" } else { "" };
    let magnitude = minor_units.unsigned_abs();
    let value = if exponent == 0 {
        magnitude.to_string()
    } else {
        let scale = 10u64.pow(exponent);
        format!(
            "{}.{:0width$}",
            magnitude / scale,
            magnitude % scale,
            width = exponent as usize
        )
    };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{value}"),
        None => format!("{sign}{currency} {value}"),
    }
}
