//! Date patterns written with `yyyy-MM-dd HH:mm:ss` style tokens, as the
//! column schemas declare them, translated to chrono format strings.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const DEFAULT_DISPLAY_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// A parsed date or timestamp. `date_only` is set when the input carried no
/// time of day, so range checks can compare whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub value: NaiveDateTime,
    pub date_only: bool,
}

impl ParsedDate {
    fn date(date: NaiveDate) -> Self {
        Self {
            value: date.and_time(chrono::NaiveTime::MIN),
            date_only: true,
        }
    }

    fn datetime(value: NaiveDateTime) -> Self {
        Self {
            value,
            date_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    chrono_format: String,
    has_time: bool,
}

impl DatePattern {
    pub fn new(pattern: &str) -> Self {
        let mut chrono_format = String::new();
        let mut has_time = false;
        let chars: Vec<char> = pattern.chars().collect();
        let mut idx = 0;

        while idx < chars.len() {
            let ch = chars[idx];

            if ch == '\'' {
                idx += 1;
                if chars.get(idx) == Some(&'\'') {
                    chrono_format.push('\'');
                    idx += 1;
                    continue;
                }
                while idx < chars.len() && chars[idx] != '\'' {
                    push_literal(&mut chrono_format, chars[idx]);
                    idx += 1;
                }
                idx += 1;
                continue;
            }

            if !ch.is_ascii_alphabetic() {
                push_literal(&mut chrono_format, ch);
                idx += 1;
                continue;
            }

            let start = idx;
            while idx < chars.len() && chars[idx] == ch {
                idx += 1;
            }
            let run = idx - start;

            let token = match (ch, run) {
                ('y', 2) => "%y",
                ('y', _) => "%Y",
                ('M', 1) => "%-m",
                ('M', 3) => "%b",
                ('M', n) if n >= 4 => "%B",
                ('M', _) => "%m",
                ('d', 1) => "%-d",
                ('d', _) => "%d",
                ('H', 1) => "%-H",
                ('H', _) => "%H",
                ('h', 1) => "%-I",
                ('h', _) => "%I",
                ('m', 1) => "%-M",
                ('m', _) => "%M",
                ('s', 1) => "%-S",
                ('s', _) => "%S",
                ('S', _) => "%3f",
                ('a', _) => "%p",
                _ => {
                    for _ in 0..run {
                        push_literal(&mut chrono_format, ch);
                    }
                    continue;
                }
            };
            if matches!(ch, 'H' | 'h' | 'm' | 's' | 'S' | 'a') {
                has_time = true;
            }
            chrono_format.push_str(token);
        }

        Self {
            chrono_format,
            has_time,
        }
    }

    pub fn chrono_format(&self) -> &str {
        &self.chrono_format
    }

    pub fn parse(&self, raw: &str) -> Option<ParsedDate> {
        let raw = raw.trim();
        if self.has_time {
            NaiveDateTime::parse_from_str(raw, &self.chrono_format)
                .ok()
                .map(ParsedDate::datetime)
        } else {
            NaiveDate::parse_from_str(raw, &self.chrono_format)
                .ok()
                .map(ParsedDate::date)
        }
    }

    pub fn format(&self, value: &NaiveDateTime) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", value.format(&self.chrono_format)).ok()?;
        Some(out)
    }
}

fn push_literal(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Accepts `2024-03-10`, `20240310`, `2024-03-10T08:30[:00[.000]]`, the same
/// with a space separator, and RFC 3339 timestamps (kept as wall-clock time).
pub fn parse_iso(raw: &str) -> Option<ParsedDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(ParsedDate::date(date));
    }

    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(raw, "%Y%m%d")
            .ok()
            .map(ParsedDate::date);
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(ParsedDate::datetime(stamp.naive_local()));
    }

    ISO_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(ParsedDate::datetime)
}

/// Parses with the declared source pattern when there is one, ISO otherwise.
pub fn parse_date(raw: &str, source_format: Option<&str>) -> Option<ParsedDate> {
    match source_format {
        Some(pattern) => DatePattern::new(pattern).parse(raw),
        None => parse_iso(raw),
    }
}
