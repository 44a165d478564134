use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::fmt;

/// Semantic type of a reportable field. Selects both the parser and the
/// declared empty value used when a source does not report the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Count,
    Flags,
    Bytes,
    Span,
    Date,
}

impl ValueKind {
    /// The value a field takes when its source never reported it.
    pub fn empty(self) -> Value {
        match self {
            ValueKind::Text => Value::Text(String::new()),
            ValueKind::Count => Value::Count(0),
            ValueKind::Flags => Value::Flags(BTreeSet::new()),
            ValueKind::Bytes => Value::Bytes(ByteCount::UNKNOWN),
            ValueKind::Span => Value::Span(TimeSpan::Invalid),
            ValueKind::Date => Value::Date(JobDate::Unknown),
        }
    }

    /// Parse one raw column. `None` means the source has no such column and
    /// always yields [`ValueKind::empty`]. Malformed text never fails; it
    /// degrades to the kind's sentinel.
    pub fn parse(self, raw: Option<&str>) -> Value {
        let Some(raw) = raw else {
            return self.empty();
        };

        match self {
            ValueKind::Text => Value::Text(raw.trim().to_string()),
            ValueKind::Count => Value::Count(raw.trim().parse().unwrap_or(0)),
            // An empty column still contributes the empty flag, the state
            // formatter drops it when other flags are present.
            ValueKind::Flags => {
                Value::Flags(raw.split(',').map(|f| f.trim().to_string()).collect())
            }
            ValueKind::Bytes => Value::Bytes(ByteCount::parse(raw)),
            ValueKind::Span => Value::Span(TimeSpan::parse(raw)),
            ValueKind::Date => Value::Date(JobDate::parse(raw)),
        }
    }
}

/// One typed field value of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Count(u64),
    Flags(BTreeSet<String>),
    Bytes(ByteCount),
    Span(TimeSpan),
    Date(JobDate),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Count(_) => ValueKind::Count,
            Value::Flags(_) => ValueKind::Flags,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Span(_) => ValueKind::Span,
            Value::Date(_) => ValueKind::Date,
        }
    }

    /// True when this is the kind's declared empty value.
    pub fn is_empty(&self) -> bool {
        *self == self.kind().empty()
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flags(&self) -> Option<&BTreeSet<String>> {
        match self {
            Value::Flags(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_span(&self) -> Option<TimeSpan> {
        match self {
            Value::Span(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<JobDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Count(n) => write!(f, "{}", n),
            Value::Flags(flags) => {
                let joined: Vec<&str> = flags.iter().map(String::as_str).collect();
                f.write_str(&joined.join(","))
            }
            Value::Bytes(b) => write!(f, "{}", b),
            Value::Span(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d),
        }
    }
}

/// Byte count with a negative "unknown" sentinel, so a plain `max` lets any
/// real measurement win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteCount(i64);

impl ByteCount {
    pub const UNKNOWN: ByteCount = ByteCount(-1);

    const SUFFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    pub fn new(bytes: i64) -> Self {
        if bytes < 0 {
            Self::UNKNOWN
        } else {
            ByteCount(bytes)
        }
    }

    pub fn bytes(self) -> i64 {
        self.0
    }

    pub fn is_unknown(self) -> bool {
        self.0 < 0
    }

    /// Parse scheduler size text such as `1234`, `812K`, `1.50G`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let Some(last) = raw.chars().last() else {
            return Self::UNKNOWN;
        };

        let (mantissa, shift) = match Self::SUFFIXES
            .iter()
            .position(|s| s.eq_ignore_ascii_case(&last))
        {
            Some(idx) => (&raw[..raw.len() - 1], 10 * (idx as u32 + 1)),
            None => (raw, 0),
        };

        match mantissa.parse::<f64>() {
            Ok(m) if m.is_finite() && m >= 0.0 => {
                let bytes = m * 2f64.powi(shift as i32);
                if bytes >= i64::MAX as f64 {
                    Self::UNKNOWN
                } else {
                    ByteCount(bytes.round() as i64)
                }
            }
            _ => Self::UNKNOWN,
        }
    }

    /// Render with a binary suffix, smallest unit K, two decimals.
    /// Returns `None` for the unknown sentinel.
    pub fn humanize(self) -> Option<String> {
        if self.is_unknown() {
            return None;
        }
        let mut exp = if self.0 == 0 {
            1
        } else {
            ((63 - self.0.leading_zeros()) / 10).clamp(1, 6)
        };
        let mut mantissa = self.0 as f64 / (1u64 << (10 * exp)) as f64;
        // 1023.996K would print as 1024.00K
        if mantissa >= 1023.995 && exp < 6 {
            exp += 1;
            mantissa /= 1024.0;
        }
        Some(format!(
            "{:.2}{}",
            mantissa,
            Self::SUFFIXES[exp as usize - 1]
        ))
    }
}

impl fmt::Display for ByteCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.humanize() {
            Some(s) => f.write_str(&s),
            None => f.write_str("unknown"),
        }
    }
}

/// Duration as reported by the scheduler.
///
/// Variant order is significant: the derived `Ord` makes `Invalid` lose to
/// everything and `Unlimited` beat everything, so `max` is the merge rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeSpan {
    Invalid,
    Finite(u64),
    Unlimited,
}

impl TimeSpan {
    const SECS_PER_DAY: u64 = 86_400;

    /// Parse `[D-][HH:]MM:SS[.fff]`, `UNLIMITED` or `Partition_Limit`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("UNLIMITED") || raw == "Partition_Limit" {
            return TimeSpan::Unlimited;
        }
        Self::parse_clock(raw).map_or(TimeSpan::Invalid, TimeSpan::Finite)
    }

    fn parse_clock(raw: &str) -> Option<u64> {
        let (days, clock) = match raw.split_once('-') {
            Some((d, rest)) => (Some(Self::number(d)?), rest),
            None => (None, raw),
        };
        // Fractional seconds are truncated
        let clock = clock.split_once('.').map_or(clock, |(whole, _)| whole);

        let parts = clock
            .split(':')
            .map(Self::number)
            .collect::<Option<Vec<u64>>>()?;

        let (h, m, s) = match (days.is_some(), parts.as_slice()) {
            (_, [h, m, s]) => (*h, *m, *s),
            (false, [m, s]) => (0, *m, *s),
            // `D-HH` and `D-HH:MM` only occur with a day prefix
            (true, [h, m]) => (*h, *m, 0),
            (true, [h]) => (*h, 0, 0),
            _ => return None,
        };
        if m >= 60 || s >= 60 {
            return None;
        }
        // Overflow means a malformed column
        days.unwrap_or(0)
            .checked_mul(Self::SECS_PER_DAY)?
            .checked_add(h.checked_mul(3600)?)?
            .checked_add(m * 60 + s)
    }

    fn number(part: &str) -> Option<u64> {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    }

    pub fn seconds(self) -> Option<u64> {
        match self {
            TimeSpan::Finite(s) => Some(s),
            _ => None,
        }
    }

    /// `[D-]HH:MM:SS` for a number of seconds.
    pub fn clock(secs: u64) -> String {
        let days = secs / Self::SECS_PER_DAY;
        let rem = secs % Self::SECS_PER_DAY;
        let hms = format!("{:02}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);
        if days > 0 {
            format!("{}-{}", days, hms)
        } else {
            hms
        }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSpan::Invalid => f.write_str("INVALID"),
            TimeSpan::Finite(s) => f.write_str(&Self::clock(*s)),
            TimeSpan::Unlimited => f.write_str("UNLIMITED"),
        }
    }
}

/// Timestamp with an "unknown" sentinel that sorts after every real date.
/// `min` therefore prefers any real start time, `max` keeps an end time
/// unknown while any record is still unfinished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobDate {
    Known(NaiveDateTime),
    Unknown,
}

impl JobDate {
    pub const FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(raw: &str) -> Self {
        NaiveDateTime::parse_from_str(raw.trim(), Self::FORMAT)
            .map(JobDate::Known)
            .unwrap_or(JobDate::Unknown)
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, JobDate::Unknown)
    }
}

impl fmt::Display for JobDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobDate::Known(dt) => write!(f, "{}", dt.format(Self::FORMAT)),
            JobDate::Unknown => f.write_str("Unknown"),
        }
    }
}
