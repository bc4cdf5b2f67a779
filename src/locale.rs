//! Localization tables and numeral formatting for English and Arabic.
//!
//! Month and weekday names are indexed from zero (January / Muharram /
//! Sunday first). Arabic output uses Arabic-Indic digits and is laid out
//! right to left by the UI.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// English, left to right
    #[default]
    #[serde(rename = "en")]
    En,
    /// Arabic, right to left
    #[serde(rename = "ar")]
    Ar,
}

impl Language {
    /// Language code used in persisted state and on the command line.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Name of the language in itself.
    #[must_use]
    pub const fn native_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "العربية",
        }
    }

    /// Whether text and grid columns run right to left.
    #[must_use]
    pub const fn is_rtl(&self) -> bool {
        matches!(self, Self::Ar)
    }

    /// The other language.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::En => 0,
            Self::Ar => 1,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            other => anyhow::bail!("Unknown language '{other}' (expected en or ar)"),
        }
    }
}

const GREGORIAN_MONTHS: [[&str; 12]; 2] = [
    [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    [
        "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر", "أكتوبر",
        "نوفمبر", "ديسمبر",
    ],
];

const HIJRI_MONTHS: [[&str; 12]; 2] = [
    [
        "Muharram",
        "Safar",
        "Rabi' al-awwal",
        "Rabi' al-thani",
        "Jumada al-awwal",
        "Jumada al-thani",
        "Rajab",
        "Sha'ban",
        "Ramadan",
        "Shawwal",
        "Dhu al-Qi'dah",
        "Dhu al-Hijjah",
    ],
    [
        "محرم",
        "صفر",
        "ربيع الأول",
        "ربيع الثاني",
        "جمادى الأولى",
        "جمادى الثانية",
        "رجب",
        "شعبان",
        "رمضان",
        "شوال",
        "ذو القعدة",
        "ذو الحجة",
    ],
];

const WEEKDAYS_SHORT: [[&str; 7]; 2] = [
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    ["أحد", "اثنين", "ثلاثاء", "أربعاء", "خميس", "جمعة", "سبت"],
];

const WEEKDAYS_FULL: [[&str; 7]; 2] = [
    [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    ["الأحد", "الاثنين", "الثلاثاء", "الأربعاء", "الخميس", "الجمعة", "السبت"],
];

const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Gregorian month name for a zero-based month index.
///
/// # Panics
///
/// Panics if `month0` is not in `0..12`.
#[must_use]
pub fn gregorian_month_name(language: Language, month0: usize) -> &'static str {
    GREGORIAN_MONTHS[language.index()][month0]
}

/// Hijri month name for a zero-based month index.
///
/// # Panics
///
/// Panics if `month0` is not in `0..12`.
#[must_use]
pub fn hijri_month_name(language: Language, month0: usize) -> &'static str {
    HIJRI_MONTHS[language.index()][month0]
}

/// Short weekday names, Sunday first.
#[must_use]
pub fn weekdays_short(language: Language) -> &'static [&'static str; 7] {
    &WEEKDAYS_SHORT[language.index()]
}

/// Full weekday name for a weekday index (`0` = Sunday).
///
/// # Panics
///
/// Panics if `weekday` is not in `0..7`.
#[must_use]
pub fn weekday_full(language: Language, weekday: usize) -> &'static str {
    WEEKDAYS_FULL[language.index()][weekday]
}

/// Renders an integer in the digits of `language`.
///
/// # Examples
///
/// ```
/// use timelyo::locale::{format_number, Language};
///
/// assert_eq!(format_number(1446, Language::En), "1446");
/// assert_eq!(format_number(1446, Language::Ar), "١٤٤٦");
/// ```
#[must_use]
pub fn format_number(num: i64, language: Language) -> String {
    localize_digits(&num.to_string(), language)
}

/// Replaces ASCII digits in `text` with the digits of `language`.
#[must_use]
pub fn localize_digits(text: &str, language: Language) -> String {
    match language {
        Language::En => text.to_string(),
        Language::Ar => text
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => ARABIC_DIGITS[d as usize],
                None => c,
            })
            .collect(),
    }
}

/// Formats a wall-clock time as `h:mm:ss` with a 12-hour marker.
#[must_use]
pub fn format_clock(time: NaiveTime, language: Language) -> String {
    let (pm, hour) = time.hour12();
    let digits = format!("{}:{:02}:{:02}", hour, time.minute(), time.second());
    match language {
        Language::En => format!("{digits} {}", if pm { "PM" } else { "AM" }),
        Language::Ar => format!("{} {}", localize_digits(&digits, language), if pm { "م" } else { "ص" }),
    }
}

/// Fixed UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    /// Subtitle under the app name
    Subtitle,
    /// Gregorian calendar name
    Gregorian,
    /// Hijri calendar name
    Hijri,
    /// Details panel title
    SelectedDate,
    /// Hijri panel title
    HijriDate,
    /// Badge shown when the selection is today
    Today,
    /// Mark action label
    MarkDate,
    /// Unmark action label
    UnmarkDate,
    /// Quick actions panel title
    QuickActions,
    /// Go-to-today action label
    GoToToday,
    /// Year picker title
    SelectYear,
    /// Era suffix for Hijri years
    EraSuffix,
    /// Footer tagline
    Tagline,
}

impl Text {
    /// The string for `language`.
    #[must_use]
    pub const fn get(self, language: Language) -> &'static str {
        let (en, ar) = match self {
            Self::Subtitle => ("Dual Calendar System", "نظام التقويم المزدوج"),
            Self::Gregorian => ("Gregorian", "ميلادي"),
            Self::Hijri => ("Hijri", "هجري"),
            Self::SelectedDate => ("Selected Date", "التاريخ المحدد"),
            Self::HijriDate => ("Hijri Date", "التاريخ الهجري"),
            Self::Today => ("Today", "اليوم"),
            Self::MarkDate => ("Mark Date", "وضع علامة"),
            Self::UnmarkDate => ("Unmark Date", "إلغاء العلامة"),
            Self::QuickActions => ("Quick Actions", "إجراءات سريعة"),
            Self::GoToToday => ("Go to Today", "اذهب إلى اليوم"),
            Self::SelectYear => ("Select Year", "اختر السنة"),
            Self::EraSuffix => ("AH", "هـ"),
            Self::Tagline => (
                "Timelyo - Your beautiful dual calendar companion",
                "تايملايو - رفيقك الجميل في التقويم المزدوج",
            ),
        };
        match language {
            Language::En => en,
            Language::Ar => ar,
        }
    }
}

/// Summary of how many dates are marked.
#[must_use]
pub fn marked_count(count: usize, language: Language) -> String {
    match language {
        Language::En if count == 1 => "1 marked date".to_string(),
        Language::En => format!("{count} marked dates"),
        Language::Ar => format!("{} تاريخ محفوظ", format_number(count as i64, language)),
    }
}
