//! Duration breakdowns for the dashboard.
//!
//! Pure formatting. The locale is always an explicit argument.

use serde::{Deserialize, Serialize};

use crate::core::units::DAYS_PER_YEAR;

/// Display language for formatted values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    /// Parse a language code ("ko" / "en"). Unknown codes give `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ko" => Some(Locale::Korean),
            "en" => Some(Locale::English),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::Korean => "ko",
            Locale::English => "en",
        }
    }
}

/// An orbital period split into whole years, days and hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    pub years: u32,
    pub days: u32,
    pub hours: u32,
}

impl PeriodBreakdown {
    /// Split a period given in days. Years are Julian (365.25 d).
    pub fn from_days(days: f64) -> Self {
        let days = if days.is_finite() { days.abs() } else { 0.0 };
        let years = (days / DAYS_PER_YEAR).floor();
        let remaining = days - years * DAYS_PER_YEAR;
        let whole_days = remaining.floor();
        let hours = ((remaining - whole_days) * 24.0).floor();
        Self {
            years: years as u32,
            days: whole_days as u32,
            hours: hours as u32,
        }
    }

    pub fn format(&self, locale: Locale) -> String {
        match locale {
            Locale::Korean => format!("{}년 {}일 {}시간", self.years, self.days, self.hours),
            Locale::English => format!("{}yr {}d {}h", self.years, self.days, self.hours),
        }
    }
}

/// A rotation period split into whole hours and minutes. Direction is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationBreakdown {
    pub hours: u32,
    pub minutes: u32,
}

impl RotationBreakdown {
    pub fn from_hours(hours: f64) -> Self {
        let hours = if hours.is_finite() { hours.abs() } else { 0.0 };
        let whole = hours.floor();
        let minutes = ((hours - whole) * 60.0).floor();
        Self {
            hours: whole as u32,
            minutes: minutes as u32,
        }
    }

    pub fn format(&self, locale: Locale) -> String {
        match locale {
            Locale::Korean => format!("{}시간 {}분", self.hours, self.minutes),
            Locale::English => format!("{}h {}m", self.hours, self.minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_year_breakdown() {
        let p = PeriodBreakdown::from_days(365.256);
        assert_eq!(p, PeriodBreakdown { years: 1, days: 0, hours: 0 });
        assert_eq!(p.format(Locale::English), "1yr 0d 0h");
    }

    #[test]
    fn mercury_breakdown_in_both_locales() {
        let p = PeriodBreakdown::from_days(87.97);
        assert_eq!(p.years, 0);
        assert_eq!(p.days, 87);
        assert_eq!(p.hours, 23);
        assert_eq!(p.format(Locale::Korean), "0년 87일 23시간");
        assert_eq!(p.format(Locale::English), "0yr 87d 23h");
    }

    #[test]
    fn rotation_breakdown_drops_direction() {
        let r = RotationBreakdown::from_hours(-17.24);
        assert_eq!(r, RotationBreakdown { hours: 17, minutes: 14 });
        assert_eq!(r.format(Locale::English), "17h 14m");
        assert_eq!(r.format(Locale::Korean), "17시간 14분");
    }

    #[test]
    fn earth_sidereal_day() {
        let r = RotationBreakdown::from_hours(23.934);
        assert_eq!(r.format(Locale::English), "23h 56m");
    }

    #[test]
    fn locale_codes() {
        assert_eq!(Locale::from_code("EN"), Some(Locale::English));
        assert_eq!(Locale::from_code("ko"), Some(Locale::Korean));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::default(), Locale::Korean);
        assert_eq!(serde_json::to_string(&Locale::English).unwrap(), "\"en\"");
    }

    #[test]
    fn garbage_durations_format_as_zero() {
        assert_eq!(PeriodBreakdown::from_days(f64::NAN).format(Locale::English), "0yr 0d 0h");
        assert_eq!(RotationBreakdown::from_hours(f64::INFINITY).format(Locale::English), "0h 0m");
    }
}
