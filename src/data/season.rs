//! Season normalization
//!
//! Raw season values come in several shapes ("2008", "2007/08", "09").
//! The trailing 2-4 digit token is taken as the year; two-digit years are
//! promoted into the 2000s.

use regex::Regex;
use std::sync::OnceLock;

use super::error::{DataError, DataResult};

/// First season of the league
pub const FIRST_SEASON: i32 = 2008;

static TRAILING_YEAR: OnceLock<Regex> = OnceLock::new();

fn trailing_year() -> &'static Regex {
    TRAILING_YEAR.get_or_init(|| Regex::new(r"(\d{2,4})$").expect("static regex"))
}

/// Normalize a raw season value to a four-digit year.
///
/// ```
/// use ipl_insights::data::normalize_season;
///
/// assert_eq!(normalize_season("2007/08").unwrap(), 2008);
/// assert_eq!(normalize_season("09").unwrap(), 2009);
/// assert_eq!(normalize_season("2016").unwrap(), 2016);
/// ```
pub fn normalize_season(raw: &str) -> DataResult<i32> {
    let trimmed = raw.trim();
    let token = trailing_year()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| DataError::InvalidSeason(raw.to_string()))?;

    let year: i32 = token
        .as_str()
        .parse()
        .map_err(|_| DataError::InvalidSeason(raw.to_string()))?;

    Ok(if year < 100 { year + 2000 } else { year })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_digit_year() {
        assert_eq!(normalize_season("2008").unwrap(), 2008);
        assert_eq!(normalize_season(" 2024 ").unwrap(), 2024);
    }

    #[test]
    fn test_split_season_takes_last_token() {
        assert_eq!(normalize_season("2007/08").unwrap(), 2008);
        assert_eq!(normalize_season("2009/10").unwrap(), 2010);
        assert_eq!(normalize_season("2020/21").unwrap(), 2021);
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(normalize_season("09").unwrap(), 2009);
        assert_eq!(normalize_season("IPL 17").unwrap(), 2017);
    }

    #[test]
    fn test_missing_token() {
        assert!(matches!(
            normalize_season("abc"),
            Err(DataError::InvalidSeason(_))
        ));
        assert!(normalize_season("").is_err());
        // A single trailing digit is not a year token
        assert!(normalize_season("season 8").is_err());
    }
}
