//! Month view CLI command

use crate::config::Settings;
use crate::display::format_month_view;
use crate::error::{LedgerError, LedgerResult};
use crate::models::YearMonth;
use crate::services::LedgerService;

/// Resolve a period argument relative to `today`
///
/// Accepts "current", "prev" (or "last"), "next", or a year-month in any of
/// the date separators.
pub fn parse_period(input: Option<&str>, today: YearMonth) -> LedgerResult<YearMonth> {
    let Some(input) = input else {
        return Ok(today);
    };

    match input.trim().to_lowercase().as_str() {
        "current" | "this" => Ok(today),
        "prev" | "previous" | "last" => Ok(today.prev()),
        "next" => Ok(today.next()),
        _ => YearMonth::parse(input),
    }
}

/// Handle `expense month`
pub fn handle_month(
    service: &LedgerService,
    settings: &Settings,
    period: Option<&str>,
    json: bool,
) -> LedgerResult<()> {
    let period = parse_period(period, YearMonth::current())?;
    let data = service.month_data(period);

    if json {
        let out = serde_json::to_string_pretty(&data)
            .map_err(|e| LedgerError::Json(format!("Failed to serialize month view: {}", e)))?;
        println!("{}", out);
    } else {
        print!("{}", format_month_view(&data, &settings.currency_symbol));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn test_parse_period_keywords() {
        assert_eq!(parse_period(None, march()).unwrap(), march());
        assert_eq!(parse_period(Some("current"), march()).unwrap(), march());
        assert_eq!(parse_period(Some("prev"), march()).unwrap().key(), "2024-02");
        assert_eq!(parse_period(Some("Next"), march()).unwrap().key(), "2024-04");
    }

    #[test]
    fn test_parse_period_explicit() {
        assert_eq!(parse_period(Some("2023/12"), march()).unwrap().key(), "2023-12");
        assert!(matches!(
            parse_period(Some("2023-13"), march()),
            Err(LedgerError::MonthOutOfRange(13))
        ));
        assert!(parse_period(Some("soon"), march()).is_err());
    }
}
