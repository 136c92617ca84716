//! Plural substitution and date rendering.

use super::FormatError;
use time::{Date, Month, format_description};

/// Key of the per-locale date template.
pub const DATE_FORMAT_KEY: &str = "DateFormat";

/// Template used when neither the locale nor the default declares one.
pub const ISO_DATE_TEMPLATE: &str = "[year]-[month]-[day]";

/// Placeholders replaced by the count in plural messages.
const COUNT_PLACEHOLDERS: [&str; 2] = ["%d", "{count}"];

/// Substitute `count` into every count placeholder of `text`.
pub(super) fn substitute_count(text: &str, count: i64) -> String {
    let rendered = count.to_string();
    COUNT_PLACEHOLDERS
        .iter()
        .fold(text.to_owned(), |acc, placeholder| {
            acc.replace(placeholder, &rendered)
        })
}

/// Validate calendar components into a [`Date`].
pub(super) fn calendar_date(year: i32, month: u8, day: u8) -> Result<Date, FormatError> {
    let invalid = || FormatError::InvalidDate { year, month, day };
    let calendar_month = Month::try_from(month).map_err(|_| invalid())?;
    Date::from_calendar_date(year, calendar_month, day).map_err(|_| invalid())
}

/// Render `date` with a `time` format description such as `[day]/[month]/[year]`.
pub(super) fn render_date(date: Date, template: &str) -> Result<String, FormatError> {
    let items = format_description::parse_borrowed::<2>(template).map_err(|source| {
        FormatError::Template {
            template: template.to_owned(),
            source,
        }
    })?;
    date.format(&items).map_err(|source| FormatError::Render {
        template: template.to_owned(),
        source,
    })
}
