use chrono::NaiveDate;

use crate::entities::DateFormat;

pub(crate) fn format_date(date: NaiveDate, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::MonthDayYear => "%m/%d/%Y",
        DateFormat::DayMonthYear => "%d/%m/%Y",
        DateFormat::YearMonthDay => "%Y-%m-%d",
        DateFormat::DayMonthNameYear => "%d %b %Y",
    };
    date.format(pattern).to_string()
}

/// `Today`, `Yesterday` or `N days ago` within the last week; anything older
/// (or in the future) is formatted.
pub(crate) fn format_relative_date(date: NaiveDate, today: NaiveDate, format: DateFormat) -> String {
    match (today - date).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n @ 2..=6 => format!("{n} days ago"),
        _ => format_date(date, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_date_format() {
        let d = date(2024, 3, 7);
        assert_eq!(format_date(d, DateFormat::MonthDayYear), "03/07/2024");
        assert_eq!(format_date(d, DateFormat::DayMonthYear), "07/03/2024");
        assert_eq!(format_date(d, DateFormat::YearMonthDay), "2024-03-07");
        assert_eq!(format_date(d, DateFormat::DayMonthNameYear), "07 Mar 2024");
    }

    #[test]
    fn relative_dates() {
        let today = date(2024, 3, 10);
        let fmt = DateFormat::YearMonthDay;
        assert_eq!(format_relative_date(today, today, fmt), "Today");
        assert_eq!(format_relative_date(date(2024, 3, 9), today, fmt), "Yesterday");
        assert_eq!(format_relative_date(date(2024, 3, 4), today, fmt), "6 days ago");
        assert_eq!(format_relative_date(date(2024, 3, 3), today, fmt), "2024-03-03");
        assert_eq!(format_relative_date(date(2024, 3, 11), today, fmt), "2024-03-11");
    }
}
