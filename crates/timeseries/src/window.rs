use chrono::NaiveDate;
use core_types::{DailyBar, Period};

/// Returns the bars whose date falls in the period's inclusive bounds, sorted
/// ascending by date.
///
/// The input may be in any order and may contain dates outside the window.
/// When several bars share a date only the first one seen is kept.
/// `today` anchors the fixed periods and is ignored for `Period::Custom`.
pub fn window(series: &[DailyBar], period: &Period, today: NaiveDate) -> Vec<DailyBar> {
    let (cutoff, end) = period.bounds(today);

    let mut windowed: Vec<DailyBar> = series
        .iter()
        .filter(|bar| bar.date >= cutoff && bar.date <= end)
        .cloned()
        .collect();

    // Stable sort keeps the first occurrence ahead of later duplicates.
    windowed.sort_by_key(|bar| bar.date);
    windowed.dedup_by_key(|bar| bar.date);

    tracing::debug!(
        period = %period,
        %cutoff,
        %end,
        input = series.len(),
        output = windowed.len(),
        "Windowed series."
    );

    windowed
}
