use chrono::{Days, NaiveDate};
use core_types::{DailyBar, Ticker};
use rand::Rng;
use std::ops::Range;

/// Generates a plausible daily OHLCV random walk.
///
/// The generator holds no randomness of its own: every draw comes from the
/// `Rng` passed to `generate`, so a seeded `StdRng` gives a reproducible series.
#[derive(Debug, Clone)]
pub struct SyntheticSeriesGenerator {
    /// Band the starting price is drawn from.
    pub base_price: Range<f64>,
    /// Largest absolute day-over-day change of the close, as a fraction.
    pub max_daily_change: f64,
    /// Largest gap between open and close, as a fraction of the close.
    pub max_open_gap: f64,
    /// Largest extension of high/low beyond open and close, as a fraction.
    pub max_wick: f64,
    pub volume: Range<u64>,
}

impl Default for SyntheticSeriesGenerator {
    fn default() -> Self {
        Self {
            base_price: 50.0..250.0,
            max_daily_change: 0.04,
            max_open_gap: 0.01,
            max_wick: 0.03,
            volume: 1_000_000..11_000_000,
        }
    }
}

impl SyntheticSeriesGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces `days` consecutive calendar days of bars ending on `end`,
    /// oldest first.
    pub fn generate<R: Rng>(
        &self,
        ticker: &Ticker,
        days: u64,
        end: NaiveDate,
        rng: &mut R,
    ) -> Vec<DailyBar> {
        let mut price = rng.gen_range(self.base_price.clone());
        let mut bars = Vec::with_capacity(days as usize);

        for offset in (0..days).rev() {
            let Some(date) = end.checked_sub_days(Days::new(offset)) else {
                continue;
            };

            price *= 1.0 + rng.gen_range(-self.max_daily_change..self.max_daily_change);

            // Open, high and low are built around the close with min/max so the
            // OHLC ordering holds regardless of the draws.
            let close = round_cents(price);
            let gap = rng.gen_range(-self.max_open_gap..self.max_open_gap);
            let open = round_cents(price * (1.0 + gap));
            let high = round_cents(open.max(close) * (1.0 + rng.gen_range(0.0..self.max_wick)));
            let low = round_cents(open.min(close) * (1.0 - rng.gen_range(0.0..self.max_wick)));
            let volume = rng.gen_range(self.volume.clone());

            match DailyBar::new(date, open, high, low, close, volume) {
                Ok(bar) => bars.push(bar),
                Err(e) => tracing::warn!(%ticker, error = %e, "Discarded synthetic bar."),
            }
        }

        tracing::debug!(%ticker, days, %end, bars = bars.len(), "Generated synthetic series.");
        bars
    }
}

/// Rounds to whole cents, never below one cent. Rounding is monotone, so it
/// cannot reorder open, high, low and close.
fn round_cents(price: f64) -> f64 {
    ((price * 100.0).round() / 100.0).max(0.01)
}

/// A stable per-ticker seed (FNV-1a), mixed into a configured seed so that
/// different tickers get different but reproducible series.
pub fn ticker_seed(ticker: &Ticker) -> u64 {
    ticker
        .as_str()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        })
}
