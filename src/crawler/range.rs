use crate::ScraperError;
use chrono::NaiveDate;

/// Inclusive range of calendar days to crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl CrawlRange {
    /// Creates a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ScraperError> {
        if start > end {
            return Err(ScraperError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering one day
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, `(end - start) + 1`
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Days in ascending order, one-day step, both ends included
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}
