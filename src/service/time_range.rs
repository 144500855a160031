use chrono::{DateTime, Duration, Utc};

pub const GRID_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerError {
    StartAfterEnd,
    EndBeforeStart,
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::StartAfterEnd => write!(f, "Start time cannot be after the end time"),
            PickerError::EndBeforeStart => write!(f, "End time cannot be before the start time"),
        }
    }
}

impl std::error::Error for PickerError {}

/// Round up to the next 15-minute mark. Times already on the grid stay put.
pub fn snap_up(t: DateTime<Utc>) -> DateTime<Utc> {
    let grid = GRID_MINUTES * 60;
    let secs = t.timestamp();
    let rem = secs.rem_euclid(grid);
    let snapped = if rem == 0 { secs } else { secs - rem + grid };
    DateTime::<Utc>::from_timestamp(snapped, 0).unwrap_or(t)
}

/// Two linked time selections on a 15-minute grid. The end's lower bound
/// tracks the live start value and the start's upper bound tracks the live
/// end value, so `end < start` can never be held, not merely rejected at
/// submit time.
#[derive(Debug, Clone)]
pub struct TimeRangePicker {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    end_min: DateTime<Utc>,
    start_max: Option<DateTime<Utc>>,
}

impl TimeRangePicker {
    /// Defaults: start = now rounded up to the grid plus one hour,
    /// end = start plus one hour.
    pub fn new(now: DateTime<Utc>) -> Self {
        let start = snap_up(now) + Duration::hours(1);
        let end = start + Duration::hours(1);
        Self {
            start,
            end,
            end_min: start,
            start_max: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Utc::now())
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn end_lower_bound(&self) -> DateTime<Utc> {
        self.end_min
    }

    pub fn start_upper_bound(&self) -> Option<DateTime<Utc>> {
        self.start_max
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }

    /// Snaps to the grid, then moves the start. The end's lower bound
    /// follows, and an end now behind the start is pushed to start + 1h.
    pub fn set_start(&mut self, t: DateTime<Utc>) -> Result<DateTime<Utc>, PickerError> {
        let t = snap_up(t);
        if let Some(max) = self.start_max {
            if t > max {
                return Err(PickerError::StartAfterEnd);
            }
        }
        self.start = t;
        self.end_min = t;
        if self.end < t {
            self.end = t + Duration::hours(1);
        }
        Ok(t)
    }

    /// Snaps to the grid, then moves the end; the start's upper bound
    /// follows.
    pub fn set_end(&mut self, t: DateTime<Utc>) -> Result<DateTime<Utc>, PickerError> {
        let t = snap_up(t);
        if t < self.end_min {
            return Err(PickerError::EndBeforeStart);
        }
        self.end = t;
        self.start_max = Some(t);
        Ok(t)
    }

    /// Fresh defaults, used after a successful submission.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(now);
    }
}
