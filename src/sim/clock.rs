use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};

/// Where tick timestamps come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Local wall-clock time read at each tick.
    Wall,
    /// Simulated time starting at `start`, advancing one interval per tick.
    Simulated { start: NaiveDateTime },
}

/// A simulation clock that supplies the point in time for each tick.
///
/// The hour of day and calendar month of the returned timestamp drive the
/// weather synthesizer and the integrator.
///
/// # Examples
///
/// ```
/// use campus_energy_sim::sim::clock::SimClock;
/// use chrono::{NaiveDate, Timelike};
///
/// let start = NaiveDate::from_ymd_opt(2025, 5, 1)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let mut clock = SimClock::simulated(start, 60);
/// let hours: Vec<u32> = (0..3).filter_map(|_| clock.tick()).map(|t| t.hour()).collect();
/// assert_eq!(hours, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct SimClock {
    source: ClockSource,
    /// Interval between ticks in minutes
    step_minutes: u32,
    /// Ticks issued so far
    ticks: u64,
}

impl SimClock {
    /// Creates a wall clock whose ticks are nominally `step_minutes` apart.
    pub fn wall(step_minutes: u32) -> Self {
        Self {
            source: ClockSource::Wall,
            step_minutes: step_minutes.max(1),
            ticks: 0,
        }
    }

    /// Creates a simulated clock starting at `start`.
    pub fn simulated(start: NaiveDateTime, step_minutes: u32) -> Self {
        Self {
            source: ClockSource::Simulated { start },
            step_minutes: step_minutes.max(1),
            ticks: 0,
        }
    }

    /// Returns the timestamp for the next tick and advances the counter.
    ///
    /// Returns `None` once simulated time runs past the representable range;
    /// the counter is not advanced in that case.
    pub fn tick(&mut self) -> Option<NaiveDateTime> {
        let now = self.peek()?;
        self.ticks += 1;
        Some(now)
    }

    /// Timestamp the next call to [`SimClock::tick`] will return.
    ///
    /// For a wall clock this is simply the current local time.
    pub fn peek(&self) -> Option<NaiveDateTime> {
        match self.source {
            ClockSource::Wall => Some(Local::now().naive_local()),
            ClockSource::Simulated { start } => {
                let ticks = i64::try_from(self.ticks).ok()?;
                let elapsed = i64::from(self.step_minutes).checked_mul(ticks)?;
                start.checked_add_signed(TimeDelta::try_minutes(elapsed)?)
            }
        }
    }

    /// Number of ticks issued so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Tick interval in hours.
    pub fn step_hours(&self) -> f32 {
        self.step_minutes as f32 / 60.0
    }

    pub fn source(&self) -> ClockSource {
        self.source
    }
}

/// Midnight on the first of `month` in `year`, if the date exists.
pub fn month_start(year: i32, month: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
}
