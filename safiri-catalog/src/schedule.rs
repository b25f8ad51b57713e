use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seven-bit weekday mask, bit 0 = Monday (ISO numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    pub const ALL: WeekdaySet = WeekdaySet(0b0111_1111);

    pub fn from_days(days: &[Weekday]) -> Self {
        let mut set = WeekdaySet(0);
        for day in days {
            set.insert(*day);
        }
        set
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !(1 << day.num_days_from_monday());
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Weekends only, a common operating pattern.
    pub fn weekends() -> Self {
        Self::from_days(&[Weekday::Sat, Weekday::Sun])
    }
}

/// When a service is offered: a date range, a daily time window, and the
/// weekdays within the range it actually runs. Several schedules may
/// coexist for one service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySchedule {
    pub id: Uuid,
    pub service_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub weekdays: WeekdaySet,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AvailabilitySchedule {
    pub fn new(
        service_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        weekdays: WeekdaySet,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            service_id,
            start_date,
            end_date,
            start_time,
            end_time,
            weekdays,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when this schedule makes `date` sellable: active, within the
    /// inclusive date range, and the date's weekday bit is set.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_active
            && date >= self.start_date
            && date <= self.end_date
            && self.weekdays.contains(date.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule(weekdays: WeekdaySet) -> AvailabilitySchedule {
        AvailabilitySchedule::new(
            Uuid::new_v4(),
            date(2024, 6, 1),
            date(2024, 8, 31),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            weekdays,
        )
    }

    #[test]
    fn weekday_set_membership() {
        let set = WeekdaySet::from_days(&[Weekday::Mon, Weekday::Fri]);
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Fri));
        assert!(!set.contains(Weekday::Tue));
        assert!(!WeekdaySet::EMPTY.contains(Weekday::Mon));
        assert!(WeekdaySet::ALL.contains(Weekday::Sun));
    }

    #[test]
    fn covers_respects_range_and_weekday() {
        // 2024-06-01 is a Saturday.
        let sched = schedule(WeekdaySet::weekends());
        assert!(sched.covers(date(2024, 6, 1)));
        assert!(sched.covers(date(2024, 6, 2)));
        assert!(!sched.covers(date(2024, 6, 3))); // Monday
        assert!(!sched.covers(date(2024, 5, 25))); // before range
        assert!(!sched.covers(date(2024, 9, 1))); // after range
    }

    #[test]
    fn inactive_schedule_covers_nothing() {
        let mut sched = schedule(WeekdaySet::ALL);
        sched.is_active = false;
        assert!(!sched.covers(date(2024, 6, 1)));
    }
}
