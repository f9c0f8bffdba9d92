use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use rtc_calendar::DateTime;

use crate::Rtc;

/// A clock that several tasks or interrupt handlers use.
///
/// Every access runs inside a critical section, so each operation completes
/// its bus transactions without interleaving.
pub struct SharedRtc<R> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<R>>,
}

impl<R> SharedRtc<R> {
    pub const fn new(rtc: R) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(rtc)),
        }
    }

    /// Runs `f` with exclusive access to the clock.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls back into the same `SharedRtc`.
    pub fn with<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        self.inner.lock(|rtc| f(&mut rtc.borrow_mut()))
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner().into_inner()
    }
}

impl<R: Rtc> SharedRtc<R> {
    pub fn now(&self) -> Result<DateTime, R::Error> {
        self.with(|rtc| rtc.now())
    }

    pub fn adjust(&self, datetime: &DateTime) -> Result<(), R::Error> {
        self.with(|rtc| rtc.adjust(datetime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;
    use crate::ds3231::{Alarm, AlarmType, Ds3231};
    use crate::millis::MillisClock;
    use crate::testing::RegisterBank;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;

    #[test]
    fn test_shared_millis_clock_across_threads() {
        static TICKS: AtomicU64 = AtomicU64::new(0);
        let clock = Arc::new(SharedRtc::new(MillisClock::new(|| TICKS.load(Ordering::Relaxed))));
        let start = DateTime::from_ymd_hms(2025, 3, 1, 10, 0, 0);
        clock.adjust(&start).unwrap();

        let reader = Arc::clone(&clock);
        let handle = thread::spawn(move || reader.now().unwrap());
        assert_eq!(handle.join().unwrap(), start);

        TICKS.store(2_000, Ordering::Relaxed);
        assert_eq!(clock.now().unwrap().second(), 2);
    }

    #[test]
    fn test_with_gives_access_to_chip_specific_operations() {
        let shared = SharedRtc::new(Ds3231::new(RegisterBank::new(0x68)));
        shared
            .with(|rtc| rtc.set_alarm(AlarmType::Alarm2EveryMinute, 0, 0, 0, 0))
            .unwrap();
        assert!(shared.with(|rtc| rtc.is_armed(Alarm::Two)).unwrap());

        let dt = DateTime::from_ymd_hms(2077, 7, 7, 7, 7, 7);
        shared.adjust(&dt).unwrap();
        assert_eq!(shared.now().unwrap(), dt);
        assert_eq!(shared.into_inner().release().registers[0x0B], 0x80);
    }
}
