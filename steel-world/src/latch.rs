use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// One-shot countdown barrier. Waiters are released once the count reaches zero; the count never
/// goes back up.
#[derive(Debug)]
pub struct CountDownLatch {
    count: Mutex<usize>,
    zero: Condvar,
}

impl CountDownLatch {
    pub fn new(count: usize) -> Self {
        Self {
            count: Mutex::new(count),
            zero: Condvar::new(),
        }
    }

    /// Decrements the count, waking all waiters when it hits zero. No-op at zero.
    pub fn count_down(&self) {
        let mut count = self.count.lock();
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            self.zero.notify_all();
        }
    }

    pub fn count(&self) -> usize {
        *self.count.lock()
    }

    /// Blocks until the count reaches zero or `timeout` elapses. Returns whether it reached zero.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut count = self.count.lock();
        while *count > 0 {
            match deadline {
                Some(deadline) => {
                    if self.zero.wait_until(&mut count, deadline).timed_out() {
                        return *count == 0;
                    }
                }
                None => self.zero.wait(&mut count),
            }
        }
        true
    }
}

#[cfg(test)]
mod test {
    use std::{
        sync::Arc,
        thread,
        time::{Duration, Instant},
    };

    use super::CountDownLatch;

    #[test]
    fn zero_latch_is_open() {
        let latch = CountDownLatch::new(0);
        assert!(latch.wait_timeout(Duration::ZERO));
        latch.count_down();
        assert_eq!(latch.count(), 0);
    }

    #[test]
    fn times_out() {
        let latch = CountDownLatch::new(2);
        latch.count_down();

        let start = Instant::now();
        assert!(!latch.wait_timeout(Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(latch.count(), 1);
    }

    #[test]
    fn releases_waiter() {
        let latch = Arc::new(CountDownLatch::new(3));
        let waiter = {
            let latch = latch.clone();
            thread::spawn(move || latch.wait_timeout(Duration::from_secs(10)))
        };

        for _ in 0..3 {
            thread::sleep(Duration::from_millis(5));
            latch.count_down();
        }
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn huge_timeout_does_not_overflow() {
        let latch = CountDownLatch::new(1);
        latch.count_down();
        assert!(latch.wait_timeout(Duration::MAX));
    }
}
