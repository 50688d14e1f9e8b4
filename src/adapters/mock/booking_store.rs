use crate::domain::booking::{BookingOrdering, BookingState, BookingStatus};
use crate::domain::value_objects::{BookingId, UserId};
use crate::ports::booking_store::{
    BookingRecord, BookingStore as BookingStoreTrait, NewBooking, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory implementation of BookingStore
///
/// Ids are assigned from a monotonic sequence, so ascending id order
/// equals insertion order. Filtering and sorting delegate to the domain
/// (`BookingState::matches` / `BookingState::ordering`), keeping this
/// adapter behaviorally aligned with the PostgreSQL one.
#[allow(dead_code)]
pub struct BookingStore {
    bookings: Mutex<Vec<BookingRecord>>,
    next_id: AtomicI64,
}

#[allow(dead_code)]
impl BookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn find_matching<F>(
        &self,
        scope: F,
        state: BookingState,
        now: DateTime<Utc>,
    ) -> Vec<BookingRecord>
    where
        F: Fn(&BookingRecord) -> bool,
    {
        let bookings = self.bookings.lock().unwrap();
        let mut matched: Vec<BookingRecord> = bookings
            .iter()
            .filter(|r| scope(r) && state.matches(r.start, r.end, r.status, now))
            .cloned()
            .collect();

        match state.ordering() {
            BookingOrdering::StartDesc => matched.sort_by(|a, b| b.start.cmp(&a.start)),
            BookingOrdering::IdAsc => matched.sort_by_key(|r| r.id),
        }

        matched
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// Assign the next sequence id and keep the record
    async fn save(&self, booking: NewBooking) -> Result<BookingRecord> {
        let id = BookingId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = BookingRecord {
            id,
            item_id: booking.item_id,
            item_name: booking.item_name,
            item_owner_id: booking.item_owner_id,
            booker_id: booking.booker_id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
        };

        self.bookings.lock().unwrap().push(record.clone());
        Ok(record)
    }

    /// Overwrite the status of the stored record (no guard, last write wins)
    async fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<BookingRecord>> {
        let mut bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter_mut().find(|r| r.id == booking_id).map(|r| {
            r.status = status;
            r.clone()
        }))
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingRecord>> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter().find(|r| r.id == booking_id).cloned())
    }

    async fn find_by_booker(
        &self,
        booker_id: UserId,
        state: BookingState,
        now: DateTime<Utc>,
    ) -> Result<Vec<BookingRecord>> {
        Ok(self.find_matching(|r| r.booker_id == booker_id, state, now))
    }

    async fn find_by_owner(
        &self,
        owner_id: UserId,
        state: BookingState,
        now: DateTime<Utc>,
    ) -> Result<Vec<BookingRecord>> {
        Ok(self.find_matching(|r| r.item_owner_id == owner_id, state, now))
    }
}
