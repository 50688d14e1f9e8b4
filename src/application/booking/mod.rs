mod booking_service;
mod errors;

#[allow(unused_imports)]
pub use booking_service::{
    ServiceDependencies, approve_booking, create_booking, get_booking_by_id,
    get_bookings_by_booker, get_bookings_by_owner,
};
#[allow(unused_imports)]
pub use errors::{BookingApplicationError, ErrorKind, Result};
