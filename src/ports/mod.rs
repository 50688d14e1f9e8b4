#[allow(unused_imports)]
pub mod booking_store;
#[allow(unused_imports)]
pub mod item_directory;
#[allow(unused_imports)]
pub mod user_directory;

#[allow(unused_imports)]
pub use booking_store::*;
#[allow(unused_imports)]
pub use item_directory::*;
#[allow(unused_imports)]
pub use user_directory::*;
