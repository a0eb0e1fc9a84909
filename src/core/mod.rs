pub mod booking;
pub mod ranking;
pub mod snapshot;
pub mod tv_rating;

pub use crate::domain::model::{BookingState, Federation, Show, ShowKind};
pub use crate::domain::ports::{Clock, ConfigProvider, Storage};
pub use crate::utils::error::Result;
