pub mod calendar;
pub mod config;
pub mod error;
pub mod io;
pub mod lottery;
pub mod mail;
pub mod meeting;
pub mod model;
pub mod notify;
pub mod paths;
pub mod rotation;
pub mod store;

pub use error::{LotteryError, Result};
pub use rotation::Controller;
