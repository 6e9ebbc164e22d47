//! Investing.com API client.
//!
//! Stateless request/response mapping for the three upstream operations:
//! login, portfolio listing, and the portfolio summary fetch. Error
//! classification lives here; retry behavior does not.

mod device;
mod investing;
mod source;

pub use device::generate_device_id;
pub use investing::{ClientConfig, InvestingClient};
pub use source::ClientSummarySource;
