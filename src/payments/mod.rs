//! PayTR payment gateway integration
//!
//! Request builders, callback verification and response handling are pure
//! and always available. The `client` feature adds the async transport and
//! the `PaytrClient` facade on top of them.

pub mod amount;
pub mod callback;
pub mod charge;
pub mod form;
pub mod refund;
pub mod response;
pub mod signing;
pub mod types;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod traits;
#[cfg(feature = "client")]
pub mod transport;
