//! Campus accommodation meal-booking backend.
//!
//! Students book the coming week's meals, managers publish menus and review
//! bookings, accommodation staff administer accounts, and a gate account
//! checks bookings at the dining-hall door. Handlers speak to the relational
//! store through domain-defined ports; Diesel adapters implement them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by tooling and the debug docs route.
pub use doc::ApiDoc;
