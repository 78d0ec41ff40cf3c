//! Clients for the statistics service.
//!
//! The search provider feeds the player widget; the pricing client is what
//! the host calls with the legs it built from selected players.

mod client;
mod error;
mod pricing;
mod search;

pub use client::ApiClient;
pub use error::ApiError;
pub use pricing::{ParlayRequest, PricingClient, SingleLegRequest};
pub use search::{HttpSearchProvider, SearchProvider, SearchRequest};
