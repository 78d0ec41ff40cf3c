use serde::Serialize;
use tracing::debug;

use super::{ApiClient, ApiError};
use crate::config::constants::api::{DEFAULT_SGP_SAMPLES, PROBABILITY_PATH, SGP_PATH};
use crate::models::{ParlayProbability, Pricing, PropLeg, PropProbability};

const EMPTY_SLIP_MESSAGE: &str = "Add at least one leg first";

#[derive(Debug, Clone, Serialize)]
pub struct SingleLegRequest<'a> {
    pub leg: &'a PropLeg,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParlayRequest<'a> {
    pub legs: &'a [PropLeg],
    pub n_samples: u32,
}

/// Prices a slip of legs against the probability endpoints.
///
/// A single leg goes to the marginal endpoint; two or more are priced
/// jointly by simulation.
#[derive(Debug, Clone)]
pub struct PricingClient {
    client: ApiClient,
    samples: u32,
}

impl PricingClient {
    pub fn new(client: ApiClient) -> Self {
        Self::with_samples(client, DEFAULT_SGP_SAMPLES)
    }

    pub fn with_samples(client: ApiClient, samples: u32) -> Self {
        Self { client, samples }
    }

    pub async fn price(&self, legs: &[PropLeg]) -> Result<Pricing, ApiError> {
        match legs {
            [] => Err(ApiError::InvalidRequest(EMPTY_SLIP_MESSAGE.to_string())),
            [leg] => {
                debug!(%leg, "pricing single leg");
                let reply: PropProbability = self
                    .client
                    .post_json(PROBABILITY_PATH, &SingleLegRequest { leg })
                    .await?;
                Ok(Pricing::Single(reply))
            }
            _ => {
                debug!(legs = legs.len(), samples = self.samples, "pricing parlay");
                let body = ParlayRequest {
                    legs,
                    n_samples: self.samples,
                };
                let reply: ParlayProbability = self.client.post_json(SGP_PATH, &body).await?;
                Ok(Pricing::Parlay(reply))
            }
        }
    }
}
