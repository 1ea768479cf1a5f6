//! Trap-ranking client for the external reordering service.
//!
//! This crate provides a Rust client for the optional trap-ranking hook
//! over gRPC. It handles:
//! - Connection management to the ranking service
//! - Sending the seed and surviving combinations
//! - Validating that the response is a permutation of the request
//! - Error handling at the boundary
//!
//! The caller owns the degrade path: every failure here is an error value,
//! and the session falls back to the unranked pool rather than aborting.

use thiserror::Error;
use tonic::transport::Channel;
use tracing::{debug, error, info};

// Include the generated protobuf code
pub mod trapranking {
    tonic::include_proto!("trapranking");
}

use trapranking::{RankRequest, trap_ranker_client::TrapRankerClient as GrpcTrapRankerClient};

/// Errors that can occur when interacting with the ranking service
#[derive(Error, Debug)]
pub enum RankClientError {
    #[error("Failed to connect to trap-ranking service: {0}")]
    ConnectionError(String),

    #[error("Failed to rank combinations: {0}")]
    RankingError(String),

    #[error("Invalid response from trap-ranking service: {0}")]
    InvalidResponse(String),
}

/// Client for the trap-ranking service.
///
/// This wraps the auto-generated gRPC client and provides a higher-level
/// interface that validates responses before handing them back.
#[derive(Clone)]
pub struct TrapRankerClient {
    client: GrpcTrapRankerClient<Channel>,
    service_addr: String,
}

impl TrapRankerClient {
    /// Connect to the trap-ranking service.
    ///
    /// # Arguments
    /// * `addr` - Address of the gRPC service (e.g., "http://localhost:50055")
    pub async fn connect(addr: impl Into<String>) -> Result<Self, RankClientError> {
        let addr = addr.into();
        info!("Connecting to trap-ranking service at {}", addr);

        let channel = Channel::from_shared(addr.clone())
            .map_err(|e| RankClientError::ConnectionError(e.to_string()))?
            .connect()
            .await
            .map_err(|e| RankClientError::ConnectionError(e.to_string()))?;

        let client = GrpcTrapRankerClient::new(channel);
        Ok(TrapRankerClient {
            client,
            service_addr: addr,
        })
    }

    /// Rank the surviving combinations for a seed.
    ///
    /// # Arguments
    /// * `seed` - The session seed, as entered
    /// * `combinations` - Canonical combination strings to reorder
    ///
    /// # Returns
    /// The same combinations in ranked order. The response must be a
    /// permutation of the request — same length, same members — anything
    /// else is an `InvalidResponse`.
    pub async fn rank(
        &mut self,
        seed: &str,
        combinations: &[String],
    ) -> Result<Vec<String>, RankClientError> {
        let expected_len = combinations.len();
        debug!(
            "Ranking {} combinations for seed {}",
            expected_len, seed
        );

        let request = tonic::Request::new(RankRequest {
            seed: seed.to_string(),
            combinations: combinations.to_vec(),
        });

        let response = self.client.rank_combinations(request).await.map_err(|e| {
            error!("gRPC error while ranking combinations: {}", e);
            RankClientError::RankingError(e.to_string())
        })?;

        let ranked = response.into_inner().ranked;

        if ranked.len() != expected_len {
            error!(
                "Mismatch in number of combinations returned: expected {}, got {}",
                expected_len,
                ranked.len()
            );
            return Err(RankClientError::InvalidResponse(
                "ranked list length does not match request".into(),
            ));
        }

        // Same members check: the request is duplicate-free, so equal sets
        // plus equal lengths means a true permutation.
        let sent: std::collections::HashSet<&String> = combinations.iter().collect();
        let returned: std::collections::HashSet<&String> = ranked.iter().collect();
        if sent != returned {
            error!("Ranked list is not a permutation of the request");
            return Err(RankClientError::InvalidResponse(
                "ranked list is not a permutation of the request".into(),
            ));
        }

        Ok(ranked)
    }

    /// Get the address of the ranking service this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_request_shape() {
        let request = RankRequest {
            seed: "12345".to_string(),
            combinations: vec!["00123".to_string(), "12223".to_string()],
        };

        assert_eq!(request.seed, "12345");
        assert_eq!(request.combinations.len(), 2);
    }

    #[test]
    fn test_connect_rejects_bad_uri() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(TrapRankerClient::connect("not a uri"));
        assert!(matches!(result, Err(RankClientError::ConnectionError(_))));
    }
}
