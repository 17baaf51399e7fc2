pub mod auth_extractor;
pub mod auth_handlers;
pub mod challenge_cache;
pub mod handlers;
pub mod registry_handlers;
pub mod routes;

use crate::registry::{Gs1RegistryClient, PartnerFeedClient, PaymentProcessorClient};
use crate::store::traits::Store;
use challenge_cache::ChallengeCache;

/// Shared application state handed to every handler
#[derive(Debug)]
pub struct AppContext<S: Store> {
    pub store: S,
    pub gs1_registry: Gs1RegistryClient,
    pub payment_processor: PaymentProcessorClient,
    pub partner_feeds: PartnerFeedClient,
    pub challenges: ChallengeCache,
}

impl<S: Store> AppContext<S> {
    pub fn new(
        store: S,
        gs1_registry: Gs1RegistryClient,
        payment_processor: PaymentProcessorClient,
        partner_feeds: PartnerFeedClient,
    ) -> Self {
        Self {
            store,
            gs1_registry,
            payment_processor,
            partner_feeds,
            challenges: ChallengeCache::new(),
        }
    }
}
