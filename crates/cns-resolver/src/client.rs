//! Read client
//!
//! [`CnsClient`] bundles the network parameters, a contract gateway, and
//! an index reader behind the read operations. Collaborators are injected
//! per instance, so two clients never share debug or transport behaviour.

use std::fmt;
use std::sync::Arc;

use cns_core::Address;
use cns_params::Network;
use cns_subgraph::{IndexReader, SubgraphClient, SubgraphConfig};
use tracing::info;

use crate::batch::{self, BatchError, BatchRequest, BatchSet, SlotOutcome};
use crate::expiry::{self, ExpiryContract, ExpiryRecord};
use crate::gateway::ContractGateway;
use crate::history::{self, NameHistory};
use crate::owner::{self, OwnerOptions, OwnerRecord};
use crate::records::{self, ReverseRecord};
use crate::{Error, Result};

/// Read client for the name service.
pub struct CnsClient {
    network: Network,
    gateway: Arc<dyn ContractGateway>,
    index: Arc<dyn IndexReader>,
}

impl CnsClient {
    /// Creates a client from explicit collaborators.
    pub fn new(
        network: Network,
        gateway: Arc<dyn ContractGateway>,
        index: Arc<dyn IndexReader>,
    ) -> Self {
        info!("Creating read client for network {}", network.name);
        Self {
            network,
            gateway,
            index,
        }
    }

    /// Creates a client backed by the network's default subgraph endpoint.
    pub fn with_default_subgraph(network: Network, gateway: Arc<dyn ContractGateway>) -> Self {
        let index = Arc::new(SubgraphClient::new(SubgraphConfig::new(
            network.subgraph_url,
        )));
        Self::new(network, gateway, index)
    }

    /// The network this client reads from.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Resolves the current owner of a name.
    ///
    /// Returns `None` when no tier claims the name. An index fault keeps
    /// the on-chain record as the error's partial payload.
    pub async fn get_owner(
        &self,
        name: &str,
        options: OwnerOptions,
    ) -> Result<Option<OwnerRecord>, Option<OwnerRecord>> {
        match owner::resolve_owner_slot(
            self.gateway.as_ref(),
            self.index.as_ref(),
            self.network.chain_id,
            name,
            options,
        )
        .await
        {
            SlotOutcome::Ok(record) => Ok(record),
            SlotOutcome::Degraded { partial, faults } => Err(Error::Subgraph {
                partial: partial.flatten(),
                faults,
            }),
            SlotOutcome::Fatal(err) => Err(err.with_partial_type()),
        }
    }

    /// Reads when a registration's life ends.
    ///
    /// `contract` forces the source; by default the wrapper answers for
    /// names in its custody and the registrar for other second-level
    /// names.
    pub async fn get_expiry(
        &self,
        name: &str,
        contract: Option<ExpiryContract>,
    ) -> Result<Option<ExpiryRecord>> {
        expiry::resolve_expiry_slot(self.gateway.as_ref(), self.network.chain_id, name, contract)
            .await
            .into_result()
    }

    /// Reads whether a second-level name is open for registration.
    pub async fn get_available(&self, name: &str) -> Result<bool> {
        records::resolve_available_slot(self.gateway.as_ref(), name)
            .await
            .into_result()
    }

    /// Reads a text record, mapping an unset record to `None`.
    pub async fn get_text(&self, name: &str, key: &str) -> Result<Option<String>> {
        records::resolve_text_slot(self.gateway.as_ref(), name, key)
            .await
            .into_result()
    }

    /// Reads the address record of a name, mapping the zero address to `None`.
    pub async fn get_addr(&self, name: &str) -> Result<Option<Address>> {
        records::resolve_addr_slot(self.gateway.as_ref(), name)
            .await
            .into_result()
    }

    /// Reads the primary name claimed by an address.
    pub async fn get_name(&self, address: Address) -> Result<Option<ReverseRecord>> {
        records::resolve_name_slot(self.gateway.as_ref(), address)
            .await
            .into_result()
    }

    /// Reads the recorded history of a name from the index.
    pub async fn get_history(
        &self,
        name: &str,
    ) -> Result<Option<NameHistory>, Option<NameHistory>> {
        match history::resolve_history_slot(self.index.as_ref(), name).await {
            SlotOutcome::Ok(value) => Ok(value),
            SlotOutcome::Degraded { partial, faults } => Err(Error::Subgraph {
                partial: partial.flatten(),
                faults,
            }),
            SlotOutcome::Fatal(err) => Err(err.with_partial_type()),
        }
    }

    /// Prepares an ownership read as a batch slot.
    pub fn get_owner_batch<'a>(
        &'a self,
        name: &str,
        options: OwnerOptions,
    ) -> BatchRequest<'a, Option<OwnerRecord>> {
        let name = name.to_string();
        BatchRequest::new(Box::pin(async move {
            owner::resolve_owner_slot(
                self.gateway.as_ref(),
                self.index.as_ref(),
                self.network.chain_id,
                &name,
                options,
            )
            .await
        }))
    }

    /// Prepares an expiry read as a batch slot.
    pub fn get_expiry_batch<'a>(
        &'a self,
        name: &str,
        contract: Option<ExpiryContract>,
    ) -> BatchRequest<'a, Option<ExpiryRecord>> {
        let name = name.to_string();
        BatchRequest::new(Box::pin(async move {
            expiry::resolve_expiry_slot(
                self.gateway.as_ref(),
                self.network.chain_id,
                &name,
                contract,
            )
            .await
        }))
    }

    /// Prepares an availability read as a batch slot.
    pub fn get_available_batch<'a>(&'a self, name: &str) -> BatchRequest<'a, bool> {
        let name = name.to_string();
        BatchRequest::new(Box::pin(async move {
            records::resolve_available_slot(self.gateway.as_ref(), &name).await
        }))
    }

    /// Prepares a text-record read as a batch slot.
    pub fn get_text_batch<'a>(&'a self, name: &str, key: &str) -> BatchRequest<'a, Option<String>> {
        let name = name.to_string();
        let key = key.to_string();
        BatchRequest::new(Box::pin(async move {
            records::resolve_text_slot(self.gateway.as_ref(), &name, &key).await
        }))
    }

    /// Prepares an address-record read as a batch slot.
    pub fn get_addr_batch<'a>(&'a self, name: &str) -> BatchRequest<'a, Option<Address>> {
        let name = name.to_string();
        BatchRequest::new(Box::pin(async move {
            records::resolve_addr_slot(self.gateway.as_ref(), &name).await
        }))
    }

    /// Prepares a reverse-name read as a batch slot.
    pub fn get_name_batch<'a>(
        &'a self,
        address: Address,
    ) -> BatchRequest<'a, Option<ReverseRecord>> {
        BatchRequest::new(Box::pin(async move {
            records::resolve_name_slot(self.gateway.as_ref(), address).await
        }))
    }

    /// Prepares a history read as a batch slot.
    pub fn get_history_batch<'a>(&'a self, name: &str) -> BatchRequest<'a, Option<NameHistory>> {
        let name = name.to_string();
        BatchRequest::new(Box::pin(async move {
            history::resolve_history_slot(self.index.as_ref(), &name).await
        }))
    }

    /// Settles a set of prepared reads as one batch.
    ///
    /// Slots settle concurrently and results come back in supply order.
    /// A batch of one settles to the same value the plain read returns.
    pub async fn batch<'a, B: BatchSet<'a>>(
        &self,
        requests: B,
    ) -> std::result::Result<B::Output, BatchError<B::Partial>> {
        batch::execute(requests).await
    }
}

impl fmt::Debug for CnsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CnsClient")
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}
