//! Party storage port

use async_trait::async_trait;
use core_kernel::{DomainPort, PartyId, PortError};

use crate::party::{Party, PartyKind};

/// Storage operations the party domain needs from its data source
///
/// Implementations: `infra_db::PostgresPartyRepository` (production) and
/// `infra_db::InMemoryPartyStore` (tests, local development).
#[async_trait]
pub trait PartyPort: DomainPort {
    /// Persists a new party
    async fn insert(&self, party: &Party) -> Result<(), PortError>;

    /// Fetches a party by id
    async fn get(&self, id: PartyId) -> Result<Party, PortError>;

    /// Lists all parties of one kind
    async fn list(&self, kind: PartyKind) -> Result<Vec<Party>, PortError>;

    /// Overwrites an existing party
    async fn update(&self, party: &Party) -> Result<(), PortError>;

    /// Deletes a party
    ///
    /// Invoices referencing the party are not cascaded; they keep their
    /// denormalized name snapshot.
    async fn delete(&self, id: PartyId) -> Result<(), PortError>;
}
