//! In-memory party store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, PartyId, PortError};
use domain_party::{Party, PartyKind, PartyPort};

/// In-memory party storage for tests and local development
#[derive(Debug, Default)]
pub struct InMemoryPartyStore {
    parties: RwLock<HashMap<PartyId, Party>>,
}

impl InMemoryPartyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PartyPort for InMemoryPartyStore {
    async fn insert(&self, party: &Party) -> Result<(), PortError> {
        let mut parties = self.parties.write().await;
        if parties.contains_key(&party.id) {
            return Err(PortError::conflict(format!(
                "party {} already exists",
                party.id
            )));
        }
        parties.insert(party.id, party.clone());
        Ok(())
    }

    async fn get(&self, id: PartyId) -> Result<Party, PortError> {
        self.parties
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Party", id))
    }

    async fn list(&self, kind: PartyKind) -> Result<Vec<Party>, PortError> {
        let mut parties: Vec<Party> = self
            .parties
            .read()
            .await
            .values()
            .filter(|p| p.kind == kind)
            .cloned()
            .collect();
        parties.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(parties)
    }

    async fn update(&self, party: &Party) -> Result<(), PortError> {
        let mut parties = self.parties.write().await;
        match parties.get_mut(&party.id) {
            Some(existing) => {
                *existing = party.clone();
                Ok(())
            }
            None => Err(PortError::not_found("Party", party.id)),
        }
    }

    async fn delete(&self, id: PartyId) -> Result<(), PortError> {
        match self.parties.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(PortError::not_found("Party", id)),
        }
    }
}

impl DomainPort for InMemoryPartyStore {
    fn adapter_name(&self) -> &'static str {
        "memory-parties"
    }
}
