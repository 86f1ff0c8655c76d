//! Latest fetched snapshot of each remote collection.

use std::collections::HashMap;

use api_types::{
    equipment::{EquipmentInstance, EquipmentStatus, EquipmentType},
    stock::StockEntry,
    user::User,
};

use crate::client::{Client, ClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Stock,
    Users,
    EquipmentTypes,
    AvailableEquipment,
    AllocatedEquipment,
}

impl Collection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stock => "estoque",
            Self::Users => "usuários",
            Self::EquipmentTypes => "tipos de equipamento",
            Self::AvailableEquipment => "equipamentos disponíveis",
            Self::AllocatedEquipment => "equipamentos alocados",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Stock(Vec<StockEntry>),
    Users(Vec<User>),
    EquipmentTypes(Vec<EquipmentType>),
    Equipment(Vec<EquipmentInstance>),
}

impl Snapshot {
    pub fn len(&self) -> usize {
        match self {
            Self::Stock(items) => items.len(),
            Self::Users(items) => items.len(),
            Self::EquipmentTypes(items) => items.len(),
            Self::Equipment(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fetches the backend collection behind `key`.
pub async fn fetch(client: &Client, key: Collection) -> Result<Snapshot, ClientError> {
    let snapshot = match key {
        Collection::Stock => Snapshot::Stock(client.stock_list().await?),
        Collection::Users => Snapshot::Users(client.users_list().await?),
        Collection::EquipmentTypes => {
            Snapshot::EquipmentTypes(client.equipment_types_list().await?)
        }
        Collection::AvailableEquipment => Snapshot::Equipment(
            client
                .equipment_instances_list(Some(EquipmentStatus::Available))
                .await?,
        ),
        Collection::AllocatedEquipment => Snapshot::Equipment(
            client
                .equipment_instances_list(Some(EquipmentStatus::Allocated))
                .await?,
        ),
    };
    Ok(snapshot)
}

/// At most one snapshot per collection. A failed load never touches the
/// stored snapshot.
#[derive(Debug, Default, Clone)]
pub struct CollectionStore {
    snapshots: HashMap<Collection, Snapshot>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches `key` and replaces its snapshot on success.
    pub async fn load(&mut self, client: &Client, key: Collection) -> Result<(), ClientError> {
        let result = fetch(client, key).await;
        self.apply(key, result)
    }

    /// Applies a completed fetch: success replaces the snapshot whole,
    /// failure leaves the previous one in place.
    pub fn apply(
        &mut self,
        key: Collection,
        result: Result<Snapshot, ClientError>,
    ) -> Result<(), ClientError> {
        match result {
            Ok(snapshot) => {
                tracing::debug!(?key, len = snapshot.len(), "snapshot replaced");
                self.snapshots.insert(key, snapshot);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(?key, "load failed, keeping previous snapshot: {err}");
                Err(err)
            }
        }
    }

    pub fn get(&self, key: Collection) -> Option<&Snapshot> {
        self.snapshots.get(&key)
    }

    pub fn stock(&self) -> &[StockEntry] {
        match self.get(Collection::Stock) {
            Some(Snapshot::Stock(items)) => items,
            _ => &[],
        }
    }

    pub fn users(&self) -> &[User] {
        match self.get(Collection::Users) {
            Some(Snapshot::Users(items)) => items,
            _ => &[],
        }
    }

    pub fn equipment_types(&self) -> &[EquipmentType] {
        match self.get(Collection::EquipmentTypes) {
            Some(Snapshot::EquipmentTypes(items)) => items,
            _ => &[],
        }
    }

    pub fn available_equipment(&self) -> &[EquipmentInstance] {
        self.equipment(Collection::AvailableEquipment)
    }

    pub fn allocated_equipment(&self) -> &[EquipmentInstance] {
        self.equipment(Collection::AllocatedEquipment)
    }

    fn equipment(&self, key: Collection) -> &[EquipmentInstance] {
        match self.get(key) {
            Some(Snapshot::Equipment(items)) => items,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, nome: &str) -> User {
        User {
            id,
            nome: nome.to_string(),
            cpf: None,
            cargo: None,
            cidade: None,
            setor: None,
            email: None,
            matricula: None,
            updated_at: None,
        }
    }

    fn rejected() -> ClientError {
        ClientError::Api {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        }
    }

    #[test]
    fn never_loaded_collections_read_empty() {
        let store = CollectionStore::new();
        assert!(store.get(Collection::Users).is_none());
        assert!(store.users().is_empty());
        assert!(store.allocated_equipment().is_empty());
    }

    #[test]
    fn success_replaces_whole_snapshot() {
        let mut store = CollectionStore::new();
        store
            .apply(Collection::Users, Ok(Snapshot::Users(vec![user(1, "Ana"), user(2, "Bia")])))
            .unwrap();
        store
            .apply(Collection::Users, Ok(Snapshot::Users(vec![user(3, "Caio")])))
            .unwrap();
        assert_eq!(store.users(), &[user(3, "Caio")]);
    }

    #[test]
    fn failed_load_keeps_previous_snapshot() {
        let mut store = CollectionStore::new();
        store
            .apply(Collection::Users, Ok(Snapshot::Users(vec![user(1, "Ana")])))
            .unwrap();

        let err = store.apply(Collection::Users, Err(rejected())).unwrap_err();

        assert!(!err.is_transport());
        assert_eq!(store.users(), &[user(1, "Ana")]);
    }

    #[test]
    fn equipment_subsets_are_independent() {
        let mut store = CollectionStore::new();
        store
            .apply(Collection::AvailableEquipment, Ok(Snapshot::Equipment(Vec::new())))
            .unwrap();
        assert!(store.get(Collection::AvailableEquipment).is_some());
        assert!(store.get(Collection::AllocatedEquipment).is_none());
    }
}
