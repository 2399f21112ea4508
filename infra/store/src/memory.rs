use crate::error::StoreError;
use crate::records::{
    BindingRecord, BoundEnvironment, CasOutcome, EnvironmentRecord, FeatureRecord, Index, Table,
};
use crate::store::FlagStore;
use fxhash::{FxHashMap, FxHashSet};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use switcharoo_domain::config::StoreConfig;
use switcharoo_domain::{BindingId, EnvironmentId, FeatureId, OwnerId};
use tracing::{debug, trace};

/// Slots reserved per table when no capacity is configured.
const DEFAULT_CAPACITY: usize = 64;

/// A row plus its insertion sequence, used to list rows in creation order.
#[derive(Debug)]
struct Row<T> {
    seq: u64,
    record: T,
}

#[derive(Debug, Default)]
struct Tables {
    seq: u64,
    owners: FxHashSet<OwnerId>,
    environments: FxHashMap<EnvironmentId, Row<EnvironmentRecord>>,
    environment_names: FxHashMap<(OwnerId, String), EnvironmentId>,
    features: FxHashMap<FeatureId, Row<FeatureRecord>>,
    feature_names: FxHashMap<(OwnerId, String), FeatureId>,
    bindings: FxHashMap<BindingId, Row<BindingRecord>>,
    binding_pairs: FxHashMap<(FeatureId, EnvironmentId), BindingId>,
}

impl Tables {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            seq: 0,
            owners: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            environments: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            environment_names: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            features: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            feature_names: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            bindings: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            binding_pairs: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    const fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Removes every binding matching `doomed`, keeping the pair index in sync.
    fn drop_bindings(&mut self, doomed: impl Fn(&BindingRecord) -> bool) -> usize {
        let ids: Vec<BindingId> =
            self.bindings.values().filter(|row| doomed(&row.record)).map(|row| row.record.id).collect();

        for id in &ids {
            if let Some(row) = self.bindings.remove(id) {
                self.binding_pairs.remove(&(row.record.feature, row.record.environment));
            }
        }
        ids.len()
    }
}

/// Row counts per table, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub owners: usize,
    pub environments: usize,
    pub features: usize,
    pub bindings: usize,
}

/// Concurrent in-memory engine implementing [`FlagStore`].
///
/// All tables live behind a single `RwLock`; each trait method takes the lock once, so
/// every method is atomic and unique checks cannot race with inserts. The lock is never
/// held across an `.await`.
#[switcharoo_derive::shared]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MemoryStore {
    /// Creates an empty store with `capacity` slots reserved per table.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(MemoryStoreInner {
            tables: RwLock::new(Tables::with_capacity(capacity)),
            offline: AtomicBool::new(false),
        })
    }

    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Simulates losing (or regaining) the connection: while offline every operation
    /// fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
        debug!(offline, "Memory store availability changed");
    }

    #[must_use]
    pub fn counts(&self) -> TableCounts {
        let tables = self.tables.read();
        TableCounts {
            owners: tables.owners.len(),
            environments: tables.environments.len(),
            features: tables.features.len(),
            bindings: tables.bindings.len(),
        }
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable {
                message: "memory store is offline".into(),
                context: None,
            });
        }
        Ok(())
    }
}

const fn unique(index: Index) -> StoreError {
    StoreError::UniqueViolation { index, context: None }
}

const fn missing(table: Table) -> StoreError {
    StoreError::MissingReference { table, context: None }
}

fn duplicate_key(table: Table) -> StoreError {
    StoreError::Internal {
        message: format!("primary key collision in {table}").into(),
        context: None,
    }
}

/// Clones the records of `rows` in creation order.
fn ordered<'a, T: Clone + 'a>(rows: impl Iterator<Item = &'a Row<T>>) -> Vec<T> {
    let mut rows: Vec<&Row<T>> = rows.collect();
    rows.sort_unstable_by_key(|row| row.seq);
    rows.into_iter().map(|row| row.record.clone()).collect()
}

impl FlagStore for MemoryStore {
    async fn insert_owner(&self, owner: OwnerId) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write();

        if !tables.owners.insert(owner) {
            return Err(unique(Index::OwnerKey));
        }
        trace!(%owner, "Owner inserted");
        Ok(())
    }

    async fn owner_exists(&self, owner: OwnerId) -> Result<bool, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().owners.contains(&owner))
    }

    async fn insert_environment(&self, record: EnvironmentRecord) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write();

        if !tables.owners.contains(&record.owner) {
            return Err(missing(Table::Owners));
        }
        if tables.environments.contains_key(&record.id) {
            return Err(duplicate_key(Table::Environments));
        }
        let name_key = (record.owner, record.name.clone());
        if tables.environment_names.contains_key(&name_key) {
            return Err(unique(Index::EnvironmentName));
        }

        let seq = tables.next_seq();
        tables.environment_names.insert(name_key, record.id);
        trace!(id = %record.id, "Environment inserted");
        tables.environments.insert(record.id, Row { seq, record });
        Ok(())
    }

    async fn find_environment(
        &self,
        id: EnvironmentId,
    ) -> Result<Option<EnvironmentRecord>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().environments.get(&id).map(|row| row.record.clone()))
    }

    async fn find_environment_by_name(
        &self,
        owner: OwnerId,
        name: &str,
    ) -> Result<Option<EnvironmentRecord>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read();

        Ok(tables
            .environment_names
            .get(&(owner, name.to_owned()))
            .and_then(|id| tables.environments.get(id))
            .map(|row| row.record.clone()))
    }

    async fn environments_of(&self, owner: OwnerId) -> Result<Vec<EnvironmentRecord>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read();
        Ok(ordered(tables.environments.values().filter(|row| row.record.owner == owner)))
    }

    async fn delete_environment(&self, id: EnvironmentId) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write();

        let Some(row) = tables.environments.remove(&id) else {
            return Ok(false);
        };
        tables.environment_names.remove(&(row.record.owner, row.record.name));
        let cascaded = tables.drop_bindings(|binding| binding.environment == id);

        trace!(%id, cascaded, "Environment deleted");
        Ok(true)
    }

    async fn insert_feature(&self, record: FeatureRecord) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write();

        if !tables.owners.contains(&record.owner) {
            return Err(missing(Table::Owners));
        }
        if tables.features.contains_key(&record.id) {
            return Err(duplicate_key(Table::Features));
        }
        let name_key = (record.owner, record.name.clone());
        if tables.feature_names.contains_key(&name_key) {
            return Err(unique(Index::FeatureName));
        }

        let seq = tables.next_seq();
        tables.feature_names.insert(name_key, record.id);
        trace!(id = %record.id, "Feature inserted");
        tables.features.insert(record.id, Row { seq, record });
        Ok(())
    }

    async fn find_feature(&self, id: FeatureId) -> Result<Option<FeatureRecord>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().features.get(&id).map(|row| row.record.clone()))
    }

    async fn find_feature_by_name(
        &self,
        owner: OwnerId,
        name: &str,
    ) -> Result<Option<FeatureRecord>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read();

        Ok(tables
            .feature_names
            .get(&(owner, name.to_owned()))
            .and_then(|id| tables.features.get(id))
            .map(|row| row.record.clone()))
    }

    async fn features_of(&self, owner: OwnerId) -> Result<Vec<FeatureRecord>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read();
        Ok(ordered(tables.features.values().filter(|row| row.record.owner == owner)))
    }

    async fn delete_feature(&self, id: FeatureId) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write();

        let Some(row) = tables.features.remove(&id) else {
            return Ok(false);
        };
        tables.feature_names.remove(&(row.record.owner, row.record.name));
        let cascaded = tables.drop_bindings(|binding| binding.feature == id);

        trace!(%id, cascaded, "Feature deleted");
        Ok(true)
    }

    async fn insert_binding(&self, record: BindingRecord) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write();

        let Some(owner) = tables.features.get(&record.feature).map(|row| row.record.owner) else {
            return Err(missing(Table::Features));
        };
        // An environment of another owner is invisible to the feature.
        if tables.environments.get(&record.environment).is_none_or(|row| row.record.owner != owner) {
            return Err(missing(Table::Environments));
        }
        if tables.bindings.contains_key(&record.id) {
            return Err(duplicate_key(Table::Bindings));
        }
        let pair = (record.feature, record.environment);
        if tables.binding_pairs.contains_key(&pair) {
            return Err(unique(Index::BindingPair));
        }

        let seq = tables.next_seq();
        tables.binding_pairs.insert(pair, record.id);
        trace!(id = %record.id, "Binding inserted");
        tables.bindings.insert(record.id, Row { seq, record });
        Ok(())
    }

    async fn find_binding(
        &self,
        feature: FeatureId,
        environment: EnvironmentId,
    ) -> Result<Option<BindingRecord>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read();

        Ok(tables
            .binding_pairs
            .get(&(feature, environment))
            .and_then(|id| tables.bindings.get(id))
            .map(|row| row.record))
    }

    async fn bindings_of(&self, features: &[FeatureId]) -> Result<Vec<BoundEnvironment>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read();
        let wanted: FxHashSet<FeatureId> = features.iter().copied().collect();

        let mut rows: Vec<(u64, BoundEnvironment)> = tables
            .bindings
            .values()
            .filter(|row| wanted.contains(&row.record.feature))
            .filter_map(|row| {
                let environment = tables.environments.get(&row.record.environment)?;
                Some((
                    row.seq,
                    BoundEnvironment { binding: row.record, environment: environment.record.clone() },
                ))
            })
            .collect();

        rows.sort_unstable_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, bound)| bound).collect())
    }

    async fn find_bound_feature(
        &self,
        feature_name: &str,
        environment: EnvironmentId,
    ) -> Result<Option<BindingRecord>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read();

        // Bindings never cross owners, so the environment's owner scopes the name.
        let Some(owner) = tables.environments.get(&environment).map(|row| row.record.owner) else {
            return Ok(None);
        };

        Ok(tables
            .feature_names
            .get(&(owner, feature_name.to_owned()))
            .and_then(|feature| tables.binding_pairs.get(&(*feature, environment)))
            .and_then(|id| tables.bindings.get(id))
            .map(|row| row.record))
    }

    async fn delete_binding(
        &self,
        feature: FeatureId,
        environment: EnvironmentId,
    ) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write();

        let Some(id) = tables.binding_pairs.remove(&(feature, environment)) else {
            return Ok(false);
        };
        tables.bindings.remove(&id);
        trace!(%id, "Binding deleted");
        Ok(true)
    }

    async fn compare_and_set_enabled(
        &self,
        binding: BindingId,
        expected: bool,
        next: bool,
    ) -> Result<CasOutcome, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write();

        let Some(row) = tables.bindings.get_mut(&binding) else {
            return Ok(CasOutcome::Missing);
        };
        if row.record.enabled != expected {
            return Ok(CasOutcome::Stale { current: row.record.enabled });
        }
        row.record.enabled = next;
        Ok(CasOutcome::Applied)
    }
}
