//! Keyed factory
//!
//! Maps caller-chosen keys to zero-argument creation strategies. A strategy
//! is either a plain closure or a delegation to the [`Activator`], with or
//! without an argument-producing closure.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use super::activator::{Activate, Activator, TypeKey};
use super::args::Arg;
use super::error::ActivationError;

/// Keyed factory errors
#[derive(Error, Debug)]
pub enum FactoryError<K: Debug> {
    /// The key already has a creation strategy
    #[error("Key {0:?} is already registered")]
    Duplicate(K),

    /// No creation strategy exists for the key
    #[error("Key {0:?} is not registered")]
    NotRegistered(K),

    /// The delegated activation failed
    #[error(transparent)]
    Activation(#[from] ActivationError),
}

type Creator<P> = Arc<dyn Fn() -> Result<P, ActivationError> + Send + Sync>;

/// Registry of creation strategies keyed by `K`, producing `P`
pub struct Factory<K, P> {
    activator: Arc<Activator<P>>,
    creators: RwLock<HashMap<K, Creator<P>>>,
}

impl<K, P> Factory<K, P>
where
    K: Eq + Hash + Clone + Debug,
    P: 'static,
{
    /// Create an empty factory delegating type-based strategies to `activator`
    pub fn new(activator: Arc<Activator<P>>) -> Self {
        Self {
            activator,
            creators: RwLock::new(HashMap::new()),
        }
    }

    /// Activator used by type-based strategies
    pub fn activator(&self) -> &Arc<Activator<P>> {
        &self.activator
    }

    /// Register an arbitrary closure
    pub fn register_fn<F>(&self, key: K, create: F) -> Result<(), FactoryError<K>>
    where
        F: Fn() -> P + Send + Sync + 'static,
    {
        self.insert(key, Arc::new(move || Ok::<P, ActivationError>(create())))
    }

    /// Register `T`, created through its zero-argument constructor
    pub fn register<T: Activate<P>>(&self, key: K) -> Result<(), FactoryError<K>> {
        self.register_type(key, TypeKey::of::<T>())
    }

    /// Register a runtime type key, created through its zero-argument constructor
    ///
    /// The type must expose a zero-argument constructor; this is checked
    /// here rather than on first `create`.
    pub fn register_type(&self, key: K, type_key: TypeKey<P>) -> Result<(), FactoryError<K>> {
        self.reject_duplicate(&key)?;
        self.activator.ensure_constructor(type_key, "")?;

        let activator = Arc::clone(&self.activator);
        self.insert(
            key,
            Arc::new(move || activator.activate(type_key, Vec::new())),
        )
    }

    /// Register `T`, created with the arguments `args` produces on every call
    pub fn register_with_args<T, F>(&self, key: K, args: F) -> Result<(), FactoryError<K>>
    where
        T: Activate<P>,
        F: Fn() -> Vec<Arg> + Send + Sync + 'static,
    {
        self.register_type_with_args(key, TypeKey::of::<T>(), args)
    }

    /// Register a runtime type key created with produced arguments
    ///
    /// The matching constructor is resolved per call, since the signature is
    /// only known once `args` has run.
    pub fn register_type_with_args<F>(
        &self,
        key: K,
        type_key: TypeKey<P>,
        args: F,
    ) -> Result<(), FactoryError<K>>
    where
        F: Fn() -> Vec<Arg> + Send + Sync + 'static,
    {
        self.reject_duplicate(&key)?;
        self.activator.prepare(type_key)?;

        let activator = Arc::clone(&self.activator);
        self.insert(
            key,
            Arc::new(move || activator.activate(type_key, args())),
        )
    }

    /// Run the strategy registered for `key`
    pub fn create(&self, key: &K) -> Result<P, FactoryError<K>> {
        let creator = self
            .creators
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| FactoryError::NotRegistered(key.clone()))?;
        Ok(creator()?)
    }

    /// Whether `key` has a strategy
    pub fn contains(&self, key: &K) -> bool {
        self.creators.read().contains_key(key)
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.creators.read().len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.creators.read().is_empty()
    }

    /// Snapshot of the registered keys
    pub fn keys(&self) -> Vec<K> {
        self.creators.read().keys().cloned().collect()
    }

    fn reject_duplicate(&self, key: &K) -> Result<(), FactoryError<K>> {
        if self.contains(key) {
            Err(FactoryError::Duplicate(key.clone()))
        } else {
            Ok(())
        }
    }

    fn insert(&self, key: K, creator: Creator<P>) -> Result<(), FactoryError<K>> {
        match self.creators.write().entry(key) {
            Entry::Occupied(entry) => Err(FactoryError::Duplicate(entry.key().clone())),
            Entry::Vacant(slot) => {
                log::debug!("Registered factory key {:?}", slot.key());
                slot.insert(creator);
                Ok(())
            }
        }
    }
}

impl<K: Debug, P> fmt::Debug for Factory<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("keys", &self.creators.read().keys().collect::<Vec<_>>())
            .finish()
    }
}
