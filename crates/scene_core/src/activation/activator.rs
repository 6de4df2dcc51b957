//! Keyed activation cache
//!
//! The [`Activator`] creates instances of types known only at runtime,
//! either through a [`TypeKey`] or a registered type name. The first request
//! for a type builds its full [`ConstructorTable`]; later requests reuse the
//! cached invokers.
//!
//! Tables are built exactly once per type even when several threads request
//! the same type for the first time: each type gets a `OnceLock` slot, and
//! the build runs inside `get_or_init` with no map lock held. Slots are keyed
//! by `TypeId`; the type name only serves lookups by name.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use super::args::{signature_of, Arg};
use super::error::ActivationError;
use super::table::ConstructorTable;

/// A type that can be created by an [`Activator`] producing `P`
pub trait Activate<P>: 'static {
    /// Abstract types are known by name but can never be instantiated
    const ABSTRACT: bool = false;

    /// Register every constructor the type exposes
    fn constructors(table: &mut ConstructorTable<P>);
}

/// Runtime handle for an activatable type
pub struct TypeKey<P> {
    type_id: TypeId,
    name: &'static str,
    is_abstract: bool,
    build: fn(&mut ConstructorTable<P>),
}

impl<P> TypeKey<P> {
    /// Key for `T`
    pub fn of<T: Activate<P>>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: type_name::<T>(),
            is_abstract: T::ABSTRACT,
            build: T::constructors,
        }
    }

    /// Identity of the type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully-qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the type is abstract
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }
}

impl<P> Clone for TypeKey<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for TypeKey<P> {}

impl<P> fmt::Debug for TypeKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeKey")
            .field("type_id", &self.type_id)
            .field("name", &self.name)
            .field("is_abstract", &self.is_abstract)
            .finish()
    }
}

type TableSlot<P> = Arc<OnceLock<ConstructorTable<P>>>;

/// Two-level cache of constructor invokers: type name, then signature
pub struct Activator<P> {
    tables: RwLock<HashMap<TypeId, TableSlot<P>>>,
    known: RwLock<HashMap<&'static str, TypeKey<P>>>,
}

impl<P: 'static> Activator<P> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            known: RwLock::new(HashMap::new()),
        }
    }

    /// Make a type available to [`Activator::activate_named`]
    ///
    /// Returns `false` if the name was already registered. Nothing is built
    /// until the type is first activated.
    pub fn register_type(&self, key: TypeKey<P>) -> bool {
        self.known.write().insert(key.name, key).is_none()
    }

    /// Whether a type name has been registered or activated
    pub fn is_known(&self, name: &str) -> bool {
        self.known.read().contains_key(name)
    }

    /// Create an instance of the keyed type
    ///
    /// The constructor is selected by the runtime type names of `args`; an
    /// empty list selects the zero-argument constructor.
    pub fn activate(&self, key: TypeKey<P>, args: Vec<Arg>) -> Result<P, ActivationError> {
        let signature = signature_of(&args);
        let slot = self.prepare(key)?;
        let invoker = slot
            .get()
            .and_then(|table| table.get(&signature))
            .cloned()
            .ok_or_else(|| ActivationError::no_matching_constructor(key.name, signature))?;
        invoker(args)
    }

    /// Create an instance of a previously registered type by name
    pub fn activate_named(&self, name: &str, args: Vec<Arg>) -> Result<P, ActivationError> {
        let key = self.known.read().get(name).copied();
        match key {
            Some(key) => self.activate(key, args),
            None => Err(ActivationError::not_activatable(
                name,
                "type was never registered with this activator",
            )),
        }
    }

    /// Create `T` through its zero-argument constructor
    pub fn create<T: Activate<P>>(&self) -> Result<P, ActivationError> {
        self.create_with::<T>(Vec::new())
    }

    /// Create `T` through the constructor matching `args`
    pub fn create_with<T: Activate<P>>(&self, args: Vec<Arg>) -> Result<P, ActivationError> {
        self.activate(TypeKey::of::<T>(), args)
    }

    /// Build the type's table if needed and check it has a constructor with `signature`
    pub fn ensure_constructor(&self, key: TypeKey<P>, signature: &str) -> Result<(), ActivationError> {
        let slot = self.prepare(key)?;
        if slot.get().is_some_and(|table| table.contains(signature)) {
            Ok(())
        } else {
            Err(ActivationError::no_matching_constructor(key.name, signature))
        }
    }

    /// Whether the constructor table for a type has been built
    pub fn is_cached(&self, name: &str) -> bool {
        self.cached_slot(name).is_some()
    }

    /// Cached signatures for a type, empty if its table was never built
    pub fn cached_signatures(&self, name: &str) -> Vec<String> {
        self.cached_slot(name)
            .and_then(|slot| slot.get().map(ConstructorTable::signatures))
            .unwrap_or_default()
    }

    /// Number of types with a built constructor table
    pub fn cached_type_count(&self) -> usize {
        self.tables
            .read()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    /// Reject abstract types, remember the key and make sure its table is built
    pub(crate) fn prepare(&self, key: TypeKey<P>) -> Result<TableSlot<P>, ActivationError> {
        if key.is_abstract {
            return Err(ActivationError::not_activatable(
                key.name,
                "abstract types cannot be instantiated",
            ));
        }

        if !self.known.read().contains_key(key.name) {
            self.known.write().entry(key.name).or_insert(key);
        }
        let slot = self.slot(key.type_id);
        slot.get_or_init(|| {
            let mut table = ConstructorTable::new(key.name);
            (key.build)(&mut table);
            log::debug!(
                "Built constructor table for '{}' with {} constructor(s)",
                key.name,
                table.len()
            );
            table
        });
        Ok(slot)
    }

    fn slot(&self, type_id: TypeId) -> TableSlot<P> {
        if let Some(slot) = self.tables.read().get(&type_id) {
            return Arc::clone(slot);
        }
        Arc::clone(self.tables.write().entry(type_id).or_default())
    }

    fn cached_slot(&self, name: &str) -> Option<TableSlot<P>> {
        let type_id = self.known.read().get(name)?.type_id;
        self.tables
            .read()
            .get(&type_id)
            .filter(|slot| slot.get().is_some())
            .cloned()
    }
}

impl<P: 'static> Default for Activator<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Activator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activator")
            .field("known", &self.known.read().keys().collect::<Vec<_>>())
            .field("tables", &self.tables.read().len())
            .finish()
    }
}
