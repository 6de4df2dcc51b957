//! Per-type constructor tables
//!
//! A [`ConstructorTable`] maps a signature string to an invoker: a closure
//! that unpacks a loosely-typed argument list, runs the matching constructor
//! and converts the result into the product type `P`.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use super::args::{Arg, ConstructorArgs};
use super::error::{ActivationError, BoxError};

/// Conversion from a constructed value into the product handed to callers
///
/// Components are built as concrete values and shared as `Arc<dyn Component>`;
/// nodes are already built as `Arc<Node>`.
pub trait Instantiate<T>: Sized {
    /// Wrap a freshly constructed value
    fn instantiate(value: T) -> Self;
}

/// Cached callable for one constructor of one type
pub type Invoker<P> = Arc<dyn Fn(Vec<Arg>) -> Result<P, ActivationError> + Send + Sync>;

/// Every constructor a single type exposes, keyed by signature
pub struct ConstructorTable<P> {
    type_name: &'static str,
    invokers: HashMap<String, Invoker<P>>,
}

impl<P: 'static> ConstructorTable<P> {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            invokers: HashMap::new(),
        }
    }

    /// Name of the type this table constructs
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Register an infallible constructor taking the argument tuple `A`
    pub fn constructor<A, T, F>(&mut self, construct: F) -> &mut Self
    where
        A: ConstructorArgs,
        P: Instantiate<T>,
        F: Fn(A) -> T + Send + Sync + 'static,
    {
        self.fallible_constructor(move |args: A| Ok::<T, Infallible>(construct(args)))
    }

    /// Register a constructor whose body may fail
    ///
    /// A failure surfaces as [`ActivationError::Construction`].
    pub fn fallible_constructor<A, T, E, F>(&mut self, construct: F) -> &mut Self
    where
        A: ConstructorArgs,
        P: Instantiate<T>,
        E: Into<BoxError>,
        F: Fn(A) -> Result<T, E> + Send + Sync + 'static,
    {
        let type_name = self.type_name;
        let signature = A::signature();

        let invoker: Invoker<P> = Arc::new(move |args: Vec<Arg>| {
            let unpacked = A::unpack(args).ok_or_else(|| {
                ActivationError::no_matching_constructor(type_name, A::signature())
            })?;
            construct(unpacked)
                .map(<P as Instantiate<T>>::instantiate)
                .map_err(|err| ActivationError::Construction {
                    type_name: type_name.to_string(),
                    source: err.into(),
                })
        });

        if self.invokers.insert(signature.clone(), invoker).is_some() {
            log::warn!("Constructor ({signature}) of '{type_name}' registered twice; keeping the last");
        }
        self
    }

    /// Invoker for an exact signature
    pub fn get(&self, signature: &str) -> Option<&Invoker<P>> {
        self.invokers.get(signature)
    }

    /// Whether a constructor with this signature exists
    pub fn contains(&self, signature: &str) -> bool {
        self.invokers.contains_key(signature)
    }

    /// Known signatures, sorted
    pub fn signatures(&self) -> Vec<String> {
        let mut signatures: Vec<String> = self.invokers.keys().cloned().collect();
        signatures.sort();
        signatures
    }

    /// Number of constructors
    pub fn len(&self) -> usize {
        self.invokers.len()
    }

    /// Whether the type exposes no constructors at all
    pub fn is_empty(&self) -> bool {
        self.invokers.is_empty()
    }
}

impl<P> fmt::Debug for ConstructorTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorTable")
            .field("type_name", &self.type_name)
            .field("signatures", &self.invokers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[derive(Debug, PartialEq)]
    struct Pair(u32, u32);

    impl Instantiate<Pair> for Pair {
        fn instantiate(value: Pair) -> Self {
            value
        }
    }

    fn pair_table() -> ConstructorTable<Pair> {
        let mut table = ConstructorTable::new("Pair");
        table
            .constructor(|()| Pair(0, 0))
            .constructor(|(a, b): (u32, u32)| Pair(a, b))
            .fallible_constructor(|(a,): (u32,)| {
                if a > 100 {
                    Err("value out of range")
                } else {
                    Ok(Pair(a, a))
                }
            });
        table
    }

    #[test]
    fn test_signatures_are_distinct_per_parameter_list() {
        let table = pair_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.signatures(), vec!["", "u32", "u32,u32"]);
    }

    #[test]
    fn test_invoker_runs_matching_constructor() {
        let table = pair_table();
        let invoke = table.get("u32,u32").unwrap();
        assert_eq!(invoke(args![3_u32, 4_u32]).unwrap(), Pair(3, 4));
    }

    #[test]
    fn test_invoker_reports_construction_failure() {
        let table = pair_table();
        let invoke = table.get("u32").unwrap();
        let err = invoke(args![500_u32]).unwrap_err();
        assert!(matches!(err, ActivationError::Construction { ref type_name, .. } if type_name == "Pair"));
        assert!(err.to_string().contains("value out of range"));
    }
}
