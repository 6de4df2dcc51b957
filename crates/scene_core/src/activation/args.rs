//! Loosely-typed constructor arguments
//!
//! An [`Arg`] carries a value together with the name of its concrete type.
//! The ordered names of a call's arguments form its signature, which selects
//! the constructor to run. [`ConstructorArgs`] is the typed side of the same
//! contract: a tuple of parameter types that can report its own signature and
//! unpack a matching argument list.

use std::any::{type_name, Any};
use std::fmt;

/// A single constructor argument of any `'static` type
pub struct Arg {
    type_name: &'static str,
    value: Box<dyn Any + Send>,
}

impl Arg {
    /// Wrap a value, remembering its concrete type name
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            type_name: type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// Fully-qualified name of the wrapped value's type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Recover the wrapped value, or get the argument back on a type mismatch
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        match self.value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self { type_name, value }),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg").field("type_name", &self.type_name).finish()
    }
}

/// Build a `Vec<Arg>` from a list of values
///
/// ```
/// use scene_core::args;
///
/// let args = args![String::from("player"), 3_u32];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::activation::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::activation::Arg::new($value)),+]
    };
}

/// Signature string for an ordered list of arguments
pub fn signature_of(args: &[Arg]) -> String {
    args.iter().map(Arg::type_name).collect::<Vec<_>>().join(",")
}

/// A tuple of constructor parameter types
pub trait ConstructorArgs: Sized + 'static {
    /// Parameter type names in declaration order
    fn parameter_types() -> Vec<&'static str>;

    /// Comma-joined parameter type names; empty for the zero-argument constructor
    fn signature() -> String {
        Self::parameter_types().join(",")
    }

    /// Convert a matching argument list into the typed tuple
    ///
    /// Returns `None` when the count or any argument type differs.
    fn unpack(args: Vec<Arg>) -> Option<Self>;
}

macro_rules! impl_constructor_args {
    ($($param:ident),*) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<$($param: Any + Send),*> ConstructorArgs for ($($param,)*) {
            fn parameter_types() -> Vec<&'static str> {
                vec![$(type_name::<$param>()),*]
            }

            fn unpack(args: Vec<Arg>) -> Option<Self> {
                if args.len() != Self::parameter_types().len() {
                    return None;
                }
                let mut args = args.into_iter();
                $(let $param = args.next()?.downcast::<$param>().ok()?;)*
                Some(($($param,)*))
            }
        }
    };
}

impl_constructor_args!();
impl_constructor_args!(A);
impl_constructor_args!(A, B);
impl_constructor_args!(A, B, C);
impl_constructor_args!(A, B, C, D);
