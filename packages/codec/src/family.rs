//! Families: closed enums over the known shapes of an open message set.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{RegistryError, Shape, VariantRegistry};

/// How a family's wire values name their concrete shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagConvention {
    /// A dedicated string property holds the discriminator.
    Field(&'static str),
    /// `(property, discriminator)` rules; the first property present on the
    /// wire object selects the discriminator.
    Inferred(&'static [(&'static str, &'static str)]),
}

impl TagConvention {
    /// The tag property, for families that carry one.
    pub fn tag_field(&self) -> Option<&'static str> {
        match self {
            TagConvention::Field(name) => Some(name),
            TagConvention::Inferred(_) => None,
        }
    }
}

/// What decoding does with a discriminator the registry does not know.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy {
    /// Decode the family's base fields into `Unrecognized`.
    #[default]
    FallbackToBase,
    /// Fail with `DecodeError::UnknownDiscriminator`.
    Strict,
}

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownPolicy::FallbackToBase => f.write_str("fallback_to_base"),
            UnknownPolicy::Strict => f.write_str("strict"),
        }
    }
}

/// A degraded value: only the base contract's fields, plus the discriminator
/// that could not be matched (if there was one).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Unrecognized<B> {
    pub discriminator: Option<String>,
    pub base: B,
}

/// A message family.
///
/// Implemented by an enum with one variant per known shape plus an
/// `Unrecognized` variant; the [`family!`](crate::family) macro writes the
/// implementation.
pub trait Family: fmt::Debug + Sized + Send + Sync + 'static {
    /// Human-readable family name, also the key in `CodecConfig::policies`.
    const NAME: &'static str;

    const TAG: TagConvention;

    /// The base contract every shape of the family shares.
    type Base: Shape;

    /// The concrete shape inside this value, or `None` if unrecognized.
    fn shape(&self) -> Option<&dyn Any>;

    fn discriminator(&self) -> Option<&str>;

    fn as_unrecognized(&self) -> Option<&Unrecognized<Self::Base>>;

    fn from_unrecognized(value: Unrecognized<Self::Base>) -> Self;

    /// Register every shape this enum knows about.
    fn register_known(registry: &mut VariantRegistry<Self>) -> Result<(), RegistryError>;

    /// Borrow the concrete shape as `S`.
    fn downcast_ref<S: 'static>(&self) -> Option<&S> {
        self.shape()?.downcast_ref::<S>()
    }

    fn is_unrecognized(&self) -> bool {
        self.as_unrecognized().is_some()
    }
}

/// Declare a family enum and its `Family`, `From` and `Member` impls.
///
/// ```rust,ignore
/// ledgerwire_codec::family! {
///     /// Objects stored in the ledger state tree.
///     pub enum LedgerEntry {
///         name: "ledger entry",
///         base: LedgerEntryCommon,
///         tag: TagConvention::Field("ledger_entry_type"),
///         variants: {
///             Escrow(Escrow) = "Escrow",
///             Offer(Offer) = "Offer",
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! family {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            name: $family_name:literal,
            base: $base:ty,
            tag: $tag:expr,
            variants: {
                $( $(#[$vmeta:meta])* $variant:ident($shape:ty) = $disc:literal ),+ $(,)?
            } $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant($shape), )+
            /// A shape this build does not know, reduced to its base fields.
            Unrecognized($crate::Unrecognized<$base>),
        }

        impl $crate::Family for $name {
            const NAME: &'static str = $family_name;
            const TAG: $crate::TagConvention = $tag;
            type Base = $base;

            fn shape(&self) -> ::std::option::Option<&dyn ::std::any::Any> {
                match self {
                    $( $name::$variant(shape) => ::std::option::Option::Some(shape as &dyn ::std::any::Any), )+
                    $name::Unrecognized(_) => ::std::option::Option::None,
                }
            }

            fn discriminator(&self) -> ::std::option::Option<&str> {
                match self {
                    $( $name::$variant(_) => ::std::option::Option::Some($disc), )+
                    $name::Unrecognized(value) => value.discriminator.as_deref(),
                }
            }

            fn as_unrecognized(&self) -> ::std::option::Option<&$crate::Unrecognized<$base>> {
                match self {
                    $name::Unrecognized(value) => ::std::option::Option::Some(value),
                    _ => ::std::option::Option::None,
                }
            }

            fn from_unrecognized(value: $crate::Unrecognized<$base>) -> Self {
                $name::Unrecognized(value)
            }

            fn register_known(
                registry: &mut $crate::VariantRegistry<Self>,
            ) -> ::std::result::Result<(), $crate::RegistryError> {
                $( registry.register_member::<$shape>()?; )+
                ::std::result::Result::Ok(())
            }
        }

        $(
            impl ::std::convert::From<$shape> for $name {
                fn from(shape: $shape) -> Self {
                    $name::$variant(shape)
                }
            }

            impl $crate::Member<$name> for $shape {
                const DISCRIMINATOR: &'static str = $disc;
            }
        )+
    };
}
