//! Decoding and encoding family values by discriminator.

use std::any::Any;

use ledgerwire_wire::{Map, Value, ValueKind};
use tracing::{trace, warn};

use crate::field::FieldKind;
use crate::shape::{decode_fields, encode_fields};
use crate::{
    DecodeError, EncodeError, Family, TagConvention, UnknownPolicy, Unrecognized, VariantRegistry,
};

/// Decoder/encoder for one family, borrowing a sealed registry.
///
/// The codec holds no state of its own; it is cheap to copy and safe to use
/// from any number of threads at once.
pub struct DiscriminatedCodec<'r, F: Family> {
    registry: &'r VariantRegistry<F>,
    policy: UnknownPolicy,
}

impl<'r, F: Family> Clone for DiscriminatedCodec<'r, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'r, F: Family> Copy for DiscriminatedCodec<'r, F> {}

impl<'r, F: Family> DiscriminatedCodec<'r, F> {
    pub fn new(registry: &'r VariantRegistry<F>, policy: UnknownPolicy) -> Self {
        DiscriminatedCodec { registry, policy }
    }

    pub fn policy(&self) -> UnknownPolicy {
        self.policy
    }

    pub fn registry(&self) -> &'r VariantRegistry<F> {
        self.registry
    }

    /// Decode a wire value into the family's typed value.
    pub fn decode(&self, wire: &Value) -> Result<F, DecodeError> {
        let object = wire.as_map().ok_or(DecodeError::Malformed {
            family: F::NAME,
            found: wire.kind(),
        })?;

        let discriminator = extract_discriminator::<F>(object)?;

        if let Some(tag) = discriminator {
            if let Some(registration) = self.registry.lookup_by_discriminator(tag) {
                trace!(family = F::NAME, discriminator = tag, "decoding registered shape");
                return registration.descriptor().decode(object, tag);
            }
        }

        match (self.policy, discriminator) {
            (UnknownPolicy::Strict, Some(tag)) => Err(DecodeError::UnknownDiscriminator {
                family: F::NAME,
                discriminator: tag.to_string(),
            }),
            (UnknownPolicy::Strict, None) => {
                Err(DecodeError::MissingDiscriminator { family: F::NAME })
            }
            (UnknownPolicy::FallbackToBase, discriminator) => {
                warn!(
                    family = F::NAME,
                    discriminator = discriminator.unwrap_or("<none>"),
                    "unrecognized discriminator, decoding base fields only"
                );
                let base = decode_fields(self.registry.base_fields(), object, F::NAME, "base")?;
                Ok(F::from_unrecognized(Unrecognized {
                    discriminator: discriminator.map(str::to_string),
                    base,
                }))
            }
        }
    }

    /// Encode a typed value, tag first, then fields in descriptor order.
    pub fn encode(&self, value: &F) -> Result<Value, EncodeError> {
        if let Some(shape) = value.shape() {
            let name = value.discriminator().unwrap_or(F::NAME);
            return self.encode_any(shape, name);
        }

        match value.as_unrecognized() {
            Some(unrecognized) => self.encode_unrecognized(unrecognized),
            None => Err(EncodeError::UnregisteredType {
                family: F::NAME,
                shape: format!("{:?}", value),
            }),
        }
    }

    /// Encode a bare concrete shape without wrapping it in the family enum.
    pub fn encode_shape<S: Any>(&self, shape: &S) -> Result<Value, EncodeError> {
        self.encode_any(shape, std::any::type_name::<S>())
    }

    fn encode_any(&self, shape: &dyn Any, name: &str) -> Result<Value, EncodeError> {
        let unregistered = || EncodeError::UnregisteredType {
            family: F::NAME,
            shape: name.to_string(),
        };

        let registration = self
            .registry
            .lookup_by_type(Any::type_id(shape))
            .ok_or_else(unregistered)?;

        let mut out = Map::new();
        if let Some(tag) = F::TAG.tag_field() {
            out.insert(
                tag.to_string(),
                Value::from(registration.discriminator()),
            );
        }
        let described = registration
            .descriptor()
            .encode(shape, &mut out, registration.discriminator())?;
        if !described {
            return Err(unregistered());
        }

        trace!(
            family = F::NAME,
            discriminator = registration.discriminator(),
            "encoded shape"
        );
        Ok(Value::Map(out))
    }

    fn encode_unrecognized(&self, value: &Unrecognized<F::Base>) -> Result<Value, EncodeError> {
        let mut out = Map::new();
        if let (Some(tag), Some(discriminator)) = (F::TAG.tag_field(), &value.discriminator) {
            out.insert(tag.to_string(), Value::from(discriminator.as_str()));
        }
        encode_fields(self.registry.base_fields(), &value.base, &mut out, F::NAME, "base")?;
        Ok(Value::Map(out))
    }
}

/// Find the discriminator of `object` under the family's tag convention.
///
/// `Ok(None)` means no discriminator is present at all.
fn extract_discriminator<F: Family>(object: &Map) -> Result<Option<&str>, DecodeError> {
    match F::TAG {
        TagConvention::Field(name) => match object.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(tag)) => Ok(Some(tag.as_str())),
            Some(other) => Err(DecodeError::FieldTypeMismatch {
                family: F::NAME,
                shape: "tag".to_string(),
                field: name,
                expected: FieldKind::String,
                found: other.kind(),
            }),
        },
        TagConvention::Inferred(rules) => Ok(rules
            .iter()
            .find(|(property, _)| {
                object
                    .get(*property)
                    .is_some_and(|value| value.kind() != ValueKind::Null)
            })
            .map(|(_, discriminator)| *discriminator)),
    }
}
