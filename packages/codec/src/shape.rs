//! Shapes and shape descriptors.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;

use ledgerwire_wire::{Map, Value};

use crate::field::{Field, FieldInfo};
use crate::{DecodeError, EncodeError, Family};

/// A record type whose fields can be moved to and from the wire.
///
/// Decoding starts from `Default::default()` and applies each field's setter,
/// so optional fields keep their default when absent.
pub trait Shape: Default + fmt::Debug + Send + Sync + 'static {
    /// The fields in wire order.
    fn fields() -> Vec<Field<Self>>;
}

/// A concrete shape that belongs to family `F` under a fixed discriminator.
pub trait Member<F: Family>: Shape + Into<F> {
    const DISCRIMINATOR: &'static str;
}

/// Type-erased decode/encode for one concrete shape.
trait ErasedShape<F>: Send + Sync {
    fn decode(&self, object: &Map, family: &'static str, shape: &str) -> Result<F, DecodeError>;

    /// Returns `Ok(false)` if `shape` is not the described type.
    fn encode(
        &self,
        shape: &dyn Any,
        out: &mut Map,
        family: &'static str,
        name: &str,
    ) -> Result<bool, EncodeError>;
}

struct TypedShape<S> {
    fields: Vec<Field<S>>,
    _marker: PhantomData<fn() -> S>,
}

impl<F, S> ErasedShape<F> for TypedShape<S>
where
    S: Shape + Into<F>,
{
    fn decode(&self, object: &Map, family: &'static str, shape: &str) -> Result<F, DecodeError> {
        decode_fields(&self.fields, object, family, shape).map(Into::into)
    }

    fn encode(
        &self,
        shape: &dyn Any,
        out: &mut Map,
        family: &'static str,
        name: &str,
    ) -> Result<bool, EncodeError> {
        match shape.downcast_ref::<S>() {
            Some(shape) => encode_fields(&self.fields, shape, out, family, name).map(|()| true),
            None => Ok(false),
        }
    }
}

/// Everything the codec needs to know about one concrete shape.
///
/// A descriptor does not know its discriminator; the registry pairs the two
/// at registration time.
pub struct ShapeDescriptor<F> {
    type_id: TypeId,
    type_name: &'static str,
    fields: Vec<FieldInfo>,
    codec: Box<dyn ErasedShape<F>>,
}

impl<F: Family> ShapeDescriptor<F> {
    /// Describe shape `S` from its field list.
    pub fn of<S: Shape + Into<F>>() -> Self {
        let fields = S::fields();
        ShapeDescriptor {
            type_id: TypeId::of::<S>(),
            type_name: std::any::type_name::<S>(),
            fields: fields.iter().map(|f| *f.info()).collect(),
            codec: Box::new(TypedShape {
                fields,
                _marker: PhantomData,
            }),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub(crate) fn decode(
        &self,
        object: &Map,
        discriminator: &str,
    ) -> Result<F, DecodeError> {
        self.codec.decode(object, F::NAME, discriminator)
    }

    pub(crate) fn encode(
        &self,
        shape: &dyn Any,
        out: &mut Map,
        discriminator: &str,
    ) -> Result<bool, EncodeError> {
        self.codec.encode(shape, out, F::NAME, discriminator)
    }
}

impl<F> fmt::Debug for ShapeDescriptor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeDescriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Decode every field of `S` from `object`.
///
/// Absent and null values are the same thing here: both fail a required field
/// and both leave an optional field at its default. A value of the wrong kind
/// is a type mismatch; a value of the right kind that still does not convert
/// is an invalid value.
pub(crate) fn decode_fields<S: Shape>(
    fields: &[Field<S>],
    object: &Map,
    family: &'static str,
    shape: &str,
) -> Result<S, DecodeError> {
    let mut decoded = S::default();
    for field in fields {
        let info = field.info();
        match object.get(info.name) {
            None | Some(Value::Null) => {
                if info.required {
                    return Err(DecodeError::MissingRequiredField {
                        family,
                        shape: shape.to_string(),
                        field: info.name,
                    });
                }
            }
            Some(value) => {
                if !info.kind.accepts(value.kind()) {
                    return Err(DecodeError::FieldTypeMismatch {
                        family,
                        shape: shape.to_string(),
                        field: info.name,
                        expected: info.kind,
                        found: value.kind(),
                    });
                }
                field
                    .write(&mut decoded, value)
                    .map_err(|detail| DecodeError::InvalidFieldValue {
                        family,
                        shape: shape.to_string(),
                        field: info.name,
                        detail,
                    })?;
            }
        }
    }
    Ok(decoded)
}

/// Append every present field of `shape` to `out`, in field order.
pub(crate) fn encode_fields<S>(
    fields: &[Field<S>],
    shape: &S,
    out: &mut Map,
    family: &'static str,
    name: &str,
) -> Result<(), EncodeError> {
    for field in fields {
        let read = field
            .read(shape)
            .map_err(|err| EncodeError::FieldConversion {
                family,
                shape: name.to_string(),
                field: field.name(),
                message: err.to_string(),
            })?;
        if let Some(value) = read {
            out.insert(field.name().to_string(), value);
        }
    }
    Ok(())
}
