//! The parameter envelope: homogeneous storage, typed access.

use std::any::Any;
use std::fmt;

use ledgerwire_wire::{from_value, to_value, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::EnvelopeError;

/// The base type every request parameter is stored as.
///
/// Implemented for every `Serialize + Clone + Debug` type, so request
/// parameter structs only need the usual derives.
pub trait Params: erased_serde::Serialize + Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn clone_params(&self) -> Box<dyn Params>;

    fn type_name(&self) -> &'static str;
}

erased_serde::serialize_trait_object!(Params);

impl<T> Params for T
where
    T: Serialize + Clone + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_params(&self) -> Box<dyn Params> {
        Box::new(self.clone())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl Clone for Box<dyn Params> {
    fn clone(&self) -> Self {
        (**self).clone_params()
    }
}

/// What `get_typed` does with a stored parameter of the wrong type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeMode {
    /// Fail with `EnvelopeError::ParameterTypeMismatch`.
    #[default]
    Strict,
    /// Compatibility mode: skip mismatched elements without error.
    Lenient,
}

/// A request's parameter list.
///
/// Parameters are stored as `Box<dyn Params>` so one envelope type carries
/// any request; callers read and write them as a concrete `Vec<T>`.
///
/// # Example
///
/// ```rust
/// use ledgerwire_codec::{EnvelopeMode, ParamEnvelope};
/// use serde::Serialize;
///
/// #[derive(Clone, Debug, PartialEq, Serialize)]
/// struct AccountInfo { account: String }
///
/// let mut envelope = ParamEnvelope::new(EnvelopeMode::Strict);
/// envelope.set_typed(vec![AccountInfo { account: "rABC".into() }]);
///
/// let params: Vec<AccountInfo> = envelope.get_typed().unwrap();
/// assert_eq!(params[0].account, "rABC");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParamEnvelope {
    params: Vec<Box<dyn Params>>,
    mode: EnvelopeMode,
}

impl ParamEnvelope {
    pub fn new(mode: EnvelopeMode) -> Self {
        ParamEnvelope {
            params: Vec::new(),
            mode,
        }
    }

    pub fn mode(&self) -> EnvelopeMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Append one parameter.
    pub fn push<T: Params>(&mut self, value: T) {
        self.params.push(Box::new(value));
    }

    /// Replace the stored parameters with `values`.
    pub fn set_typed<T: Params>(&mut self, values: Vec<T>) {
        self.params = values
            .into_iter()
            .map(|value| Box::new(value) as Box<dyn Params>)
            .collect();
    }

    /// Read the stored parameters as `T`, in their original order.
    ///
    /// In `Strict` mode the first element of another type fails the read. In
    /// `Lenient` mode such elements are left out of the result.
    pub fn get_typed<T: Params + Clone>(&self) -> Result<Vec<T>, EnvelopeError> {
        let mut typed = Vec::with_capacity(self.params.len());
        for (index, param) in self.iter().enumerate() {
            match param.as_any().downcast_ref::<T>() {
                Some(value) => typed.push(value.clone()),
                None if self.mode == EnvelopeMode::Lenient => {
                    debug!(
                        index,
                        expected = std::any::type_name::<T>(),
                        found = param.type_name(),
                        "dropping parameter of another type"
                    );
                }
                None => {
                    return Err(EnvelopeError::ParameterTypeMismatch {
                        index,
                        expected: std::any::type_name::<T>(),
                        found: param.type_name(),
                    })
                }
            }
        }
        Ok(typed)
    }

    /// The stored parameters at their base type.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Params> {
        self.params.iter().map(|param| &**param)
    }

    /// Encode the parameters as a wire array.
    pub fn to_wire(&self) -> Result<Value, EnvelopeError> {
        let params = self
            .iter()
            .map(to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(params))
    }

    /// Decode a wire array whose every element is a `T`.
    pub fn from_wire<T>(wire: &Value, mode: EnvelopeMode) -> Result<Self, EnvelopeError>
    where
        T: Params + DeserializeOwned,
    {
        let items = wire
            .as_array()
            .ok_or(EnvelopeError::NotAnArray { found: wire.kind() })?;

        let mut envelope = ParamEnvelope::new(mode);
        for item in items {
            envelope.push(from_value::<T>(item.clone())?);
        }
        Ok(envelope)
    }
}
