//! JSON-RPC style requests: a method name and a parameter list.

use ledgerwire_codec::{EnvelopeMode, Map, ParamEnvelope, Params, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Error, LedgerIndex, Result};

/// Parameters of one request method.
pub trait MethodParams: Params + Clone + DeserializeOwned {
    const METHOD: &'static str;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountInfoParams {
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_index: Option<LedgerIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_hash: Option<String>,
    /// Reject anything but a well-formed address in `account`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<bool>,
}

impl MethodParams for AccountInfoParams {
    const METHOD: &'static str = "account_info";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountLinesParams {
    pub account: String,
    /// Only lines between `account` and this address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_index: Option<LedgerIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Opaque paging cursor from a previous response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<serde_json::Value>,
}

impl MethodParams for AccountLinesParams {
    const METHOD: &'static str = "account_lines";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_index: Option<LedgerIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<bool>,
}

impl MethodParams for LedgerParams {
    const METHOD: &'static str = "ledger";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitParams {
    /// Signed transaction, hex encoded.
    pub tx_blob: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_hard: Option<bool>,
}

impl MethodParams for SubmitParams {
    const METHOD: &'static str = "submit";
}

/// A request ready to be written to, or just read from, the wire.
///
/// ```rust
/// use ledgerwire_codec::EnvelopeMode;
/// use ledgerwire_protocol::{AccountInfoParams, RpcRequest};
///
/// let request = RpcRequest::with_params(
///     AccountInfoParams { account: "rAlice".into(), ..Default::default() },
///     EnvelopeMode::Strict,
/// )
/// .with_id(1);
///
/// assert_eq!(request.method(), "account_info");
/// let params: Vec<AccountInfoParams> = request.params().unwrap();
/// assert_eq!(params[0].account, "rAlice");
/// ```
#[derive(Clone, Debug)]
pub struct RpcRequest {
    method: String,
    params: ParamEnvelope,
    id: Option<u64>,
}

impl RpcRequest {
    /// A request with no parameters yet.
    pub fn new(method: impl Into<String>, mode: EnvelopeMode) -> Self {
        RpcRequest {
            method: method.into(),
            params: ParamEnvelope::new(mode),
            id: None,
        }
    }

    /// A request for `T::METHOD` carrying one parameter object.
    pub fn with_params<T: MethodParams>(params: T, mode: EnvelopeMode) -> Self {
        let mut request = RpcRequest::new(T::METHOD, mode);
        request.params.push(params);
        request
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn envelope(&self) -> &ParamEnvelope {
        &self.params
    }

    pub fn envelope_mut(&mut self) -> &mut ParamEnvelope {
        &mut self.params
    }

    /// The parameters read as `T`, following the envelope's mode.
    pub fn params<T: MethodParams>(&self) -> Result<Vec<T>> {
        Ok(self.params.get_typed()?)
    }

    /// Replace the parameters and switch the method to `T::METHOD`.
    pub fn set_params<T: MethodParams>(&mut self, params: Vec<T>) {
        self.method = T::METHOD.to_string();
        self.params.set_typed(params);
    }

    /// `{"method": ..., "params": [...], "id": ...}`
    pub fn to_wire(&self) -> Result<Value> {
        let mut out = Map::new();
        out.insert("method".to_string(), Value::from(self.method.as_str()));
        out.insert("params".to_string(), self.params.to_wire()?);
        if let Some(id) = self.id {
            let id = i64::try_from(id).map_err(|_| Error::malformed("id out of range"))?;
            out.insert("id".to_string(), Value::Integer(id));
        }
        Ok(Value::Map(out))
    }

    /// Read a request whose parameters are all `T`.
    ///
    /// A missing `params` property is an empty parameter list.
    pub fn from_wire<T: MethodParams>(wire: &Value, mode: EnvelopeMode) -> Result<Self> {
        let object = wire
            .as_map()
            .ok_or_else(|| Error::malformed(format!("expected object, found {}", wire.kind())))?;

        let method = object
            .get("method")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::malformed("missing method"))?;
        if method != T::METHOD {
            return Err(Error::MethodMismatch {
                expected: T::METHOD,
                found: method.to_string(),
            });
        }

        let params = match object.get("params") {
            None | Some(Value::Null) => ParamEnvelope::new(mode),
            Some(params) => ParamEnvelope::from_wire::<T>(params, mode)?,
        };

        let id = match object.get("id") {
            None | Some(Value::Null) => None,
            Some(id) => Some(id.as_u64().ok_or_else(|| {
                Error::malformed(format!("id must be an unsigned integer, found {}", id.kind()))
            })?),
        };

        Ok(RpcRequest {
            method: method.to_string(),
            params,
            id,
        })
    }
}
