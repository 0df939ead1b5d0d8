use ledgerwire_codec::{CodecConfig, EnvelopeMode};
use ledgerwire_protocol::{
    protocol_registry, AccountInfoParams, Error, LedgerIndex, RpcRequest, SubmitParams,
};
use ledgerwire_wire::{json_to_value, JsonCodec};
use serde_json::json;

#[test]
fn request_round_trips_through_json_bytes() {
    let request = RpcRequest::with_params(
        AccountInfoParams {
            account: "rAlice".to_string(),
            ledger_index: Some(LedgerIndex::Number(6_000_000)),
            queue: Some(true),
            ..Default::default()
        },
        EnvelopeMode::Strict,
    )
    .with_id(42);

    let codec = JsonCodec;
    let bytes = codec.encode(&request.to_wire().unwrap()).unwrap();
    let wire = codec.decode(&bytes).unwrap();
    let read = RpcRequest::from_wire::<AccountInfoParams>(&wire, EnvelopeMode::Strict).unwrap();

    assert_eq!(read.method(), "account_info");
    assert_eq!(read.id(), Some(42));
    assert_eq!(
        read.params::<AccountInfoParams>().unwrap(),
        request.params::<AccountInfoParams>().unwrap()
    );
}

#[test]
fn envelope_mode_follows_config() {
    let config = CodecConfig::from_json_str(r#"{"envelope_mode": "lenient"}"#).unwrap();
    let registry = protocol_registry(config).unwrap();

    let mut envelope = registry.envelope();
    assert_eq!(envelope.mode(), EnvelopeMode::Lenient);
    envelope.push(SubmitParams {
        tx_blob: "120000".to_string(),
        fail_hard: Some(false),
    });
    envelope.push(AccountInfoParams {
        account: "rAlice".to_string(),
        ..Default::default()
    });

    let submits: Vec<SubmitParams> = envelope.get_typed().unwrap();
    assert_eq!(submits.len(), 1);
    assert_eq!(submits[0].tx_blob, "120000");
}

#[test]
fn request_without_method_is_malformed() {
    let wire = json_to_value(json!({"params": []}));
    assert!(matches!(
        RpcRequest::from_wire::<SubmitParams>(&wire, EnvelopeMode::Strict),
        Err(Error::MalformedRequest { .. })
    ));
}
