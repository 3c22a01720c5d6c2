// Integration tests for the Ethereum -> Qtum request transformers.
// A scripted resolver stands in for the Qtum node.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use janus_rpc::eth::{RpcEnvelope, TransactionReq};
use janus_rpc::transformer::sendtocontract::send_to_contract;
use janus_rpc::transformer::{AddressResolver, Manager, ResolverError, TransformError};

const CONTRACT: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
const SENDER_HEX: &str = "0xb60e8dd61c5d32be8058bb8eb970870f07233155";

/// Resolver returning a fixed answer and recording what it was asked.
struct ScriptedResolver {
    answer: Result<String, (i64, String)>,
    calls: AtomicUsize,
    last_input: Mutex<Option<String>>,
}

impl ScriptedResolver {
    fn ok(address: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(address.to_string()),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        })
    }

    fn failing(code: i64, message: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err((code, message.to_string())),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressResolver for ScriptedResolver {
    async fn resolve_to_native(&self, hex_address: &str) -> Result<String, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(hex_address.to_string());
        match &self.answer {
            Ok(address) => Ok(address.clone()),
            Err((code, message)) => Err(ResolverError::Rpc {
                code: *code,
                message: message.clone(),
            }),
        }
    }
}

/// Resolver that never answers.
struct StalledResolver;

#[async_trait]
impl AddressResolver for StalledResolver {
    async fn resolve_to_native(&self, _hex_address: &str) -> Result<String, ResolverError> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

fn scenario_a() -> TransactionReq {
    TransactionReq {
        to: Some(CONTRACT.to_string()),
        data: Some("0xBEEF".to_string()),
        value: Some("0x9184e72a".to_string()),
        gas: Some("0x76c0".to_string()),
        gas_price: Some("0x9184e72a000".to_string()),
        ..Default::default()
    }
}

fn inbound_envelope(tx: &TransactionReq) -> RpcEnvelope {
    RpcEnvelope::new("eth_sendTransaction", json!([tx]))
}

fn params_len(envelope: &RpcEnvelope) -> usize {
    envelope.params.as_array().map(Vec::len).unwrap_or(0)
}

#[tokio::test]
async fn test_without_sender_builds_five_params() {
    let resolver = ScriptedResolver::ok("unused");
    let mut envelope = inbound_envelope(&scenario_a());

    send_to_contract(&mut envelope, &scenario_a(), resolver.as_ref())
        .await
        .unwrap();

    assert_eq!(envelope.method, "sendtocontract");
    assert_eq!(
        envelope.params,
        json!([
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "beef",
            // 0.244140625 rounded half-to-even at the 8th decimal
            0.24414062,
            30400,
            1000.0
        ])
    );
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_hex_sender_is_resolved() {
    let resolver = ScriptedResolver::ok("QNativeAddr1");
    let tx = TransactionReq {
        from: Some(SENDER_HEX.to_string()),
        ..scenario_a()
    };
    let mut envelope = inbound_envelope(&tx);

    send_to_contract(&mut envelope, &tx, resolver.as_ref())
        .await
        .unwrap();

    assert_eq!(params_len(&envelope), 6);
    assert_eq!(envelope.params[5], json!("QNativeAddr1"));
    assert_eq!(resolver.calls(), 1);
    assert_eq!(
        resolver.last_input.lock().unwrap().as_deref(),
        Some("b60e8dd61c5d32be8058bb8eb970870f07233155")
    );
}

#[tokio::test]
async fn test_native_sender_passes_through() {
    let resolver = ScriptedResolver::ok("unused");
    let tx = TransactionReq {
        from: Some("qUbxboqjBRp96j3La8D1RYkyqx5uQbJPoW".to_string()),
        ..scenario_a()
    };
    let mut envelope = inbound_envelope(&tx);

    send_to_contract(&mut envelope, &tx, resolver.as_ref())
        .await
        .unwrap();

    assert_eq!(params_len(&envelope), 6);
    assert_eq!(envelope.params[5], json!("qUbxboqjBRp96j3La8D1RYkyqx5uQbJPoW"));
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_malformed_value_leaves_envelope_untouched() {
    let resolver = ScriptedResolver::ok("QNativeAddr1");
    let tx = TransactionReq {
        from: Some(SENDER_HEX.to_string()),
        value: Some("0xnothex".to_string()),
        ..scenario_a()
    };
    let mut envelope = inbound_envelope(&tx);
    let before = envelope.clone();

    let err = send_to_contract(&mut envelope, &tx, resolver.as_ref())
        .await
        .unwrap_err();

    assert!(matches!(err, TransformError::Field { field: "value", .. }));
    assert!(matches!(err.root(), TransformError::MalformedHex { .. }));
    assert!(err.to_string().starts_with("value: "));
    assert_eq!(envelope, before);
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_amount_beyond_json_precision_is_rejected() {
    let resolver = ScriptedResolver::ok("unused");
    let tx = TransactionReq {
        // 12345678912345678900 wei = 1234567891.23456789 QTUM
        value: Some("0xab54a98f81652434".to_string()),
        ..scenario_a()
    };
    let mut envelope = inbound_envelope(&tx);
    let before = envelope.clone();

    let err = send_to_contract(&mut envelope, &tx, resolver.as_ref())
        .await
        .unwrap_err();

    assert!(matches!(err, TransformError::Field { field: "value", .. }));
    assert!(matches!(err.root(), TransformError::ConversionOverflow(_)));
    assert_eq!(envelope, before);
}

#[tokio::test]
async fn test_malformed_gas_is_not_wrapped() {
    let resolver = ScriptedResolver::ok("unused");
    let tx = TransactionReq {
        gas: Some("0xgg".to_string()),
        ..scenario_a()
    };
    let mut envelope = inbound_envelope(&tx);
    let before = envelope.clone();

    let err = send_to_contract(&mut envelope, &tx, resolver.as_ref())
        .await
        .unwrap_err();

    assert!(matches!(err, TransformError::MalformedHex { .. }));
    assert_eq!(envelope, before);
}

#[tokio::test]
async fn test_manager_accepts_bare_object_params() {
    let manager = Manager::new(ScriptedResolver::ok("unused"));
    let mut envelope = RpcEnvelope::new("eth_sendTransaction", json!(scenario_a()));

    manager.transform(&mut envelope).await.unwrap();

    assert_eq!(envelope.method, "sendtocontract");
    assert_eq!(params_len(&envelope), 5);
}

#[tokio::test]
async fn test_resolver_error_is_returned_unwrapped() {
    let resolver = ScriptedResolver::failing(-5, "Invalid Qtum address");
    let tx = TransactionReq {
        from: Some(SENDER_HEX.to_string()),
        ..scenario_a()
    };
    let mut envelope = inbound_envelope(&tx);
    let before = envelope.clone();

    let err = send_to_contract(&mut envelope, &tx, resolver.as_ref())
        .await
        .unwrap_err();

    match err {
        TransformError::AddressResolution(ResolverError::Rpc { code, message }) => {
            assert_eq!(code, -5);
            assert_eq!(message, "Invalid Qtum address");
        }
        other => panic!("expected resolver error, got {:?}", other),
    }
    assert_eq!(envelope, before);
}

#[tokio::test]
async fn test_cancelled_resolution_leaves_envelope_untouched() {
    let tx = TransactionReq {
        from: Some(SENDER_HEX.to_string()),
        ..scenario_a()
    };
    let mut envelope = inbound_envelope(&tx);
    let before = envelope.clone();

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        send_to_contract(&mut envelope, &tx, &StalledResolver),
    )
    .await;

    assert!(outcome.is_err());
    assert_eq!(envelope, before);
}

#[tokio::test]
async fn test_absent_optional_fields_use_defaults() {
    let resolver = ScriptedResolver::ok("unused");
    let tx = TransactionReq {
        to: Some("c6ca2697719d00446d4ea51f6fac8fd1e9310214".to_string()),
        data: Some("54f6127f".to_string()),
        ..Default::default()
    };
    let mut envelope = inbound_envelope(&tx);

    send_to_contract(&mut envelope, &tx, resolver.as_ref())
        .await
        .unwrap();

    assert_eq!(
        envelope.params,
        json!([
            "c6ca2697719d00446d4ea51f6fac8fd1e9310214",
            "54f6127f",
            0.0,
            250000,
            0.0000004
        ])
    );
}

#[tokio::test]
async fn test_manager_routes_send_transaction() {
    let resolver = ScriptedResolver::ok("QNativeAddr1");
    let manager = Manager::new(resolver.clone());
    let tx = TransactionReq {
        from: Some(SENDER_HEX.to_string()),
        ..scenario_a()
    };
    let mut envelope = inbound_envelope(&tx);

    manager.transform(&mut envelope).await.unwrap();

    assert_eq!(envelope.method, "sendtocontract");
    assert_eq!(params_len(&envelope), 6);
}

#[tokio::test]
async fn test_manager_routes_contract_creation() {
    let resolver = ScriptedResolver::ok("QNativeAddr1");
    let manager = Manager::new(resolver.clone());
    let mut envelope = RpcEnvelope::new(
        "eth_sendTransaction",
        json!([{
            "from": SENDER_HEX,
            "gas": "0x6691b7",
            "gasPrice": "0x9184e72a000",
            "data": "0x6060604052"
        }]),
    );

    manager.transform(&mut envelope).await.unwrap();

    assert_eq!(envelope.method, "createcontract");
    assert_eq!(
        envelope.params,
        json!(["6060604052", 6721975, 1000.0, "QNativeAddr1"])
    );
}

#[tokio::test]
async fn test_contract_creation_rejects_value() {
    let manager = Manager::new(ScriptedResolver::ok("unused"));
    let mut envelope = RpcEnvelope::new(
        "eth_sendTransaction",
        json!([{ "data": "0x6060604052", "value": "0x2540be400" }]),
    );
    let before = envelope.clone();

    let err = manager.transform(&mut envelope).await.unwrap_err();

    assert!(matches!(err, TransformError::InvalidParams(_)));
    assert_eq!(envelope, before);
}

#[tokio::test]
async fn test_manager_routes_call() {
    let manager = Manager::new(ScriptedResolver::ok("QNativeAddr1"));
    let mut envelope = RpcEnvelope::new(
        "eth_call",
        json!([
            { "to": CONTRACT, "data": "0x06fdde03", "from": SENDER_HEX },
            "latest"
        ]),
    );

    manager.transform(&mut envelope).await.unwrap();

    assert_eq!(envelope.method, "callcontract");
    assert_eq!(
        envelope.params,
        json!([
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "06fdde03",
            "QNativeAddr1"
        ])
    );
}

#[tokio::test]
async fn test_concurrent_transforms_share_resolver() {
    let resolver = ScriptedResolver::ok("QNativeAddr1");
    let manager = Arc::new(Manager::new(resolver.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let manager = Arc::clone(&manager);
        handles.push(tokio::spawn(async move {
            let tx = TransactionReq {
                from: (i % 2 == 0).then(|| SENDER_HEX.to_string()),
                ..scenario_a()
            };
            let mut envelope = inbound_envelope(&tx);
            manager.transform(&mut envelope).await.unwrap();
            envelope.params
        }));
    }

    let mut lengths = Vec::new();
    for handle in handles {
        let params: Value = handle.await.unwrap();
        lengths.push(params.as_array().unwrap().len());
    }

    assert_eq!(lengths, vec![6, 5, 6, 5, 6, 5, 6, 5]);
    assert_eq!(resolver.calls(), 4);
}
