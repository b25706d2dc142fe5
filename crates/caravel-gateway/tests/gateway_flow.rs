//! Integration test: the full client flow from enrollment to block
//! inspection, end to end through the gateway.
//!
//! Mirrors the canonical usage sequence: enroll the admin, register an
//! application user, seed the ledger, mutate assets, and read the
//! resulting write history back out of the channel.

use serde_json::{json, Value};

use caravel_gateway::{
    wallet::{enroll_admin, register_user},
    BlockInspector, DevCertificateAuthority, FsWallet, GatewayConfig, InProcessNetwork,
    TransactionGateway,
};

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_full_client_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut wallet = FsWallet::open(dir.path()).unwrap();
    let mut ca = DevCertificateAuthority::default();

    // Enrollment bootstrap: admin first, then the application user.
    enroll_admin(&mut wallet, &mut ca).unwrap();
    register_user(&mut wallet, &mut ca, "user0", "org1.department1").unwrap();

    let config = GatewayConfig {
        wallet_dir: dir.path().to_path_buf(),
        ..GatewayConfig::default()
    };
    let mut network = InProcessNetwork::new("devchannel").with_clock(|| 1700000000);
    let gateway = TransactionGateway::new(config);

    // Seed the ledger.
    gateway
        .submit(&mut network, &wallet, "initLedger", &[])
        .unwrap();

    // Create a schema-validated asset; the key derives from the
    // schema name and the pinned transaction timestamp.
    let schema = json!({
        "name": "car",
        "properties": [
            {"name": "color", "type": "string", "required": true},
            {"name": "make", "type": "string", "required": true},
            {"name": "model", "type": "string", "required": true},
            {"name": "owner", "type": "string", "required": true},
        ],
    });
    let payload = json!({
        "color": "silver",
        "make": "Honda",
        "model": "Civic",
        "owner": "OWNER1562965004",
    });
    let created = gateway
        .submit(
            &mut network,
            &wallet,
            "createAsset",
            &strings(&[&schema.to_string(), &payload.to_string()]),
        )
        .unwrap();
    assert_eq!(created["key"], json!("CAR1700000000"));

    // Transfer a seeded car between owners.
    let transfer = json!({
        "carNumber": "CAR1562965001",
        "newOwner": "OWNER1562965004",
        "firstOwner": "OWNER1562965001",
    });
    let transferred = gateway
        .submit(
            &mut network,
            &wallet,
            "changeCarOwner",
            &strings(&[&transfer.to_string()]),
        )
        .unwrap();
    assert_eq!(transferred["car"]["owner"], json!("OWNER1562965004"));

    // Evaluate: the new owner now matches two cars by property.
    let by_owner = gateway
        .evaluate(
            &mut network,
            &wallet,
            "queryAssetByProp",
            &strings(&["owner", "OWNER1562965004"]),
        )
        .unwrap();
    assert_eq!(by_owner.as_array().unwrap().len(), 2);

    // Delete one seeded car.
    let deleted = gateway
        .submit(
            &mut network,
            &wallet,
            "deleteAsset",
            &strings(&["CAR1562965006"]),
        )
        .unwrap();
    assert_eq!(deleted, json!("CAR1562965006"));

    // Four submits committed, so four transaction blocks follow the
    // config prelude, in submission order.
    let inspector = BlockInspector::new();
    let writes = inspector.all_block_writes(network.channel()).unwrap();
    assert_eq!(writes.len(), 4);
    assert_eq!(writes[0].1.key, "CAR1562965001");
    assert_eq!(writes[1].1.key, "CAR1700000000");
    assert_eq!(writes[2].1.key, "CAR1562965001");
    assert!(!writes[2].1.is_delete);
    assert_eq!(writes[3].1.key, "CAR1562965006");
    assert!(writes[3].1.is_delete);

    // Evaluations never touched the chain.
    assert_eq!(
        inspector.block_height(network.channel()).unwrap(),
        BlockInspector::DEFAULT_CONFIG_BLOCK_COUNT + 4
    );

    // The delete's block write decodes as a deletion with no value.
    let last: Value = serde_json::to_value(&writes[3].1).unwrap();
    assert_eq!(last["value"], Value::Null);
}
