//! A mock beacon node serving the REST endpoints ethdo uses.

use ethdo_core::PublicKey;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use warp::Filter;

/// Genesis validators root reported by the mock node.
pub const GENESIS_VALIDATORS_ROOT: &str =
    "0x4b363db94e286120d76eb905340fdd4e54bfe9f06bf33ff6cf5ad27f511bfe95";

/// Fork version reported by the mock node.
pub const FORK_VERSION: [u8; 4] = [0x02, 0x00, 0x00, 0x00];

/// Index of the mock node's only validator.
pub const VALIDATOR_INDEX: u64 = 21;

/// A running mock node.
pub struct MockNode {
    /// Address the node listens on
    pub addr: SocketAddr,
    /// Exits submitted to the node
    pub exits: Arc<Mutex<Vec<Value>>>,
}

impl MockNode {
    /// The node's address as a connection string.
    pub fn connection(&self) -> String {
        self.addr.to_string()
    }
}

fn validator_json(pubkey: &str, exit_epoch: u64) -> Value {
    let status = if exit_epoch == u64::MAX {
        "active_ongoing"
    } else {
        "active_exiting"
    };
    json!({
        "index": VALIDATOR_INDEX.to_string(),
        "balance": "32001000000",
        "status": status,
        "validator": {
            "pubkey": pubkey,
            "withdrawal_credentials": format!("0x{}", "00".repeat(32)),
            "effective_balance": "32000000000",
            "slashed": false,
            "activation_eligibility_epoch": "0",
            "activation_epoch": "0",
            "exit_epoch": exit_epoch.to_string(),
            "withdrawable_epoch": u64::MAX.to_string()
        }
    })
}

/// Starts a mock node with one validator and the given genesis time.
///
/// The validator reports an exit epoch once an exit has been submitted.
pub async fn start(validator: PublicKey, genesis_time: u64) -> MockNode {
    let exits: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let pubkey = validator.to_string();

    let spec = warp::get()
        .and(warp::path!("eth" / "v1" / "config" / "spec"))
        .map(|| {
            warp::reply::json(&json!({
                "data": {
                    "CONFIG_NAME": "mock",
                    "SECONDS_PER_SLOT": "12",
                    "SLOTS_PER_EPOCH": "32",
                    "GENESIS_FORK_VERSION": "0x00000000",
                    "DOMAIN_VOLUNTARY_EXIT": "0x04000000"
                }
            }))
        });

    let genesis = warp::get()
        .and(warp::path!("eth" / "v1" / "beacon" / "genesis"))
        .map(move || {
            warp::reply::json(&json!({
                "data": {
                    "genesis_time": genesis_time.to_string(),
                    "genesis_validators_root": GENESIS_VALIDATORS_ROOT,
                    "genesis_fork_version": "0x00000000"
                }
            }))
        });

    let fork = warp::get()
        .and(warp::path!("eth" / "v1" / "beacon" / "states" / "head" / "fork"))
        .map(|| {
            warp::reply::json(&json!({
                "data": {
                    "previous_version": "0x01000000",
                    "current_version": format!("0x{}", hex::encode(FORK_VERSION)),
                    "epoch": "10"
                }
            }))
        });

    let version = warp::get()
        .and(warp::path!("eth" / "v1" / "node" / "version"))
        .map(|| {
            warp::reply::json(&json!({
                "data": {"version": "Mock/v1.2.3/x86_64-linux"}
            }))
        });

    let syncing = warp::get()
        .and(warp::path!("eth" / "v1" / "node" / "syncing"))
        .map(|| {
            warp::reply::json(&json!({
                "data": {"head_slot": "4000", "sync_distance": "0", "is_syncing": false}
            }))
        });

    let exit_epoch = {
        let exits = exits.clone();
        move || {
            exits
                .lock()
                .unwrap()
                .first()
                .and_then(|exit| exit["message"]["epoch"].as_str()?.parse::<u64>().ok())
                .unwrap_or(u64::MAX)
        }
    };

    let validators = {
        let pubkey = pubkey.clone();
        let exit_epoch = exit_epoch.clone();
        warp::post()
            .and(warp::path!("eth" / "v1" / "beacon" / "states" / "head" / "validators"))
            .and(warp::body::json())
            .map(move |body: Value| {
                let known = body["ids"]
                    .as_array()
                    .map(|ids| ids.iter().any(|id| id.as_str() == Some(pubkey.as_str())))
                    .unwrap_or(false);
                let data = if known {
                    vec![validator_json(&pubkey, exit_epoch())]
                } else {
                    vec![]
                };
                warp::reply::json(&json!({ "data": data }))
            })
    };

    let validator = {
        let pubkey = pubkey.clone();
        warp::get()
            .and(warp::path!("eth" / "v1" / "beacon" / "states" / "head" / "validators" / String))
            .map(move |id: String| {
                if id == pubkey {
                    warp::reply::with_status(
                        warp::reply::json(&json!({ "data": validator_json(&pubkey, exit_epoch()) })),
                        warp::http::StatusCode::OK,
                    )
                } else {
                    warp::reply::with_status(
                        warp::reply::json(&json!({"code": 404, "message": "validator not found"})),
                        warp::http::StatusCode::NOT_FOUND,
                    )
                }
            })
    };

    let submit = {
        let exits = exits.clone();
        warp::post()
            .and(warp::path!("eth" / "v1" / "beacon" / "pool" / "voluntary_exits"))
            .and(warp::body::json())
            .map(move |exit: Value| {
                exits.lock().unwrap().push(exit);
                warp::reply()
            })
    };

    let routes = spec
        .or(genesis)
        .or(fork)
        .or(version)
        .or(syncing)
        .or(validators)
        .or(validator)
        .or(submit);

    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    MockNode { addr, exits }
}
