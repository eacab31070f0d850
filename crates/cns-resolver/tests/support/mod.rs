//! Shared test doubles for the resolver integration tests
//!
//! `MockGateway` answers contract view calls from a stub table and
//! `MockIndex` plays the indexing service. `seeded_gateway` and
//! `seeded_index` build a small universe of names covering every tier.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use cns_core::{labelhash, namehash, Address};
use cns_params::{contract_address, ContractName, Network};
use cns_resolver::gateway::functions;
use cns_resolver::{CallArg, CallValue, CnsClient, ContractGateway, Error};
use cns_subgraph::{GraphFault, IndexReader};
use serde_json::{json, Value};

pub const ACCOUNT_ONE: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const ACCOUNT_TWO: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";
pub const ACCOUNT_THREE: &str = "0x90F79bf6EB2c4f870365E785982E1f101E93b906";

const DAY_SECS: u64 = 24 * 60 * 60;

pub fn account_one() -> Address {
    Address::parse(ACCOUNT_ONE).unwrap()
}

pub fn account_two() -> Address {
    Address::parse(ACCOUNT_TWO).unwrap()
}

pub fn account_three() -> Address {
    Address::parse(ACCOUNT_THREE).unwrap()
}

pub fn wrapper_address() -> Address {
    contract_address(Network::mainnet().chain_id, ContractName::NameWrapper).unwrap()
}

pub fn now_secs() -> u64 {
    Utc::now().timestamp() as u64
}

/// Contract gateway double answering from a stub table.
///
/// Unstubbed calls answer like an empty chain, so fixtures only record
/// state that exists.
pub struct MockGateway {
    responses: HashMap<String, CallValue>,
    failures: HashSet<String>,
    latency: Option<Duration>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            failures: HashSet::new(),
            latency: None,
        }
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn stub(
        mut self,
        contract: ContractName,
        function: &str,
        args: &[CallArg],
        value: CallValue,
    ) -> Self {
        self.responses
            .insert(call_key(contract, function, args), value);
        self
    }

    /// Makes one specific call fail like a dropped RPC connection.
    pub fn fail(mut self, contract: ContractName, function: &str, args: &[CallArg]) -> Self {
        self.failures.insert(call_key(contract, function, args));
        self
    }
}

#[async_trait]
impl ContractGateway for MockGateway {
    async fn call(
        &self,
        contract: ContractName,
        function: &str,
        args: &[CallArg],
    ) -> Result<CallValue, Error> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let key = call_key(contract, function, args);
        if self.failures.contains(&key) {
            return Err(Error::Call(format!(
                "connection dropped calling {contract}.{function}"
            )));
        }
        if let Some(value) = self.responses.get(&key) {
            return Ok(value.clone());
        }
        match function {
            functions::OWNER => Ok(CallValue::Address(Address::ZERO)),
            functions::OWNER_OF => Ok(CallValue::Null),
            functions::GET_DATA => Ok(wrapped_data(Address::ZERO, 0)),
            functions::NAME_EXPIRES => Ok(CallValue::Uint(0)),
            functions::AVAILABLE => Ok(CallValue::Bool(true)),
            functions::TEXT | functions::NAME | functions::ADDR => Ok(CallValue::Null),
            other => Err(Error::Call(format!("unexpected call to {contract}.{other}"))),
        }
    }
}

fn call_key(contract: ContractName, function: &str, args: &[CallArg]) -> String {
    let mut key = format!("{contract}/{function}");
    for arg in args {
        key.push('/');
        let token = match arg {
            CallArg::Node(node) => node.to_string(),
            CallArg::Label(label) => label.to_string(),
            CallArg::Address(address) => address.to_string(),
            CallArg::Str(value) => value.clone(),
        };
        key.push_str(&token);
    }
    key
}

/// Index double with per-instance fault behaviour.
pub struct MockIndex {
    faulty: bool,
    registrants: HashMap<String, Address>,
    histories: HashMap<String, Value>,
}

impl MockIndex {
    pub fn new() -> Self {
        Self {
            faulty: false,
            registrants: HashMap::new(),
            histories: HashMap::new(),
        }
    }

    /// Makes every query fail with a store fault.
    pub fn faulty(mut self) -> Self {
        self.faulty = true;
        self
    }

    pub fn with_registrant(mut self, label: &str, registrant: Address) -> Self {
        self.registrants
            .insert(labelhash(label).to_string(), registrant);
        self
    }

    pub fn with_history(mut self, name: &str, domain: Value) -> Self {
        self.histories.insert(namehash(name).to_string(), domain);
        self
    }
}

#[async_trait]
impl IndexReader for MockIndex {
    async fn query_raw(&self, document: &str, variables: Value) -> cns_subgraph::Result<Value> {
        if self.faulty {
            return Err(cns_subgraph::Error::Graph(vec![GraphFault::new(
                "Store error: database unavailable",
            )]));
        }
        let id = variables["id"].as_str().unwrap_or_default().to_string();
        if document.contains("registration(id:") {
            let registration = self
                .registrants
                .get(&id)
                .map(|registrant| json!({ "registrant": { "id": registrant.to_string() } }));
            return Ok(json!({ "registration": registration }));
        }
        if document.contains("domain(id:") {
            return Ok(json!({ "domain": self.histories.get(&id) }));
        }
        Err(cns_subgraph::Error::Decode(format!(
            "unexpected document: {document}"
        )))
    }
}

pub fn client(gateway: MockGateway, index: MockIndex) -> CnsClient {
    CnsClient::new(Network::mainnet(), Arc::new(gateway), Arc::new(index))
}

pub fn node(name: &str) -> CallArg {
    CallArg::Node(namehash(name))
}

pub fn label(label: &str) -> CallArg {
    CallArg::Label(labelhash(label))
}

pub fn addr(address: Address) -> CallValue {
    CallValue::Address(address)
}

pub fn reverse_node(address: Address) -> CallArg {
    CallArg::Node(namehash(&format!("{}.addr.reverse", address.to_bare_hex())))
}

pub fn wrapped_data(owner: Address, expiry: u64) -> CallValue {
    CallValue::Tuple(vec![
        CallValue::Address(owner),
        CallValue::Uint(0),
        CallValue::Uint(expiry),
    ])
}

/// The fixture universe, seeded onto an empty chain:
///
/// - `wrapped.celo`: wrapper custody, live
/// - `expired-wrapped.celo`: wrapper custody, token burned, expired
/// - `test123.celo`: live registrar registration
/// - `expired.celo`: registration past its grace window
/// - `grace.celo`: expired but still inside the grace window
/// - `with-subnames.celo` / `test.with-subnames.celo`: registry subname
/// - `wrapped-with-subnames.celo` / `test.wrapped-with-subnames.celo`
/// - `with-profile.celo`: registrar name with resolver records
/// - `sub.with-profile.celo`: plain registry record
pub fn seeded_gateway() -> MockGateway {
    let wrapper = wrapper_address();
    let in_a_year = now_secs() + 365 * DAY_SECS;
    let in_half_year = now_secs() + 180 * DAY_SECS;
    let long_expired = now_secs() - 200 * DAY_SECS;
    let in_grace = now_secs() - 10 * DAY_SECS;

    MockGateway::new()
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("wrapped.celo")],
            addr(wrapper),
        )
        .stub(
            ContractName::NameWrapper,
            functions::OWNER_OF,
            &[node("wrapped.celo")],
            addr(account_one()),
        )
        .stub(
            ContractName::NameWrapper,
            functions::GET_DATA,
            &[node("wrapped.celo")],
            wrapped_data(account_one(), in_a_year),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::NAME_EXPIRES,
            &[label("wrapped")],
            CallValue::Uint(in_half_year),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("expired-wrapped.celo")],
            addr(wrapper),
        )
        .stub(
            ContractName::NameWrapper,
            functions::GET_DATA,
            &[node("expired-wrapped.celo")],
            wrapped_data(Address::ZERO, now_secs() - DAY_SECS),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("test123.celo")],
            addr(account_one()),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::OWNER_OF,
            &[label("test123")],
            addr(account_one()),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::NAME_EXPIRES,
            &[label("test123")],
            CallValue::Uint(in_half_year),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::AVAILABLE,
            &[label("test123")],
            CallValue::Bool(false),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("expired.celo")],
            addr(account_one()),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::NAME_EXPIRES,
            &[label("expired")],
            CallValue::Uint(long_expired),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("grace.celo")],
            addr(account_one()),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::NAME_EXPIRES,
            &[label("grace")],
            CallValue::Uint(in_grace),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("with-subnames.celo")],
            addr(account_one()),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::OWNER_OF,
            &[label("with-subnames")],
            addr(account_one()),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::NAME_EXPIRES,
            &[label("with-subnames")],
            CallValue::Uint(in_a_year),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("test.with-subnames.celo")],
            addr(account_two()),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("wrapped-with-subnames.celo")],
            addr(wrapper),
        )
        .stub(
            ContractName::NameWrapper,
            functions::OWNER_OF,
            &[node("wrapped-with-subnames.celo")],
            addr(account_one()),
        )
        .stub(
            ContractName::NameWrapper,
            functions::GET_DATA,
            &[node("wrapped-with-subnames.celo")],
            wrapped_data(account_one(), in_a_year),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("test.wrapped-with-subnames.celo")],
            addr(wrapper),
        )
        .stub(
            ContractName::NameWrapper,
            functions::OWNER_OF,
            &[node("test.wrapped-with-subnames.celo")],
            addr(account_two()),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("with-profile.celo")],
            addr(account_two()),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::OWNER_OF,
            &[label("with-profile")],
            addr(account_two()),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::NAME_EXPIRES,
            &[label("with-profile")],
            CallValue::Uint(in_a_year),
        )
        .stub(
            ContractName::BaseRegistrar,
            functions::AVAILABLE,
            &[label("with-profile")],
            CallValue::Bool(false),
        )
        .stub(
            ContractName::PublicResolver,
            functions::TEXT,
            &[node("with-profile.celo"), CallArg::Str("description".to_string())],
            CallValue::Str("Hello2".to_string()),
        )
        .stub(
            ContractName::PublicResolver,
            functions::ADDR,
            &[node("with-profile.celo")],
            addr(account_two()),
        )
        .stub(
            ContractName::PublicResolver,
            functions::NAME,
            &[reverse_node(account_two())],
            CallValue::Str("with-profile.celo".to_string()),
        )
        // account three claims a name that resolves to someone else
        .stub(
            ContractName::PublicResolver,
            functions::NAME,
            &[reverse_node(account_three())],
            CallValue::Str("with-profile.celo".to_string()),
        )
        .stub(
            ContractName::Registry,
            functions::OWNER,
            &[node("sub.with-profile.celo")],
            addr(account_two()),
        )
}

pub fn seeded_index() -> MockIndex {
    MockIndex::new()
        .with_registrant("test123", account_one())
        .with_registrant("expired", account_one())
        .with_registrant("grace", account_one())
        .with_registrant("with-subnames", account_one())
        .with_registrant("with-profile", account_two())
        .with_history("with-profile.celo", profile_history())
        .with_history("wrapped.celo", wrapped_history())
        .with_history("test.with-subnames.celo", subname_history())
}

fn profile_history() -> Value {
    json!({
        "events": [
            {
                "id": "0x68b3-0",
                "blockNumber": 16421,
                "transactionID": "0x8af4",
                "type": "NewOwner",
                "owner": ACCOUNT_TWO.to_lowercase()
            },
            {
                "id": "0x68b3-1",
                "blockNumber": 16425,
                "transactionID": "0x9cd1",
                "type": "NewResolver",
                "resolver": "0x537c7d15cd24855d092927b3faf326897d5645a4"
            }
        ],
        "resolver": {
            "events": [
                {
                    "id": "0x68b3-2",
                    "blockNumber": 16430,
                    "transactionID": "0xa1f2",
                    "type": "TextChanged",
                    "key": "description"
                }
            ]
        },
        "registration": {
            "events": [
                {
                    "id": "0x68b3-3",
                    "blockNumber": 16421,
                    "transactionID": "0x8af4",
                    "type": "NameRegistered",
                    "registrant": ACCOUNT_TWO.to_lowercase()
                }
            ]
        }
    })
}

fn wrapped_history() -> Value {
    json!({
        "events": [
            {
                "id": "0x41c2-0",
                "blockNumber": 16500,
                "transactionID": "0xb3e7",
                "type": "NameWrapped",
                "owner": ACCOUNT_ONE.to_lowercase()
            }
        ],
        "resolver": { "events": [] },
        "registration": { "events": [] }
    })
}

fn subname_history() -> Value {
    json!({
        "events": [
            {
                "id": "0x77d9-0",
                "blockNumber": 16601,
                "transactionID": "0xc4a8",
                "type": "NewOwner",
                "owner": ACCOUNT_TWO.to_lowercase()
            }
        ],
        "resolver": { "events": [] }
    })
}
