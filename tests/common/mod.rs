//! Shared helpers for integration tests.
//!
//! Everything runs in-process: a [`ChannelTransport`] stands in for the
//! network and either the test drives the [`ChannelPeer`] by hand or
//! [`serve`] answers requests from a small in-memory key/value store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use glide_client::{ChannelPeer, ChannelTransport, Client, ClientConfig, PeerEvent, Request, Value};

/// Global counter for generating unique key prefixes per test.
static TEST_ID: AtomicUsize = AtomicUsize::new(0);

/// Return a unique prefix for test keys.
pub fn test_prefix() -> String {
    let id = TEST_ID.fetch_add(1, Ordering::Relaxed);
    format!("glide_test_{}_{}", std::process::id(), id)
}

/// A client connected to a peer the test drives itself. The connect event
/// has already been consumed.
pub async fn connected() -> (Client<ChannelTransport>, ChannelPeer) {
    connected_with(ClientConfig::default()).await
}

pub async fn connected_with(config: ClientConfig) -> (Client<ChannelTransport>, ChannelPeer) {
    let (transport, mut peer) = ChannelTransport::pair();
    let client = Client::connect(config, transport)
        .await
        .expect("connect failed");
    match peer.next_event().await {
        Some(PeerEvent::Connect(_)) => {}
        other => panic!("expected connect event, got {other:?}"),
    }
    (client, peer)
}

/// A client whose peer is answered by [`serve`] on a spawned task.
pub async fn served() -> Client<ChannelTransport> {
    let (client, peer) = connected().await;
    tokio::spawn(serve(peer));
    client
}

/// Answer requests until the client closes.
pub async fn serve(mut peer: ChannelPeer) {
    let mut store = HashMap::new();
    while let Some(req) = peer.next_request().await {
        let reply = execute(&mut store, &req);
        peer.reply(req.callback_id, reply);
    }
}

/// Receive the next request, panicking if the link closed.
pub async fn expect_request(peer: &mut ChannelPeer) -> Request {
    peer.next_request().await.expect("link closed")
}

fn execute(store: &mut HashMap<String, String>, req: &Request) -> Value {
    let args = req.args_lossy();
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();
    match argv.as_slice() {
        ["PING"] => Value::Str("PONG".into()),
        ["PING", msg] => Value::Str((*msg).into()),
        ["INFO", ..] => Value::Map(vec![
            (Value::Str("redis_version".into()), Value::Str("7.2.4".into())),
            (Value::Str("connected_clients".into()), Value::Int(1)),
        ]),
        ["GET", key] => store.get(*key).cloned().map_or(Value::Nil, Value::Str),
        ["SET", key, value, opts @ ..] => set(store, key, value, opts),
        ["DBSIZE"] => Value::Int(store.len() as i64),
        [verb, ..] => Value::Error(format!("ERR unknown command '{verb}'")),
        [] => Value::Error("ERR empty command".into()),
    }
}

fn set(store: &mut HashMap<String, String>, key: &str, value: &str, opts: &[&str]) -> Value {
    let exists = store.contains_key(key);
    let nx = opts.contains(&"NX");
    let xx = opts.contains(&"XX");
    let get = opts.contains(&"GET");

    let old = store.get(key).cloned();
    let apply = !(nx && exists) && !(xx && !exists);
    if apply {
        store.insert(key.to_string(), value.to_string());
    }

    match (get, apply) {
        (true, _) => old.map_or(Value::Nil, Value::Str),
        (false, true) => Value::Okay,
        (false, false) => Value::Nil,
    }
}
