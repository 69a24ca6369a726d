//! Room membership registry and event fan-out
//!
//! The registry is the hub's only shared state: a peers table mapping each
//! connection to its outbound mailbox, and a rooms table mapping session ids
//! to member sets. It is constructor-injected into the handlers that need it
//! rather than living in a process global.
//!
//! Locking discipline: the mutex guards plain map operations only; sends go
//! through unbounded channels and never block under the lock.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};
use uuid::Uuid;

use bugbash_common::protocol::ServerEvent;

/// Transport-assigned connection identifier; carries no user identity
pub type ConnId = Uuid;

#[derive(Default)]
struct Inner {
    /// Outbound mailbox per live connection
    peers: HashMap<ConnId, UnboundedSender<ServerEvent>>,
    /// Room membership, keyed by session id
    rooms: HashMap<String, HashSet<ConnId>>,
}

/// Shared multicast relay state
///
/// One instance lives for the process lifetime and is shared behind an
/// `Arc`. Connections hold no state of their own beyond the mailbox handed
/// out at registration; a dropped connection is simply unregistered and its
/// undelivered events are lost (clients recover via full resync).
#[derive(Default)]
pub struct RoomRegistry {
    inner: Mutex<Inner>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection, returning its id and the receiving half
    /// of its outbound mailbox
    pub fn register(&self) -> (ConnId, UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Uuid::new_v4();
        let mut inner = self.inner.lock().unwrap();
        inner.peers.insert(conn, tx);
        debug!("Connection {} registered, {} peers total", conn, inner.peers.len());
        (conn, rx)
    }

    /// Remove a connection from the peers table and every room it joined
    ///
    /// No explicit leave is required; this is the only cleanup path.
    pub fn unregister(&self, conn: ConnId) {
        let mut inner = self.inner.lock().unwrap();
        inner.peers.remove(&conn);
        inner.rooms.retain(|_, members| {
            members.remove(&conn);
            !members.is_empty()
        });
        debug!("Connection {} unregistered, {} peers remain", conn, inner.peers.len());
    }

    /// Add a connection to a room. Idempotent: joining twice has no
    /// additional effect, so a double-join never double-delivers.
    pub fn join(&self, conn: ConnId, room: &str) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.peers.contains_key(&conn) {
            return;
        }
        let members = inner.rooms.entry(room.to_string()).or_default();
        if members.insert(conn) {
            debug!("Connection {} joined room {} ({} members)", conn, room, members.len());
        } else {
            trace!("Connection {} already in room {}", conn, room);
        }
    }

    /// Relay an event to every member of a room, optionally excluding one
    /// connection (the originator of a client-relayed mutation)
    ///
    /// A room with no members is a silent no-op; events with an unknown or
    /// missing session id end up here. Sends to mailboxes
    /// whose connection died mid-relay are dropped with no redelivery.
    pub fn send_to_room(&self, room: &str, except: Option<ConnId>, event: ServerEvent) {
        let inner = self.inner.lock().unwrap();
        let Some(members) = inner.rooms.get(room) else {
            trace!("No room {} for event {}, dropping", room, event.event_name());
            return;
        };
        let mut delivered = 0;
        for conn in members {
            if Some(*conn) == except {
                continue;
            }
            if let Some(tx) = inner.peers.get(conn) {
                if tx.send(event.clone()).is_ok() {
                    delivered += 1;
                }
            }
        }
        debug!(
            "Relayed {} to {} of {} members in room {}",
            event.event_name(),
            delivered,
            members.len(),
            room
        );
    }

    /// Relay an event to every connected client, regardless of rooms
    pub fn broadcast(&self, event: ServerEvent) {
        let inner = self.inner.lock().unwrap();
        for tx in inner.peers.values() {
            let _ = tx.send(event.clone());
        }
        debug!("Broadcast {} to {} peers", event.event_name(), inner.peers.len());
    }

    /// Number of live connections
    pub fn peer_count(&self) -> usize {
        self.inner.lock().unwrap().peers.len()
    }

    /// Number of members currently in a room
    pub fn room_size(&self, room: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .rooms
            .get(room)
            .map(HashSet::len)
            .unwrap_or(0)
    }
}
