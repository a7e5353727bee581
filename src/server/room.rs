//! A chat room: the shared state behind one listening port.
//!
//! Each room runs as its own actor task, so every state mutation for one
//! room happens on a single logical timeline. Members are indexed by an
//! opaque session id; the room owns only their outbound queues.

use async_std::channel::{self, Receiver, Sender};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::dispatcher::Dispatcher;
use super::outbound;
use crate::protocol::{format_broadcast, MessageFrame};
use crate::utils;

/// How many broadcast frames a room keeps for replay to newcomers.
pub const MAX_RECENT: usize = 100;

/// Identifies one connection for the lifetime of the process.
pub type SessionId = u64;

/// Commands understood by a room.
pub enum Command {
    /// Add a member and replay the recent history to it.
    Enter {
        id: SessionId,
        nickname: String,
        member: outbound::Queue,
    },

    /// Remove a member. Safe to send for a session that already left.
    Leave { id: SessionId },

    /// Broadcast `payload` from the given member to the whole room,
    /// the sender included.
    Post { id: SessionId, payload: MessageFrame },
}

pub type CommandQueue = Sender<Command>;

struct Member {
    queue: outbound::Queue,
    nickname: String,
}

/// Create the room for `port`.
///
/// Return a command queue we can use to communicate with it.
pub fn new(port: u16, dispatcher: &Dispatcher) -> CommandQueue {
    let (tx, rx) = channel::unbounded();

    dispatcher.spawn(handle_commands(rx, port));

    tx
}

async fn handle_commands(rx: Receiver<Command>, port: u16) {
    // The member set and the nickname table live in one map, so a session
    // is either fully registered or not at all.
    let mut members: HashMap<SessionId, Member> = HashMap::new();
    let mut history: VecDeque<Arc<MessageFrame>> = VecDeque::new();

    while let Ok(command) = rx.recv().await {
        match command {
            Command::Enter { id, nickname, member } => {
                tracing::info!(port, id, nickname = %nickname, "member entered");

                // Replay oldest-first. The replay finishes before any later
                // command is looked at, so the newcomer cannot miss a
                // broadcast that happens "after" its entry.
                let mut alive = true;
                for frame in &history {
                    if member.try_send(frame.clone()).is_err() {
                        alive = false;
                        break;
                    }
                }
                if alive {
                    members.insert(id, Member { queue: member, nickname });
                }
            }

            Command::Leave { id } => {
                if members.remove(&id).is_some() {
                    tracing::info!(port, id, "member left");
                }
            }

            Command::Post { id, payload } => {
                // A sender that raced its own departure still broadcasts,
                // just without a nickname.
                let nickname = members
                    .get(&id)
                    .map(|member| member.nickname.clone())
                    .unwrap_or_default();

                let frame = Arc::new(format_broadcast(
                    &utils::timestamp(),
                    &nickname,
                    &payload,
                ));

                history.push_back(frame.clone());
                while history.len() > MAX_RECENT {
                    history.pop_front();
                }

                // Deliver to every member, the sender included. A member
                // whose outbound queue has closed is dropped here.
                members.retain(|_, member| member.queue.try_send(frame.clone()).is_ok());
            }
        }
    }
}
