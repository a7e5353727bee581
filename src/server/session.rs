//! A task that serves one client connection.

use async_std::net;
use std::sync::atomic::{AtomicU64, Ordering};

use super::dispatcher::Dispatcher;
use super::outbound;
use super::room::{self, SessionId};
use crate::utils::{self, ChatResult};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Handle a single client's connection, from nickname handshake to close.
pub async fn serve_connection(
    mut socket: net::TcpStream,
    room: room::CommandQueue,
    dispatcher: Dispatcher,
) -> ChatResult<()> {
    let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);

    // Handshake: the first frame on the wire names the session. A peer
    // that closes before sending it was never a member.
    let nickname = match utils::read_nickname(&mut socket).await? {
        Some(frame) => frame.formatted(),
        None => return Ok(()),
    };

    let member = outbound::new(socket.clone(), &dispatcher);
    room.send(room::Command::Enter { id, nickname, member }).await?;

    let result = pump_messages(&mut socket, id, &room).await;

    // Leave on every exit path, clean EOF and read error alike.
    let _ = room.send(room::Command::Leave { id }).await;
    result
}

/// Forward payload frames to the room until the peer closes the connection.
async fn pump_messages(
    socket: &mut net::TcpStream,
    id: SessionId,
    room: &room::CommandQueue,
) -> ChatResult<()> {
    while let Some(payload) = utils::read_message(socket).await? {
        room.send(room::Command::Post { id, payload }).await?;
    }
    Ok(())
}
