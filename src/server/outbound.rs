//! Conveying broadcast frames from a room out to one client socket.

use async_std::channel::{self, Receiver, Sender};
use async_std::net;
use std::sync::Arc;

use super::dispatcher::Dispatcher;
use crate::protocol::MessageFrame;
use crate::utils::{self, ChatResult};

/// The enqueuing end of one session's outbound frame queue. Frames are
/// written to the socket in enqueue order, one at a time.
pub type Queue = Sender<Arc<MessageFrame>>;

/// Start the writer task for `to_client` and return its queue.
pub fn new(to_client: net::TcpStream, dispatcher: &Dispatcher) -> Queue {
    let (tx, rx) = channel::unbounded();

    dispatcher.spawn(utils::log_error(process_send_queue(rx, to_client)));

    tx
}

/// Take frames from `dequeue` and transmit them on `to_client`.
///
/// The single sequential write is what keeps at most one frame mid-write
/// per session. A write error ends the task; dropping the receiver is how
/// the room learns the member is gone.
async fn process_send_queue(
    dequeue: Receiver<Arc<MessageFrame>>,
    mut to_client: net::TcpStream,
) -> ChatResult<()> {
    while let Ok(frame) = dequeue.recv().await {
        utils::write_message(&mut to_client, &frame).await?;
    }
    Ok(())
}
