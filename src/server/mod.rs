//! Server composition: one room and one accept loop per listening port.

pub mod dispatcher;
pub mod outbound;
pub mod room;
pub mod session;

use async_std::net;
use async_std::prelude::*;
use futures::future;

use self::dispatcher::Dispatcher;
use crate::utils::{self, ChatResult};

/// Accept connections on `listener` forever, serving each one as a member
/// of `room`.
///
/// A failed accept is logged and the loop keeps accepting, so a transient
/// error never takes the room down.
pub async fn listen(
    listener: net::TcpListener,
    room: room::CommandQueue,
    dispatcher: Dispatcher,
) -> ChatResult<()> {
    let mut new_connections = listener.incoming();
    while let Some(socket) = new_connections.next().await {
        match socket {
            Ok(socket) => {
                let future = session::serve_connection(socket, room.clone(), dispatcher.clone());
                dispatcher.spawn(utils::log_error(future));
            }
            Err(err) => tracing::warn!(error = %err, "accept failed"),
        }
    }
    Ok(())
}

/// Bind every port, then serve all rooms until the process is terminated.
///
/// Binding happens up front: a bad port fails startup as a whole, while
/// errors after that stay contained in individual sessions.
pub async fn run(ports: Vec<u16>, workers: usize) -> ChatResult<()> {
    let dispatcher = Dispatcher::new(workers)?;

    let mut servers = Vec::new();
    for port in ports {
        let listener = net::TcpListener::bind(("0.0.0.0", port)).await?;
        tracing::info!(port, "room listening");
        let room = room::new(port, &dispatcher);
        servers.push(listen(listener, room, dispatcher.clone()));
    }

    for result in future::join_all(servers).await {
        result?;
    }
    Ok(())
}
