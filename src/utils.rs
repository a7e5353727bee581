//! Utilities for both clients and servers.

use async_std::net;
use async_std::prelude::*;
use chrono::Local;
use std::error::Error;

use crate::protocol::{MessageFrame, NicknameFrame, MAX_FRAME, MAX_NICKNAME};

/// Our standard `Result` type, with a fully general `Error`. The error must
/// be `Send + Sync` so futures carrying it can run on the worker pool.
pub type ChatResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// The timestamp prefix for a broadcast frame, e.g. `[2026-08-25 14:03:07] `.
pub fn timestamp() -> String {
    Local::now().format("[%Y-%m-%d %H:%M:%S] ").to_string()
}

/// Read exactly `buf.len()` bytes from `socket`.
///
/// Returns `Ok(false)` if the peer closed the connection cleanly between
/// frames. A close in the middle of a frame is an error.
async fn read_exact_frame(socket: &mut net::TcpStream, buf: &mut [u8]) -> ChatResult<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = socket.read(&mut buf[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(false);
            }
            return Err("connection closed mid-frame".into());
        }
        filled += n;
    }
    Ok(true)
}

/// Read one nickname frame, or `None` if the peer closed first.
pub async fn read_nickname(socket: &mut net::TcpStream) -> ChatResult<Option<NicknameFrame>> {
    let mut buf = [0u8; MAX_NICKNAME];
    if read_exact_frame(socket, &mut buf).await? {
        Ok(Some(NicknameFrame(buf)))
    } else {
        Ok(None)
    }
}

/// Read one message frame, or `None` if the peer closed first.
pub async fn read_message(socket: &mut net::TcpStream) -> ChatResult<Option<MessageFrame>> {
    let mut buf = [0u8; MAX_FRAME];
    if read_exact_frame(socket, &mut buf).await? {
        Ok(Some(MessageFrame(buf)))
    } else {
        Ok(None)
    }
}

/// Transmit one message frame on `socket`.
pub async fn write_message(socket: &mut net::TcpStream, frame: &MessageFrame) -> ChatResult<()> {
    socket.write_all(&frame.0).await?;
    Ok(())
}

/// Await `future`, and log any error it returns.
pub async fn log_error<F>(future: F)
where
    F: Future<Output = ChatResult<()>>,
{
    if let Err(err) = future.await {
        tracing::error!(error = %err, "task failed");
    }
}
