//! Multi-room broadcast chat over a fixed-framing wire protocol.
//!
//! Every listening port is an isolated room. A client sends one 16-byte
//! nickname frame after connecting, then exchanges 512-byte message frames;
//! the server timestamps each message, tags it with the sender's nickname,
//! and rebroadcasts it to every member of the room, replaying the most
//! recent messages to newcomers.

pub mod protocol;
pub mod server;
pub mod utils;
