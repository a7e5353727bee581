//! Interactive chat client.
//!
//! Sends the nickname frame, then forwards lines from standard input to the
//! server while printing every broadcast frame it receives.

use async_std::prelude::FutureExt;
use async_std::prelude::*;
use async_std::{io, net, task};
use roomcast::protocol::{MessageFrame, NicknameFrame};
use roomcast::utils::{self, ChatResult};

fn main() -> ChatResult<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: client <nickname> <host> <port>");
        std::process::exit(1);
    }
    let nickname = args[1].clone();
    let host = args[2].clone();
    let port: u16 = args[3].parse()?;

    task::block_on(async {
        let mut socket = net::TcpStream::connect((host.as_str(), port)).await?;
        socket.write_all(&NicknameFrame::encode(&nickname).0).await?;

        // One task prints incoming broadcasts.
        let from_server = print_broadcasts(socket.clone());

        // Another reads lines from standard input and sends them on.
        let to_server = send_lines(socket);

        // Run until the server closes the connection or stdin runs dry.
        from_server.race(to_server).await
    })
}

async fn print_broadcasts(mut from_server: net::TcpStream) -> ChatResult<()> {
    while let Some(frame) = utils::read_message(&mut from_server).await? {
        println!("{}", frame.text());
    }
    Ok(())
}

async fn send_lines(mut to_server: net::TcpStream) -> ChatResult<()> {
    let mut lines = io::BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next().await {
        let line = line?;
        utils::write_message(&mut to_server, &MessageFrame::encode_payload(&line)).await?;
    }
    Ok(())
}
