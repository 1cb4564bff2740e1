//! Connection loop of the terminal client.

use futures_util::{SinkExt, StreamExt};
use roomcast_shared::time::{get_jst_timestamp, timestamp_to_jst_clock};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    command::{Command, HELP},
    error::ClientError,
    session::{ClientSession, Effect},
};

/// Connect to `url` and run the interactive loop until `/quit`, EOF or the
/// server closing the connection.
pub async fn run_client(url: &str) -> Result<(), ClientError> {
    let (stream, _response) = connect_async(url).await?;
    tracing::info!("Connected to {}", url);
    println!("Connected to {url}");
    println!("{HELP}");

    let (mut write, mut read) = stream.split();

    // Print every relayed message as it arrives
    let mut reader = tokio::spawn(async move {
        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    println!("[{}] {}", timestamp_to_jst_clock(get_jst_timestamp()), text);
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    // rustyline blocks, so it gets its own thread
    let (line_tx, mut line_rx) = mpsc::channel::<String>(16);
    tokio::task::spawn_blocking(move || {
        if let Err(e) = read_lines(line_tx) {
            tracing::error!("{}", e);
        }
    });

    let mut session = ClientSession::new();
    loop {
        tokio::select! {
            _ = &mut reader => {
                println!("Server closed the connection");
                break;
            }
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                match session.handle(Command::parse(&line)) {
                    Effect::Send { envelope, echo } => {
                        write.send(Message::Text(envelope.to_json()?.into())).await?;
                        if let Some(echo) = echo {
                            println!("{echo}");
                        }
                    }
                    Effect::Notice(notice) => println!("{notice}"),
                    Effect::Quit => break,
                    Effect::Nothing => {}
                }
            }
        }
    }

    reader.abort();
    if let Err(e) = write.close().await {
        tracing::debug!("Close failed: {}", e);
    }
    tracing::info!("Disconnected");
    Ok(())
}

/// Forward input lines until EOF, Ctrl+C or the receiver going away.
fn read_lines(tx: mpsc::Sender<String>) -> Result<(), ClientError> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
