use {
    crate::{
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        session::{
            api::process_command,
            service::Service,
        },
    },
    anyhow::{
        anyhow,
        Result,
    },
    auction_session_api_types::{
        console::{
            ClientMessage,
            ClientRequest,
            ServerResultMessage,
            ServerResultResponse,
            ServerUpdateResponse,
        },
        session::{
            AuctionResult,
            PublicDisplay,
            Snapshot,
        },
    },
    futures::{
        Stream,
        StreamExt,
    },
    serde::Serialize,
    std::{
        io::BufRead,
        sync::atomic::{
            AtomicBool,
            Ordering,
        },
    },
    tokio::{
        io::{
            AsyncWrite,
            AsyncWriteExt,
        },
        sync::{
            broadcast,
            mpsc,
        },
    },
    tokio_stream::wrappers::ReceiverStream,
    tracing::instrument,
};

#[derive(Clone, PartialEq, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum UpdateEvent {
    Snapshot(Snapshot),
    PublicDisplay(PublicDisplay),
    AuctionResult(AuctionResult),
}

const INPUT_CHAN_LEN: usize = 16;

/// Reads stdin on a dedicated thread and forwards its lines.
///
/// A blocking read cannot be cancelled, so it stays off the runtime. The thread
/// is left behind on shutdown and ends with the process.
pub fn stdin_lines() -> ReceiverStream<std::io::Result<String>> {
    let (sender, receiver) = mpsc::channel(INPUT_CHAN_LEN);
    std::thread::spawn(move || {
        for line in BufRead::lines(std::io::stdin().lock()) {
            if sender.blocking_send(line).is_err() {
                break;
            }
        }
    });
    ReceiverStream::new(receiver)
}

/// Console is an actor that serves the operator over a line based channel.
///
/// Every input line is one JSON request. Results and session updates are written
/// back as one JSON document per line.
pub struct Console<L, W> {
    closed:              bool,
    service:             Service,
    notify_receiver:     broadcast::Receiver<UpdateEvent>,
    lines:               L,
    writer:              W,
    exit_flag:           &'static AtomicBool,
    exit_check_interval: tokio::time::Interval,
}

impl<L, W> Console<L, W>
where
    L: Stream<Item = std::io::Result<String>> + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        service: Service,
        notify_receiver: broadcast::Receiver<UpdateEvent>,
        lines: L,
        writer: W,
    ) -> Self {
        Self {
            closed: false,
            service,
            notify_receiver,
            lines,
            writer,
            exit_flag: &SHOULD_EXIT,
            exit_check_interval: tokio::time::interval(EXIT_CHECK_INTERVAL),
        }
    }

    pub async fn run(&mut self) {
        while !self.closed {
            if let Err(e) = self.handle_next().await {
                tracing::debug!(error = ?e, "Error handling console message.");
                break;
            }
        }
    }

    async fn handle_next(&mut self) -> Result<()> {
        tokio::select! {
            maybe_update_event = self.notify_receiver.recv() => {
                match maybe_update_event {
                    Ok(event) => self.handle_update(event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Console is lagging behind session updates");
                        Ok(())
                    }
                    Err(e) => Err(anyhow!("Error receiving update event: {:?}", e)),
                }
            },
            maybe_line = self.lines.next() => {
                match maybe_line {
                    Some(line) => self.handle_line(line?).await,
                    None => {
                        tracing::info!("Console input closed");
                        self.closed = true;
                        Ok(())
                    }
                }
            },
            _ = self.exit_check_interval.tick() => {
                if self.exit_flag.load(Ordering::Acquire) {
                    self.writer.flush().await?;
                    self.closed = true;
                    return Err(anyhow!("Application is shutting down. Closing console."));
                }
                Ok(())
            }
        }
    }

    async fn send<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let mut line = serde_json::to_vec(message)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn handle_update(&mut self, event: UpdateEvent) -> Result<()> {
        let message = match event {
            UpdateEvent::Snapshot(snapshot) => ServerUpdateResponse::Snapshot { snapshot },
            UpdateEvent::PublicDisplay(display) => ServerUpdateResponse::PublicDisplay { display },
            UpdateEvent::AuctionResult(result) => ServerUpdateResponse::AuctionResult { result },
        };
        self.send(&message).await
    }

    #[instrument(
        fields(session_id = %self.service.session_id, name, result = "success"),
        skip_all
    )]
    async fn handle_line(&mut self, line: String) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let response = match serde_json::from_str::<ClientRequest>(&line) {
            Err(e) => {
                tracing::Span::current().record("result", "error");
                ServerResultResponse {
                    id:     None,
                    result: ServerResultMessage::Err(e.to_string()),
                }
            }
            Ok(ClientRequest { id, msg }) => {
                tracing::Span::current().record("name", method_name(&msg));
                let result = match process_command(&self.service, msg).await {
                    Ok(response) => ServerResultMessage::Success(response),
                    Err(e) => {
                        tracing::Span::current().record("result", "error");
                        tracing::debug!(category = ?e.category(), error = %e, "Command rejected");
                        ServerResultMessage::Err(e.to_message())
                    }
                };
                ServerResultResponse {
                    id: Some(id),
                    result,
                }
            }
        };
        self.send(&response).await
    }
}

fn method_name(message: &ClientMessage) -> &'static str {
    match message {
        ClientMessage::AddParticipant { .. } => "add_participant",
        ClientMessage::RemoveParticipant { .. } => "remove_participant",
        ClientMessage::BulkImportParticipants { .. } => "bulk_import_participants",
        ClientMessage::ImportParticipants { .. } => "import_participants",
        ClientMessage::FinalizeSetup { .. } => "finalize_setup",
        ClientMessage::SubmitBid { .. } => "submit_bid",
        ClientMessage::UndoLastBid => "undo_last_bid",
        ClientMessage::StartTimer => "start_timer",
        ClientMessage::PauseTimer => "pause_timer",
        ClientMessage::CloseSession => "close_session",
        ClientMessage::ExportHistory { .. } => "export_history",
        ClientMessage::GetSnapshot => "get_snapshot",
        ClientMessage::GetPublicDisplay => "get_public_display",
    }
}
