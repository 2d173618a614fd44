use {
    super::entities::{
        Session,
        SessionId,
    },
    crate::{
        api::console::UpdateEvent,
        config::LotPreset,
        kernel::tabular::TabularStore,
    },
    auction_session_api_types::session as api,
    std::sync::Arc,
    tokio::sync::{
        broadcast,
        Mutex,
    },
};

pub mod add_participant;
pub mod bulk_import_participants;
pub mod close_session;
pub mod export_history;
pub mod finalize_setup;
pub mod get_public_display;
pub mod get_snapshot;
pub mod import_participants;
pub mod pause_timer;
pub mod remove_participant;
pub mod start_timer;
pub mod submit_bid;
pub mod tick_timer;
pub mod undo_last_bid;
pub mod workers;

pub struct Config {
    pub round_duration_secs: u32,
    /// Auctioneers allowed to run the session. Any name is accepted when empty.
    pub auctioneers:         Vec<String>,
    pub lot_preset:          Option<LotPreset>,
}

pub struct ServiceInner {
    pub session_id: SessionId,
    config:         Config,
    session:        Mutex<Session>,
    tabular:        Box<dyn TabularStore>,
    event_sender:   broadcast::Sender<UpdateEvent>,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        config: Config,
        tabular: impl TabularStore,
        event_sender: broadcast::Sender<UpdateEvent>,
    ) -> Self {
        let session = Session::new(config.round_duration_secs);
        tracing::info!(session_id = %session.id, "Created auction session");
        Self(Arc::new(ServiceInner {
            session_id: session.id,
            config,
            session: Mutex::new(session),
            tabular: Box::new(tabular),
            event_sender,
        }))
    }

    fn send_event(&self, event: UpdateEvent) {
        if let Err(e) = self.event_sender.send(event) {
            tracing::error!(error = e.to_string(), "Failed to send update event");
        }
    }

    /// Broadcasts both views of the session and returns the operator snapshot.
    fn publish(&self, session: &Session) -> api::Snapshot {
        let snapshot = session.snapshot();
        self.send_event(UpdateEvent::Snapshot(snapshot.clone()));
        self.send_event(UpdateEvent::PublicDisplay(session.public_display()));
        snapshot
    }
}
