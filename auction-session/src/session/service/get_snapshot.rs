use {
    super::Service,
    auction_session_api_types::session::Snapshot,
};

impl Service {
    pub async fn get_snapshot(&self) -> Snapshot {
        self.session.lock().await.snapshot()
    }
}
