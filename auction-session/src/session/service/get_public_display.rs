use {
    super::Service,
    auction_session_api_types::session::PublicDisplay,
};

impl Service {
    pub async fn get_public_display(&self) -> PublicDisplay {
        self.session.lock().await.public_display()
    }
}
