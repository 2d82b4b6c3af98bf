use honyaku_types::UiMessage;

/// Fire-and-forget delivery of owned messages to the UI thread
pub trait UiSink: Send + Sync {
    fn post(&self, message: UiMessage);
}

impl UiSink for kanal::Sender<UiMessage> {
    fn post(&self, message: UiMessage) {
        match self.try_send(message) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("UI queue full, dropping message"),
            Err(e) => tracing::debug!("UI gone, dropping message: {e}"),
        }
    }
}

impl UiSink for kanal::AsyncSender<UiMessage> {
    fn post(&self, message: UiMessage) {
        self.as_sync().post(message);
    }
}
