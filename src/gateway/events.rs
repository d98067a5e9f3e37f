use async_trait::async_trait;
use tracing::warn;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;

#[async_trait]
pub(crate) trait EventPublisher: Sync + Send {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError>;
}

// publishes after commit; a failure is logged and never reaches the caller
pub(crate) async fn publish_quietly(publisher: &dyn EventPublisher, event: serde_json::Result<DomainEvent>) {
    match event {
        Ok(event) => {
            if let Err(err) = publisher.publish(&event).await {
                warn!("failed to publish {} for {}: {}", event.name, event.key, err);
            }
        }
        Err(err) => {
            warn!("failed to build domain event: {}", err);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;
    use async_trait::async_trait;
    use crate::core::events::DomainEvent;
    use crate::core::library::LibraryError;
    use crate::gateway::events::EventPublisher;

    // RecordingPublisher keeps the names of published events
    #[derive(Debug, Default)]
    pub(crate) struct RecordingPublisher {
        names: Mutex<Vec<String>>,
    }

    impl RecordingPublisher {
        pub(crate) fn names(&self) -> Vec<String> {
            self.names.lock().map(|names| names.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
            if let Ok(mut names) = self.names.lock() {
                names.push(event.name.to_string());
            }
            Ok(())
        }
    }
}
