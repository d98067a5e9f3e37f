use std::sync::Arc;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogPublisher;
use crate::gateway::sns::publisher::SnsPublisher;

pub(crate) async fn create_publisher(via: &GatewayPublisherVia) -> Arc<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Sns { topic_arn } => {
            let config = aws_config::load_from_env().await;
            let client = aws_sdk_sns::Client::new(&config);
            Arc::new(SnsPublisher::new(client, topic_arn.as_str()))
        }
        GatewayPublisherVia::Logs => {
            Arc::new(LogPublisher::new())
        }
    }
}
