pub mod events;
pub mod factory;
pub mod logs;
pub mod sns;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GatewayPublisherVia {
    Sns { topic_arn: String },
    Logs,
}

impl GatewayPublisherVia {
    pub fn from_topic(topic_arn: Option<String>) -> Self {
        match topic_arn {
            Some(topic_arn) => GatewayPublisherVia::Sns { topic_arn },
            None => GatewayPublisherVia::Logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_create_publisher_via() {
        assert_eq!(GatewayPublisherVia::Logs, GatewayPublisherVia::from_topic(None));
        assert_eq!(GatewayPublisherVia::Sns { topic_arn: "arn".to_string() },
                   GatewayPublisherVia::from_topic(Some("arn".to_string())));
    }
}
