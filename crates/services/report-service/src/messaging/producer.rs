//! Message producer backed by an AMQP topic exchange.

use amqprs::{
    channel::{BasicPublishArguments, Channel, ExchangeDeclareArguments},
    connection::{Connection, OpenConnectionArguments},
    BasicProperties,
};
use async_trait::async_trait;

use common::{AppError, AppResult, RabbitMqSettings};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const EXCHANGE_TYPE_TOPIC: &str = "topic";
const CONTENT_TYPE_JSON: &str = "application/json";

/// Publishes serialized payloads to an exchange.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MessageProducer: Send + Sync {
    /// Publish `payload` to `exchange_name` with `routing_key`.
    ///
    /// Returns once the broker channel accepted the frame; no retries.
    async fn send_message(
        &self,
        payload: Vec<u8>,
        routing_key: &str,
        exchange_name: &str,
    ) -> AppResult<()>;
}

/// RabbitMQ producer holding one connection and one channel for the
/// lifetime of the service.
#[derive(Clone)]
pub struct AmqpProducer {
    #[allow(unused)]
    connection: Connection,
    channel: Channel,
}

impl AmqpProducer {
    /// Open a connection and channel and declare the configured topic exchange.
    pub async fn connect(settings: &RabbitMqSettings) -> AppResult<Self> {
        let args = OpenConnectionArguments::new(
            &settings.host,
            settings.port,
            &settings.username,
            &settings.password,
        );

        let connection = Connection::open(&args)
            .await
            .map_err(|e| AppError::messaging(format!("Failed to connect to RabbitMQ: {}", e)))?;
        let channel = connection
            .open_channel(None)
            .await
            .map_err(|e| AppError::messaging(format!("Failed to open channel: {}", e)))?;

        let exchange = ExchangeDeclareArguments {
            durable: true,
            ..ExchangeDeclareArguments::new(&settings.exchange_name, EXCHANGE_TYPE_TOPIC)
        };
        channel.exchange_declare(exchange).await.map_err(|e| {
            AppError::messaging(format!(
                "Failed to declare exchange {}: {}",
                settings.exchange_name, e
            ))
        })?;

        tracing::info!(
            host = %settings.host,
            port = settings.port,
            exchange = %settings.exchange_name,
            "RabbitMQ connected"
        );

        Ok(Self {
            connection,
            channel,
        })
    }
}

#[async_trait]
impl MessageProducer for AmqpProducer {
    async fn send_message(
        &self,
        payload: Vec<u8>,
        routing_key: &str,
        exchange_name: &str,
    ) -> AppResult<()> {
        let properties = BasicProperties::default()
            .with_content_type(CONTENT_TYPE_JSON)
            .with_persistence(true)
            .finish();

        self.channel
            .basic_publish(
                properties,
                payload,
                BasicPublishArguments::new(exchange_name, routing_key),
            )
            .await
            .map_err(|e| AppError::messaging(e.to_string()))?;

        tracing::debug!(exchange = %exchange_name, routing_key = %routing_key, "Message published");
        Ok(())
    }
}
