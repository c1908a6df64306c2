//! Messaging layer - RabbitMQ publishing.

mod producer;

pub use producer::{AmqpProducer, MessageProducer};

#[cfg(any(test, feature = "test-utils"))]
pub use producer::MockMessageProducer;
