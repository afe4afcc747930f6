//! ZmqPublisher - ZeroMQ PUB socket
//!
//! `publish` is called on driver threads and must never block, so it only
//! pushes into a bounded queue. A single tokio task owns the socket and
//! performs every send, one single-part message per frame.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_channel::{Receiver, Sender, TrySendError};
use bytes::Bytes;
use contracts::{ContractError, FramePublisher, PublishConfig};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};
use zeromq::{PubSocket, Socket, SocketSend, ZmqMessage};

use crate::error::{DispatcherError, Result};
use crate::metrics::PublisherMetrics;

/// Time allowed for the socket task to flush the queue on close
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration for ZmqPublisher
#[derive(Debug, Clone)]
pub struct ZmqPublisherConfig {
    /// Publisher name (logging/metrics)
    pub name: String,
    /// Bind endpoint, `tcp://host:port`
    pub endpoint: String,
    /// Queue capacity; newer messages are dropped when full
    pub queue_capacity: usize,
}

impl From<&PublishConfig> for ZmqPublisherConfig {
    fn from(config: &PublishConfig) -> Self {
        Self {
            name: "zmq".to_string(),
            endpoint: config.endpoint.clone(),
            queue_capacity: config.queue_capacity,
        }
    }
}

/// Publisher bound to a ZeroMQ PUB endpoint
pub struct ZmqPublisher {
    name: String,
    endpoint: String,
    tx: Sender<Bytes>,
    metrics: Arc<PublisherMetrics>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ZmqPublisher {
    /// Bind the endpoint and start the socket task
    ///
    /// Must be called inside a tokio runtime.
    #[instrument(name = "zmq_publisher_bind", skip(config), fields(endpoint = %config.endpoint))]
    pub async fn bind(config: ZmqPublisherConfig) -> Result<Self> {
        if config.queue_capacity == 0 {
            return Err(ContractError::config_validation(
                "publisher.queue_capacity",
                "must be greater than 0",
            )
            .into());
        }

        let requested = normalize_endpoint(&config.endpoint);
        let mut socket = PubSocket::new();
        let bound = socket
            .bind(&requested)
            .await
            .map_err(|e| DispatcherError::bind(&config.endpoint, e.to_string()))?;
        let endpoint = bound.to_string();

        let (tx, rx) = async_channel::bounded(config.queue_capacity);
        let metrics = Arc::new(PublisherMetrics::new());
        let task = tokio::spawn(run_socket(
            socket,
            rx,
            metrics.clone(),
            config.name.clone(),
        ));

        info!(
            publisher = %config.name,
            endpoint = %endpoint,
            queue_capacity = config.queue_capacity,
            "ZmqPublisher bound"
        );

        Ok(Self {
            name: config.name,
            endpoint,
            tx,
            metrics,
            task: Mutex::new(Some(task)),
        })
    }

    /// Endpoint actually bound (port resolved)
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn metrics(&self) -> Arc<PublisherMetrics> {
        self.metrics.clone()
    }

    /// Stop accepting messages, flush the queue and release the endpoint
    ///
    /// Idempotent. Messages published afterwards are dropped.
    #[instrument(name = "zmq_publisher_close", skip(self), fields(publisher = %self.name))]
    pub async fn close(&self) {
        self.tx.close();

        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(mut task) = task else {
            return;
        };

        match tokio::time::timeout(CLOSE_TIMEOUT, &mut task).await {
            Ok(Ok(())) => debug!(publisher = %self.name, "ZmqPublisher closed"),
            Ok(Err(e)) => warn!(publisher = %self.name, error = %e, "socket task failed"),
            Err(_) => {
                warn!(publisher = %self.name, "socket task did not finish, aborting");
                task.abort();
            }
        }
    }
}

impl FramePublisher for ZmqPublisher {
    fn name(&self) -> &str {
        &self.name
    }

    fn publish(&self, message: Bytes) {
        match self.tx.try_send(message) {
            Ok(()) => {
                self.metrics.inc_enqueued_count();
                self.metrics.set_queue_len(self.tx.len());
            }
            Err(TrySendError::Full(message)) => {
                self.metrics.inc_dropped_count();
                observability::record_publish_dropped(&self.name);
                debug!(
                    publisher = %self.name,
                    bytes = message.len(),
                    "queue full, message dropped"
                );
            }
            Err(TrySendError::Closed(_)) => {
                self.metrics.inc_dropped_count();
                observability::record_publish_dropped(&self.name);
                trace!(publisher = %self.name, "publisher closed, message dropped");
            }
        }
    }
}

/// `tcp://*:port` is accepted as the wildcard address
fn normalize_endpoint(endpoint: &str) -> String {
    match endpoint.strip_prefix("tcp://*:") {
        Some(port) => format!("tcp://0.0.0.0:{port}"),
        None => endpoint.to_string(),
    }
}

async fn run_socket(
    mut socket: PubSocket,
    rx: Receiver<Bytes>,
    metrics: Arc<PublisherMetrics>,
    name: String,
) {
    while let Ok(message) = rx.recv().await {
        metrics.set_queue_len(rx.len());
        let bytes = message.len();

        match socket.send(ZmqMessage::from(message)).await {
            Ok(()) => {
                metrics.inc_sent_count();
                trace!(publisher = %name, bytes, "message sent");
            }
            Err(e) => {
                metrics.inc_failure_count();
                warn!(publisher = %name, error = %e, "send failed");
            }
        }
    }

    metrics.set_queue_len(0);
    for e in socket.close().await {
        warn!(publisher = %name, error = %e, "error while closing socket");
    }
    debug!(publisher = %name, "socket task finished");
}
