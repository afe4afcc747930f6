//! Bridge metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Device event bridge counters
#[derive(Debug, Default)]
pub struct BridgeMetrics {
    /// Point-cloud events received (including null packets)
    pub packets_received: AtomicU64,

    /// Null packets ignored
    pub null_packets: AtomicU64,

    /// Packets dropped for unconfigured or mismatched encoding
    pub encoding_mismatches: AtomicU64,

    /// Packets dropped because the payload was shorter than declared
    pub truncated_packets: AtomicU64,

    /// Frames handed to the publisher
    pub frames_published: AtomicU64,

    /// Points handed to the publisher
    pub points_published: AtomicU64,

    /// Device info events handled
    pub device_infos: AtomicU64,
}

impl BridgeMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self) {
        self.packets_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_null_packet(&self) {
        self.null_packets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_encoding_mismatch(&self) {
        self.encoding_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_truncated(&self) {
        self.truncated_packets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_published(&self, points: usize) {
        self.frames_published.fetch_add(1, Ordering::Relaxed);
        self.points_published
            .fetch_add(points as u64, Ordering::Relaxed);
    }

    pub fn record_device_info(&self) {
        self.device_infos.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> BridgeMetricsSnapshot {
        BridgeMetricsSnapshot {
            packets_received: self.packets_received.load(Ordering::Relaxed),
            null_packets: self.null_packets.load(Ordering::Relaxed),
            encoding_mismatches: self.encoding_mismatches.load(Ordering::Relaxed),
            truncated_packets: self.truncated_packets.load(Ordering::Relaxed),
            frames_published: self.frames_published.load(Ordering::Relaxed),
            points_published: self.points_published.load(Ordering::Relaxed),
            device_infos: self.device_infos.load(Ordering::Relaxed),
        }
    }
}

/// Bridge metrics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeMetricsSnapshot {
    pub packets_received: u64,
    pub null_packets: u64,
    pub encoding_mismatches: u64,
    pub truncated_packets: u64,
    pub frames_published: u64,
    pub points_published: u64,
    pub device_infos: u64,
}

impl BridgeMetricsSnapshot {
    /// Packets that never reached the publisher (null packets excluded)
    pub fn dropped(&self) -> u64 {
        self.encoding_mismatches + self.truncated_packets
    }
}
