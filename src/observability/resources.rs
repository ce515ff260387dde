//! Periodic host resource gauges.
//!
//! # Metrics
//! - `gateway_system_cpu_usage_percent` (gauge): global CPU usage, 0-100
//! - `gateway_system_memory_usage_bytes` (gauge): used system memory
//!
//! Sampled on a fixed interval by [`ResourceMonitor::run`] while metrics are
//! enabled.

use std::time::Duration;

use sysinfo::System;
use tokio::sync::broadcast;
use tokio::time;

/// One CPU/memory reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    pub cpu_percent: f64,
    pub memory_used_bytes: u64,
}

/// Samples host CPU and memory and publishes them as gauges.
pub struct ResourceMonitor {
    system: System,
    interval: Duration,
}

impl ResourceMonitor {
    pub fn new(interval: Duration) -> Self {
        Self {
            system: System::new(),
            interval,
        }
    }

    /// Refresh and read current usage.
    ///
    /// CPU usage is measured between consecutive calls, so the first sample
    /// reads 0.
    pub fn sample(&mut self) -> ResourceSample {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();
        ResourceSample {
            cpu_percent: f64::from(self.system.global_cpu_usage()),
            memory_used_bytes: self.system.used_memory(),
        }
    }

    /// Publish gauges every interval until `shutdown` fires.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Resource monitor starting");

        let mut ticker = time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    record(self.sample());
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Resource monitor exiting");
                    break;
                }
            }
        }
    }
}

fn record(sample: ResourceSample) {
    ::metrics::gauge!("gateway_system_cpu_usage_percent").set(sample.cpu_percent);
    ::metrics::gauge!("gateway_system_memory_usage_bytes").set(sample.memory_used_bytes as f64);
}
