use crate::grid::TickReport;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const RATE_WINDOW: Duration = Duration::from_secs(1);
const MAX_SAMPLES: usize = 256;

/// Snapshot of animation throughput
#[derive(Debug, Clone)]
pub struct TickMetrics {
    pub total_ticks: u64,
    pub falls_started: u64,
    pub falls_landed: u64,
    /// Squares in flight after the most recent tick
    pub falling_now: usize,
    pub avg_tick_time: Duration,
    pub peak_tick_time: Duration,
    /// Ticks observed during the last second
    pub ticks_per_second: f64,
}

impl Default for TickMetrics {
    fn default() -> Self {
        Self {
            total_ticks: 0,
            falls_started: 0,
            falls_landed: 0,
            falling_now: 0,
            avg_tick_time: Duration::from_nanos(0),
            peak_tick_time: Duration::from_nanos(0),
            ticks_per_second: 0.0,
        }
    }
}

/// Tracks tick timing and fall counts for the status header
pub struct PerformanceMonitor {
    metrics: TickMetrics,
    tick_times: VecDeque<Instant>,
    processing_times: VecDeque<Duration>,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            metrics: TickMetrics::default(),
            tick_times: VecDeque::with_capacity(MAX_SAMPLES),
            processing_times: VecDeque::with_capacity(MAX_SAMPLES),
        }
    }

    /// Record one update pass that took `processing_time`
    pub fn record_tick(&mut self, report: TickReport, processing_time: Duration) {
        self.record_tick_at(report, processing_time, Instant::now());
    }

    pub fn record_tick_at(&mut self, report: TickReport, processing_time: Duration, now: Instant) {
        let m = &mut self.metrics;
        m.total_ticks += 1;
        m.falls_started += report.started as u64;
        m.falls_landed += report.landed as u64;
        m.falling_now = report.falling;
        if processing_time > m.peak_tick_time {
            m.peak_tick_time = processing_time;
        }

        self.tick_times.push_back(now);
        while let Some(&front) = self.tick_times.front() {
            if now.saturating_duration_since(front) > RATE_WINDOW || self.tick_times.len() > MAX_SAMPLES {
                self.tick_times.pop_front();
            } else {
                break;
            }
        }
        m.ticks_per_second = self.tick_times.len() as f64;

        self.processing_times.push_back(processing_time);
        if self.processing_times.len() > MAX_SAMPLES {
            self.processing_times.pop_front();
        }
        let total: Duration = self.processing_times.iter().sum();
        m.avg_tick_time = total / self.processing_times.len() as u32;
    }

    /// Forget in-flight counts after the grid was rebuilt
    pub fn grid_reset(&mut self) {
        self.metrics.falling_now = 0;
    }

    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }

    /// One-line summary for the header
    pub fn summary(&self) -> String {
        let m = &self.metrics;
        format!(
            "{:.0} tps | falling {} | landed {} | avg {:.2?}",
            m.ticks_per_second, m.falling_now, m.falls_landed, m.avg_tick_time
        )
    }
}
