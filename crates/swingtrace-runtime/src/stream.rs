use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use swingtrace_types::{CapturedReading, SensorReading};

use crate::{Error, Result};

/// Something that can be asked for a live feed of readings.
///
/// `open` is the only place a sensor may fail. A feed that has been handed
/// out only ever yields complete readings.
pub trait SensorSource: Send {
    fn open(&mut self) -> Result<Box<dyn SensorFeed>>;
}

/// A live feed. Returning `None` ends it.
pub trait SensorFeed: Send {
    fn next_reading(&mut self) -> Option<SensorReading>;
}

/// One reading as handed to the consumer, tagged with the stream instance
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDelivery {
    pub generation: u64,
    pub reading: CapturedReading,
}

pub type DeliverySink = Arc<dyn Fn(StreamDelivery) + Send + Sync>;

struct Worker {
    generation: u64,
    stop: Arc<AtomicBool>,
}

/// Paced, serial reading delivery.
///
/// Every `start` spawns one worker thread that owns the feed, stamps each
/// reading with the wall clock, and calls the sink. Nothing else calls the
/// sink for that worker, so deliveries from one generation never overlap.
/// `stop` only raises the worker's flag: a reading the worker has already
/// pulled may still be delivered after `stop` returns, which is why every
/// delivery carries its generation.
pub struct SampleStream {
    source: Box<dyn SensorSource>,
    interval: Duration,
    generation: u64,
    worker: Option<Worker>,
}

impl SampleStream {
    pub fn new(source: Box<dyn SensorSource>, rate_hz: f64) -> Self {
        // Rates too small for a `Duration` fall back to 60 Hz as well.
        let interval = Some(rate_hz)
            .filter(|r| r.is_finite() && *r > 0.0)
            .and_then(|r| Duration::try_from_secs_f64(1.0 / r).ok())
            .unwrap_or_else(|| Duration::from_secs_f64(1.0 / 60.0));
        Self {
            source,
            interval,
            generation: 0,
            worker: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Generation of the most recently started worker (0 before any start).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Open the sensor and begin delivering. Returns the new generation.
    ///
    /// A running worker is stopped first.
    pub fn start(&mut self, sink: DeliverySink) -> Result<u64> {
        self.stop();

        let mut feed = self.source.open()?;
        let generation = self.generation + 1;
        let stop = Arc::new(AtomicBool::new(false));
        let interval = self.interval;

        let worker_stop = Arc::clone(&stop);
        std::thread::Builder::new()
            .name(format!("swingtrace-stream-{}", generation))
            .spawn(move || {
                let mut next_tick = Instant::now();
                while !worker_stop.load(Ordering::Acquire) {
                    let Some(reading) = feed.next_reading() else {
                        tracing::debug!(generation, "sensor feed ended");
                        break;
                    };
                    sink(StreamDelivery {
                        generation,
                        reading: CapturedReading::new(Utc::now(), reading),
                    });

                    next_tick += interval;
                    let now = Instant::now();
                    if next_tick > now {
                        std::thread::sleep(next_tick - now);
                    } else {
                        next_tick = now;
                    }
                }
            })
            .map_err(|e| Error::SensorUnavailable(format!("failed to spawn stream worker: {}", e)))?;

        self.generation = generation;
        self.worker = Some(Worker { generation, stop });
        tracing::debug!(generation, interval_ms = interval.as_secs_f64() * 1000.0, "sample stream started");
        Ok(generation)
    }

    /// Stop future deliveries. Never blocks.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::Release);
            tracing::debug!(generation = worker.generation, "sample stream stopped");
        }
    }
}

impl Drop for SampleStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    struct Counting {
        remaining: usize,
        ts: f64,
    }

    impl SensorFeed for Counting {
        fn next_reading(&mut self) -> Option<SensorReading> {
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            self.ts += 0.001;
            Some(SensorReading::at(self.ts))
        }
    }

    struct CountingSource(usize);

    impl SensorSource for CountingSource {
        fn open(&mut self) -> Result<Box<dyn SensorFeed>> {
            Ok(Box::new(Counting {
                remaining: self.0,
                ts: 0.0,
            }))
        }
    }

    struct Broken;

    impl SensorSource for Broken {
        fn open(&mut self) -> Result<Box<dyn SensorFeed>> {
            Err(Error::SensorUnavailable("no motion hardware".to_string()))
        }
    }

    #[test]
    fn test_delivers_in_order_with_generation() {
        let (tx, rx) = channel();
        let mut stream = SampleStream::new(Box::new(CountingSource(5)), 1000.0);
        let generation = stream
            .start(Arc::new(move |d| {
                let _ = tx.send(d);
            }))
            .unwrap();
        assert_eq!(generation, 1);

        let deliveries: Vec<StreamDelivery> = rx.iter().take(5).collect();
        assert!(deliveries.iter().all(|d| d.generation == 1));
        let stamps: Vec<f64> = deliveries.iter().map(|d| d.reading.reading.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_unusable_rate_falls_back_to_default_interval() {
        let default = Duration::from_secs_f64(1.0 / 60.0);
        for rate in [0.0, -5.0, f64::NAN, 1e-300] {
            let stream = SampleStream::new(Box::new(Broken), rate);
            assert_eq!(stream.interval(), default, "rate {}", rate);
        }
        let stream = SampleStream::new(Box::new(Broken), 100.0);
        assert_eq!(stream.interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_unavailable_sensor_delivers_nothing() {
        let (tx, rx) = channel();
        let mut stream = SampleStream::new(Box::new(Broken), 60.0);
        let result = stream.start(Arc::new(move |d| {
            let _ = tx.send(d);
        }));

        assert!(matches!(result, Err(Error::SensorUnavailable(_))));
        assert!(!stream.is_running());
        assert_eq!(stream.generation(), 0);
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_restart_bumps_generation() {
        let mut stream = SampleStream::new(Box::new(CountingSource(0)), 60.0);
        let sink: DeliverySink = Arc::new(|_| {});
        assert_eq!(stream.start(Arc::clone(&sink)).unwrap(), 1);
        stream.stop();
        assert!(!stream.is_running());
        assert_eq!(stream.start(sink).unwrap(), 2);
    }

    #[test]
    fn test_non_positive_rate_falls_back_to_60hz() {
        let stream = SampleStream::new(Box::new(CountingSource(0)), 0.0);
        assert_eq!(stream.interval(), Duration::from_secs_f64(1.0 / 60.0));
    }
}
