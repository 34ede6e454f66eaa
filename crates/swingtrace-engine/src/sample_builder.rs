use swingtrace_types::{CapturedReading, MovementId, Sample};

/// Running state that turns raw readings into [`Sample`] records.
///
/// This is an order-dependent fold: readings must arrive in sensor-clock
/// order. Nothing here re-sorts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionSampleBuilder {
    start_timestamp: Option<f64>,
    last_timestamp: Option<f64>,
    next_index: u64,
}

impl MotionSampleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything before a new movement starts recording.
    pub fn reset(&mut self) {
        self.start_timestamp = None;
        self.last_timestamp = None;
        self.next_index = 0;
    }

    pub fn ingest(&mut self, movement_id: MovementId, captured: &CapturedReading) -> Sample {
        let reading = &captured.reading;
        let start = *self.start_timestamp.get_or_insert(reading.timestamp);

        let index = self.next_index;
        self.next_index += 1;
        self.last_timestamp = Some(reading.timestamp);

        Sample {
            movement_id,
            captured_at: captured.captured_at,
            sensor_timestamp: reading.timestamp,
            relative_timestamp: reading.timestamp - start,
            index,
            user_acceleration: reading.user_acceleration,
            rotation_rate: reading.rotation_rate,
            attitude: reading.attitude,
            gravity: reading.gravity,
            magnetic_field: reading.magnetic_field,
        }
    }

    pub fn start_timestamp(&self) -> Option<f64> {
        self.start_timestamp
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    pub fn next_index(&self) -> u64 {
        self.next_index
    }
}

/// Transient sample accumulator for the movement being recorded.
///
/// Always holds a (possibly empty) sequence; [`SampleBuffer::take`] moves the
/// contents out and leaves it empty.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn take(&mut self) -> Vec<Sample> {
        std::mem::take(&mut self.samples)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use swingtrace_types::{SensorReading, Vec3};

    fn captured(ts: f64) -> CapturedReading {
        let mut reading = SensorReading::at(ts);
        reading.user_acceleration = Vec3::new(ts, 0.0, 0.0);
        CapturedReading::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap(), reading)
    }

    fn run(builder: &mut MotionSampleBuilder, id: MovementId, stamps: &[f64]) -> Vec<Sample> {
        stamps.iter().map(|ts| builder.ingest(id, &captured(*ts))).collect()
    }

    #[test]
    fn test_first_sample_is_relative_zero() {
        let mut builder = MotionSampleBuilder::new();
        let id = MovementId::new();
        let samples = run(&mut builder, id, &[12.5, 12.6, 12.75]);

        assert_eq!(samples[0].relative_timestamp, 0.0);
        assert!((samples[2].relative_timestamp - 0.25).abs() < 1e-12);
        assert_eq!(
            samples.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(builder.start_timestamp(), Some(12.5));
        assert_eq!(builder.last_timestamp(), Some(12.75));
        assert_eq!(builder.next_index(), 3);
    }

    #[test]
    fn test_repeated_reset_before_first_ingest_is_idempotent() {
        let id = MovementId::new();
        let stamps = [3.0, 3.1, 3.2, 3.3];

        let mut once = MotionSampleBuilder::new();
        run(&mut once, id, &[1.0, 2.0]);
        once.reset();
        let expected = run(&mut once, id, &stamps);

        let mut many = MotionSampleBuilder::new();
        run(&mut many, id, &[1.0, 2.0]);
        many.reset();
        many.reset();
        many.reset();
        let actual = run(&mut many, id, &stamps);

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_reset_restarts_indices() {
        let mut builder = MotionSampleBuilder::new();
        let id = MovementId::new();
        run(&mut builder, id, &[1.0, 2.0, 3.0]);
        builder.reset();
        assert_eq!(builder, MotionSampleBuilder::default());
        let again = run(&mut builder, id, &[10.0]);
        assert_eq!(again[0].index, 0);
        assert_eq!(again[0].relative_timestamp, 0.0);
    }

    #[test]
    fn test_buffer_take_leaves_empty_sequence() {
        let mut builder = MotionSampleBuilder::new();
        let id = MovementId::new();
        let mut buffer = SampleBuffer::new();
        for sample in run(&mut builder, id, &[0.0, 0.1]) {
            buffer.push(sample);
        }

        let taken = buffer.take();
        assert_eq!(taken.len(), 2);
        assert!(buffer.is_empty());
        assert!(buffer.take().is_empty());
    }
}
