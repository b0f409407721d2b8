//! Sensor filtering: sample buffers and the step classifier.
//!
//! The step sensor is a force-sensitive divider on the external ADC
//! input: its voltage *drops* when weight is applied.  The control loop
//! smooths it over [`SENSOR_SAMPLES`] ticks and treats an average below
//! [`STEP_THRESHOLD_VOLTS`] as "stepped on".

pub mod sample_buffer;

pub use sample_buffer::{Sample, SampleBuffer};

/// Window length of the step-sensor filter.
pub const SENSOR_SAMPLES: usize = 20;

/// Window length of the motor speed filter.
pub const SPEED_SAMPLES: usize = 20;

/// Averaged sensor voltage below which the step sensor counts as loaded.
/// Fixed by the divider wiring; the comparison is strict.
pub const STEP_THRESHOLD_VOLTS: f64 = 3.0;

/// Step-sensor voltage history (slow analog signal, double precision).
pub type SensorBuffer = SampleBuffer<f64, SENSOR_SAMPLES>;

/// Motor ERPM history (single precision).
pub type SpeedBuffer = SampleBuffer<f32, SPEED_SAMPLES>;

/// `true` when the averaged step-sensor voltage is strictly below
/// [`STEP_THRESHOLD_VOLTS`].
pub fn is_stepped_on<const N: usize>(sensor: &SampleBuffer<f64, N>) -> bool {
    sensor.average() < STEP_THRESHOLD_VOLTS
}
