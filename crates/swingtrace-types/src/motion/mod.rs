//! Motion primitives shared by capture and reconstruction.

mod quaternion;
mod reading;
mod vector;

pub use quaternion::Quaternion;
pub use reading::{Attitude, CapturedReading, Euler, SensorReading};
pub use vector::Vec3;
