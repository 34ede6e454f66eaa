mod ids;
mod sample;
mod session;
mod tags;

pub use ids::{MovementId, SessionId};
pub use sample::Sample;
pub use session::{Movement, OrderingViolation, Session};
pub use tags::{Hand, MovementType};
