//! Double pendulum dynamics
//!
//! - [`AccelerationModel`]: angular accelerations from the equations of motion
//! - [`Kinematics`]: bob positions from joint angles
//! - [`total_energy`]: mechanical energy, used as a run diagnostic

mod acceleration;
mod energy;
mod kinematics;

pub use acceleration::AccelerationModel;
pub use energy::total_energy;
pub use kinematics::Kinematics;
