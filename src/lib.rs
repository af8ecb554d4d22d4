//! Rust implementation of the analytical kinematic and dynamic model of the Kinova Gen3
//! seven axis robot.
//!
//! The mechanical properties of the robot (link lengths, masses, centers of mass and inertia
//! tensors) come from the manufacturer's description of the arm with spherical wrist. The
//! reference frame of every link follows the manual: each joint rotates about the z axis of
//! its own frame.
//!
//! # Features
//!
//! - Forward kinematics: end-effector position and orientation, and the poses of all joint
//!   frames.
//! - Geometric Jacobian and velocity-level inverse kinematics (minimum-norm solution of the
//!   redundant 6x7 system, damped near kinematic singularities).
//! - Mass matrix, Coriolis/centrifugal torques and gravity torques for model-based control,
//!   plus full inverse and forward dynamics and kinetic/potential energy.
//! - Every computation has an `_into` variant writing into caller-owned buffers. These do not
//!   allocate and are safe for a real-time loop. The value-returning variants call them.
//! - The parameter table is a compile-time constant, so the model can be used concurrently
//!   from any number of threads without synchronization.
//!
//! ```
//! use rs_gen3_dynamics::kinematic_traits::{Dynamics, Kinematics};
//! use rs_gen3_dynamics::kinematics_impl::KinovaGen3;
//! use std::f64::consts::PI;
//!
//! let robot = KinovaGen3::new();
//! let qs = [0.0, PI / 6.0, PI / 3.0, PI / 2.0, 0.0, PI / 4.0, 0.0];
//! let (position, orientation) = robot.forward_kinematics(&qs);
//! assert!((position.x - 0.32874611223407973).abs() < 1e-12);
//! assert!((orientation[(0, 1)] - 0.75).abs() < 1e-12);
//!
//! let gravity = robot.gravity(&qs);
//! assert!((gravity[1] + 10.576350989174017).abs() < 1e-9);
//! ```

pub mod parameters;
pub mod parameters_robots;

pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;
pub mod model_error;

pub mod jacobian;

pub mod dynamics_impl;
mod gravity;
mod mass_matrix;
mod newton_euler;
