//! Shared types and the traits implemented by the robot model.
//!
//! Every operation comes in two forms: a value-returning one and an `_into` one that writes
//! into caller-owned buffers. The value-returning form always delegates to the `_into` form,
//! so both produce identical numbers. The `_into` forms never allocate and can be called from
//! a time-critical control loop.

extern crate nalgebra as na;

use na::{Isometry3, Matrix3, SMatrix, Vector3, Vector6};

use crate::model_error::ModelError;

/// Number of joints of the arm.
pub const DOF: usize = 7;

/// Joint values in radians (or rad/s, rad/s², N·m, depending on context), joint 1 first.
pub type Joints = [f64; 7];

/// Pose of the robot flange or of any link frame, in the base frame.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(0.33, -0.39, 0.44);
/// let rotation = UnitQuaternion::identity();
/// let pose = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// End-effector twist: linear velocity (m/s) in the first three entries, angular velocity
/// (rad/s) in the last three.
pub type Twist = Vector6<f64>;

/// Geometric Jacobian, rows 0..3 linear, rows 3..6 angular, one column per joint.
pub type JacobianMatrix = SMatrix<f64, 6, 7>;

/// Joint-space inertia matrix.
pub type MassMatrix = SMatrix<f64, 7, 7>;

/// All joints at zero, the arm standing straight up.
pub const JOINTS_AT_ZERO: Joints = [0.0; 7];

pub trait Kinematics {
    /// End-effector position (m) and orientation matrix for the joint configuration.
    fn forward_kinematics(&self, qs: &Joints) -> (Vector3<f64>, Matrix3<f64>);

    /// Same as [`Kinematics::forward_kinematics`], writing into caller-owned buffers.
    fn forward_kinematics_into(&self, qs: &Joints, position: &mut Vector3<f64>,
                               orientation: &mut Matrix3<f64>);

    /// End-effector pose as an isometry.
    fn forward(&self, qs: &Joints) -> Pose;

    /// Poses of the seven joint frames followed by the end-effector frame.
    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 8];

    /// Geometric Jacobian at the joint configuration.
    fn jacobian(&self, qs: &Joints) -> JacobianMatrix;

    fn jacobian_into(&self, qs: &Joints, jacobian: &mut JacobianMatrix);

    /// Minimum-norm joint velocities reproducing the end-effector twist.
    fn inverse_kinematics(&self, qs: &Joints, twist: &Twist) -> Joints;

    /// Same as [`Kinematics::inverse_kinematics`]. The `jacobian` buffer receives the Jacobian
    /// used for the solve.
    fn inverse_kinematics_into(&self, qs: &Joints, twist: &Twist, velocities: &mut Joints,
                               jacobian: &mut JacobianMatrix);
}

pub trait Dynamics {
    /// Joint-space inertia matrix M(q), symmetric and positive definite.
    fn mass_matrix(&self, qs: &Joints) -> MassMatrix;

    fn mass_matrix_into(&self, qs: &Joints, mass_matrix: &mut MassMatrix);

    /// Coriolis and centrifugal torques C(q, qd) qd.
    fn coriolis(&self, qs: &Joints, velocities: &Joints) -> Joints;

    fn coriolis_into(&self, qs: &Joints, velocities: &Joints, torques: &mut Joints);

    /// Torques holding the arm static against gravity.
    fn gravity(&self, qs: &Joints) -> Joints;

    fn gravity_into(&self, qs: &Joints, torques: &mut Joints);

    /// Joint torques M(q) qdd + C(q, qd) qd + G(q) producing the given motion.
    fn inverse_dynamics(&self, qs: &Joints, velocities: &Joints, accelerations: &Joints) -> Joints;

    fn inverse_dynamics_into(&self, qs: &Joints, velocities: &Joints, accelerations: &Joints,
                             torques: &mut Joints);

    /// Joint accelerations resulting from the applied joint torques.
    fn forward_dynamics(&self, qs: &Joints, velocities: &Joints, torques: &Joints)
                        -> Result<Joints, ModelError>;

    /// Kinetic energy ½ qdᵀ M(q) qd in joules.
    fn kinetic_energy(&self, qs: &Joints, velocities: &Joints) -> f64;

    /// Gravitational potential energy of all links relative to the base origin, in joules.
    fn potential_energy(&self, qs: &Joints) -> f64;
}
