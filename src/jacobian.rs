extern crate nalgebra as na;

use na::{Cholesky, Matrix6, Vector3, Vector6};
use tracing::debug;

use crate::kinematic_traits::{JacobianMatrix, Joints, Kinematics, Twist, DOF};
use crate::kinematics_impl::{KinovaGen3, LinkFrames};

/// Below this ratio between the smallest and the largest diagonal entry of the Cholesky factor
/// of J·Jᵀ (condition number above ~1e12) the solve switches to damped least squares.
pub const SINGULARITY_RATIO: f64 = 1e-6;

/// Damping factor λ of the damped least squares solve.
pub const DAMPING: f64 = 1e-3;

/// Struct representing the Jacobian matrix
pub struct Jacobian {
    /// A 6x7 matrix representing the Jacobian
    ///
    /// The Jacobian matrix maps the joint velocities to the end-effector velocities.
    /// Each column corresponds to a joint, and each row corresponds to a degree of freedom
    /// of the end-effector (linear and angular velocities).
    matrix: JacobianMatrix,
}

impl Jacobian {
    /// Constructs a new Jacobian struct by computing the Jacobian matrix for the given robot and
    /// joint configuration
    ///
    /// # Arguments
    ///
    /// * `robot` - The robot model
    /// * `qs` - A reference to the joint configuration
    ///
    /// # Returns
    ///
    /// A new instance of `Jacobian`
    pub fn new(robot: &KinovaGen3, qs: &Joints) -> Self {
        Self { matrix: robot.jacobian(qs) }
    }

    pub fn matrix(&self) -> &JacobianMatrix {
        &self.matrix
    }

    /// Computes the joint velocities required to achieve a desired end-effector velocity
    ///
    /// # Arguments
    ///
    /// * `desired_end_effector_velocity` - A 6D vector representing the desired linear and
    ///   angular velocity of the end-effector
    ///
    /// # Returns
    ///
    /// Joints, with values representing joint velocities rather than angles. This is the
    /// minimum-norm solution; near kinematic singularities it is damped.
    pub fn velocities_from_vector(&self, desired_end_effector_velocity: &Twist) -> Joints {
        let mut velocities = [0.0; DOF];
        solve_velocities(&self.matrix, desired_end_effector_velocity, &mut velocities);
        velocities
    }

    /// Computes the joint torques required to achieve a desired end-effector force/torque
    ///
    /// # Arguments
    ///
    /// * `desired_force_torque` - A 6D vector representing the desired force and torque at the
    ///   end-effector
    ///
    /// # Returns
    ///
    /// Joints, with values representing joint torques.
    pub fn torques_from_vector(&self, desired_force_torque: &Vector6<f64>) -> Joints {
        let joint_torques = self.matrix.transpose() * desired_force_torque;
        std::array::from_fn(|i| joint_torques[i])
    }

    /// Yoshikawa manipulability measure √det(J·Jᵀ). Drops to zero at kinematic singularities.
    pub fn manipulability(&self) -> f64 {
        let jjt: Matrix6<f64> = self.matrix * self.matrix.transpose();
        jjt.determinant().max(0.0).sqrt()
    }
}

/// Fills the geometric Jacobian from the link frames. All joints are revolute: the angular
/// column is the joint axis, the linear column is the axis crossed with the lever arm from the
/// joint origin to the end-effector.
pub(crate) fn fill_jacobian(frames: &LinkFrames, end_effector: &Vector3<f64>,
                            jacobian: &mut JacobianMatrix) {
    for i in 0..DOF {
        let axis = frames.axis(i);
        let linear = axis.cross(&(end_effector - frames.origins[i]));
        jacobian.fixed_view_mut::<3, 1>(0, i).copy_from(&linear);
        jacobian.fixed_view_mut::<3, 1>(3, i).copy_from(&axis);
    }
}

/// Minimum-norm solution qd = Jᵀ (J Jᵀ)⁻¹ xd of the redundant system J qd = xd.
///
/// J Jᵀ is a 6x6 symmetric matrix, so a Cholesky factorisation on the stack is enough and no
/// general pseudo-inverse is needed. If the factorisation fails or is badly conditioned, the
/// damped least squares solution Jᵀ (J Jᵀ + λ² I)⁻¹ xd is returned instead.
pub(crate) fn solve_velocities(jacobian: &JacobianMatrix, twist: &Twist, velocities: &mut Joints) {
    let jjt: Matrix6<f64> = jacobian * jacobian.transpose();

    let weights = match Cholesky::new(jjt) {
        Some(cholesky) if well_conditioned(&cholesky) => cholesky.solve(twist),
        _ => {
            debug!("J·Jᵀ is singular or ill-conditioned, using damped least squares");
            match Cholesky::new(jjt + Matrix6::identity() * (DAMPING * DAMPING)) {
                Some(cholesky) => cholesky.solve(twist),
                None => {
                    debug!("Damped J·Jᵀ is not positive definite, non-finite input?");
                    Vector6::repeat(f64::NAN)
                }
            }
        }
    };

    let solution = jacobian.transpose() * weights;
    for i in 0..DOF {
        velocities[i] = solution[i];
    }
}

fn well_conditioned(cholesky: &Cholesky<f64, na::U6>) -> bool {
    let diagonal = cholesky.l_dirty().diagonal();
    let min = diagonal.min();
    let max = diagonal.max();
    max > 0.0 && min / max >= SINGULARITY_RATIO
}
