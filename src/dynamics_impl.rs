//! Joint-space dynamics M(q) qdd + C(q, qd) qd + G(q) = τ of the robot model.

use nalgebra::{Cholesky, SVector, Vector3};
use tracing::debug;

use crate::gravity::{gravity_torques, potential_energy};
use crate::kinematic_traits::{Dynamics, Joints, MassMatrix, DOF};
use crate::kinematics_impl::{KinovaGen3, LinkFrames};
use crate::mass_matrix::assemble_mass_matrix;
use crate::model_error::ModelError;
use crate::newton_euler::recursive_newton_euler;
use crate::utils::{joints_to_vector7, vector7_to_joints};

impl Dynamics for KinovaGen3 {
    fn mass_matrix(&self, qs: &Joints) -> MassMatrix {
        let mut mass_matrix = MassMatrix::zeros();
        self.mass_matrix_into(qs, &mut mass_matrix);
        mass_matrix
    }

    fn mass_matrix_into(&self, qs: &Joints, mass_matrix: &mut MassMatrix) {
        let frames = LinkFrames::compute(self.parameters(), qs);
        assemble_mass_matrix(self.parameters(), &frames, mass_matrix);
    }

    fn coriolis(&self, qs: &Joints, velocities: &Joints) -> Joints {
        let mut torques = [0.0; DOF];
        self.coriolis_into(qs, velocities, &mut torques);
        torques
    }

    fn coriolis_into(&self, qs: &Joints, velocities: &Joints, torques: &mut Joints) {
        let frames = LinkFrames::compute(self.parameters(), qs);
        let mut result = SVector::<f64, 7>::zeros();
        recursive_newton_euler(self.parameters(), &frames, &joints_to_vector7(velocities),
                               &SVector::zeros(), &Vector3::zeros(), &mut result);
        *torques = vector7_to_joints(&result);
    }

    fn gravity(&self, qs: &Joints) -> Joints {
        let mut torques = [0.0; DOF];
        self.gravity_into(qs, &mut torques);
        torques
    }

    fn gravity_into(&self, qs: &Joints, torques: &mut Joints) {
        let frames = LinkFrames::compute(self.parameters(), qs);
        gravity_torques(self.parameters(), &frames, torques);
    }

    fn inverse_dynamics(&self, qs: &Joints, velocities: &Joints, accelerations: &Joints) -> Joints {
        let mut torques = [0.0; DOF];
        self.inverse_dynamics_into(qs, velocities, accelerations, &mut torques);
        torques
    }

    fn inverse_dynamics_into(&self, qs: &Joints, velocities: &Joints, accelerations: &Joints,
                             torques: &mut Joints) {
        let parameters = self.parameters();
        let frames = LinkFrames::compute(parameters, qs);
        let mut result = SVector::<f64, 7>::zeros();
        recursive_newton_euler(parameters, &frames, &joints_to_vector7(velocities),
                               &joints_to_vector7(accelerations), &-parameters.gravity(),
                               &mut result);
        *torques = vector7_to_joints(&result);
    }

    fn forward_dynamics(&self, qs: &Joints, velocities: &Joints, torques: &Joints)
                        -> Result<Joints, ModelError> {
        let parameters = self.parameters();
        let frames = LinkFrames::compute(parameters, qs);

        // Bias torques C(q, qd) qd + G(q): inverse dynamics at zero acceleration.
        let mut bias = SVector::<f64, 7>::zeros();
        recursive_newton_euler(parameters, &frames, &joints_to_vector7(velocities),
                               &SVector::zeros(), &-parameters.gravity(), &mut bias);

        let mut mass_matrix = MassMatrix::zeros();
        assemble_mass_matrix(parameters, &frames, &mut mass_matrix);

        let cholesky = Cholesky::new(mass_matrix).ok_or_else(|| {
            debug!("Mass matrix factorisation failed at {:?}", qs);
            ModelError::SingularMassMatrix
        })?;
        let accelerations = cholesky.solve(&(joints_to_vector7(torques) - bias));
        Ok(vector7_to_joints(&accelerations))
    }

    fn kinetic_energy(&self, qs: &Joints, velocities: &Joints) -> f64 {
        let qd = joints_to_vector7(velocities);
        0.5 * qd.dot(&(self.mass_matrix(qs) * qd))
    }

    fn potential_energy(&self, qs: &Joints) -> f64 {
        let frames = LinkFrames::compute(self.parameters(), qs);
        potential_energy(self.parameters(), &frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematic_traits::JOINTS_AT_ZERO;

    #[test]
    fn test_forward_inverse_dynamics_agree() {
        let robot = KinovaGen3::new();
        let qs = [0.3, 0.9, -0.5, 1.4, 0.2, -0.8, 0.6];
        let velocities = [0.5, -0.3, 0.8, 0.1, -1.0, 0.4, 1.5];
        let accelerations = [1.0, -2.0, 0.5, 0.3, -0.7, 2.0, -1.0];

        let torques = robot.inverse_dynamics(&qs, &velocities, &accelerations);
        let recovered = robot.forward_dynamics(&qs, &velocities, &torques).unwrap();
        for i in 0..DOF {
            assert!((recovered[i] - accelerations[i]).abs() < 1e-8, "joint {}", i + 1);
        }
    }

    #[test]
    fn test_inverse_dynamics_is_sum_of_terms() {
        let robot = KinovaGen3::new();
        let qs = [-0.6, 0.4, 1.1, -1.3, 0.9, 0.2, -0.4];
        let velocities = [0.2, 0.7, -0.4, 0.9, 0.3, -0.5, 0.1];
        let accelerations = [0.4, 0.1, -0.9, 0.6, -0.2, 0.8, 0.3];

        let torques = joints_to_vector7(&robot.inverse_dynamics(&qs, &velocities, &accelerations));
        let expected = robot.mass_matrix(&qs) * joints_to_vector7(&accelerations)
            + joints_to_vector7(&robot.coriolis(&qs, &velocities))
            + joints_to_vector7(&robot.gravity(&qs));
        assert!((torques - expected).norm() < 1e-12);
    }

    #[test]
    fn test_free_fall_straight_up() {
        // Holding torques applied: the arm does not accelerate.
        let robot = KinovaGen3::new();
        let holding = robot.gravity(&JOINTS_AT_ZERO);
        let accelerations = robot.forward_dynamics(&JOINTS_AT_ZERO, &[0.0; 7], &holding).unwrap();
        assert!(accelerations.iter().all(|a| a.abs() < 1e-9));
    }

    #[test]
    fn test_forward_dynamics_rejects_nan() {
        let robot = KinovaGen3::new();
        let mut qs = JOINTS_AT_ZERO;
        qs[1] = f64::NAN;
        let result = robot.forward_dynamics(&qs, &[0.0; 7], &[0.0; 7]);
        assert_eq!(result, Err(ModelError::SingularMassMatrix));
    }

    #[test]
    fn test_kinetic_energy_of_single_joint() {
        // Only joint 7 turning: ½ M77 qd7².
        let robot = KinovaGen3::new();
        let qs = [0.1, 0.5, 0.2, 1.0, -0.3, 0.4, 0.0];
        let velocities = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0];
        let expected = 0.5 * robot.mass_matrix(&qs)[(6, 6)] * 4.0;
        assert!((robot.kinetic_energy(&qs, &velocities) - expected).abs() < 1e-15);
    }
}
