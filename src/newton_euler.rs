//! Recursive Newton–Euler inverse dynamics.
//!
//! All quantities are kept in base-frame coordinates, which lets the pass reuse [`LinkFrames`]
//! as is. The forward sweep propagates angular velocity, angular acceleration and the linear
//! acceleration of every joint origin, and computes the net force and moment each link needs.
//! The backward sweep accumulates these from the tip and projects the moments on the joint axes.
//!
//! Gravity enters as an upward acceleration of the base, so passing zero velocities and
//! accelerations yields G(q), and passing zero acceleration without gravity yields C(q, qd) qd.

use nalgebra::{SVector, Vector3};

use crate::kinematic_traits::DOF;
use crate::kinematics_impl::LinkFrames;
use crate::parameters::Parameters;

pub(crate) fn recursive_newton_euler(
    parameters: &Parameters,
    frames: &LinkFrames,
    velocities: &SVector<f64, 7>,
    accelerations: &SVector<f64, 7>,
    base_acceleration: &Vector3<f64>,
    torques: &mut SVector<f64, 7>,
) {
    let mut forces = [Vector3::zeros(); DOF];
    let mut moments = [Vector3::zeros(); DOF];
    let mut lever_arms = [Vector3::zeros(); DOF];

    let mut omega = Vector3::zeros();
    let mut omega_dot = Vector3::zeros();
    let mut acceleration = *base_acceleration;
    let mut previous_origin = Vector3::zeros();

    for (i, link) in parameters.links.iter().enumerate() {
        let axis = frames.axis(i);
        let origin = frames.origins[i];

        // Joint origin is rigidly attached to the previous link.
        let step = origin - previous_origin;
        acceleration += omega_dot.cross(&step) + omega.cross(&omega.cross(&step));

        omega_dot += axis * accelerations[i] + omega.cross(&axis) * velocities[i];
        omega += axis * velocities[i];

        let lever = frames.rotations[i] * link.center_of_mass();
        let center_acceleration = acceleration + omega_dot.cross(&lever)
            + omega.cross(&omega.cross(&lever));

        let rotation = &frames.rotations[i];
        let inertia = rotation * link.inertia() * rotation.transpose();

        forces[i] = center_acceleration * link.mass;
        moments[i] = inertia * omega_dot + omega.cross(&(inertia * omega));
        lever_arms[i] = lever;
        previous_origin = origin;
    }

    let mut force = Vector3::zeros();
    let mut moment = Vector3::zeros();
    for i in (0..DOF).rev() {
        if i + 1 < DOF {
            // Moment of the force transmitted to the next link, taken about this joint origin.
            moment += (frames.origins[i + 1] - frames.origins[i]).cross(&force);
        }
        moment += moments[i] + lever_arms[i].cross(&forces[i]);
        force += forces[i];
        torques[i] = moment.dot(&frames.axis(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematic_traits::{Dynamics, JOINTS_AT_ZERO};
    use crate::kinematics_impl::KinovaGen3;
    use crate::parameters_robots::GEN3;

    #[test]
    fn test_static_straight_up() {
        // Standing straight up, gravity only acts through the small lateral offsets of the
        // centers of mass. The first joint axis is vertical, so it never takes gravity load.
        let robot = KinovaGen3::new();
        let torques = robot.inverse_dynamics(&JOINTS_AT_ZERO, &[0.0; 7], &[0.0; 7]);
        assert!(torques[0].abs() < 1e-12);
    }

    #[test]
    fn test_single_joint_centrifugal() {
        // Only the last joint moving: the bracelet spins about its own axis and the reaction
        // on joint 7 itself is zero.
        let robot = KinovaGen3::new();
        let qs = [0.3, 0.7, -0.4, 1.3, 0.2, -0.6, 0.9];
        let torques = robot.coriolis(&qs, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
        assert!(torques[6].abs() < 1e-12);
    }

    #[test]
    fn test_zero_motion_without_gravity() {
        let frames = LinkFrames::compute(&GEN3, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
        let mut torques = SVector::<f64, 7>::repeat(1.0);
        recursive_newton_euler(&GEN3, &frames, &SVector::zeros(), &SVector::zeros(),
                               &Vector3::zeros(), &mut torques);
        assert_eq!(torques, SVector::<f64, 7>::zeros());
    }

    #[test]
    fn test_mass_matrix_columns() {
        // With no velocity and no gravity the pass returns M(q) qdd, so unit accelerations
        // pick out the columns of the mass matrix.
        let qs = [0.4, -1.2, 0.3, 2.0, -0.7, 1.1, 0.5];
        let robot = KinovaGen3::new();
        let mass_matrix = robot.mass_matrix(&qs);
        let frames = LinkFrames::compute(&GEN3, &qs);
        for k in 0..DOF {
            let mut unit = SVector::<f64, 7>::zeros();
            unit[k] = 1.0;
            let mut column = SVector::<f64, 7>::zeros();
            recursive_newton_euler(&GEN3, &frames, &SVector::zeros(), &unit, &Vector3::zeros(),
                                   &mut column);
            assert!((column - mass_matrix.column(k)).norm() < 1e-12, "column {}", k);
        }
    }
}
