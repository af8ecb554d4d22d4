//! Position-level forward kinematics and the robot model handle.
//!
//! All other computations start from [`LinkFrames`], the chain of cumulative transforms from
//! the base to every joint frame. It lives on the stack and is filled by one pass over the
//! fixed array of links.

use nalgebra::{Isometry3, Matrix3, Rotation3, Translation3, UnitQuaternion, Vector3};

use crate::jacobian::{fill_jacobian, solve_velocities};
use crate::kinematic_traits::{JacobianMatrix, Joints, Kinematics, Pose, Twist, DOF};
use crate::parameters::Parameters;
use crate::parameters_robots::GEN3;

/// Handle on the immutable parameter table. It carries no other state, is `Copy` and may be
/// shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct KinovaGen3 {
    parameters: &'static Parameters,
}

impl KinovaGen3 {
    /// Model of the Kinova Gen3 robot.
    pub fn new() -> Self {
        KinovaGen3 { parameters: &GEN3 }
    }

    /// Model with a different parameter table (same chain structure).
    pub fn with_parameters(parameters: &'static Parameters) -> Self {
        KinovaGen3 { parameters }
    }

    pub fn parameters(&self) -> &'static Parameters {
        self.parameters
    }
}

impl Default for KinovaGen3 {
    fn default() -> Self {
        Self::new()
    }
}

/// Cumulative transforms from the base frame to each joint frame, joint angle included.
#[derive(Debug, Clone, Copy)]
pub struct LinkFrames {
    pub rotations: [Matrix3<f64>; DOF],
    pub origins: [Vector3<f64>; DOF],
}

impl LinkFrames {
    pub fn compute(parameters: &Parameters, qs: &Joints) -> Self {
        let mut rotations = [Matrix3::identity(); DOF];
        let mut origins = [Vector3::zeros(); DOF];

        let mut rotation = Matrix3::identity();
        let mut origin = Vector3::zeros();
        for (i, link) in parameters.links.iter().enumerate() {
            origin += rotation * link.joint.translation();
            rotation = rotation * link.joint.rotation() * rot_z(qs[i]);
            rotations[i] = rotation;
            origins[i] = origin;
        }

        LinkFrames { rotations, origins }
    }

    /// Rotation axis of the joint in the base frame.
    #[inline]
    pub fn axis(&self, joint: usize) -> Vector3<f64> {
        self.rotations[joint].column(2).into_owned()
    }

    /// Center of mass of the link in the base frame.
    #[inline]
    pub fn center_of_mass(&self, parameters: &Parameters, link: usize) -> Vector3<f64> {
        self.origins[link] + self.rotations[link] * parameters.links[link].center_of_mass()
    }

    /// End-effector position and orientation.
    pub fn end_effector(&self, parameters: &Parameters) -> (Vector3<f64>, Matrix3<f64>) {
        let last = DOF - 1;
        let flange = &parameters.end_effector;
        let position = self.origins[last] + self.rotations[last] * flange.translation();
        let orientation = self.rotations[last] * flange.rotation();
        (position, orientation)
    }
}

/// Rotation about z by the joint angle.
#[inline]
fn rot_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, -s, 0.0,
        s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

fn to_pose(position: &Vector3<f64>, orientation: &Matrix3<f64>) -> Pose {
    let rotation = Rotation3::from_matrix_unchecked(*orientation);
    Isometry3::from_parts(Translation3::from(*position),
                          UnitQuaternion::from_rotation_matrix(&rotation))
}

impl Kinematics for KinovaGen3 {
    fn forward_kinematics(&self, qs: &Joints) -> (Vector3<f64>, Matrix3<f64>) {
        let mut position = Vector3::zeros();
        let mut orientation = Matrix3::zeros();
        self.forward_kinematics_into(qs, &mut position, &mut orientation);
        (position, orientation)
    }

    fn forward_kinematics_into(&self, qs: &Joints, position: &mut Vector3<f64>,
                               orientation: &mut Matrix3<f64>) {
        let frames = LinkFrames::compute(self.parameters, qs);
        (*position, *orientation) = frames.end_effector(self.parameters);
    }

    fn forward(&self, qs: &Joints) -> Pose {
        let (position, orientation) = self.forward_kinematics(qs);
        to_pose(&position, &orientation)
    }

    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 8] {
        let frames = LinkFrames::compute(self.parameters, qs);
        let mut poses = [Pose::identity(); 8];
        for i in 0..DOF {
            poses[i] = to_pose(&frames.origins[i], &frames.rotations[i]);
        }
        let (position, orientation) = frames.end_effector(self.parameters);
        poses[DOF] = to_pose(&position, &orientation);
        poses
    }

    fn jacobian(&self, qs: &Joints) -> JacobianMatrix {
        let mut jacobian = JacobianMatrix::zeros();
        self.jacobian_into(qs, &mut jacobian);
        jacobian
    }

    fn jacobian_into(&self, qs: &Joints, jacobian: &mut JacobianMatrix) {
        let frames = LinkFrames::compute(self.parameters, qs);
        let (position, _) = frames.end_effector(self.parameters);
        fill_jacobian(&frames, &position, jacobian);
    }

    fn inverse_kinematics(&self, qs: &Joints, twist: &Twist) -> Joints {
        let mut velocities = [0.0; DOF];
        let mut jacobian = JacobianMatrix::zeros();
        self.inverse_kinematics_into(qs, twist, &mut velocities, &mut jacobian);
        velocities
    }

    fn inverse_kinematics_into(&self, qs: &Joints, twist: &Twist, velocities: &mut Joints,
                               jacobian: &mut JacobianMatrix) {
        self.jacobian_into(qs, jacobian);
        solve_velocities(jacobian, twist, velocities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematic_traits::JOINTS_AT_ZERO;

    const SMALL: f64 = 1e-12;

    #[test]
    fn test_forward_kinematics_straight_up() {
        let robot = KinovaGen3::new();
        let (position, orientation) = robot.forward_kinematics(&JOINTS_AT_ZERO);

        // Lateral offsets of the actuators add up along -y, all heights along z.
        assert!((position - Vector3::new(0.0, -0.0248501, 1.18736)).norm() < SMALL);

        // The half turns about x cancel out along the chain.
        assert!((orientation - Matrix3::identity()).norm() < SMALL);
    }

    #[test]
    fn test_joint_origins_straight_up() {
        let frames = LinkFrames::compute(&GEN3, &JOINTS_AT_ZERO);
        let expected_heights = [0.15643, 0.28481, 0.49519, 0.70557, 0.914, 1.01993, 1.12586];
        for (i, height) in expected_heights.iter().enumerate() {
            assert!((frames.origins[i].z - height).abs() < SMALL, "joint {}", i + 1);
            assert!(frames.origins[i].x.abs() < SMALL, "joint {}", i + 1);
        }
    }

    #[test]
    fn test_first_joint_turns_about_vertical() {
        let robot = KinovaGen3::new();
        let mut qs = JOINTS_AT_ZERO;
        qs[1] = 0.7;
        qs[3] = -0.4;
        let (p0, _) = robot.forward_kinematics(&qs);
        qs[0] = std::f64::consts::FRAC_PI_2;
        let (p1, _) = robot.forward_kinematics(&qs);

        // The first joint axis points down (-z), so positive rotation turns the arm clockwise
        // seen from above.
        assert!((p1.z - p0.z).abs() < SMALL);
        assert!((p1.x - p0.y).abs() < SMALL);
        assert!((p1.y + p0.x).abs() < SMALL);
    }

    #[test]
    fn test_with_parameters_matches_default_model() {
        let robot = KinovaGen3::with_parameters(&GEN3);
        assert!(std::ptr::eq(robot.parameters(), KinovaGen3::new().parameters()));

        let qs = [0.4, -0.3, 0.8, 1.1, -0.6, 0.2, 0.9];
        assert_eq!(robot.forward_kinematics(&qs), KinovaGen3::default().forward_kinematics(&qs));
        assert_eq!(robot.jacobian(&qs), KinovaGen3::new().jacobian(&qs));
    }

    #[test]
    fn test_joint_poses_end_with_flange() {
        let robot = KinovaGen3::new();
        let qs = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];
        let poses = robot.forward_with_joint_poses(&qs);
        let flange = robot.forward(&qs);
        assert!((poses[7].translation.vector - flange.translation.vector).norm() < SMALL);
        assert!(poses[7].rotation.angle_to(&flange.rotation) < 1e-9);

        let frames = LinkFrames::compute(&GEN3, &qs);
        for i in 0..DOF {
            assert!((poses[i].translation.vector - frames.origins[i]).norm() < SMALL);
        }
    }
}
