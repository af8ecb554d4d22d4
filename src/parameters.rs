//! Defines the link parameter table of the robot

use nalgebra::{Matrix3, Vector3};

/// Rigid transform between two consecutive frames, stored as plain arrays so that the
/// whole table can be built in a `const` context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTransform {
    /// Rotation matrix, row-major.
    pub rotation: [[f64; 3]; 3],

    /// Translation in meters, expressed in the parent frame.
    pub translation: [f64; 3],
}

impl FixedTransform {
    pub fn rotation(&self) -> Matrix3<f64> {
        let r = &self.rotation;
        Matrix3::new(
            r[0][0], r[0][1], r[0][2],
            r[1][0], r[1][1], r[1][2],
            r[2][0], r[2][1], r[2][2],
        )
    }

    pub fn translation(&self) -> Vector3<f64> {
        Vector3::from(self.translation)
    }
}

/// Geometry and inertia of one link, that is the body moved by one joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkParameters {
    /// Transform from the previous joint frame (or the base) to this joint frame at zero
    /// joint angle. The joint rotates about the z axis of the resulting frame.
    pub joint: FixedTransform,

    /// Mass of the link, kg.
    pub mass: f64,

    /// Center of mass in the link's own frame, m.
    pub center_of_mass: [f64; 3],

    /// Inertia tensor about the center of mass in the link frame, kg·m², as
    /// `[ixx, ixy, ixz, iyy, iyz, izz]`.
    pub inertia: [f64; 6],
}

impl LinkParameters {
    pub fn center_of_mass(&self) -> Vector3<f64> {
        Vector3::from(self.center_of_mass)
    }

    /// Full symmetric 3x3 inertia tensor.
    pub fn inertia(&self) -> Matrix3<f64> {
        let [ixx, ixy, ixz, iyy, iyz, izz] = self.inertia;
        Matrix3::new(
            ixx, ixy, ixz,
            ixy, iyy, iyz,
            ixz, iyz, izz,
        )
    }
}

/// Parameters for the kinematic and dynamic model of the robot. See
/// [parameters_robots.rs](parameters_robots.rs) for the concrete table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Links in joint order, joint 1 first.
    pub links: [LinkParameters; 7],

    /// Transform from the last joint frame to the end-effector (flange) frame.
    pub end_effector: FixedTransform,

    /// Gravitational acceleration in the base frame, m/s².
    pub gravity: [f64; 3],
}

impl Parameters {
    pub fn gravity(&self) -> Vector3<f64> {
        Vector3::from(self.gravity)
    }

    /// Sum of all link masses, kg.
    pub fn total_mass(&self) -> f64 {
        self.links.iter().map(|link| link.mass).sum()
    }

    /// Convert to string yaml representation (quick viewing, etc).
    pub fn to_yaml(&self) -> String {
        let mut yaml = String::from("links:\n");
        for (i, link) in self.links.iter().enumerate() {
            yaml.push_str(&format!(
                "  - joint: {}\n    \
                 translation: [{}]\n    \
                 mass: {}\n    \
                 center_of_mass: [{}]\n    \
                 inertia: [{}]\n",
                i + 1,
                join(&link.joint.translation),
                link.mass,
                join(&link.center_of_mass),
                join(&link.inertia),
            ));
        }
        yaml.push_str(&format!(
            "end_effector_translation: [{}]\ngravity: [{}]\n",
            join(&self.end_effector.translation),
            join(&self.gravity)
        ));
        yaml
    }
}

fn join(values: &[f64]) -> String {
    values.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", ")
}
