//! Helper functions

use nalgebra::{Isometry3, SVector, UnitQuaternion};

use crate::kinematic_traits::{Joints, Twist, DOF};
use crate::model_error::ModelError;

/// Checks if all elements in the array are finite
pub fn is_valid(qs: &Joints) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Copies a slice of exactly 7 values into Joints.
pub fn joints_from_slice(values: &[f64]) -> Result<Joints, ModelError> {
    values.try_into().map_err(|_| ModelError::InvalidLength {
        expected: DOF,
        found: values.len(),
    })
}

/// Copies a slice of exactly 6 values (linear then angular velocity) into a Twist.
pub fn twist_from_slice(values: &[f64]) -> Result<Twist, ModelError> {
    if values.len() != 6 {
        return Err(ModelError::InvalidLength { expected: 6, found: values.len() });
    }
    Ok(Twist::from_column_slice(values))
}

/// Converts ```Joints ([f64; 7])``` to a ```SVector<f64, 7>```
pub fn joints_to_vector7(j: &Joints) -> SVector<f64, 7> {
    SVector::<f64, 7>::from(*j)
}

/// Converts ```SVector<f64, 7>``` to Joints ([f64; 7])
pub fn vector7_to_joints(v: &SVector<f64, 7>) -> Joints {
    std::array::from_fn(|i| v[i])
}

/// Allows to specify joint values in degrees (converts to radians)
pub fn as_radians(degrees: [i32; 7]) -> Joints {
    std::array::from_fn(|i| (degrees[i] as f64).to_radians())
}

/// Print joint values, converting radians to degrees.
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..DOF {
        let computed = joints[joint_idx];
        row_str.push_str(&format!("{:5.2} ", computed.to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

/// Print joint values as they are (velocities, torques).
pub fn dump_values(values: &Joints) {
    let row_str: Vec<String> = values.iter().map(|v| format!("{:.6}", v)).collect();
    println!("[{}]", row_str.join(" "));
}

pub fn dump_pose(isometry: &Isometry3<f64>) {
    let translation = isometry.translation.vector;
    let rotation: UnitQuaternion<f64> = isometry.rotation;

    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    );
}
