//! Joint-space inertia matrix.
//!
//! M(q) = Σᵢ mᵢ Jvᵢᵀ Jvᵢ + Jωᵢᵀ Iᵢ Jωᵢ, where Jvᵢ and Jωᵢ are the linear and angular Jacobians
//! of the center of mass of link i and Iᵢ is its inertia tensor rotated into the base frame.
//! Columns beyond i of both partial Jacobians are zero.

use nalgebra::SMatrix;

use crate::kinematic_traits::MassMatrix;
use crate::kinematics_impl::LinkFrames;
use crate::parameters::Parameters;

pub(crate) fn assemble_mass_matrix(parameters: &Parameters, frames: &LinkFrames,
                                   mass_matrix: &mut MassMatrix) {
    mass_matrix.fill(0.0);

    let mut linear = SMatrix::<f64, 3, 7>::zeros();
    let mut angular = SMatrix::<f64, 3, 7>::zeros();

    for (i, link) in parameters.links.iter().enumerate() {
        let center = frames.center_of_mass(parameters, i);

        // Columns past i stay zero from the earlier passes.
        for j in 0..=i {
            let axis = frames.axis(j);
            linear.fixed_view_mut::<3, 1>(0, j).copy_from(&axis.cross(&(center - frames.origins[j])));
            angular.fixed_view_mut::<3, 1>(0, j).copy_from(&axis);
        }

        let rotation = &frames.rotations[i];
        let inertia = rotation * link.inertia() * rotation.transpose();

        *mass_matrix += linear.transpose() * linear * link.mass
            + angular.transpose() * inertia * angular;
    }

    // Floating point leaves the sum slightly asymmetric.
    let transposed = mass_matrix.transpose();
    *mass_matrix += transposed;
    *mass_matrix *= 0.5;
}
