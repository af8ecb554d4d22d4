//! Gravity torques as the gradient of the potential energy.
//!
//! U(q) = −Σᵢ mᵢ g·cᵢ(q). The center of mass of link i moves with joint j ≤ i as
//! ∂cᵢ/∂qⱼ = zⱼ × (cᵢ − oⱼ), so ∂U/∂qⱼ = −g·(zⱼ × (Σᵢ≥ⱼ mᵢ cᵢ − oⱼ Σᵢ≥ⱼ mᵢ)). Both sums are
//! accumulated from the tip in one backward sweep.

use nalgebra::Vector3;

use crate::kinematic_traits::{Joints, DOF};
use crate::kinematics_impl::LinkFrames;
use crate::parameters::Parameters;

pub(crate) fn gravity_torques(parameters: &Parameters, frames: &LinkFrames, torques: &mut Joints) {
    let gravity = parameters.gravity();
    let mut mass = 0.0;
    let mut first_moment = Vector3::zeros();

    for j in (0..DOF).rev() {
        let link = &parameters.links[j];
        mass += link.mass;
        first_moment += frames.center_of_mass(parameters, j) * link.mass;

        let lever = first_moment - frames.origins[j] * mass;
        torques[j] = -gravity.dot(&frames.axis(j).cross(&lever));
    }
}

pub(crate) fn potential_energy(parameters: &Parameters, frames: &LinkFrames) -> f64 {
    let gravity = parameters.gravity();
    (0..DOF)
        .map(|i| -parameters.links[i].mass * gravity.dot(&frames.center_of_mass(parameters, i)))
        .sum()
}
