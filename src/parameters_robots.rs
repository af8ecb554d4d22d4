//! Hardcoded parameters of the Kinova Gen3 7 axis robot (spherical wrist, bracelet
//! without vision module), from the manufacturer's mechanical description.

use crate::parameters::{FixedTransform, LinkParameters, Parameters};

/// Standard gravity, m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Rotations about x that take each parent frame to the next joint frame.
const RX_PI: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, -1.0]];
const RX_HALF_PI: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]];
const RX_MINUS_HALF_PI: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, -1.0, 0.0]];

/// The model of the robot, available for the whole process lifetime.
pub static GEN3: Parameters = Parameters::gen3();

impl Parameters {
    pub const fn gen3() -> Self {
        Parameters {
            links: [
                // Shoulder
                LinkParameters {
                    joint: FixedTransform { rotation: RX_PI, translation: [0.0, 0.0, 0.15643] },
                    mass: 1.3773,
                    center_of_mass: [-2.3e-5, -0.010364, -0.07336],
                    inertia: [0.00457, 1e-6, 2e-6, 0.004831, 0.000448, 0.001409],
                },
                // Half arm 1
                LinkParameters {
                    joint: FixedTransform { rotation: RX_HALF_PI, translation: [0.0, 0.005375, -0.12838] },
                    mass: 1.1636,
                    center_of_mass: [-4.4e-5, -0.09958, -0.013278],
                    inertia: [0.011088, 5e-6, 0.0, 0.001072, -0.000691, 0.011255],
                },
                // Half arm 2
                LinkParameters {
                    joint: FixedTransform { rotation: RX_MINUS_HALF_PI, translation: [0.0, -0.21038, -0.006375] },
                    mass: 1.1636,
                    center_of_mass: [-4.4e-5, -0.006641, -0.117892],
                    inertia: [0.010932, 0.0, -7e-6, 0.011127, 0.000606, 0.001043],
                },
                // Forearm
                LinkParameters {
                    joint: FixedTransform { rotation: RX_HALF_PI, translation: [0.0, 0.006375, -0.21038] },
                    mass: 0.9302,
                    center_of_mass: [-1.8e-5, -0.075478, -0.015006],
                    inertia: [0.008147, -1e-6, 0.0, 0.000631, -0.0005, 0.008316],
                },
                // Spherical wrist 1
                LinkParameters {
                    joint: FixedTransform { rotation: RX_MINUS_HALF_PI, translation: [0.0, -0.20843, -0.006375] },
                    mass: 0.6781,
                    center_of_mass: [1e-6, -0.009432, -0.063883],
                    inertia: [0.001596, 0.0, 0.0, 0.001607, 0.000256, 0.000399],
                },
                // Spherical wrist 2
                LinkParameters {
                    joint: FixedTransform { rotation: RX_HALF_PI, translation: [0.0, 0.00017505, -0.10593] },
                    mass: 0.6781,
                    center_of_mass: [1e-6, -0.045483, -0.00965],
                    inertia: [0.001641, 0.0, 0.0, 0.00041, -0.000278, 0.001641],
                },
                // Bracelet
                LinkParameters {
                    joint: FixedTransform { rotation: RX_MINUS_HALF_PI, translation: [0.0, -0.10593, -0.00017505] },
                    mass: 0.5006,
                    center_of_mass: [-0.000281, -0.011402, -0.029798],
                    inertia: [0.000587, 3e-6, 3e-6, 0.000369, 0.000118, 0.000609],
                },
            ],
            end_effector: FixedTransform { rotation: RX_PI, translation: [0.0, 0.0, -0.0615] },
            gravity: [0.0, 0.0, -STANDARD_GRAVITY],
        }
    }
}
