use anyhow::{ensure, Context, Result};
use clap::Parser;

use rs_gen3_dynamics::jacobian::Jacobian;
use rs_gen3_dynamics::kinematic_traits::{Dynamics, Kinematics, JOINTS_AT_ZERO};
use rs_gen3_dynamics::kinematics_impl::KinovaGen3;
use rs_gen3_dynamics::utils::{dump_joints, dump_pose, dump_values, is_valid, joints_from_slice,
                              twist_from_slice};

/// Evaluates the Kinova Gen3 model at one joint configuration.
#[derive(Parser, Debug)]
#[command(name = "gen3", version, about)]
struct Args {
    /// Joint angles in radians, comma separated (7 values). All zeros if omitted.
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    joints: Vec<f64>,

    /// Joint velocities in rad/s, comma separated (7 values), for the Coriolis term.
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    velocities: Vec<f64>,

    /// End-effector twist (vx, vy, vz, wx, wy, wz), comma separated, to solve for joint velocities.
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    twist: Vec<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let robot = KinovaGen3::new();

    let joints = if args.joints.is_empty() {
        JOINTS_AT_ZERO
    } else {
        joints_from_slice(&args.joints).context("Reading --joints")?
    };
    ensure!(is_valid(&joints), "Joint values must be finite: {:?}", joints);

    println!("Joints (degrees):");
    dump_joints(&joints);

    println!("End-effector pose:");
    dump_pose(&robot.forward(&joints));

    let jacobian = Jacobian::new(&robot, &joints);
    println!("Jacobian:{}", jacobian.matrix());
    println!("Manipulability: {:.6}", jacobian.manipulability());

    println!("Mass matrix:{}", robot.mass_matrix(&joints));

    println!("Gravity torques:");
    dump_values(&robot.gravity(&joints));

    if !args.velocities.is_empty() {
        let velocities = joints_from_slice(&args.velocities).context("Reading --velocities")?;
        println!("Coriolis torques:");
        dump_values(&robot.coriolis(&joints, &velocities));
    }

    if !args.twist.is_empty() {
        let twist = twist_from_slice(&args.twist).context("Reading --twist")?;
        println!("Joint velocities for the twist:");
        dump_values(&jacobian.velocities_from_vector(&twist));
    }

    Ok(())
}
