//! Re-exported APIs for consumers of the transfer crate.

pub use crate::mission::estimate::{estimate_delta_v, intercept_probability};
pub use crate::mission::trajectory::{
    InterceptorTrajectory, TRAJECTORY_STEPS, TrajectoryEstimator, TrajectoryPoint,
    build_trajectory,
};
pub use crate::mission::{
    InterceptPlan, MissionConfig, TrajectoryError, TrajectoryType, plan_intercept,
};
pub use intercept_propulsion::{Payload, PayloadItem, PropulsionType, fuel_mass};
