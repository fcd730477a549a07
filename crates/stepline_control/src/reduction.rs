//! Block-diagram reduction of the PID loop
//!
//! A PID controller `C(s)` in series with a second-order plant `G(s)`, closed
//! through unity negative feedback. Each step of the reduction is kept so it
//! can be shown in order.

use crate::second_order::SecondOrder;
use crate::transfer::TransferFunction;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    pub fn transfer_function(&self) -> TransferFunction {
        TransferFunction::pid(self.kp, self.ki, self.kd)
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReductionStep {
    pub label: &'static str,
    pub transfer: TransferFunction,
}

/// `C(s)`, `G(s)`, `C(s)G(s)` and the closed loop `C G / (1 + C G)`.
pub fn reduce_pid_loop(gains: PidGains, plant: SecondOrder) -> Vec<ReductionStep> {
    let controller = gains.transfer_function();
    let plant = plant.transfer_function();
    let open_loop = controller.series(&plant);
    let closed_loop = open_loop.unity_feedback();
    tracing::debug!(%closed_loop, "pid loop reduced");

    vec![
        ReductionStep {
            label: "C(s)",
            transfer: controller,
        },
        ReductionStep {
            label: "G(s)",
            transfer: plant,
        },
        ReductionStep {
            label: "C(s)G(s)",
            transfer: open_loop,
        },
        ReductionStep {
            label: "T(s)",
            transfer: closed_loop,
        },
    ]
}

/// The last step of [`reduce_pid_loop`].
pub fn closed_loop(gains: PidGains, plant: SecondOrder) -> TransferFunction {
    gains
        .transfer_function()
        .series(&plant.transfer_function())
        .unity_feedback()
}
