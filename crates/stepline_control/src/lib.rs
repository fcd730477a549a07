//! Stepline Control Algebra
//!
//! The system side of a step-response plot:
//!
//! - **Polynomials** in `s` with the usual ring operations
//! - **Transfer functions** with series, parallel and feedback combinators
//! - **PID loop reduction** from controller and plant to closed loop
//! - **Step responses**, both closed-form for second-order systems and
//!   numerical (RK4) for any proper transfer function
//!
//! # Example
//!
//! ```rust
//! use stepline_control::{step_response, SecondOrder};
//!
//! let sys = SecondOrder::new(2.0, 0.5).unwrap();
//! let samples = step_response(&sys.transfer_function(), 10.0, 500).unwrap();
//! assert_eq!(samples.len(), 500);
//! assert!((sys.peak_value() - 1.163).abs() < 1e-3);
//! ```

pub mod error;
pub mod polynomial;
pub mod reduction;
pub mod second_order;
pub mod simulate;
pub mod transfer;

pub use error::{ControlError, Result};
pub use polynomial::Polynomial;
pub use reduction::{closed_loop, reduce_pid_loop, PidGains, ReductionStep};
pub use second_order::SecondOrder;
pub use simulate::{peak, step_response, StateSpace};
pub use transfer::TransferFunction;
