// Loss functions compare network outputs against targets. Everything
// here operates on log-probabilities, never on renormalized
// probabilities, to avoid precision loss near 0 and 1.

pub mod nll;

pub use nll::NllLoss;
