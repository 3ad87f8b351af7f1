mod deliveries;
pub mod health_check;

pub use deliveries::*;
pub use health_check::*;
