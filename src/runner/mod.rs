mod smoke;

pub use smoke::{RunReport, SmokeTest};
