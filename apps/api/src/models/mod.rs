pub mod assessment;
pub mod lenient;
