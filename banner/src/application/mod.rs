pub mod compositor;
pub mod errors;
pub mod ports;
pub mod results;
pub mod use_cases;
