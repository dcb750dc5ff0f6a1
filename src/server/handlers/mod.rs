pub mod position;
pub mod trip;
