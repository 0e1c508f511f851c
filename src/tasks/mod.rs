pub mod processor;
pub mod verify;

pub use processor::Categorizer;
pub use verify::verify;
