/// Data models for the intake handler
pub mod email;
pub mod events;
pub mod records;

// Re-export commonly used types
pub use email::*;
pub use events::*;
pub use records::*;
