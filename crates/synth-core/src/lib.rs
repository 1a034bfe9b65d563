pub mod bounds;
pub mod config;
pub mod features;
pub mod message;
pub mod state;

pub use bounds::*;
pub use config::*;
pub use features::*;
pub use message::*;
pub use state::*;
