pub mod directory;
pub mod link;

pub use directory::*;
pub use link::LinkRecord;
