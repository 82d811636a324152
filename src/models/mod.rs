pub mod minutes;
pub mod question;

pub use minutes::*;
pub use question::*;
