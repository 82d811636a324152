pub mod driver;
pub mod minutes;
pub mod question;

pub use driver::*;
pub use minutes::*;
pub use question::*;
