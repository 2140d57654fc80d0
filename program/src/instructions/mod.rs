pub mod change_destination;
pub mod create;
pub mod init;
pub mod unlock;

pub use change_destination::*;
pub use create::*;
pub use init::*;
pub use unlock::*;
