pub mod analysis;
pub mod audit;
pub mod enums;
pub mod intake;

pub use analysis::*;
pub use audit::*;
pub use enums::*;
pub use intake::*;
