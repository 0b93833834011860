pub mod auction;
pub mod market;
pub mod sale;
pub mod stats;

pub use auction::*;
pub use market::*;
pub use sale::*;
pub use stats::*;
