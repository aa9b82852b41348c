pub mod admin;
pub mod answer;
pub mod arbitration;
pub mod ask;
pub mod claim;

pub use admin::*;
pub use answer::*;
pub use arbitration::*;
pub use ask::*;
pub use claim::*;
