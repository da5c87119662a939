pub mod cancel_plan;
pub mod cancel_subscription;
pub mod create_plan;
pub mod deposit;
pub mod execute_payment;
pub mod initialize_global_stats;
pub mod initialize_subscription;
pub mod update_subscription;

pub use cancel_plan::*;
pub use cancel_subscription::*;
pub use create_plan::*;
pub use deposit::*;
pub use execute_payment::*;
pub use initialize_global_stats::*;
pub use initialize_subscription::*;
pub use update_subscription::*;
