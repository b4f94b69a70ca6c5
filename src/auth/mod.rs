pub mod credentials;

pub use credentials::{AuthFlowType, AuthToken};
