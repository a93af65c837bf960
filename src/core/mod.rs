pub mod client;
pub mod form;
pub mod hpp;
pub mod modification;
pub mod payment;
pub mod recurring;
pub mod runner;
pub mod three_d_secure;

pub use crate::domain::model::{PaymentResult, ThreeDSecureRedirect};
pub use crate::domain::ports::{ConfigProvider, Example, Outcome, Storage};
pub use crate::domain::report::Report;
pub use crate::utils::error::Result;
