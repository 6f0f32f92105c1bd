//! Waiter module
//!
//! Poll-until-condition with a deadline, plus the status classifier the
//! resource modules use to wait for asynchronous operations.
//!
//! Waits run entirely inside the caller's task: checks happen one after
//! another, and dropping the future stops the wait.

mod policy;
mod poll;
mod status;

pub use policy::{PollPolicy, PollPolicyBuilder};
pub use poll::{wait_for, wait_for_with};
pub use status::{wait_for_status, Observation, WaitTarget};
