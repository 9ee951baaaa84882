//! Business operations on top of the repositories: pagination envelopes, password
//! hashing and ownership checks.

pub mod todos;
pub mod users;

pub use todos::TodoService;
pub use users::UserService;
