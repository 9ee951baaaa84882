pub mod response;
pub mod todo;
pub mod user;

pub use response::{ApiErrorBody, ApiResponse};
pub use todo::{CreateTodoRequest, NewTodo, Todo, TodoPatch, UpdateTodoRequest};
pub use user::{CreateUserRequest, NewUser, UpdateUserRequest, User, UserPatch};

/// Merge-patch normalization: an empty string means "not supplied".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
