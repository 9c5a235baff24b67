//! Domain models for the Mingle backend

pub mod block;
pub mod comment;
pub mod friendship;
pub mod group;
pub mod like;
pub mod message;
pub mod post;
pub mod token;
pub mod user;

// Re-export for convenience
pub use block::{GroupBlock, UserBlock};
pub use comment::{Comment, NewComment};
pub use friendship::Friendship;
pub use group::{Group, GroupRole, GroupUserRole, NewGroup, UpdateGroup};
pub use like::{Like, NewLike};
pub use message::{Message, NewMessage};
pub use post::{NewPost, Post};
pub use token::RefreshToken;
pub use user::{NewUser, UpdateUser, User, UserRole};
