//! Admin area routes. Callers hold the `Admin` site role; the acting
//! user for each mutation comes from the request, so the service-layer
//! rules still run against that id rather than the caller's.

use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;

/// Acting user parameter shared by admin mutations
#[derive(Debug, Deserialize)]
pub struct ActingUserQuery {
    pub user_id: Uuid,
}

mod comments;
mod friendships;
mod group_blocks;
mod group_roles;
mod groups;
mod likes;
mod messages;
mod posts;
mod user_blocks;
mod users;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(friendships::routes())
        .merge(user_blocks::routes())
        .merge(groups::routes())
        .merge(group_roles::routes())
        .merge(group_blocks::routes())
        .merge(posts::routes())
        .merge(comments::routes())
        .merge(likes::routes())
        .merge(messages::routes())
}
