//! Application state shared across handlers

use std::sync::Arc;

use crate::jwt::JwtService;
use crate::services::auth::AuthService;
use crate::services::comment::CommentService;
use crate::services::friendship::FriendshipService;
use crate::services::group::GroupService;
use crate::services::group_block::GroupBlockService;
use crate::services::group_role::GroupUserRoleService;
use crate::services::like::LikeService;
use crate::services::message::MessageService;
use crate::services::post::PostService;
use crate::services::token::TokenService;
use crate::services::user::UserService;
use crate::services::user_block::UserBlockService;
use crate::store::Store;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt: JwtService,
    pub auth_service: AuthService,
    pub token_service: TokenService,
    pub user_service: UserService,
    pub friendship_service: FriendshipService,
    pub user_block_service: UserBlockService,
    pub group_service: GroupService,
    pub group_role_service: GroupUserRoleService,
    pub group_block_service: GroupBlockService,
    pub post_service: PostService,
    pub comment_service: CommentService,
    pub like_service: LikeService,
    pub message_service: MessageService,
}

impl AppState {
    /// Wire every service over one store and one JWT configuration.
    pub fn new(store: Arc<dyn Store>, jwt: JwtService) -> Self {
        let user_service = UserService::new(store.clone());
        let token_service = TokenService::new(store.clone(), jwt.clone());
        let auth_service =
            AuthService::new(store.clone(), user_service.clone(), token_service.clone());

        AppState {
            jwt,
            auth_service,
            token_service,
            user_service,
            friendship_service: FriendshipService::new(store.clone()),
            user_block_service: UserBlockService::new(store.clone()),
            group_service: GroupService::new(store.clone()),
            group_role_service: GroupUserRoleService::new(store.clone()),
            group_block_service: GroupBlockService::new(store.clone()),
            post_service: PostService::new(store.clone()),
            comment_service: CommentService::new(store.clone()),
            like_service: LikeService::new(store.clone()),
            message_service: MessageService::new(store.clone()),
            store,
        }
    }
}
