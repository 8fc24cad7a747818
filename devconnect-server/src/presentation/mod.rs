use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::post_service::PostService;
use crate::application::profile_service::ProfileService;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService>,
    pub(crate) profile_service: Arc<ProfileService>,
    pub(crate) post_service: Arc<PostService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService>,
        profile_service: Arc<ProfileService>,
        post_service: Arc<PostService>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            auth_service,
            profile_service,
            post_service,
            jwt,
        }
    }
}
