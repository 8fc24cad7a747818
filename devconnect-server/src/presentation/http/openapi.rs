use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::auth::{LoginDto, UserDto};
use crate::presentation::http::handlers::posts::{CommentDto, LikeDto, PostDto, TextDto};
use crate::presentation::http::handlers::profiles::{
    AddEducationDto, AddExperienceDto, EducationDto, ExperienceDto, ProfileDto, ProfileUserDto,
    SkillsInput, SocialDto, UpsertProfileDto,
};
use crate::presentation::http::handlers::users::{RegisterDto, TokenDto};
use crate::presentation::http::middleware::auth::AUTH_TOKEN_HEADER;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::users::register,
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::auth::current_user,
        crate::presentation::http::handlers::profiles::list_profiles,
        crate::presentation::http::handlers::profiles::current_profile,
        crate::presentation::http::handlers::profiles::profile_by_user,
        crate::presentation::http::handlers::profiles::upsert_profile,
        crate::presentation::http::handlers::profiles::delete_account,
        crate::presentation::http::handlers::profiles::add_experience,
        crate::presentation::http::handlers::profiles::remove_experience,
        crate::presentation::http::handlers::profiles::add_education,
        crate::presentation::http::handlers::profiles::remove_education,
        crate::presentation::http::handlers::profiles::github_repos,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::delete_post,
        crate::presentation::http::handlers::posts::like_post,
        crate::presentation::http::handlers::posts::unlike_post,
        crate::presentation::http::handlers::posts::add_comment,
        crate::presentation::http::handlers::posts::delete_comment
    ),
    components(
        schemas(
            RegisterDto,
            TokenDto,
            LoginDto,
            UserDto,
            UpsertProfileDto,
            SkillsInput,
            AddExperienceDto,
            AddEducationDto,
            ProfileDto,
            ProfileUserDto,
            SocialDto,
            ExperienceDto,
            EducationDto,
            TextDto,
            PostDto,
            LikeDto,
            CommentDto
        )
    ),
    tags(
        (name = "users", description = "Registration"),
        (name = "auth", description = "Login and current user"),
        (name = "profile", description = "Developer profiles"),
        (name = "posts", description = "Posts, likes and comments")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(AUTH_TOKEN_HEADER))),
        );
        openapi.components = Some(components);
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_routes_and_security_scheme() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/users"));
        assert!(doc.paths.paths.contains_key("/api/posts/comment/{id}/{comment_id}"));
        assert!(doc.paths.paths.contains_key("/api/profile/github/{username}"));

        let components = doc.components.expect("components must exist");
        assert!(components.security_schemes.contains_key("api_key"));
    }
}
