use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::app_error::ErrorBody;
use crate::presentation::http::handlers::auth::{AuthResponseDto, AuthUserDto, LoginDto, SignupDto};
use crate::presentation::http::handlers::posts::{
    AddCommentDto, CommentDto, CreatePostDto, MessageDto, PostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::auth::signup,
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::toggle_like,
        crate::presentation::http::handlers::posts::add_comment,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            SignupDto,
            LoginDto,
            AuthResponseDto,
            AuthUserDto,
            CreatePostDto,
            AddCommentDto,
            PostDto,
            CommentDto,
            MessageDto,
            ErrorBody
        )
    ),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "posts", description = "Feed, likes, comments")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
