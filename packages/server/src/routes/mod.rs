use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/authors", author_routes())
        .nest("/blogs", blog_routes())
        .nest("/comments", comment_routes())
        .nest("/users", user_routes())
}

fn author_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::author::*;

    OpenApiRouter::new()
        .routes(routes!(list_authors, create_author))
        .routes(routes!(get_author, update_author, delete_author))
}

fn blog_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::blog::*;

    OpenApiRouter::new()
        .routes(routes!(list_blogs, create_blog))
        .routes(routes!(get_blog, update_blog, delete_blog))
}

fn comment_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::comment::*;

    OpenApiRouter::new()
        .routes(routes!(list_comments, create_comment))
        .routes(routes!(get_comment, update_comment, delete_comment))
}

fn user_routes() -> OpenApiRouter<AppState> {
    use crate::handlers::user::*;

    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
}
