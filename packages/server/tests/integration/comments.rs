use serde_json::json;

use crate::common::{TestApp, routes, unknown_id};

mod comment_creation {
    use super::*;

    #[tokio::test]
    async fn comment_is_linked_to_blog_and_user_exactly_once() {
        let app = TestApp::spawn().await;
        let author = app.create_author("John Doe").await;
        let blog = app.create_blog(&author, "Hi There").await;
        let user = app.create_user("Jane Roe").await;

        let res = app
            .post(
                routes::COMMENTS,
                &json!({"blog": blog, "content": "Nice post", "user": user}),
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["content"], "Nice post");
        assert_eq!(res.body["blog"], blog.as_str());
        assert_eq!(res.body["user"], user.as_str());

        let id = res.id();
        assert_eq!(app.get(&routes::blog(&blog)).await.ids("comments"), vec![id.clone()]);
        assert_eq!(app.get(&routes::user(&user)).await.ids("comments"), vec![id]);
    }

    #[tokio::test]
    async fn unknown_blog_is_not_found() {
        let app = TestApp::spawn().await;
        let user = app.create_user("Jane Roe").await;

        let res = app
            .post(
                routes::COMMENTS,
                &json!({"blog": unknown_id(), "content": "Nice post", "user": user}),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Blog not found");
        assert_eq!(app.get(&routes::user(&user)).await.ids("comments"), Vec::<String>::new());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let app = TestApp::spawn().await;
        let author = app.create_author("John Doe").await;
        let blog = app.create_blog(&author, "Hi There").await;

        let res = app
            .post(
                routes::COMMENTS,
                &json!({"blog": blog, "content": "Nice post", "user": unknown_id()}),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "User not found");
        assert_eq!(app.get(&routes::blog(&blog)).await.ids("comments"), Vec::<String>::new());
    }

    #[tokio::test]
    async fn missing_references_are_all_reported() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::COMMENTS, &json!({"content": "x"})).await;

        assert_eq!(res.status, 400);
        let messages: Vec<_> = res.body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["message"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            messages,
            [
                "Blog is a mandatory field",
                "Content must be at least 2 characters long",
                "User is a mandatory field",
            ]
        );
    }
}

mod comment_update {
    use super::*;

    #[tokio::test]
    async fn only_content_can_change() {
        let app = TestApp::spawn().await;
        let author = app.create_author("John Doe").await;
        let blog = app.create_blog(&author, "Hi There").await;
        let other_blog = app.create_blog(&author, "Elsewhere").await;
        let user = app.create_user("Jane Roe").await;
        let comment = app.create_comment(&blog, &user).await;

        let res = app
            .patch(
                &routes::comment(&comment),
                &json!({"content": "Edited", "blog": other_blog, "user": unknown_id()}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["content"], "Edited");
        assert_eq!(res.body["blog"], blog.as_str());
        assert_eq!(res.body["user"], user.as_str());
        assert_eq!(
            app.get(&routes::blog(&other_blog)).await.ids("comments"),
            Vec::<String>::new()
        );
    }

    #[tokio::test]
    async fn edit_is_committed() {
        let app = TestApp::spawn().await;
        let author = app.create_author("John Doe").await;
        let blog = app.create_blog(&author, "Hi There").await;
        let user = app.create_user("Jane Roe").await;
        let comment = app.create_comment(&blog, &user).await;

        let res = app
            .patch(&routes::comment(&comment), &json!({"content": "  Edited  "}))
            .await;
        assert_eq!(res.status, 200);

        let fetched = app.get(&routes::comment(&comment)).await;
        assert_eq!(fetched.body["content"], "Edited");

        let unchanged = app.patch(&routes::comment(&comment), &json!({})).await;
        assert_eq!(unchanged.status, 200);
        assert_eq!(unchanged.body["content"], "Edited");
    }

    #[tokio::test]
    async fn unknown_comment_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(&routes::comment(&unknown_id()), &json!({"content": "Edited"}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Cannot find comment");
    }
}

mod comment_deletion {
    use super::*;

    #[tokio::test]
    async fn delete_unlinks_from_blog_and_user() {
        let app = TestApp::spawn().await;
        let author = app.create_author("John Doe").await;
        let blog = app.create_blog(&author, "Hi There").await;
        let user = app.create_user("Jane Roe").await;
        let gone = app.create_comment(&blog, &user).await;
        let kept = app.create_comment(&blog, &user).await;

        let res = app.delete(&routes::comment(&gone)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "The comment has been deleted.");
        assert_eq!(app.get(&routes::comment(&gone)).await.status, 404);
        assert_eq!(app.get(&routes::blog(&blog)).await.ids("comments"), vec![kept.clone()]);
        assert_eq!(app.get(&routes::user(&user)).await.ids("comments"), vec![kept]);
    }
}
