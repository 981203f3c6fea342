use serde_json::json;

use crate::common::{TestApp, routes, unknown_id};

mod author_creation {
    use super::*;

    #[tokio::test]
    async fn valid_author_is_created_with_no_blogs() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::AUTHORS,
                &json!({"full_name": "John Doe", "email": "john@x.com"}),
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["full_name"], "John Doe");
        assert_eq!(res.body["email"], "john@x.com");
        assert!(res.body["id"].is_string());
        assert_eq!(res.body["blogs"], json!([]));
    }

    #[tokio::test]
    async fn short_full_name_is_rejected_and_nothing_is_stored() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::AUTHORS,
                &json!({"full_name": "Jo", "email": "john@x.com"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(
            res.body["message"]
                .as_str()
                .unwrap()
                .contains("at least 3 characters")
        );
        assert_eq!(res.body["errors"][0]["field"], "full_name");

        let list = app.get(routes::AUTHORS).await;
        assert_eq!(list.body, json!([]));
    }

    #[tokio::test]
    async fn every_violation_is_reported() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::AUTHORS, &json!({"email": "not-an-email"})).await;

        assert_eq!(res.status, 400);
        let errors = res.body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["message"], "Full name is a mandatory field");
        assert_eq!(errors[1]["message"], "Email must be a valid email address");
    }

    #[tokio::test]
    async fn client_supplied_id_and_blogs_are_ignored() {
        let app = TestApp::spawn().await;
        let forged = unknown_id();

        let res = app
            .post(
                routes::AUTHORS,
                &json!({
                    "id": forged,
                    "full_name": "John Doe",
                    "email": "john@x.com",
                    "blogs": [unknown_id()],
                }),
            )
            .await;

        assert_eq!(res.status, 201);
        assert_ne!(res.id(), forged);
        assert_eq!(res.body["blogs"], json!([]));
    }

    #[tokio::test]
    async fn non_object_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::AUTHORS, &json!(["John Doe"])).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod author_retrieval {
    use super::*;

    #[tokio::test]
    async fn list_returns_every_author_with_blog_ids() {
        let app = TestApp::spawn().await;
        let a = app.create_author("Ada Lovelace").await;
        let b = app.create_author("Alan Turing").await;
        let blog = app.create_blog(&a, "Notes").await;

        let res = app.get(routes::AUTHORS).await;

        assert_eq!(res.status, 200);
        let authors = res.body.as_array().unwrap();
        assert_eq!(authors.len(), 2);
        let first = authors.iter().find(|x| x["id"] == a.as_str()).unwrap();
        let second = authors.iter().find(|x| x["id"] == b.as_str()).unwrap();
        assert_eq!(first["blogs"], json!([blog]));
        assert_eq!(second["blogs"], json!([]));
    }

    #[tokio::test]
    async fn unknown_author_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::author(&unknown_id())).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Cannot find the author");
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::author("652166667828332c4baf5d6a")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod author_update {
    use super::*;

    #[tokio::test]
    async fn patch_changes_only_given_fields() {
        let app = TestApp::spawn().await;
        let id = app.create_author("John Doe").await;

        let res = app
            .patch(&routes::author(&id), &json!({"full_name": "Johnny Doe"}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["full_name"], "Johnny Doe");
        assert_eq!(res.body["email"], "author@example.com");
    }

    #[tokio::test]
    async fn patch_never_touches_id_or_blogs() {
        let app = TestApp::spawn().await;
        let id = app.create_author("John Doe").await;
        let blog = app.create_blog(&id, "First post").await;

        let res = app
            .patch(
                &routes::author(&id),
                &json!({"id": unknown_id(), "blogs": [], "email": "new@x.com"}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.id(), id);
        assert_eq!(res.body["email"], "new@x.com");
        assert_eq!(res.ids("blogs"), vec![blog]);
    }

    #[tokio::test]
    async fn patch_with_bad_email_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_author("John Doe").await;

        let res = app.patch(&routes::author(&id), &json!({"email": "nope"})).await;

        assert_eq!(res.status, 400);
        let fetched = app.get(&routes::author(&id)).await;
        assert_eq!(fetched.body["email"], "author@example.com");
    }

    #[tokio::test]
    async fn empty_patch_returns_current_author() {
        let app = TestApp::spawn().await;
        let id = app.create_author("John Doe").await;

        let res = app.patch(&routes::author(&id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["full_name"], "John Doe");
    }

    #[tokio::test]
    async fn patch_of_unknown_author_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(&routes::author(&unknown_id()), &json!({"full_name": "Nobody"}))
            .await;

        assert_eq!(res.status, 404);
    }
}

mod author_deletion {
    use super::*;

    #[tokio::test]
    async fn delete_confirms_and_removes_the_author() {
        let app = TestApp::spawn().await;
        let id = app.create_author("John Doe").await;

        let res = app.delete(&routes::author(&id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Author has been deleted");
        assert_eq!(app.get(&routes::author(&id)).await.status, 404);
    }

    #[tokio::test]
    async fn delete_of_unknown_author_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::author(&unknown_id())).await;

        assert_eq!(res.status, 404);
    }
}
