mod common;

use atelier_core::database::ports::LikeRepository;
use axum::http::StatusCode;
use common::{admin_token, body_json, build_test_app, create_image, get, member_token, post};
use uuid::Uuid;

#[tokio::test]
async fn toggling_requires_authentication() {
    let app = build_test_app();
    let id = create_image(&app, &member_token(Uuid::new_v4()), "Art", "a.png", 64).await;

    let response = app
        .send(post(&format!("/api/v1/images/{id}/like"), None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn toggle_flips_count_and_state() {
    let app = build_test_app();
    let id = create_image(&app, &member_token(Uuid::new_v4()), "Art", "a.png", 64).await;
    let liker = member_token(Uuid::new_v4());

    let response = app
        .send(post(&format!("/api/v1/images/{id}/like"), Some(&liker)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["likeCount"], serde_json::json!(1));
    assert_eq!(body["isLiked"], serde_json::json!(true));

    let response = app
        .send(post(&format!("/api/v1/images/{id}/like"), Some(&liker)))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["likeCount"], serde_json::json!(0));
    assert_eq!(body["isLiked"], serde_json::json!(false));
}

#[tokio::test]
async fn counter_matches_like_rows_across_users() {
    let app = build_test_app();
    let id = create_image(&app, &member_token(Uuid::new_v4()), "Hit", "h.png", 64).await;

    for _ in 0..3 {
        let response = app
            .send(post(
                &format!("/api/v1/images/{id}/like"),
                Some(&member_token(Uuid::new_v4())),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .send(get(&format!("/api/v1/images/{id}"), Some(&admin_token(Uuid::new_v4()))))
        .await;
    let details = body_json(response).await;
    assert_eq!(details["likeCount"], serde_json::json!(3));
    assert_eq!(details["likes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn toggling_a_missing_image_is_not_found() {
    let app = build_test_app();
    let response = app
        .send(post(
            &format!("/api/v1/images/{}/like", Uuid::new_v4()),
            Some(&member_token(Uuid::new_v4())),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn liked_lookup_is_false_for_anonymous_callers() {
    let app = build_test_app();
    let id = create_image(&app, &member_token(Uuid::new_v4()), "Art", "a.png", 64).await;
    let liker = member_token(Uuid::new_v4());

    app.send(post(&format!("/api/v1/images/{id}/like"), Some(&liker)))
        .await;

    // Like rows exist, but anonymous callers still read false.
    let response = app
        .send(get(&format!("/api/v1/images/{id}/liked"), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "isLiked": false })
    );

    let response = app
        .send(get(&format!("/api/v1/images/{id}/liked"), Some(&liker)))
        .await;
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "isLiked": true })
    );
}

/// The end-to-end walk: create, like, unlike, admin delete, gone.
#[tokio::test]
async fn gallery_lifecycle_scenario() {
    let app = build_test_app();
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    let token_a = member_token(user_a);
    let token_b = member_token(user_b);
    let admin = admin_token(Uuid::new_v4());

    // User A uploads a 2 MiB jpg.
    let id = create_image(&app, &token_a, "Scan1", "scan1.jpg", 2 * 1024 * 1024).await;
    let listed = body_json(app.send(get("/api/v1/images", None)).await).await;
    assert_eq!(listed[0]["likeCount"], serde_json::json!(0));

    // User B likes it, then changes their mind.
    let on = body_json(
        app.send(post(&format!("/api/v1/images/{id}/like"), Some(&token_b)))
            .await,
    )
    .await;
    assert_eq!(on["likeCount"], serde_json::json!(1));
    assert_eq!(on["isLiked"], serde_json::json!(true));

    let off = body_json(
        app.send(post(&format!("/api/v1/images/{id}/like"), Some(&token_b)))
            .await,
    )
    .await;
    assert_eq!(off["likeCount"], serde_json::json!(0));
    assert_eq!(off["isLiked"], serde_json::json!(false));

    // One more like so the delete has a cascade to perform.
    app.send(post(&format!("/api/v1/images/{id}/like"), Some(&token_b)))
        .await;

    let response = app
        .send(post(&format!("/api/v1/images/{id}/delete"), Some(&admin)))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.send(get(&format!("/api/v1/images/{id}"), Some(&admin))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // B's like rows went away with the image.
    assert!(app.store.list_for_image(id).await.unwrap().is_empty());
    assert!(!app.store.is_liked(id, user_b).await.unwrap());
}
