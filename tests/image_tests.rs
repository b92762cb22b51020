mod common;

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use common::{
    as_user, count, create_user, json_uuid, multipart_post, upload_request, Fixture, PNG_1X1,
};
use imagestore::db::{AlbumRepository, ImageRepository};
use serde_json::Value;

#[actix_web::test]
async fn image_upload() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let req = as_user(test::TestRequest::get().uri("/upload"), "zeus").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let form: Value = test::read_body_json(resp).await;
    assert_eq!(form["enctype"], "multipart/form-data");
    assert_eq!(form["albums"].as_array().unwrap().len(), 1);

    let req = upload_request(
        "zeus",
        fx.album.id,
        &[("title", "test image"), ("description", "a test image")],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let image_id = json_uuid(&body["image"]["id"]);
    assert_eq!(body["image"]["title"], "test image");
    assert_eq!(body["image"]["width"], 1);
    assert_eq!(body["image"]["height"], 1);

    let detail_url = body["image"]["url"].as_str().unwrap().to_string();
    let resp = test::call_service(&app, test::TestRequest::get().uri(&detail_url).to_request())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: Value = test::read_body_json(resp).await;
    assert_eq!(json_uuid(&detail["image"]["id"]), image_id);
    assert_eq!(detail["album"]["name"], "test album");

    let file_url = body["image"]["file_url"].as_str().unwrap().to_string();
    let resp =
        test::call_service(&app, test::TestRequest::get().uri(&file_url).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let bytes = test::read_body(resp).await;
    assert_eq!(bytes.as_ref(), PNG_1X1);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/users/zeus").to_request()).await;
    let page: Value = test::read_body_json(resp).await;
    let listed = page["image_list"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(json_uuid(&listed[0]["id"]), image_id);

    let album = AlbumRepository::get_by_id(fx.pool(), fx.album.id).await.unwrap();
    assert_eq!(album.image_count, 1);
}

#[actix_web::test]
async fn upload_requires_an_image_and_an_owned_album() {
    let fx = Fixture::new().await;
    let bad = create_user(fx.pool(), "bad", false).await;
    let foreign = AlbumRepository::create_album(fx.pool(), bad.id, "bad album", true)
        .await
        .unwrap();
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let album = fx.album.id.to_string();
    let req = multipart_post("/upload", "zeus", &[("album", album.as_str())], None).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = multipart_post("/upload", "zeus", &[], Some(PNG_1X1)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = upload_request("zeus", foreign.id, &[]).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = multipart_post(
        "/upload",
        "zeus",
        &[("album", album.as_str())],
        Some(&b"definitely not an image"[..]),
    )
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    assert_eq!(count(fx.pool(), "SELECT COUNT(*) FROM images").await, 0);
    let stored = std::fs::read_dir(fx.media.path().join("images")).unwrap().count();
    assert_eq!(stored, 0);
}

#[actix_web::test]
async fn upload_requires_authentication() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let req = test::TestRequest::get().uri("/upload").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = upload_request("nobody", fx.album.id, &[]).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(count(fx.pool(), "SELECT COUNT(*) FROM images").await, 0);
}

#[actix_web::test]
async fn image_tagging() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let req = upload_request("zeus", fx.album.id, &[("tags", "one, tow, three")]).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["image"]["tags"],
        serde_json::json!(["one", "three", "tow"])
    );

    let req = upload_request("zeus", fx.album.id, &[("tags", "tow")]).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/tags/one").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Value = test::read_body_json(resp).await;
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["image_list"].as_array().unwrap().len(), 1);

    let listing: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/tags/tow").to_request(),
    )
    .await;
    assert_eq!(listing["count"], 2);

    let listing: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/tags/unused").to_request(),
    )
    .await;
    assert_eq!(listing["count"], 0);
}

#[actix_web::test]
async fn tag_listing_hides_private_albums() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let req = upload_request("zeus", fx.album.id, &[("tags", "secret")]).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    AlbumRepository::update_album(fx.pool(), fx.album.id, &fx.album.name, false, None)
        .await
        .unwrap();

    let listing: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/tags/secret").to_request(),
    )
    .await;
    assert_eq!(listing["count"], 0);

    let listing: Value = test::call_and_read_body_json(
        &app,
        as_user(test::TestRequest::get().uri("/tags/secret"), "zeus").to_request(),
    )
    .await;
    assert_eq!(listing["count"], 1);
}

#[actix_web::test]
async fn image_delete() {
    let fx = Fixture::new().await;
    create_user(fx.pool(), "bad", false).await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let body: Value =
        test::call_and_read_body_json(&app, upload_request("zeus", fx.album.id, &[("tags", "x")]).to_request())
            .await;
    let delete_url = format!("{}/delete", body["image"]["url"].as_str().unwrap());
    assert_eq!(count(fx.pool(), "SELECT COUNT(*) FROM images").await, 1);

    let req = as_user(test::TestRequest::post().uri(&delete_url), "bad").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(count(fx.pool(), "SELECT COUNT(*) FROM images").await, 1);

    let req = test::TestRequest::post().uri(&delete_url).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = as_user(test::TestRequest::post().uri(&delete_url), "zeus").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["redirect"], "/users/zeus");

    assert_eq!(count(fx.pool(), "SELECT COUNT(*) FROM images").await, 0);
    assert_eq!(count(fx.pool(), "SELECT COUNT(*) FROM image_tags").await, 0);
    let stored = std::fs::read_dir(fx.media.path().join("images")).unwrap().count();
    assert_eq!(stored, 0);
}

#[actix_web::test]
async fn deleting_the_cover_image_clears_album_head() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let body: Value =
        test::call_and_read_body_json(&app, upload_request("zeus", fx.album.id, &[]).to_request())
            .await;
    let image_id = json_uuid(&body["image"]["id"]);
    AlbumRepository::update_album(fx.pool(), fx.album.id, "test album", true, Some(image_id))
        .await
        .unwrap();

    let delete_url = format!("/images/{}/delete", image_id);
    let req = as_user(test::TestRequest::post().uri(&delete_url), "zeus").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let album = AlbumRepository::get_by_id(fx.pool(), fx.album.id).await.unwrap();
    assert_eq!(album.head_id, None);
}

#[actix_web::test]
async fn image_update() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let body: Value = test::call_and_read_body_json(
        &app,
        upload_request("zeus", fx.album.id, &[("title", "before"), ("tags", "a, b")])
            .to_request(),
    )
    .await;
    let image_id = json_uuid(&body["image"]["id"]);
    let update_url = format!("/images/{}/update", image_id);

    let req = as_user(test::TestRequest::get().uri(&update_url), "zeus").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let form: Value = test::read_body_json(resp).await;
    assert_eq!(form["fields"]["title"], "before");
    assert_eq!(form["fields"]["tags"], "a, b");

    let req = multipart_post(&update_url, "zeus", &[("title", "test title update")], None)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["image"]["title"], "test title update");

    let image = ImageRepository::get_by_id(fx.pool(), image_id).await.unwrap();
    assert_eq!(image.title, "test title update");
    assert_eq!(image.tags, vec!["a", "b"]);
    assert_eq!(image.album_id, fx.album.id);
}

#[actix_web::test]
async fn image_update_moves_between_owned_albums_only() {
    let fx = Fixture::new().await;
    let bad = create_user(fx.pool(), "bad", false).await;
    let second = AlbumRepository::create_album(fx.pool(), fx.user.id, "second", true)
        .await
        .unwrap();
    let foreign = AlbumRepository::create_album(fx.pool(), bad.id, "bad album", true)
        .await
        .unwrap();
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let body: Value =
        test::call_and_read_body_json(&app, upload_request("zeus", fx.album.id, &[]).to_request())
            .await;
    let image_id = json_uuid(&body["image"]["id"]);
    let update_url = format!("/images/{}/update", image_id);

    let foreign_id = foreign.id.to_string();
    let req = multipart_post(&update_url, "zeus", &[("album", foreign_id.as_str())], None)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let second_id = second.id.to_string();
    let req = multipart_post(&update_url, "zeus", &[("album", second_id.as_str())], None)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let image = ImageRepository::get_by_id(fx.pool(), image_id).await.unwrap();
    assert_eq!(image.album_id, second.id);
}

#[actix_web::test]
async fn image_update_replaces_the_stored_file() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let body: Value =
        test::call_and_read_body_json(&app, upload_request("zeus", fx.album.id, &[]).to_request())
            .await;
    let image_id = json_uuid(&body["image"]["id"]);
    let before = ImageRepository::get_by_id(fx.pool(), image_id).await.unwrap();

    let update_url = format!("/images/{}/update", image_id);
    let req = multipart_post(&update_url, "zeus", &[], Some(PNG_1X1)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let after = ImageRepository::get_by_id(fx.pool(), image_id).await.unwrap();
    assert_ne!(before.file_path, after.file_path);
    assert!(!fx.media.path().join(&before.file_path).exists());
    assert!(fx.media.path().join(&after.file_path).exists());
}

#[actix_web::test]
async fn non_owner_cannot_edit_image() {
    let fx = Fixture::new().await;
    create_user(fx.pool(), "bad", false).await;
    create_user(fx.pool(), "root", true).await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let body: Value = test::call_and_read_body_json(
        &app,
        upload_request("zeus", fx.album.id, &[("title", "mine")]).to_request(),
    )
    .await;
    let image_id = json_uuid(&body["image"]["id"]);
    let update_url = format!("/images/{}/update", image_id);

    let req = as_user(test::TestRequest::get().uri(&update_url), "bad").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = multipart_post(&update_url, "bad", &[("title", "stolen")], None).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = multipart_post(&update_url, "root", &[("title", "moderated")], None).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let image = ImageRepository::get_by_id(fx.pool(), image_id).await.unwrap();
    assert_eq!(image.title, "moderated");
    assert_eq!(image.user_id, fx.user.id);
}

#[actix_web::test]
async fn image_neighbours_follow_album_order() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let mut urls = Vec::new();
    for _ in 0..3 {
        let body: Value = test::call_and_read_body_json(
            &app,
            upload_request("zeus", fx.album.id, &[]).to_request(),
        )
        .await;
        urls.push(body["image"]["url"].as_str().unwrap().to_string());
    }

    let detail: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(&urls[1]).to_request())
            .await;
    assert_eq!(detail["previous"], urls[0].as_str());
    assert_eq!(detail["next"], urls[2].as_str());

    let detail: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(&urls[0]).to_request())
            .await;
    assert!(detail["previous"].is_null());
    assert_eq!(detail["next"], urls[1].as_str());
}

#[actix_web::test]
async fn private_images_are_forbidden_and_hidden() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let body: Value =
        test::call_and_read_body_json(&app, upload_request("zeus", fx.album.id, &[]).to_request())
            .await;
    let url = body["image"]["url"].as_str().unwrap().to_string();
    let file_url = body["image"]["file_url"].as_str().unwrap().to_string();
    AlbumRepository::update_album(fx.pool(), fx.album.id, &fx.album.name, false, None)
        .await
        .unwrap();

    let resp = test::call_service(&app, test::TestRequest::get().uri(&url).to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp =
        test::call_service(&app, test::TestRequest::get().uri(&file_url).to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let index: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(index["total_count"], 0);

    let index: Value = test::call_and_read_body_json(
        &app,
        as_user(test::TestRequest::get().uri("/"), "zeus").to_request(),
    )
    .await;
    assert_eq!(index["total_count"], 1);

    let req = as_user(test::TestRequest::get().uri(&url), "zeus").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn index_paginates_newest_first() {
    let fx = Fixture::new().await;
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        let body: Value = test::call_and_read_body_json(
            &app,
            upload_request("zeus", fx.album.id, &[]).to_request(),
        )
        .await;
        ids.push(json_uuid(&body["image"]["id"]));
    }

    let page: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/?page=1&limit=2").to_request(),
    )
    .await;
    assert_eq!(page["total_count"], 3);
    assert_eq!(page["has_more"], true);
    let listed = page["image_list"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(json_uuid(&listed[0]["id"]), ids[2]);

    let page: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/?page=2&limit=2").to_request(),
    )
    .await;
    assert_eq!(page["has_more"], false);
    assert_eq!(json_uuid(&page["image_list"][0]["id"]), ids[0]);
}

#[actix_web::test]
async fn superuser_edit_form_offers_the_uploaders_albums() {
    let fx = Fixture::new().await;
    let root = create_user(fx.pool(), "root", true).await;
    AlbumRepository::create_album(fx.pool(), root.id, "root album", true)
        .await
        .unwrap();
    let app = test::init_service(App::new().configure(|cfg| fx.state.clone().configure(cfg))).await;

    let body: Value =
        test::call_and_read_body_json(&app, upload_request("zeus", fx.album.id, &[]).to_request())
            .await;
    let update_url = format!("/images/{}/update", body["image"]["id"].as_str().unwrap());

    let req = as_user(test::TestRequest::get().uri(&update_url), "root").to_request();
    let form: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json_uuid(&form["fields"]["album"]), fx.album.id);
    let choices = form["albums"].as_array().unwrap();
    assert_eq!(choices.len(), 1);
    assert_eq!(json_uuid(&choices[0]["id"]), fx.album.id);

    let album = choices[0]["id"].as_str().unwrap().to_string();
    let req = multipart_post(&update_url, "root", &[("album", album.as_str())], None).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
