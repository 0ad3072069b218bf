mod common;

use actix_web::{HttpRequest, HttpResponse, web};
use common::spawn_backend;
use infra_site_gateway::{
    config::{DirectusAuth, DirectusConfig},
    services::{
        DirectusClient, DirectusError, MemberSlugRow, SlugAudit, SlugStore, run_slug_enforcement,
    },
};
use serde_json::{Value, json};
use std::{
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

#[derive(Default)]
struct InMemoryStore {
    rows: Mutex<Vec<MemberSlugRow>>,
    patches: Mutex<Vec<(String, String)>>,
    constrained: AtomicBool,
    fail_on_id: Option<String>,
}

impl InMemoryStore {
    fn with_rows(rows: &[(&str, Option<&str>, Option<&str>)]) -> Self {
        Self {
            rows: Mutex::new(
                rows.iter()
                    .map(|(id, slug, name)| MemberSlugRow {
                        id: id.to_string(),
                        slug: slug.map(str::to_string),
                        name: name.map(str::to_string),
                    })
                    .collect(),
            ),
            ..Self::default()
        }
    }

    fn slugs(&self) -> Vec<Option<String>> {
        self.rows.lock().unwrap().iter().map(|r| r.slug.clone()).collect()
    }

    fn patched_ids(&self) -> Vec<String> {
        self.patches.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
    }
}

impl SlugStore for InMemoryStore {
    fn list_members(&self) -> impl Future<Output = Result<Vec<MemberSlugRow>, DirectusError>> + Send {
        async move { Ok(self.rows.lock().unwrap().clone()) }
    }

    fn update_slug(&self, id: &str, slug: &str) -> impl Future<Output = Result<(), DirectusError>> + Send {
        let (id, slug) = (id.to_string(), slug.to_string());
        async move {
            if self.fail_on_id.as_deref() == Some(id.as_str()) {
                return Err(DirectusError::Status {
                    path: format!("/items/members/{id}"),
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
                row.slug = Some(slug.clone());
            }
            self.patches.lock().unwrap().push((id, slug));
            Ok(())
        }
    }

    fn enforce_unique_slugs(&self) -> impl Future<Output = Result<(), DirectusError>> + Send {
        async move {
            self.constrained.store(true, Ordering::SeqCst);
            Ok(())
        }
    }
}

fn sample_rows() -> InMemoryStore {
    InMemoryStore::with_rows(&[
        ("1", Some("kim"), Some("Kim")),
        ("2", None, Some("Kim")),
        ("3", Some(""), Some("박 지 성")),
        ("4", Some("Lee Dev"), None),
        ("5", None, None),
    ])
}

#[tokio::test]
async fn test_enforcement_fixes_empty_and_duplicate_slugs() {
    let store = sample_rows();
    let report = run_slug_enforcement(&store).await.unwrap();

    assert_eq!(report.before, SlugAudit { total: 5, empty: 3, duplicates: 0 });
    assert_eq!(report.after, SlugAudit { total: 5, empty: 0, duplicates: 0 });
    assert_eq!(report.updated, 4);
    assert_eq!(store.patched_ids(), vec!["2", "3", "4", "5"]);
    assert_eq!(
        store.slugs(),
        vec![
            Some("kim".to_string()),
            Some("kim-2".to_string()),
            Some("박-지-성".to_string()),
            Some("lee-dev".to_string()),
            Some("5".to_string()),
        ]
    );
    assert!(store.constrained.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_enforcement_is_idempotent() {
    let store = sample_rows();
    run_slug_enforcement(&store).await.unwrap();
    store.patches.lock().unwrap().clear();

    let second = run_slug_enforcement(&store).await.unwrap();
    assert_eq!(second.updated, 0);
    assert!(store.patched_ids().is_empty());
}

#[tokio::test]
async fn test_enforcement_aborts_on_first_failure() {
    let store = InMemoryStore {
        fail_on_id: Some("3".to_string()),
        ..sample_rows()
    };

    let err = run_slug_enforcement(&store).await.unwrap_err();
    assert!(matches!(err, DirectusError::Status { status: 500, .. }));
    assert_eq!(store.patched_ids(), vec!["2"]);
    assert!(!store.constrained.load(Ordering::SeqCst));
}

const TOKEN: &str = "issued-token";

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer issued-token")
}

#[actix_web::test]
async fn test_directus_client_end_to_end() {
    let rows = Arc::new(Mutex::new(vec![
        json!({ "id": 1, "slug": "kim", "name": "Kim" }),
        json!({ "id": 2, "slug": "kim", "name": "Kim" }),
        json!({ "id": 3, "slug": null, "name": "Lee" }),
    ]));
    let schema = Arc::new(Mutex::new(Value::Null));

    let backend = spawn_backend({
        let rows = Arc::clone(&rows);
        let schema = Arc::clone(&schema);
        move |cfg| {
            let list_rows = Arc::clone(&rows);
            let patch_rows = Arc::clone(&rows);
            let schema = Arc::clone(&schema);
            cfg.route(
                "/auth/login",
                web::post().to(|body: web::Json<Value>| async move {
                    if body["email"] == "admin@example.com" && body["password"] == "pw" {
                        HttpResponse::Ok().json(json!({ "data": { "access_token": TOKEN } }))
                    } else {
                        HttpResponse::Unauthorized().json(json!({ "errors": [{ "message": "Invalid credentials" }] }))
                    }
                }),
            )
            .route(
                "/items/members",
                web::get().to(move |req: HttpRequest| {
                    let rows = Arc::clone(&list_rows);
                    async move {
                        if !authorized(&req) || req.query_string() != "fields=id%2Cslug%2Cname&limit=-1" {
                            return HttpResponse::Forbidden().finish();
                        }
                        HttpResponse::Ok().json(json!({ "data": rows.lock().unwrap().clone() }))
                    }
                }),
            )
            .route(
                "/items/members/{id}",
                web::patch().to(move |req: HttpRequest, body: web::Json<Value>| {
                    let rows = Arc::clone(&patch_rows);
                    async move {
                        if !authorized(&req) {
                            return HttpResponse::Forbidden().finish();
                        }
                        let id: i64 = req.match_info().get("id").unwrap().parse().unwrap();
                        for row in rows.lock().unwrap().iter_mut() {
                            if row["id"] == id {
                                row["slug"] = body["slug"].clone();
                            }
                        }
                        HttpResponse::NoContent().finish()
                    }
                }),
            )
            .route(
                "/fields/members/slug",
                web::patch().to(move |req: HttpRequest, body: web::Json<Value>| {
                    let schema = Arc::clone(&schema);
                    async move {
                        if !authorized(&req) {
                            return HttpResponse::Forbidden().finish();
                        }
                        *schema.lock().unwrap() = body.into_inner();
                        HttpResponse::Ok().json(json!({ "data": {} }))
                    }
                }),
            );
        }
    });

    let config = DirectusConfig {
        base_url: backend.url.clone(),
        auth: DirectusAuth::Credentials {
            email: "admin@example.com".to_string(),
            password: "pw".to_string(),
        },
        request_timeout_seconds: 5,
    };
    let client = DirectusClient::connect(&config).await.unwrap();
    let report = run_slug_enforcement(&client).await.unwrap();

    assert_eq!(report.before, SlugAudit { total: 3, empty: 1, duplicates: 1 });
    assert_eq!(report.after, SlugAudit { total: 3, empty: 0, duplicates: 0 });
    assert_eq!(report.updated, 2);

    let slugs: Vec<Value> = rows.lock().unwrap().iter().map(|r| r["slug"].clone()).collect();
    assert_eq!(slugs, vec![json!("kim"), json!("kim-2"), json!("lee")]);
    assert_eq!(
        *schema.lock().unwrap(),
        json!({
            "meta": { "required": true },
            "schema": { "is_unique": true, "is_nullable": false }
        })
    );

    let bad_login = DirectusConfig {
        auth: DirectusAuth::Credentials {
            email: "admin@example.com".to_string(),
            password: "wrong".to_string(),
        },
        ..config
    };
    match DirectusClient::connect(&bad_login).await {
        Err(DirectusError::Status { status: 401, message, .. }) => {
            assert_eq!(message, "Invalid credentials")
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("login with a wrong password succeeded"),
    }
}
