//! Integration tests for the GraphQL API
//!
//! These tests drive the full schema (resolvers, services, repositories)
//! against an in-memory SQLite database:
//! - signup/login outcomes and their error taxonomy
//! - resume insert-and-repoint semantics
//! - list queries and nested relationship expansion

use async_graphql::Request;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use pretty_assertions::assert_eq;
use serde_json::Value;

use talentnet::db::{CreateComment, CreateJobPosting, CreatePost, Database};
use talentnet::graphql::{AuthUser, TalentNetSchema, build_schema};
use talentnet::services::{AccessTokenClaims, jwt_secret_from_env};

async fn test_schema() -> (TalentNetSchema, Database) {
    let db = Database::connect_in_memory().await.unwrap();
    (build_schema(db.clone()), db)
}

/// Execute a query without auth context and return the data as JSON
async fn execute(schema: &TalentNetSchema, query: &str) -> Value {
    let resp = schema.execute(query).await;
    assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
    resp.data.into_json().unwrap()
}

/// Execute a query with an authenticated user attached to the request
async fn execute_as(schema: &TalentNetSchema, user: &AuthUser, query: &str) -> Value {
    let resp = schema.execute(Request::new(query).data(user.clone())).await;
    assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
    resp.data.into_json().unwrap()
}

const ADA_SIGNUP: &str = r#"
    mutation {
        addUser(input: {
            username: "ada",
            email: "ada@example.com",
            password: "hunter2",
            firstName: "Ada",
            lastName: "Lovelace"
        }) {
            success
            token
            error
            user { id username email password }
        }
    }
"#;

/// Sign up "ada" and return her auth context
async fn signup_ada(schema: &TalentNetSchema) -> AuthUser {
    let data = execute(schema, ADA_SIGNUP).await;
    let user = &data["addUser"]["user"];
    AuthUser {
        user_id: user["id"].as_str().unwrap().to_string(),
        username: user["username"].as_str().unwrap().to_string(),
        email: user["email"].as_str().unwrap().to_string(),
    }
}

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn add_user_returns_token_and_hashed_password() {
    let (schema, _db) = test_schema().await;

    let data = execute(&schema, ADA_SIGNUP).await;
    let payload = &data["addUser"];

    assert_eq!(payload["success"], Value::Bool(true));
    assert_eq!(payload["error"], Value::Null);
    assert!(!payload["token"].as_str().unwrap().is_empty());
    assert_eq!(payload["user"]["username"], "ada");
    assert_eq!(payload["user"]["email"], "ada@example.com");
    // Only the hash is ever stored or returned
    assert_ne!(payload["user"]["password"], "hunter2");
}

#[tokio::test]
async fn add_user_rejects_duplicate_username() {
    let (schema, _db) = test_schema().await;
    execute(&schema, ADA_SIGNUP).await;

    let data = execute(
        &schema,
        r#"
        mutation {
            addUser(input: {
                username: "ada",
                email: "other@example.com",
                password: "pw",
                firstName: "Other",
                lastName: "Person"
            }) { success token error }
        }
        "#,
    )
    .await;
    let payload = &data["addUser"];

    assert_eq!(payload["success"], Value::Bool(false));
    assert_eq!(payload["token"], Value::Null);
    assert_eq!(payload["error"], "Username is already taken");
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_unknown_email_reports_no_user() {
    let (schema, _db) = test_schema().await;
    execute(&schema, ADA_SIGNUP).await;

    let data = execute(
        &schema,
        r#"
        mutation {
            login(input: { email: "nobody@example.com", password: "hunter2" }) {
                success token error
            }
        }
        "#,
    )
    .await;
    let payload = &data["login"];

    assert_eq!(payload["success"], Value::Bool(false));
    assert_eq!(payload["token"], Value::Null);
    assert_eq!(payload["error"], "No user found with this email address");
}

#[tokio::test]
async fn login_wrong_password_reports_incorrect_credentials() {
    let (schema, _db) = test_schema().await;
    execute(&schema, ADA_SIGNUP).await;

    let data = execute(
        &schema,
        r#"
        mutation {
            login(input: { email: "ada@example.com", password: "wrong" }) {
                success token error
            }
        }
        "#,
    )
    .await;
    let payload = &data["login"];

    assert_eq!(payload["success"], Value::Bool(false));
    assert_eq!(payload["token"], Value::Null);
    assert_eq!(payload["error"], "Incorrect credentials");
}

#[tokio::test]
async fn login_token_carries_signup_identity() {
    let (schema, _db) = test_schema().await;
    let ada = signup_ada(&schema).await;

    let data = execute(
        &schema,
        r#"
        mutation {
            login(input: { email: "ada@example.com", password: "hunter2" }) {
                success token error
            }
        }
        "#,
    )
    .await;
    let payload = &data["login"];
    assert_eq!(payload["success"], Value::Bool(true));

    let token = payload["token"].as_str().unwrap();
    let claims = decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret_from_env().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap()
    .claims;

    assert_eq!(claims.sub, ada.user_id);
    assert_eq!(claims.username, "ada");
}

// ============================================================================
// updateResume
// ============================================================================

const RESUME_MUTATION: &str = r#"
    mutation {
        updateResume(input: {
            fullName: "Ada Lovelace",
            skills: "Rust, SQL",
            previousJobs: [{ title: "Engineer", company: "Analytical Engines Ltd" }]
        }) {
            success
            error
            resume { id fullName skills previousJobs { title company } }
            user { id }
        }
    }
"#;

#[tokio::test]
async fn update_resume_without_auth_writes_nothing() {
    let (schema, db) = test_schema().await;
    execute(&schema, ADA_SIGNUP).await;

    // No auth context attached - must fail without throwing
    let data = execute(&schema, RESUME_MUTATION).await;
    let payload = &data["updateResume"];

    assert_eq!(payload["success"], Value::Bool(false));
    assert_eq!(payload["error"], "Authentication required");
    assert_eq!(payload["resume"], Value::Null);
    assert_eq!(db.resumes().count().await.unwrap(), 0);
}

#[tokio::test]
async fn update_resume_creates_and_repoints() {
    let (schema, db) = test_schema().await;
    let ada = signup_ada(&schema).await;

    let data = execute_as(&schema, &ada, RESUME_MUTATION).await;
    let payload = &data["updateResume"];

    assert_eq!(payload["success"], Value::Bool(true));
    assert_eq!(payload["resume"]["fullName"], "Ada Lovelace");
    assert_eq!(payload["resume"]["previousJobs"][0]["title"], "Engineer");
    assert_eq!(payload["user"]["id"], Value::String(ada.user_id.clone()));
    assert_eq!(db.resumes().count().await.unwrap(), 1);

    let resume_id = payload["resume"]["id"].as_str().unwrap().to_string();
    let stored = db.users().get_by_id(&ada.user_id).await.unwrap().unwrap();
    assert_eq!(stored.resume_id.as_deref(), Some(resume_id.as_str()));
}

#[tokio::test]
async fn update_resume_twice_orphans_the_first() {
    let (schema, db) = test_schema().await;
    let ada = signup_ada(&schema).await;

    let first = execute_as(&schema, &ada, RESUME_MUTATION).await;
    let first_id = first["updateResume"]["resume"]["id"].as_str().unwrap().to_string();

    let second = execute_as(&schema, &ada, RESUME_MUTATION).await;
    let second_id = second["updateResume"]["resume"]["id"].as_str().unwrap().to_string();

    // Two rows exist; the reference follows the newest one
    assert_ne!(first_id, second_id);
    assert_eq!(db.resumes().count().await.unwrap(), 2);

    let stored = db.users().get_by_id(&ada.user_id).await.unwrap().unwrap();
    assert_eq!(stored.resume_id.as_deref(), Some(second_id.as_str()));

    // The orphaned row is still readable
    assert!(db.resumes().get_by_id(&first_id).await.unwrap().is_some());
}

#[tokio::test]
async fn update_resume_rejects_more_than_three_jobs() {
    let (schema, db) = test_schema().await;
    let ada = signup_ada(&schema).await;

    let data = execute_as(
        &schema,
        &ada,
        r#"
        mutation {
            updateResume(input: {
                previousJobs: [
                    { title: "One" }, { title: "Two" }, { title: "Three" }, { title: "Four" }
                ]
            }) { success error }
        }
        "#,
    )
    .await;
    let payload = &data["updateResume"];

    assert_eq!(payload["success"], Value::Bool(false));
    assert_eq!(payload["error"], "A resume lists at most 3 previous jobs");
    assert_eq!(db.resumes().count().await.unwrap(), 0);
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn list_queries_return_empty_pages_on_empty_store() {
    let (schema, _db) = test_schema().await;

    let data = execute(
        &schema,
        r#"
        {
            users { items { id } totalCount hasMore }
            posts { items { id } totalCount hasMore }
            comments { items { id } totalCount hasMore }
            jobPostings { items { id } totalCount hasMore }
        }
        "#,
    )
    .await;

    for field in ["users", "posts", "comments", "jobPostings"] {
        assert_eq!(data[field]["items"], serde_json::json!([]), "{}", field);
        assert_eq!(data[field]["totalCount"], 0, "{}", field);
        assert_eq!(data[field]["hasMore"], Value::Bool(false), "{}", field);
    }
}

#[tokio::test]
async fn my_user_requires_auth() {
    let (schema, _db) = test_schema().await;
    execute(&schema, ADA_SIGNUP).await;

    let resp = schema.execute("{ myUser { username } }").await;
    assert_eq!(resp.errors.len(), 1);
    assert_eq!(resp.errors[0].message, "Authentication required");
}

#[tokio::test]
async fn my_user_resolves_from_auth_context() {
    let (schema, _db) = test_schema().await;
    let ada = signup_ada(&schema).await;

    let data = execute_as(&schema, &ada, "{ myUser { id username email } }").await;
    assert_eq!(data["myUser"]["id"], Value::String(ada.user_id.clone()));
    assert_eq!(data["myUser"]["username"], "ada");
}

#[tokio::test]
async fn user_query_expands_relationships() {
    let (schema, db) = test_schema().await;
    let ada = signup_ada(&schema).await;

    let post = db
        .posts()
        .create(CreatePost {
            title: "Looking for work".to_string(),
            body: "Open to backend roles".to_string(),
            username: ada.username.clone(),
            author_id: ada.user_id.clone(),
        })
        .await
        .unwrap();
    db.comments()
        .create(CreateComment {
            comment: "Good luck!".to_string(),
            author: ada.username.clone(),
            author_id: ada.user_id.clone(),
            post_id: Some(post.id.clone()),
            job_posting_id: None,
        })
        .await
        .unwrap();
    let job = db
        .job_postings()
        .create(CreateJobPosting {
            title: "Backend engineer".to_string(),
            body: "Build APIs".to_string(),
            username: ada.username.clone(),
            author_id: ada.user_id.clone(),
            keywords: vec!["rust".to_string(), "graphql".to_string()],
        })
        .await
        .unwrap();
    db.comments()
        .create(CreateComment {
            comment: "Is this remote?".to_string(),
            author: ada.username.clone(),
            author_id: ada.user_id.clone(),
            post_id: None,
            job_posting_id: Some(job.id.clone()),
        })
        .await
        .unwrap();

    let data = execute(
        &schema,
        r#"
        {
            user(username: "ada") {
                username
                posts { title comments { comment } }
                jobPostings { title keywords comments { comment } }
                comments { comment }
                resume { id }
            }
        }
        "#,
    )
    .await;
    let user = &data["user"];

    assert_eq!(user["posts"][0]["title"], "Looking for work");
    assert_eq!(user["posts"][0]["comments"][0]["comment"], "Good luck!");
    assert_eq!(user["jobPostings"][0]["keywords"], serde_json::json!(["rust", "graphql"]));
    assert_eq!(
        user["jobPostings"][0]["comments"][0]["comment"],
        "Is this remote?"
    );
    assert_eq!(user["comments"].as_array().unwrap().len(), 2);
    assert_eq!(user["resume"], Value::Null);
}

#[tokio::test]
async fn posts_query_expands_likes_and_counts() {
    let (schema, db) = test_schema().await;
    let ada = signup_ada(&schema).await;

    let post = db
        .posts()
        .create(CreatePost {
            title: "Hello".to_string(),
            body: "First post".to_string(),
            username: ada.username.clone(),
            author_id: ada.user_id.clone(),
        })
        .await
        .unwrap();
    db.posts().add_like(&post.id, &ada.user_id).await.unwrap();
    db.comments()
        .create(CreateComment {
            comment: "Welcome".to_string(),
            author: ada.username.clone(),
            author_id: ada.user_id.clone(),
            post_id: Some(post.id.clone()),
            job_posting_id: None,
        })
        .await
        .unwrap();

    let data = execute(
        &schema,
        r#"
        {
            posts {
                items {
                    title
                    likes { username }
                    dislikes { username }
                    likesCount
                    dislikesCount
                    commentCount
                }
                totalCount
            }
        }
        "#,
    )
    .await;
    let item = &data["posts"]["items"][0];

    assert_eq!(item["likes"][0]["username"], "ada");
    assert_eq!(item["dislikes"], serde_json::json!([]));
    assert_eq!(item["likesCount"], 1);
    assert_eq!(item["dislikesCount"], 0);
    assert_eq!(item["commentCount"], 1);
    assert_eq!(data["posts"]["totalCount"], 1);
}

#[tokio::test]
async fn users_query_respects_pagination_bounds() {
    let (schema, _db) = test_schema().await;

    for n in 0..3 {
        let q = format!(
            r#"
            mutation {{
                addUser(input: {{
                    username: "user{n}",
                    email: "user{n}@example.com",
                    password: "pw",
                    firstName: "U",
                    lastName: "{n}"
                }}) {{ success }}
            }}
            "#
        );
        let data = execute(&schema, &q).await;
        assert_eq!(data["addUser"]["success"], Value::Bool(true));
    }

    let data = execute(&schema, "{ users(limit: 2) { items { username } totalCount hasMore } }").await;
    assert_eq!(data["users"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["users"]["totalCount"], 3);
    assert_eq!(data["users"]["hasMore"], Value::Bool(true));

    let data = execute(
        &schema,
        "{ users(limit: 2, offset: 2) { items { username } hasMore } }",
    )
    .await;
    assert_eq!(data["users"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(data["users"]["hasMore"], Value::Bool(false));
}
