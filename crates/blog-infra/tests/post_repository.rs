mod common;

use std::sync::Arc;
use std::time::Duration;

use blog_core::RepoError;
use blog_core::ports::PostRepository;
use blog_infra::SeaOrmPostRepository;
use blog_infra::database::entity::{post_tag, tag};
use common::{draft, seed_user, setup};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

#[tokio::test]
async fn create_returns_hydrated_post_visible_only_to_owner() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let other = seed_user(&t.db, "other@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    let created = repo
        .create(owner, draft("Hi", "World", "tech", &["a", "b"]))
        .await
        .unwrap();

    assert_eq!(created.owner_id, owner);
    assert_eq!(created.title, "Hi");
    assert_eq!(created.tags, vec!["a", "b"]);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.find(created.id, owner).await.unwrap();
    assert_eq!(fetched, Some(created.clone()));

    assert!(repo.find(created.id, other).await.unwrap().is_none());
}

#[tokio::test]
async fn update_replaces_fields_and_tags() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    let created = repo
        .create(owner, draft("Hi", "World", "tech", &["a", "b"]))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = repo
        .update(created.id, owner, draft("Hi again", "World", "tech", &["b", "c"]))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.owner_id, owner);
    assert_eq!(updated.title, "Hi again");
    assert_eq!(updated.tags, vec!["b", "c"]);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.created_at);

    let fetched = repo.find(created.id, owner).await.unwrap().unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_with_duplicate_tag_names_stores_each_once() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    let created = repo
        .create(owner, draft("t", "c", "x", &[]))
        .await
        .unwrap();
    assert!(created.tags.is_empty());

    let updated = repo
        .update(created.id, owner, draft("t", "c", "x", &["a", "b", "b"]))
        .await
        .unwrap();
    assert_eq!(updated.tags, vec!["a", "b"]);

    let links = post_tag::Entity::find()
        .filter(post_tag::Column::PostId.eq(created.id))
        .all(t.db.conn())
        .await
        .unwrap();
    assert_eq!(links.len(), 2);

    let b_rows = tag::Entity::find()
        .filter(tag::Column::Name.eq("b"))
        .all(t.db.conn())
        .await
        .unwrap();
    assert_eq!(b_rows.len(), 1);
}

#[tokio::test]
async fn update_of_foreign_or_missing_post_is_not_found() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let other = seed_user(&t.db, "other@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    let created = repo
        .create(owner, draft("mine", "c", "x", &["a"]))
        .await
        .unwrap();

    let err = repo
        .update(created.id, other, draft("stolen", "c", "x", &["z"]))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));

    let err = repo
        .update(created.id + 100, owner, draft("ghost", "c", "x", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));

    // The rejected update left nothing behind, not even the new tag.
    let unchanged = repo.find(created.id, owner).await.unwrap().unwrap();
    assert_eq!(unchanged, created);
    let z_rows = tag::Entity::find()
        .filter(tag::Column::Name.eq("z"))
        .all(t.db.conn())
        .await
        .unwrap();
    assert!(z_rows.is_empty());
}

#[tokio::test]
async fn delete_removes_post_and_associations() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let other = seed_user(&t.db, "other@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    let created = repo
        .create(owner, draft("t", "c", "x", &["a", "b"]))
        .await
        .unwrap();

    let err = repo.delete(created.id, other).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
    assert!(repo.find(created.id, owner).await.unwrap().is_some());

    repo.delete(created.id, owner).await.unwrap();

    assert!(repo.find(created.id, owner).await.unwrap().is_none());
    let links = post_tag::Entity::find()
        .filter(post_tag::Column::PostId.eq(created.id))
        .all(t.db.conn())
        .await
        .unwrap();
    assert!(links.is_empty());

    let err = repo.delete(created.id, owner).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn list_with_empty_term_returns_all_and_only_owned_posts() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let other = seed_user(&t.db, "other@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    for title in ["first", "second", "third"] {
        repo.create(owner, draft(title, "c", "x", &["a"]))
            .await
            .unwrap();
    }
    repo.create(other, draft("foreign", "c", "x", &["a"]))
        .await
        .unwrap();

    let posts = repo.list(owner, "").await.unwrap();

    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert!(posts.iter().all(|p| p.owner_id == owner));
    assert!(posts.iter().all(|p| p.tags == vec!["a"]));
}

#[tokio::test]
async fn list_matches_title_content_or_category_case_insensitively() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let other = seed_user(&t.db, "other@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    repo.create(owner, draft("All about FOO", "body", "misc", &[]))
        .await
        .unwrap();
    repo.create(owner, draft("plain", "some Foobar text", "misc", &[]))
        .await
        .unwrap();
    repo.create(owner, draft("plain", "body", "foo-category", &[]))
        .await
        .unwrap();
    repo.create(owner, draft("unrelated", "body", "misc", &[]))
        .await
        .unwrap();
    repo.create(other, draft("foo", "foo", "foo", &[]))
        .await
        .unwrap();

    let posts = repo.list(owner, "foo").await.unwrap();

    assert_eq!(posts.len(), 3);
    assert!(posts.iter().all(|p| p.owner_id == owner));
    assert!(posts.iter().all(|p| p.title != "unrelated"));
}

#[tokio::test]
async fn list_treats_wildcards_in_term_literally() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    repo.create(owner, draft("100% done", "c", "x", &[]))
        .await
        .unwrap();
    repo.create(owner, draft("1000 done", "c", "x", &[]))
        .await
        .unwrap();

    let posts = repo.list(owner, "0%").await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "100% done");

    let posts = repo.list(owner, "_").await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn tags_are_shared_between_owners() {
    let t = setup().await;
    let alice = seed_user(&t.db, "alice@example.com").await;
    let bob = seed_user(&t.db, "bob@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    repo.create(alice, draft("a", "c", "x", &["rust"]))
        .await
        .unwrap();
    repo.create(bob, draft("b", "c", "x", &["rust", "Rust"]))
        .await
        .unwrap();

    let rust_rows = tag::Entity::find()
        .filter(tag::Column::Name.eq("rust"))
        .all(t.db.conn())
        .await
        .unwrap();
    assert_eq!(rust_rows.len(), 1);

    // Names are case-sensitive.
    let all = tag::Entity::find().all(t.db.conn()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_update_and_list_never_observe_empty_tags() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let repo = Arc::new(SeaOrmPostRepository::new(t.db.clone()));

    let post = repo
        .create(owner, draft("t", "c", "x", &["a", "b"]))
        .await
        .unwrap();

    let writer = {
        let repo = repo.clone();
        tokio::spawn(async move {
            for i in 0..20 {
                let tags: &[&str] = if i % 2 == 0 { &["c", "d"] } else { &["a", "b"] };
                repo.update(post.id, owner, draft("t", "c", "x", tags))
                    .await
                    .unwrap();
            }
        })
    };

    let reader = {
        let repo = repo.clone();
        tokio::spawn(async move {
            for _ in 0..40 {
                let posts = repo.list(owner, "").await.unwrap();
                assert_eq!(posts.len(), 1);
                assert_eq!(posts[0].tags.len(), 2, "observed tags {:?}", posts[0].tags);
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
}

#[tokio::test]
async fn list_matches_non_ascii_terms() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let repo = SeaOrmPostRepository::new(t.db.clone());

    repo.create(owner, draft("ÉCOLE notes", "c", "x", &[]))
        .await
        .unwrap();
    repo.create(owner, draft("plain", "Grüße aus Köln", "x", &[]))
        .await
        .unwrap();

    for term in ["ÉCOLE", "École", "NOTES", "ÉCOLE notes"] {
        let posts = repo.list(owner, term).await.unwrap();
        assert_eq!(posts.len(), 1, "term {term:?}");
        assert_eq!(posts[0].title, "ÉCOLE notes");
    }

    let posts = repo.list(owner, "grüße AUS köln").await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "plain");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_updates_of_different_posts_all_succeed() {
    let t = setup().await;
    let owner = seed_user(&t.db, "owner@example.com").await;
    let repo = Arc::new(SeaOrmPostRepository::new(t.db.clone()));

    let first = repo.create(owner, draft("a", "c", "x", &["a"])).await.unwrap();
    let second = repo.create(owner, draft("b", "c", "x", &["b"])).await.unwrap();

    let writers: Vec<_> = [first.id, second.id]
        .into_iter()
        .map(|id| {
            let repo = repo.clone();
            tokio::spawn(async move {
                for i in 0..30 {
                    let tag = format!("t{i}");
                    repo.update(id, owner, draft(&format!("v{i}"), "c", "x", &[tag.as_str()]))
                        .await
                        .unwrap_or_else(|e| panic!("update {i} of post {id} failed: {e}"));
                }
            })
        })
        .collect();

    for writer in writers {
        writer.await.unwrap();
    }

    for id in [first.id, second.id] {
        let post = repo.find(id, owner).await.unwrap().unwrap();
        assert_eq!(post.title, "v29");
        assert_eq!(post.tags, vec!["t29"]);
        assert!(post.updated_at >= post.created_at);
    }
}
