//! SurrealDB-backed store and tree (embedded engines)

use catalog_server::catalog::CategoryTree;
use catalog_server::db::{
    CategoryPatch, CategoryStore, DbConfig, DbEngine, DbService, NewCategory, RepoError,
};
use shared::error::ErrorCode;
use shared::models::{CategoryCreate, CategoryFilter, CategoryUpdate};

async fn memory_db() -> DbService {
    DbService::open(&DbConfig::memory()).await.unwrap()
}

fn new_category(name: &str, slug: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        parent: None,
        ancestors: Vec::new(),
        image: None,
        is_active: true,
        is_featured: false,
        seo: None,
        created_at: 1,
        updated_at: 1,
    }
}

#[tokio::test]
async fn test_repository_crud() {
    let db = memory_db().await;
    let store = db.category_store();

    let shoes = store.insert(new_category("Shoes", "shoes")).await.unwrap();
    assert!(shoes.id.starts_with("category:"));
    assert!(shoes.is_active);

    let found = store.find_by_id(&shoes.id).await.unwrap().unwrap();
    assert_eq!(found, shoes);
    assert_eq!(store.find_by_slug("shoes").await.unwrap().unwrap().id, shoes.id);
    assert!(store.find_by_slug("boots").await.unwrap().is_none());

    let mut patch = CategoryPatch {
        name: Some("Footwear".into()),
        is_featured: Some(true),
        updated_at: 2,
        ..Default::default()
    };
    patch.description = Some(Some("All shoes".into()));
    let updated = store.update_by_id(&shoes.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.name, "Footwear");
    assert_eq!(updated.slug, "shoes");
    assert!(updated.is_featured);
    assert_eq!(updated.description.as_deref(), Some("All shoes"));
    assert_eq!(updated.updated_at, 2);
    assert_eq!(updated.created_at, 1);

    let cleared = store
        .update_by_id(
            &shoes.id,
            CategoryPatch {
                description: Some(None),
                updated_at: 3,
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.name, "Footwear");

    assert!(store.delete_by_id(&shoes.id).await.unwrap());
    assert!(!store.delete_by_id(&shoes.id).await.unwrap());
    assert!(store.find_by_id(&shoes.id).await.unwrap().is_none());

    db.close();
}

#[tokio::test]
async fn test_repository_ignores_foreign_and_malformed_ids() {
    let db = memory_db().await;
    let store = db.category_store();

    assert!(store.find_by_id("product:abc").await.unwrap().is_none());
    assert!(store.find_by_id("not an id").await.unwrap().is_none());
    assert!(
        store
            .update_by_id("category:missing", CategoryPatch::ancestors(Vec::new(), 1))
            .await
            .unwrap()
            .is_none()
    );
    assert!(!store.delete_by_id("category:missing").await.unwrap());
}

#[tokio::test]
async fn test_unique_slug_index() {
    let db = memory_db().await;
    let store = db.category_store();

    store.insert(new_category("Boots", "boots")).await.unwrap();
    let err = store
        .insert(new_category("Boots Again", "boots"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "{err:?}");
}

#[tokio::test]
async fn test_find_all_filters_and_order() {
    let db = memory_db().await;
    let store = db.category_store();

    store.insert(new_category("apple", "apple")).await.unwrap();
    store.insert(new_category("Zebra", "zebra")).await.unwrap();
    let mut featured = new_category("Mango", "mango");
    featured.is_featured = true;
    store.insert(featured).await.unwrap();

    let names: Vec<String> = store
        .find_all(CategoryFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Mango", "Zebra", "apple"]);

    let featured = store.find_all(CategoryFilter::featured()).await.unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].name, "Mango");
}

#[tokio::test]
async fn test_tree_over_surreal() {
    let db = memory_db().await;
    let tree = CategoryTree::new(db.category_store());

    let shoes = tree.create(CategoryCreate::new("Shoes")).await.unwrap();
    let sneakers = tree
        .create(CategoryCreate::new("Sneakers").with_parent(&shoes.id))
        .await
        .unwrap();
    let running = tree
        .create(CategoryCreate::new("Running").with_parent(&sneakers.id))
        .await
        .unwrap();
    assert_eq!(running.breadcrumb(), "Shoes > Sneakers > Running");

    let err = tree
        .update(&shoes.id, CategoryUpdate::default().move_to(Some(running.id.clone())))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::CategoryCycle));

    tree.update(&shoes.id, CategoryUpdate::default().rename("Footwear"))
        .await
        .unwrap();
    let running = tree.get(&running.id).await.unwrap();
    assert_eq!(running.breadcrumb(), "Footwear > Sneakers > Running");
    assert_eq!(running.ancestors[0].slug, "footwear");

    // Move Sneakers to the root: parent stored as null
    let sneakers = tree
        .update(&sneakers.id, CategoryUpdate::default().move_to(None))
        .await
        .unwrap();
    assert!(sneakers.is_root());
    let running = tree.get(&running.id).await.unwrap();
    assert_eq!(running.ancestors, sneakers.ancestors_for_child());

    let roots: Vec<String> = tree
        .list(CategoryFilter::default())
        .await
        .unwrap()
        .into_iter()
        .filter(|c| c.is_root())
        .map(|c| c.name)
        .collect();
    assert_eq!(roots, vec!["Footwear", "Sneakers"]);

    let err = tree.delete(&sneakers.id).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::CategoryHasChildren));
    tree.delete(&running.id).await.unwrap();
    tree.delete(&sneakers.id).await.unwrap();
    assert_eq!(tree.rebuild_ancestors().await.unwrap(), 0);
}

#[tokio::test]
async fn test_rocksdb_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database").join("catalog.db");
    let config = DbConfig {
        engine: DbEngine::RocksDb(path.clone()),
        namespace: "test".into(),
        database: "catalog".into(),
    };

    let db = DbService::open(&config).await.unwrap();
    assert!(path.exists());

    let tree = CategoryTree::new(db.category_store());
    let shoes = tree.create(CategoryCreate::new("Shoes")).await.unwrap();
    assert_eq!(tree.get(&shoes.id).await.unwrap().slug, "shoes");

    drop(tree);
    db.close();
}
