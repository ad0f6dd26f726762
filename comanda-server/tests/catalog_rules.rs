//! Catalog referential rules
//!
//! Grupos, items, mesas and usuarios guard their references: nothing with
//! order history or dependent rows can be deleted, duplicates are
//! rejected, and partial updates leave unset fields alone.

use comanda_server::auth::password;
use comanda_server::db::repository::{self, RepoError};
use comanda_server::{Config, ServerState};
use shared::models::{
    GrupoCreate, GrupoUpdate, ItemCreate, ItemUpdate, MesaCreate, MesaUpdate, UserRole,
    UsuarioCreate, UsuarioUpdate,
};
use tempfile::TempDir;

async fn test_state() -> (ServerState, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    // Ignore any ambient DATABASE_PATH; the database must live in the tempdir
    config.database_path = None;
    let state = ServerState::initialize(&config).await;
    (state, dir)
}

async fn seed_grupo(state: &ServerState, codigo: &str) {
    repository::grupo::create(
        state.pool(),
        GrupoCreate {
            codigo: codigo.into(),
            nombre: format!("Grupo {codigo}"),
        },
    )
    .await
    .expect("Failed to create grupo");
}

async fn seed_item(state: &ServerState, nombre: &str, grupo: &str) -> i64 {
    repository::item::create(
        state.pool(),
        ItemCreate {
            nombre: nombre.into(),
            precio: 500,
            existencia: Some(10),
            grupo_codigo: grupo.into(),
        },
    )
    .await
    .expect("Failed to create item")
    .id
}

async fn admin_id(state: &ServerState) -> i64 {
    repository::usuario::find_by_username(state.pool(), "admin")
        .await
        .expect("Failed to query admin")
        .expect("Admin is seeded on first run")
        .id
}

#[tokio::test]
async fn grupo_delete_blocked_while_items_remain() {
    let (state, _dir) = test_state().await;
    seed_grupo(&state, "BEB").await;
    let item = seed_item(&state, "Cafe", "BEB").await;

    let err = repository::grupo::delete(state.pool(), "BEB")
        .await
        .expect_err("Delete must be blocked");
    assert!(matches!(err, RepoError::InUse(_)));

    // Once the item is gone the grupo can go too
    repository::item::delete(state.pool(), item)
        .await
        .expect("Failed to delete item");
    assert!(
        repository::grupo::delete(state.pool(), "BEB")
            .await
            .expect("Delete after cleanup failed")
    );
    let gone = repository::grupo::find_by_codigo(state.pool(), "BEB")
        .await
        .expect("Failed to query grupo");
    assert!(gone.is_none());
}

#[tokio::test]
async fn duplicate_grupo_codigo_rejected() {
    let (state, _dir) = test_state().await;
    seed_grupo(&state, "BEB").await;

    let err = repository::grupo::create(
        state.pool(),
        GrupoCreate {
            codigo: "BEB".into(),
            nombre: "Bebidas otra vez".into(),
        },
    )
    .await
    .expect_err("Duplicate codigo must be rejected");
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn item_requires_existing_grupo() {
    let (state, _dir) = test_state().await;
    seed_grupo(&state, "BEB").await;
    let item = seed_item(&state, "Cafe", "BEB").await;

    let err = repository::item::create(
        state.pool(),
        ItemCreate {
            nombre: "Huerfano".into(),
            precio: 100,
            existencia: None,
            grupo_codigo: "NOPE".into(),
        },
    )
    .await
    .expect_err("Unknown grupo must be rejected");
    assert!(matches!(err, RepoError::Validation(_)));

    let err = repository::item::update(
        state.pool(),
        item,
        ItemUpdate {
            grupo_codigo: Some("NOPE".into()),
            ..Default::default()
        },
    )
    .await
    .expect_err("Moving to an unknown grupo must be rejected");
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn item_with_order_history_cannot_be_deleted() {
    let (state, _dir) = test_state().await;
    seed_grupo(&state, "BEB").await;
    let item = seed_item(&state, "Cafe", "BEB").await;
    let mesa = repository::mesa::create(
        state.pool(),
        MesaCreate {
            nombre: "Mesa 1".into(),
        },
    )
    .await
    .expect("Failed to create mesa");
    let admin = admin_id(&state).await;

    state
        .engine
        .add_item(mesa.id, item, admin, 1)
        .await
        .expect("Add failed");
    let err = repository::item::delete(state.pool(), item)
        .await
        .expect_err("Delete must be blocked while ordered");
    assert!(matches!(err, RepoError::InUse(_)));

    // Paid history keeps blocking the delete
    state
        .engine
        .finalize(mesa.id, admin)
        .await
        .expect("Finalize failed");
    let err = repository::item::delete(state.pool(), item)
        .await
        .expect_err("Delete must stay blocked after payment");
    assert!(matches!(err, RepoError::InUse(_)));
}

#[tokio::test]
async fn mesa_with_comanda_history_cannot_be_deleted() {
    let (state, _dir) = test_state().await;
    seed_grupo(&state, "BEB").await;
    let item = seed_item(&state, "Cafe", "BEB").await;
    let usada = repository::mesa::create(
        state.pool(),
        MesaCreate {
            nombre: "Mesa 1".into(),
        },
    )
    .await
    .expect("Failed to create mesa");
    let libre = repository::mesa::create(
        state.pool(),
        MesaCreate {
            nombre: "Mesa 2".into(),
        },
    )
    .await
    .expect("Failed to create mesa");
    let admin = admin_id(&state).await;

    state
        .engine
        .add_item(usada.id, item, admin, 1)
        .await
        .expect("Add failed");
    state
        .engine
        .finalize(usada.id, admin)
        .await
        .expect("Finalize failed");

    let err = repository::mesa::delete(state.pool(), usada.id)
        .await
        .expect_err("Mesa with history must not be deletable");
    assert!(matches!(err, RepoError::InUse(_)));

    // A mesa that never hosted a comanda deletes cleanly
    assert!(
        repository::mesa::delete(state.pool(), libre.id)
            .await
            .expect("Delete of unused mesa failed")
    );
}

#[tokio::test]
async fn duplicate_username_rejected() {
    let (state, _dir) = test_state().await;
    let hash = password::hash_password("secreto").expect("Failed to hash");

    repository::usuario::create(
        state.pool(),
        UsuarioCreate {
            username: "maria".into(),
            password: "secreto".into(),
            display_name: Some("Maria".into()),
            role: UserRole::Staff,
        },
        hash.clone(),
    )
    .await
    .expect("Failed to create usuario");

    let err = repository::usuario::create(
        state.pool(),
        UsuarioCreate {
            username: "maria".into(),
            password: "otra".into(),
            display_name: None,
            role: UserRole::Staff,
        },
        hash,
    )
    .await
    .expect_err("Duplicate username must be rejected");
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn usuario_with_comanda_history_cannot_be_deleted() {
    let (state, _dir) = test_state().await;
    seed_grupo(&state, "BEB").await;
    let item = seed_item(&state, "Cafe", "BEB").await;
    let mesa = repository::mesa::create(
        state.pool(),
        MesaCreate {
            nombre: "Mesa 1".into(),
        },
    )
    .await
    .expect("Failed to create mesa");
    let admin = admin_id(&state).await;

    state
        .engine
        .add_item(mesa.id, item, admin, 1)
        .await
        .expect("Add failed");

    let err = repository::usuario::delete(state.pool(), admin)
        .await
        .expect_err("Usuario owning comandas must not be deletable");
    assert!(matches!(err, RepoError::InUse(_)));
}

#[tokio::test]
async fn partial_updates_preserve_unset_fields() {
    let (state, _dir) = test_state().await;
    seed_grupo(&state, "BEB").await;
    let item = seed_item(&state, "Cafe", "BEB").await;

    let updated = repository::item::update(
        state.pool(),
        item,
        ItemUpdate {
            precio: Some(999),
            ..Default::default()
        },
    )
    .await
    .expect("Update failed");
    assert_eq!(updated.precio, 999);
    assert_eq!(updated.nombre, "Cafe");
    assert_eq!(updated.existencia, 10);
    assert_eq!(updated.grupo_codigo, "BEB");
    assert!(updated.is_active);

    let hash = password::hash_password("secreto").expect("Failed to hash");
    let usuario = repository::usuario::create(
        state.pool(),
        UsuarioCreate {
            username: "maria".into(),
            password: "secreto".into(),
            display_name: None,
            role: UserRole::Staff,
        },
        hash,
    )
    .await
    .expect("Failed to create usuario");
    // display_name defaulted to the username
    assert_eq!(usuario.display_name, "maria");

    let updated = repository::usuario::update(
        state.pool(),
        usuario.id,
        UsuarioUpdate {
            display_name: Some("Maria G".into()),
            ..Default::default()
        },
        None,
    )
    .await
    .expect("Update failed");
    assert_eq!(updated.display_name, "Maria G");
    assert_eq!(updated.username, "maria");
    assert_eq!(updated.role, UserRole::Staff);
    assert_eq!(updated.hash_pass, usuario.hash_pass);
}

#[tokio::test]
async fn negative_existencia_rejected() {
    let (state, _dir) = test_state().await;
    seed_grupo(&state, "BEB").await;
    let item = seed_item(&state, "Cafe", "BEB").await;

    let err = repository::item::create(
        state.pool(),
        ItemCreate {
            nombre: "Fantasma".into(),
            precio: 100,
            existencia: Some(-5),
            grupo_codigo: "BEB".into(),
        },
    )
    .await
    .expect_err("Negative existencia must be rejected");
    assert!(matches!(err, RepoError::Validation(_)));

    let err = repository::item::update(
        state.pool(),
        item,
        ItemUpdate {
            existencia: Some(-1),
            ..Default::default()
        },
    )
    .await
    .expect_err("Negative existencia must be rejected");
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn updates_and_deletes_of_missing_rows_report_not_found() {
    let (state, _dir) = test_state().await;

    let err = repository::item::update(
        state.pool(),
        9999,
        ItemUpdate {
            precio: Some(100),
            ..Default::default()
        },
    )
    .await
    .expect_err("Missing item");
    assert!(matches!(err, RepoError::NotFound(_)));

    let err = repository::grupo::update(
        state.pool(),
        "ZZZ",
        GrupoUpdate {
            nombre: Some("Nada".into()),
        },
    )
    .await
    .expect_err("Missing grupo");
    assert!(matches!(err, RepoError::NotFound(_)));

    let err = repository::mesa::update(
        state.pool(),
        9999,
        MesaUpdate {
            nombre: Some("Nada".into()),
        },
    )
    .await
    .expect_err("Missing mesa");
    assert!(matches!(err, RepoError::NotFound(_)));

    let err = repository::mesa::delete(state.pool(), 9999)
        .await
        .expect_err("Missing mesa");
    assert!(matches!(err, RepoError::NotFound(_)));

    let err = repository::usuario::update(
        state.pool(),
        9999,
        UsuarioUpdate {
            display_name: Some("Nadie".into()),
            ..Default::default()
        },
        None,
    )
    .await
    .expect_err("Missing usuario");
    assert!(matches!(err, RepoError::NotFound(_)));
}
