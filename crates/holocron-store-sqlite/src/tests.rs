//! Integration tests for `SqliteStore` and the core services against an
//! in-memory database.

use std::sync::Arc;

use chrono::{TimeZone as _, Utc};
use holocron_core::{
  catalog::{CatalogEntity, CatalogKind, Person, Planet},
  favorite::Target,
  service::{CatalogService, FavoritesPolicy, FavoritesService, Removal},
  store::{CatalogStore, FavoriteRegistry, UserStore},
  user::User,
};

use crate::{Seed, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn user(id: i64) -> User {
  User {
    id,
    email: format!("user{id}@example.com"),
    subscription_date: Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap(),
  }
}

fn luke() -> Person {
  Person {
    height: Some("172".into()),
    eye_color: Some("blue".into()),
    ..Person::new(2, "Luke Skywalker")
  }
}

fn tatooine() -> Planet {
  Planet {
    climate: Some("arid".into()),
    ..Planet::new(3, "Tatooine")
  }
}

/// A store holding user 1, person 2 and planet 3.
async fn seeded() -> SqliteStore {
  let s = store().await;
  s.seed(Seed {
    users:   vec![user(1)],
    people:  vec![luke()],
    planets: vec![tatooine()],
  })
  .await
  .unwrap();
  s
}

fn favorites(s: &SqliteStore, policy: FavoritesPolicy) -> FavoritesService<SqliteStore> {
  FavoritesService::new(Arc::new(s.clone()), policy)
}

// ─── Users and catalog ───────────────────────────────────────────────────────

#[tokio::test]
async fn seed_reports_counts_and_is_repeatable() {
  let s = store().await;
  let seed = Seed {
    users:   vec![user(1), user(2)],
    people:  vec![luke()],
    planets: vec![],
  };

  let summary = s.seed(seed.clone()).await.unwrap();
  assert_eq!((summary.users, summary.people, summary.planets), (2, 1, 0));

  s.seed(seed).await.unwrap();
  assert_eq!(s.list_users().await.unwrap().len(), 2);
}

#[tokio::test]
async fn seed_with_duplicate_email_fails_and_writes_nothing() {
  let s = store().await;
  let clash = User { id: 2, ..user(1) };

  let result = s
    .seed(Seed {
      users:   vec![user(1), clash],
      people:  vec![luke()],
      planets: vec![],
    })
    .await;
  assert!(result.is_err());

  assert!(s.list_users().await.unwrap().is_empty());
  assert!(s.list_entities(CatalogKind::Person).await.unwrap().is_empty());
}

#[tokio::test]
async fn reseeding_updates_rows_in_place() {
  let s = seeded().await;
  let renamed = User { email: "leia@alderaan.gov".into(), ..user(1) };

  s.seed(Seed {
    users:   vec![renamed.clone(), user(2)],
    people:  vec![Person::new(2, "Luke")],
    planets: vec![],
  })
  .await
  .unwrap();

  let mut users = s.list_users().await.unwrap();
  users.sort_by_key(|u| u.id);
  assert_eq!(users, vec![renamed, user(2)]);

  let luke = s.get_entity(CatalogKind::Person, 2).await.unwrap().unwrap();
  assert_eq!(luke.name(), "Luke");
}

#[tokio::test]
async fn seed_parses_from_json() {
  let seed: Seed = serde_json::from_str(
    r#"{
      "users": [{"id": 1, "email": "a@example.com", "subscription_date": "2024-01-01T00:00:00Z"}],
      "planets": [{"id": 9, "name": "Dagobah"}]
    }"#,
  )
  .unwrap();
  assert_eq!(seed.users.len(), 1);
  assert!(seed.people.is_empty());
  assert_eq!(seed.planets[0].name, "Dagobah");
}

#[tokio::test]
async fn user_roundtrip_and_exists() {
  let s = store().await;
  s.insert_user(user(1)).await.unwrap();

  assert!(s.user_exists(1).await.unwrap());
  assert!(!s.user_exists(2).await.unwrap());

  let users = s.list_users().await.unwrap();
  assert_eq!(users, vec![user(1)]);
}

#[tokio::test]
async fn get_entity_by_kind() {
  let s = seeded().await;

  let person = s.get_entity(CatalogKind::Person, 2).await.unwrap();
  assert_eq!(person, Some(CatalogEntity::Person(luke())));

  let planet = s.get_entity(CatalogKind::Planet, 3).await.unwrap();
  assert_eq!(planet, Some(CatalogEntity::Planet(tatooine())));

  // Ids are per kind: there is no person 3.
  assert!(s.get_entity(CatalogKind::Person, 3).await.unwrap().is_none());
}

#[tokio::test]
async fn list_entities_returns_whole_partition() {
  let s = seeded().await;
  s.insert_person(Person::new(4, "Leia Organa")).await.unwrap();

  let people = s.list_entities(CatalogKind::Person).await.unwrap();
  assert_eq!(people.len(), 2);
  assert!(people.iter().all(|e| e.kind() == CatalogKind::Person));

  let planets = s.list_entities(CatalogKind::Planet).await.unwrap();
  assert_eq!(planets.len(), 1);
}

// ─── Registry ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_fresh_ids() {
  let s = store().await;
  let a = s.create_favorite(1, Target::Person(2)).await.unwrap();
  let b = s.create_favorite(1, Target::Person(2)).await.unwrap();
  assert_ne!(a.id, b.id);
  assert_eq!(a.target, Target::Person(2));
}

#[tokio::test]
async fn create_accepts_unknown_user_and_target() {
  let s = store().await;

  let fav = s.create_favorite(42, Target::Planet(999)).await.unwrap();
  assert_eq!(fav.user_id, 42);
  assert_eq!(s.list_favorites(42).await.unwrap(), vec![fav]);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let a = s.create_favorite(1, Target::Planet(3)).await.unwrap();
  s.delete_favorite(1, Target::Planet(3)).await.unwrap();
  let b = s.create_favorite(1, Target::Planet(3)).await.unwrap();
  assert!(b.id > a.id);
}

#[tokio::test]
async fn delete_removes_first_of_duplicates() {
  let s = store().await;
  let first = s.create_favorite(1, Target::Person(2)).await.unwrap();
  let second = s.create_favorite(1, Target::Person(2)).await.unwrap();

  let removed = s.delete_favorite(1, Target::Person(2)).await.unwrap();
  assert_eq!(removed, Some(first));

  let left = s.list_favorites(1).await.unwrap();
  assert_eq!(left, vec![second]);
}

#[tokio::test]
async fn delete_matches_kind_and_user() {
  let s = store().await;
  s.create_favorite(1, Target::Person(2)).await.unwrap();
  s.create_favorite(5, Target::Planet(2)).await.unwrap();

  // Same id, other kind; same target, other user.
  assert!(s.delete_favorite(1, Target::Planet(2)).await.unwrap().is_none());
  assert!(s.delete_favorite(5, Target::Person(2)).await.unwrap().is_none());

  assert_eq!(s.list_favorites(1).await.unwrap().len(), 1);
  assert_eq!(s.list_favorites(5).await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_is_scoped_to_user_in_insertion_order() {
  let s = store().await;
  let a = s.create_favorite(1, Target::Planet(3)).await.unwrap();
  s.create_favorite(2, Target::Person(2)).await.unwrap();
  let b = s.create_favorite(1, Target::Person(2)).await.unwrap();

  assert_eq!(s.list_favorites(1).await.unwrap(), vec![a, b]);
  assert!(s.list_favorites(9).await.unwrap().is_empty());
}

#[tokio::test]
async fn schema_rejects_rows_with_both_or_neither_target() {
  let s = store().await;

  let results = s
    .conn
    .call(|conn| {
      let both = conn.execute(
        "INSERT INTO favorites (user_id, person_id, planet_id) VALUES (1, 2, 3)",
        [],
      );
      let neither = conn.execute(
        "INSERT INTO favorites (user_id, person_id, planet_id) VALUES (1, NULL, NULL)",
        [],
      );
      Ok((both.is_err(), neither.is_err()))
    })
    .await
    .unwrap();

  assert_eq!(results, (true, true));
  assert!(s.list_favorites(1).await.unwrap().is_empty());
}

// ─── FavoritesService ────────────────────────────────────────────────────────

#[tokio::test]
async fn add_person_favorite_returns_flat_record() {
  let s = seeded().await;
  let svc = favorites(&s, FavoritesPolicy::default());

  let fav = svc.add_favorite(1, Target::Person(2)).await.unwrap();
  let json = serde_json::to_value(&fav).unwrap();
  assert_eq!(json["user_id"], 1);
  assert_eq!(json["person_id"], 2);
  assert!(json["planet_id"].is_null());
  assert!(json["id"].is_i64());
}

#[tokio::test]
async fn added_favorite_is_listed_once() {
  let s = seeded().await;
  let svc = favorites(&s, FavoritesPolicy::default());

  svc.add_favorite(1, Target::Person(2)).await.unwrap();
  let listed = svc.list_favorites(1).await.unwrap();

  let matching: Vec<_> = listed
    .iter()
    .filter(|f| f.user_id == 1 && f.target == Target::Person(2))
    .collect();
  assert_eq!(matching.len(), 1);
  assert_eq!(matching[0].target.planet_id(), None);
}

#[tokio::test]
async fn list_after_person_and_planet_has_both() {
  let s = seeded().await;
  let svc = favorites(&s, FavoritesPolicy::default());

  svc.add_favorite(1, Target::Person(2)).await.unwrap();
  svc.add_favorite(1, Target::Planet(3)).await.unwrap();

  let listed = svc.list_favorites(1).await.unwrap();
  assert_eq!(listed.len(), 2);
  for f in &listed {
    assert!(f.target.person_id().is_some() ^ f.target.planet_id().is_some());
  }
}

#[tokio::test]
async fn removing_missing_favorite_is_silent_noop() {
  let s = seeded().await;
  let svc = favorites(&s, FavoritesPolicy::default());
  let kept = svc.add_favorite(1, Target::Person(2)).await.unwrap();

  let outcome = svc.remove_favorite(1, Target::Planet(2)).await.unwrap();
  assert_eq!(outcome, Removal::NothingToRemove);

  // Repeating it changes nothing either.
  let outcome = svc.remove_favorite(1, Target::Planet(2)).await.unwrap();
  assert_eq!(outcome, Removal::NothingToRemove);

  assert_eq!(svc.list_favorites(1).await.unwrap(), vec![kept]);
}

#[tokio::test]
async fn remove_existing_favorite_reports_it() {
  let s = seeded().await;
  let svc = favorites(&s, FavoritesPolicy::default());
  let fav = svc.add_favorite(1, Target::Planet(3)).await.unwrap();

  let outcome = svc.remove_favorite(1, Target::Planet(3)).await.unwrap();
  assert_eq!(outcome.removed(), Some(&fav));
  assert!(svc.list_favorites(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn unchecked_add_accepts_unknown_references() {
  let s = seeded().await;
  let svc = favorites(&s, FavoritesPolicy::default());

  let fav = svc.add_favorite(42, Target::Planet(999)).await.unwrap();
  assert_eq!(fav.user_id, 42);
  assert_eq!(svc.list_favorites(42).await.unwrap(), vec![fav]);
}

#[tokio::test]
async fn verified_add_rejects_unknown_user_and_target() {
  let s = seeded().await;
  let svc = favorites(&s, FavoritesPolicy {
    verify_references: true,
    ..Default::default()
  });

  let err = svc.add_favorite(42, Target::Person(2)).await.unwrap_err();
  assert!(matches!(err, holocron_core::Error::UserNotFound(42)));

  let err = svc.add_favorite(1, Target::Planet(999)).await.unwrap_err();
  assert!(matches!(err, holocron_core::Error::PlanetNotFound(999)));

  let err = svc.add_favorite(1, Target::Person(3)).await.unwrap_err();
  assert!(matches!(err, holocron_core::Error::PersonNotFound(3)));

  assert!(s.list_favorites(1).await.unwrap().is_empty());
  assert!(s.list_favorites(42).await.unwrap().is_empty());

  svc.add_favorite(1, Target::Person(2)).await.unwrap();
}

#[tokio::test]
async fn strict_removal_reports_missing_favorite() {
  let s = seeded().await;
  let svc = favorites(&s, FavoritesPolicy {
    report_missing_removal: true,
    ..Default::default()
  });

  let err = svc.remove_favorite(1, Target::Planet(2)).await.unwrap_err();
  assert!(err.is_not_found());
  assert!(matches!(
    err,
    holocron_core::Error::FavoriteNotFound { user_id: 1, target: Target::Planet(2) }
  ));

  svc.add_favorite(1, Target::Planet(2)).await.unwrap();
  let outcome = svc.remove_favorite(1, Target::Planet(2)).await.unwrap();
  assert!(outcome.removed().is_some());
}

// ─── CatalogService ──────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_entity_is_not_found_but_removal_is_not() {
  let s = seeded().await;
  let catalog = CatalogService::new(Arc::new(s.clone()));
  let svc = favorites(&s, FavoritesPolicy::default());

  let err = catalog.get_entity(CatalogKind::Person, 999).await.unwrap_err();
  assert!(matches!(err, holocron_core::Error::PersonNotFound(999)));

  let err = catalog.get_entity(CatalogKind::Planet, 999).await.unwrap_err();
  assert!(matches!(err, holocron_core::Error::PlanetNotFound(999)));

  assert!(svc.remove_favorite(1, Target::Person(999)).await.is_ok());
}

#[tokio::test]
async fn catalog_service_lists() {
  let s = seeded().await;
  let catalog = CatalogService::new(Arc::new(s));

  assert_eq!(catalog.list_users().await.unwrap().len(), 1);
  let planets = catalog.list_entities(CatalogKind::Planet).await.unwrap();
  assert_eq!(planets[0].name(), "Tatooine");
  let luke = catalog.get_entity(CatalogKind::Person, 2).await.unwrap();
  assert_eq!(luke.id(), 2);
}
