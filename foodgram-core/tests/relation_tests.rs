//! Behavioural tests for the toggle pairings and short links, run against the
//! in-memory stores.

use foodgram_core::pairing::{add_pair, remove_pair};
use foodgram_core::short_link::{get_or_create_link, resolve_link};
use foodgram_core::{
    generate_short_code, DomainError, MemoryPairStore, MemoryShortLinkStore, PairingError,
    RelationKind, ShortLinkError,
};
use std::convert::Infallible;
use uuid::Uuid;

fn domain(err: PairingError<Infallible>) -> DomainError {
    match err {
        PairingError::Domain(e) => e,
        PairingError::Storage(never) => match never {},
    }
}

#[test]
fn test_every_kind_round_trips_to_absent() {
    for kind in [
        RelationKind::Favorite,
        RelationKind::ShoppingCart,
        RelationKind::Follow,
    ] {
        let mut store = MemoryPairStore::new();
        let (owner, target) = (Uuid::new_v4(), Uuid::new_v4());

        add_pair(&mut store, kind, owner, target).unwrap();
        remove_pair(&mut store, kind, owner, target).unwrap();
        assert!(!store.contains(kind, owner, target), "{:?}", kind);

        // absent again, so a second remove fails and a new add succeeds
        assert!(matches!(
            domain(remove_pair(&mut store, kind, owner, target).unwrap_err()),
            DomainError::NotFound(_)
        ));
        add_pair(&mut store, kind, owner, target).unwrap();
    }
}

#[test]
fn test_self_follow_fails_regardless_of_state() {
    let mut store = MemoryPairStore::new();
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();

    add_pair(&mut store, RelationKind::Follow, user, other).unwrap();
    for _ in 0..2 {
        let err = domain(add_pair(&mut store, RelationKind::Follow, user, user).unwrap_err());
        assert!(matches!(err, DomainError::Validation { .. }));
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn test_favoriting_own_recipe_is_allowed() {
    // favorites and cart pair a user with a recipe, so equal ids are not a
    // self-reference
    let mut store = MemoryPairStore::new();
    let id = Uuid::new_v4();
    add_pair(&mut store, RelationKind::Favorite, id, id).unwrap();
}

#[test]
fn test_short_link_per_recipe() {
    let mut store = MemoryShortLinkStore::new();
    let recipes: Vec<Uuid> = (0..20).map(|_| Uuid::new_v4()).collect();

    let codes: Vec<String> = recipes
        .iter()
        .map(|id| get_or_create_link(&mut store, *id, generate_short_code).unwrap())
        .collect();

    for (id, code) in recipes.iter().zip(&codes) {
        assert_eq!(
            get_or_create_link(&mut store, *id, generate_short_code).unwrap(),
            *code
        );
        assert_eq!(resolve_link(&mut store, code).unwrap(), *id);
    }
    assert_eq!(store.len(), recipes.len());
}

#[test]
fn test_unknown_short_code() {
    let mut store = MemoryShortLinkStore::new();
    assert!(matches!(
        resolve_link(&mut store, "missing1"),
        Err(ShortLinkError::Domain(DomainError::NotFound(_)))
    ));
}
