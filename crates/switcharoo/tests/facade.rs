use switcharoo::domain::config::AppConfig;
use switcharoo::domain::{EnvironmentId, FeatureId, OwnerId};
use switcharoo::flags::{FeatureState, Rejection, Toggled};
use switcharoo::kernel::security::keys::KeyError;
use switcharoo::{Switcharoo, SwitcharooError};

struct World {
    app: Switcharoo,
    alice: OwnerId,
    bob: OwnerId,
    feature: FeatureId,
    env: EnvironmentId,
}

async fn world() -> World {
    let app = Switcharoo::builder().config(AppConfig::default()).build().unwrap();
    let (alice, bob) = (OwnerId::new(), OwnerId::new());
    for owner in [alice, bob] {
        app.owners().register_owner(owner).await.unwrap().into_result().unwrap();
    }

    let env = app.environments().add_environment(alice, "prod").await.unwrap().done().unwrap();
    let feature = app.features().add_feature(alice, "beta", "").await.unwrap().done().unwrap();
    app.bind_environment_as(alice, feature, env).await.unwrap().into_result().unwrap();

    World { app, alice, bob, feature, env }
}

#[tokio::test]
async fn test_owner_can_toggle_through_the_guard() {
    let w = world().await;

    let toggled = w.app.toggle_as(w.alice, w.feature, w.env).await.unwrap();
    assert_eq!(toggled.done(), Some(Toggled { enabled: true, changed: true }));

    let state = w.app.queries().feature_state("beta", w.env).await.unwrap();
    assert_eq!(state, FeatureState { active: true, found: true });
}

#[tokio::test]
async fn test_strangers_are_unauthorized() {
    let w = world().await;

    let toggled = w.app.toggle_as(w.bob, w.feature, w.env).await.unwrap();
    assert_eq!(toggled.rejection(), Some(Rejection::Unauthorized));
    assert_eq!(toggled.reason(), "Unauthorized");

    let unbound = w.app.unbind_environment_as(w.bob, w.feature, w.env).await.unwrap();
    assert_eq!(unbound.rejection(), Some(Rejection::Unauthorized));

    let deleted = w.app.delete_feature_as(w.bob, w.feature).await.unwrap();
    assert_eq!(deleted.rejection(), Some(Rejection::Unauthorized));

    let deleted = w.app.delete_environment_as(w.bob, w.env).await.unwrap();
    assert_eq!(deleted.rejection(), Some(Rejection::Unauthorized));

    // Nothing changed.
    let state = w.app.queries().feature_state("beta", w.env).await.unwrap();
    assert_eq!(state, FeatureState { active: false, found: true });
}

#[tokio::test]
async fn test_binding_needs_both_resources() {
    let w = world().await;
    let bobs_env = w.app.environments().add_environment(w.bob, "prod").await.unwrap().done().unwrap();

    let outcome = w.app.bind_environment_as(w.alice, w.feature, bobs_env).await.unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::Unauthorized));

    let outcome = w.app.bind_environment_as(w.bob, w.feature, bobs_env).await.unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::Unauthorized));
}

#[tokio::test]
async fn test_unknown_resources_look_unauthorized() {
    let w = world().await;

    let outcome = w.app.toggle_as(w.alice, FeatureId::new(), w.env).await.unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::Unauthorized));

    let outcome = w.app.delete_environment_as(w.alice, EnvironmentId::new()).await.unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::Unauthorized));
}

#[tokio::test]
async fn test_owner_mutations_pass_the_guard() {
    let w = world().await;

    assert!(w.app.unbind_environment_as(w.alice, w.feature, w.env).await.unwrap().is_done());
    let toggled = w.app.toggle_as(w.alice, w.feature, w.env).await.unwrap();
    assert_eq!(toggled.rejection(), Some(Rejection::FeatureNotFound));

    assert!(w.app.delete_environment_as(w.alice, w.env).await.unwrap().is_done());
    assert!(w.app.delete_feature_as(w.alice, w.feature).await.unwrap().is_done());
    assert_eq!(w.app.store().counts(), switcharoo::store::TableCounts { owners: 2, ..Default::default() });
}

#[tokio::test]
async fn test_clones_share_the_store() {
    let w = world().await;
    let clone = w.app.clone();

    clone.toggle_as(w.alice, w.feature, w.env).await.unwrap().into_result().unwrap();
    assert!(w.app.queries().feature_state("beta", w.env).await.unwrap().active);
}

#[tokio::test]
async fn test_string_keys_reach_the_guarded_toggle() {
    let w = world().await;
    let (alice, feature, env) = (w.alice.to_string(), format!("feature:{}", w.feature), w.env.to_string());

    let toggled = w.app.toggle_by_key(&alice, &feature, &env).await.unwrap();
    assert_eq!(toggled.done(), Some(Toggled { enabled: true, changed: true }));

    let stranger = w.app.toggle_by_key(&w.bob.to_string(), &feature, &env).await.unwrap();
    assert_eq!(stranger.rejection(), Some(Rejection::Unauthorized));

    let state = w.app.feature_state_by_key("beta", &format!("environment:{}", w.env)).await.unwrap();
    assert_eq!(state, FeatureState { active: true, found: true });
}

#[tokio::test]
async fn test_bad_string_keys_are_key_errors() {
    let w = world().await;
    let alice = w.alice.to_string();

    let swapped = format!("environment:{}", w.env);
    let err = w.app.toggle_by_key(&alice, &swapped, &w.env.to_string()).await.unwrap_err();
    assert!(matches!(err, SwitcharooError::Key { source: KeyError::TableMismatch { .. }, .. }));

    let err = w.app.feature_state_by_key("beta", "prod").await.unwrap_err();
    assert!(matches!(err, SwitcharooError::Key { source: KeyError::Malformed { .. }, .. }));

    // Nothing was toggled.
    let state = w.app.queries().feature_state("beta", w.env).await.unwrap();
    assert!(!state.active);
}
