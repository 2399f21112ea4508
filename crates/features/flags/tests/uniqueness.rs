mod fixtures;

use fixtures::setup;
use proptest::prelude::*;
use switcharoo_flags::*;

#[tokio::test]
async fn test_duplicate_names_are_rejected_per_owner() {
    let flags = setup();
    let owner = flags.owner().await;

    let first = flags.features.add_feature(owner, "beta", "first").await.unwrap();
    assert!(first.is_done());
    let second = flags.features.add_feature(owner, "beta", "second").await.unwrap();
    assert_eq!(second.rejection(), Some(Rejection::DuplicateFeature));
    assert_eq!(second.reason(), "Feature already exists");

    assert!(flags.environments.add_environment(owner, "prod").await.unwrap().is_done());
    let again = flags.environments.add_environment(owner, "prod").await.unwrap();
    assert_eq!(again.rejection(), Some(Rejection::DuplicateEnvironment));
    assert_eq!(again.reason(), "Environment already exists");
}

#[tokio::test]
async fn test_names_are_case_sensitive_and_owner_scoped() {
    let flags = setup();
    let alice = flags.owner().await;
    let bob = flags.owner().await;

    assert!(flags.environments.add_environment(alice, "prod").await.unwrap().is_done());
    assert!(flags.environments.add_environment(alice, "Prod").await.unwrap().is_done());
    assert!(flags.environments.add_environment(bob, "prod").await.unwrap().is_done());

    assert!(flags.features.add_feature(alice, "beta", "").await.unwrap().is_done());
    assert!(flags.features.add_feature(bob, "beta", "").await.unwrap().is_done());
}

#[tokio::test]
async fn test_duplicate_owner_is_rejected() {
    let flags = setup();
    let owner = flags.owner().await;

    let again = flags.owners.register_owner(owner).await.unwrap();
    assert_eq!(again.rejection(), Some(Rejection::DuplicateOwner));
    assert_eq!(again.rejection().map(Rejection::kind), Some(RejectionKind::Conflict));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_yield_exactly_one_feature() {
    let flags = setup();
    let owner = flags.owner().await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let features = flags.features.clone();
            tokio::spawn(async move {
                features.add_feature(owner, "race", &format!("attempt {i}")).await
            })
        })
        .collect();

    let mut done = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        match outcome.rejection() {
            None => done += 1,
            Some(rejection) => assert_eq!(rejection, Rejection::DuplicateFeature),
        }
    }

    assert_eq!(done, 1);
    let listed = flags.features.list_features(owner).await.unwrap().done().unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_binds_yield_exactly_one_binding() {
    let flags = setup();
    let owner = flags.owner().await;
    let feature = flags.feature(owner, "beta").await;
    let env = flags.environment(owner, "prod").await;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let bindings = flags.bindings.clone();
            tokio::spawn(async move { bindings.bind_environment(feature, env).await })
        })
        .collect();

    let mut done = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        match outcome.rejection() {
            None => done += 1,
            Some(rejection) => assert_eq!(rejection, Rejection::DuplicateBinding),
        }
    }

    assert_eq!(done, 1);
    let listed = flags.features.list_features(owner).await.unwrap().done().unwrap();
    assert_eq!(listed[0].bindings.len(), 1);
    assert_eq!(flags.store.counts().bindings, 1);
}

proptest! {
    #[test]
    fn one_environment_per_distinct_name(names in proptest::collection::vec("[a-c]{1,2}", 1..12)) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let (accepted, listed) = rt.block_on(async {
            let flags = setup();
            let owner = flags.owner().await;

            let mut accepted = Vec::new();
            for name in &names {
                if flags.environments.add_environment(owner, name).await.unwrap().is_done() {
                    accepted.push(name.clone());
                }
            }
            let listed = flags.environments.list_environments(owner).await.unwrap().done().unwrap();
            (accepted, listed)
        });

        let mut distinct = names.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(accepted.len(), distinct.len());

        let listed: Vec<String> = listed.into_iter().map(|env| env.name).collect();
        prop_assert_eq!(listed, accepted);
    }
}
