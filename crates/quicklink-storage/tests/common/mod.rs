//! Behaviour every `UrlStore` backend must share.
//!
//! Each check takes a fresh, open store and uses its own aliases.

use quicklink_storage::{Alias, RecordId, StoreError, TargetUrl, UrlStore};

pub fn alias(value: &str) -> Alias {
    Alias::new(value).unwrap()
}

pub fn url(value: &str) -> TargetUrl {
    TargetUrl::new(value).unwrap()
}

pub async fn save_then_get_returns_url<S: UrlStore>(store: &S) {
    store
        .save(&url("https://example.com/landing"), &alias("landing"))
        .await
        .unwrap();

    let got = store.get(&alias("landing")).await.unwrap();
    assert_eq!(got.as_str(), "https://example.com/landing");
}

pub async fn url_is_returned_verbatim<S: UrlStore>(store: &S) {
    let target = " https://example.com/a b?q=1 2 ";
    store.save(&url(target), &alias("spaced")).await.unwrap();

    let got = store.get(&alias("spaced")).await.unwrap();
    assert_eq!(got.as_str(), target);
}

pub async fn duplicate_alias_is_rejected<S: UrlStore>(store: &S) {
    store
        .save(&url("https://one.example"), &alias("dup"))
        .await
        .unwrap();

    let err = store
        .save(&url("https://two.example"), &alias("dup"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateAlias { op: "save", .. }));

    let got = store.get(&alias("dup")).await.unwrap();
    assert_eq!(got.as_str(), "https://one.example");
}

pub async fn unknown_alias_is_not_found<S: UrlStore>(store: &S) {
    let err = store.get(&alias("never-saved")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { op: "get", .. }));
    assert!(!store.exists(&alias("never-saved")).await.unwrap());
}

pub async fn delete_then_get_is_not_found<S: UrlStore>(store: &S) {
    let id = store
        .save(&url("https://example.com"), &alias("ex"))
        .await
        .unwrap();
    assert_eq!(
        store.get(&alias("ex")).await.unwrap().as_str(),
        "https://example.com"
    );

    assert!(store.delete(&id).await.unwrap());

    let err = store.get(&alias("ex")).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!store.exists(&alias("ex")).await.unwrap());
}

pub async fn delete_of_absent_id_is_a_noop<S: UrlStore>(store: &S) {
    let id: RecordId = "00000000-0000-4000-8000-000000000000".parse().unwrap();
    assert!(!store.delete(&id).await.unwrap());
}

pub async fn deleted_id_is_not_reused<S: UrlStore>(store: &S) {
    let first = store
        .save(&url("https://first.example"), &alias("recycled"))
        .await
        .unwrap();
    store.delete(&first).await.unwrap();

    let second = store
        .save(&url("https://second.example"), &alias("recycled"))
        .await
        .unwrap();
    assert_ne!(first, second);
    assert!(!store.delete(&first).await.unwrap());
    assert_eq!(
        store.get(&alias("recycled")).await.unwrap().as_str(),
        "https://second.example"
    );
}

pub async fn ping_fails_after_close<S: UrlStore>(store: &S) {
    store.ping().await.unwrap();

    store.close().await;
    store.close().await;

    let err = store.ping().await.unwrap_err();
    assert!(matches!(err, StoreError::Connection { op: "ping", .. }));
}
