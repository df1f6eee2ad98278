use super::*;

const TTL: Duration = Duration::from_secs(60);

#[test]
fn bytes_to_hex_known_values() {
    assert_eq!(bytes_to_hex(&[0x00, 0xff, 0x0a]), "00ff0a");
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_is_unique() {
    assert_ne!(generate_token(), generate_token());
}

#[tokio::test]
async fn ensure_issues_token_when_missing() {
    let store = SessionStore::new(TTL);
    let (token, issued) = store.ensure(None).await;
    assert!(issued);
    assert_eq!(token.len(), 64);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn ensure_reuses_known_token() {
    let store = SessionStore::new(TTL);
    let (token, _) = store.ensure(None).await;
    let (again, issued) = store.ensure(Some(&token)).await;
    assert!(!issued);
    assert_eq!(again, token);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn ensure_replaces_unknown_token() {
    let store = SessionStore::new(TTL);
    let (token, issued) = store.ensure(Some("forged")).await;
    assert!(issued);
    assert_ne!(token, "forged");
}

#[tokio::test]
async fn confirm_delays_persists_only_changes() {
    let store = SessionStore::new(TTL);
    let (token, _) = store.ensure(None).await;

    let (_, changed) = store.confirm_delays(&token, Delays::default()).await.unwrap();
    assert!(!changed);
    assert!(store.snapshot(&token).await.process.overlay.is_none());

    let mut edited = Delays::default();
    edited.0[0] = 8.0;
    let (next, changed) = store.confirm_delays(&token, edited).await.unwrap();
    assert!(changed);
    assert_eq!(next.delays, edited);

    let snap = store.snapshot(&token).await;
    assert_eq!(snap.process.delays, edited);
    assert_eq!(snap.process.overlay.unwrap()[0].text, "t1=8.0s");
}

#[tokio::test]
async fn confirm_delays_rejects_invalid_without_mutation() {
    let store = SessionStore::new(TTL);
    let (token, _) = store.ensure(None).await;
    let mut bad = Delays::default();
    bad.0[5] = -3.0;

    assert!(store.confirm_delays(&token, bad).await.is_err());
    assert_eq!(store.snapshot(&token).await.process.delays, Delays::default());
}

#[tokio::test]
async fn rejected_confirm_does_not_create_entry() {
    let store = SessionStore::new(TTL);
    let mut bad = Delays::default();
    bad.0[0] = f64::NAN;

    assert!(store.confirm_delays("never-issued", bad).await.is_err());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn touch_only_recognises_known_tokens() {
    let store = SessionStore::new(TTL);
    let (token, _) = store.ensure(None).await;

    assert!(store.touch(&token).await);
    assert!(!store.touch("forged").await);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn snapshot_does_not_insert() {
    let store = SessionStore::new(TTL);
    for _ in 0..100 {
        let _ = store.snapshot("anonymous").await;
    }
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let store = SessionStore::new(TTL);
    let (a, _) = store.ensure(None).await;
    let (b, _) = store.ensure(None).await;
    let mut edited = Delays::default();
    edited.0[2] = 11.0;
    store.confirm_delays(&a, edited).await.unwrap();

    assert_eq!(store.snapshot(&b).await.process.delays, Delays::default());
}

#[tokio::test]
async fn snapshot_of_unknown_token_is_default() {
    let store = SessionStore::new(TTL);
    let snap = store.snapshot("nope").await;
    assert_eq!(snap.process, ProcessState::default());
}

#[tokio::test]
async fn prune_drops_idle_sessions() {
    let store = SessionStore::new(TTL);
    let start = Instant::now();
    let (old, _) = store.ensure_at(None, start).await;
    let later = start + TTL + Duration::from_secs(1);
    let (fresh, _) = store.ensure_at(None, later).await;

    assert_eq!(store.prune_expired_at(later).await, 1);
    assert_eq!(store.len().await, 1);
    let (kept, issued) = store.ensure_at(Some(&fresh), later).await;
    assert!(!issued);
    assert_eq!(kept, fresh);
    let (_, reissued) = store.ensure_at(Some(&old), later).await;
    assert!(reissued);
}
