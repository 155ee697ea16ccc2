//! Backend contract checks, run against any `SecretsApi` implementation.

use vaultdesk_api::{MemorySecretStore, NewSecret, SecretsApi};

async fn check_contract(api: &dyn SecretsApi) {
    // Empty backend lists nothing.
    assert!(api.list_secrets().await.unwrap().is_empty());

    // Create then read back.
    api.create_secret(&NewSecret::new("x", "y")).await.unwrap();
    let secret = api.get_secret("x").await.unwrap();
    assert_eq!(secret.name, "x");
    assert_eq!(secret.value.as_deref(), Some("y"));

    // Listing includes the new name.
    let names: Vec<String> = api
        .list_secrets()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert!(names.contains(&"x".to_string()));

    // Names are unique.
    assert!(api.create_secret(&NewSecret::new("x", "other")).await.is_err());

    // Update replaces the value.
    api.update_secret("x", "y2").await.unwrap();
    assert_eq!(
        api.get_secret("x").await.unwrap().value.as_deref(),
        Some("y2")
    );

    // Missing secrets surface as failures.
    assert!(api.get_secret("missing").await.unwrap_err().is_not_found());
    assert!(api.update_secret("missing", "v").await.is_err());

    // Names with separators are stored verbatim.
    api.create_secret(&NewSecret::new("prd/database", "USERNAME=admin"))
        .await
        .unwrap();
    assert_eq!(
        api.get_secret("prd/database").await.unwrap().name,
        "prd/database"
    );
}

#[tokio::test]
async fn memory_store_satisfies_contract() {
    let store = MemorySecretStore::new();
    check_contract(&store).await;
}
