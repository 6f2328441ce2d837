//! Building a provider from TOML configuration.

use pretty_assertions::assert_eq;
use rusty_rules::{Account, Config, RuleError, TenantId, User, ValidationProvider};
use std::path::Path;

fn sample_config() -> Config {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("rusty-rules.toml");
    Config::load(path).unwrap()
}

fn user(first_name: &str, last_name: &str, age: u8) -> User {
    User {
        first_name: first_name.into(),
        last_name: last_name.into(),
        age,
        email: "jdoe@mail.com".into(),
        phone: "+16175551212".into(),
        account: Some(Account {
            id: "anuuid".into(),
            balance: 10.0,
        }),
        ..User::default()
    }
}

fn fields(provider: &ValidationProvider, tenant: u32, user: &User) -> Vec<String> {
    provider
        .violations(TenantId(tenant), user)
        .unwrap()
        .into_iter()
        .map(|v| v.field)
        .collect()
}

#[test]
fn test_sample_config_registers_every_tenant() {
    let provider = ValidationProvider::from_config(&sample_config()).unwrap();
    assert_eq!(
        provider.tenant_ids(),
        vec![TenantId(1), TenantId(2), TenantId(3)]
    );
}

#[test]
fn test_configured_strategies() {
    let provider = ValidationProvider::from_config(&sample_config()).unwrap();

    assert_eq!(fields(&provider, 1, &user("John", "Doe", 25)), vec!["FirstName"]);
    assert!(fields(&provider, 1, &user("Sam", "Doe", 25)).is_empty());

    // tenant-a also requires an E.164 phone
    let no_phone = User {
        phone: String::new(),
        ..user("John", "Doe", 25)
    };
    assert_eq!(fields(&provider, 1, &no_phone), vec!["Phone", "FirstName"]);

    assert_eq!(fields(&provider, 2, &user("John", "Doe", 41)), vec!["Age"]);
    assert!(fields(&provider, 2, &user("John", "Doe", 40)).is_empty());

    assert_eq!(fields(&provider, 3, &user("John", "", 25)), vec!["LastName"]);
    let no_phone = User {
        phone: String::new(),
        ..user("John", "Doe", 25)
    };
    assert!(fields(&provider, 3, &no_phone).is_empty());
}

#[test]
fn test_configured_defaults_apply_to_all_tenants() {
    let provider = ValidationProvider::from_config(&sample_config()).unwrap();
    let long_name = "Abcdefghijklmnopqrstuvwxyzabcdefgh";

    for tenant in [2, 3] {
        assert_eq!(
            fields(&provider, tenant, &user("John", long_name, 25)),
            vec!["LastName"],
            "tenant {}",
            tenant
        );
    }
}

#[test]
fn test_duplicate_ids_keep_the_last_entry() {
    let config = Config::parse(
        r#"
        [[tenant]]
        id = 1
        strategy = "name-initial"

        [[tenant]]
        id = 1
        strategy = "age-band"
        "#,
    )
    .unwrap();

    let provider = ValidationProvider::from_config(&config).unwrap();
    assert_eq!(provider.tenant_ids(), vec![TenantId(1)]);
    assert!(fields(&provider, 1, &user("John", "Doe", 25)).is_empty());
    assert_eq!(fields(&provider, 1, &user("Sam", "Doe", 50)), vec!["Age"]);
}

#[test]
fn test_bad_tenant_rules_are_reported() {
    let config = Config::parse(
        r#"
        [[tenant]]
        id = 4

        [tenant.rules.User]
        Nickname = "required"
        "#,
    )
    .unwrap();

    let err = ValidationProvider::from_config(&config).unwrap_err();
    assert_eq!(
        err,
        RuleError::UnknownField {
            entity: "User".into(),
            field: "Nickname".into(),
        }
    );
}
