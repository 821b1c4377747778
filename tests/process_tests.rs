//! End-to-end behaviour of `process`.
use formrules::library::{normalizers, validators};
use formrules::{
    AliasMap, CheckOutcome, FieldMap, GLOBAL_KEY, GlobalCheck, REQUIRED_MESSAGE, RuleRegistry,
    RuleSet, RuleSpec, Value, process, process_with_aliases,
};
use serde_json::json;

fn fields(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect()
}

fn build_registry<const N: usize>(fields: [(&str, RuleSpec); N]) -> RuleRegistry {
    RuleRegistry::from_fields(fields).expect("valid registry")
}

fn email_spec() -> RuleSpec {
    RuleSpec::new()
        .required(true)
        .normalizer(normalizers::trim)
        .normalizer(normalizers::lowercase)
        .validator(
            |v: &Value| {
                v.as_str()
                    .and_then(|s| s.split_once('@'))
                    .is_some_and(|(_, domain)| domain.contains('.'))
            },
            "Invalid email",
        )
}

fn phone_spec() -> RuleSpec {
    RuleSpec::new()
        .normalizer(normalizers::digits_only)
        .validator(validators::phone_es, "Invalid phone")
}

fn password_spec() -> RuleSpec {
    RuleSpec::new()
        .required(true)
        .validator(
            |v: &Value| {
                v.as_str().is_some_and(|s| {
                    s.chars().any(|c| c.is_ascii_uppercase())
                        && s.chars().any(|c| c.is_ascii_digit())
                })
            },
            "needs upper+digit",
        )
        .validator(
            |v: &Value| v.as_str().is_some_and(|s| s.chars().count() >= 12),
            "too short",
        )
}

fn corporate_check() -> GlobalCheck {
    GlobalCheck::new("corporate_phone", |values: &FieldMap| {
        let corporate = values
            .get("email")
            .and_then(Value::as_str)
            .is_some_and(|e| e.ends_with("@empresa.com"));
        let phone = values.get("telefono").and_then(Value::as_str).unwrap_or("");
        if corporate && phone.is_empty() {
            CheckOutcome::fail("Corporate email requires a phone number")
        } else {
            CheckOutcome::pass()
        }
    })
}

#[test]
fn test_email_is_normalized_and_valid() {
    let registry = build_registry([("email", email_spec())]);
    let result = process(
        fields(&[("email", "  Usuario@TEST.com ")]),
        &registry,
        &[],
        &AliasMap::new(),
    );

    assert!(result.ok);
    assert_eq!(result.value("email"), Some(&json!("usuario@test.com")));
    assert!(result.field_errors("email").is_none());
}

#[test]
fn test_phone_digits_extracted() {
    let registry = build_registry([("telefono", phone_spec())]);
    let result = process(
        fields(&[("telefono", "612 345 678")]),
        &registry,
        &[],
        &AliasMap::new(),
    );

    assert!(result.ok);
    assert_eq!(result.value("telefono"), Some(&json!("612345678")));
    assert!(!result.errors.contains_key("telefono"));
}

#[test]
fn test_password_only_length_fails() {
    let registry = build_registry([("password", password_spec())]);
    let result = process(
        fields(&[("password", "Abc123")]),
        &registry,
        &[],
        &AliasMap::new(),
    );
    assert_eq!(result.field_errors("password").unwrap(), ["too short"]);
}

#[test]
fn test_password_both_validators_fail_in_order() {
    let registry = build_registry([("password", password_spec())]);
    let result = process(
        fields(&[("password", "abc123")]),
        &registry,
        &[],
        &AliasMap::new(),
    );
    assert_eq!(
        result.field_errors("password").unwrap(),
        ["needs upper+digit", "too short"]
    );
}

#[test]
fn test_password_only_classes_fail() {
    let registry = build_registry([("password", password_spec())]);
    let result = process(
        fields(&[("password", "abcdefghijklmn")]),
        &registry,
        &[],
        &AliasMap::new(),
    );
    assert_eq!(result.field_errors("password").unwrap(), ["needs upper+digit"]);
}

#[test]
fn test_missing_required_field() {
    let registry = build_registry([("email", email_spec()), ("password", password_spec())]);
    let result = process(
        fields(&[("email", "a@b.com")]),
        &registry,
        &[],
        &AliasMap::new(),
    );

    assert!(!result.ok);
    assert_eq!(result.field_errors("password").unwrap(), [REQUIRED_MESSAGE]);
    assert_eq!(result.value("password"), Some(&json!("")));
}

#[test]
fn test_values_contain_every_declared_field() {
    let registry = build_registry([
        ("email", email_spec()),
        ("telefono", phone_spec()),
        ("password", password_spec()),
    ]);
    let result = process(
        fields(&[("email", "bad"), ("telefono", "12"), ("noise", "x")]),
        &registry,
        &[],
        &AliasMap::new(),
    );

    assert!(!result.ok);
    let names: Vec<_> = result.values.keys().map(String::as_str).collect();
    assert_eq!(names, ["email", "password", "telefono"]);
    assert_eq!(result.value("telefono"), Some(&json!("12")));
}

#[test]
fn test_corporate_email_without_phone() {
    let registry = build_registry([
        ("email", email_spec()),
        ("password", RuleSpec::new().required(true)),
    ]);
    let input = fields(&[("email", "admin@empresa.com"), ("password", "Python123!")]);

    let result = process(input.clone(), &registry, &[corporate_check()], &AliasMap::new());
    assert!(!result.ok);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[GLOBAL_KEY].len(), 1);

    let without_check = process(input, &registry, &[], &AliasMap::new());
    assert!(without_check.ok);
    assert!(without_check.errors.is_empty());
}

#[test]
fn test_global_checks_see_normalized_values() {
    let registry = build_registry([("email", email_spec())]);
    let check = GlobalCheck::new("lowercase_seen", |values: &FieldMap| {
        if values.get("email") == Some(&json!("admin@empresa.com")) {
            CheckOutcome::pass()
        } else {
            CheckOutcome::fail("raw value leaked")
        }
    });

    let result = process(
        fields(&[("email", "  ADMIN@Empresa.com")]),
        &registry,
        &[check],
        &AliasMap::new(),
    );
    assert!(result.ok, "{:?}", result.errors);
}

#[test]
fn test_global_checks_see_failed_required_field() {
    let registry = build_registry([(
        "codigo",
        RuleSpec::new()
            .required(true)
            .normalizer(normalizers::collapse_whitespace),
    )]);
    let check = GlobalCheck::new("normalized_blank", |values: &FieldMap| {
        if values.get("codigo") == Some(&json!("")) {
            CheckOutcome::pass()
        } else {
            CheckOutcome::fail("raw value leaked")
        }
    });

    let result = process(
        fields(&[("codigo", "  \t  ")]),
        &registry,
        &[check],
        &AliasMap::new(),
    );
    assert!(!result.ok);
    assert_eq!(result.field_errors("codigo").unwrap(), [REQUIRED_MESSAGE]);
    assert!(result.global_errors().is_none());
    assert_eq!(result.value("codigo"), Some(&json!("")));
}

#[test]
fn test_ok_iff_no_error_keys() {
    let registry = build_registry([("email", email_spec()), ("telefono", phone_spec())]);

    let cases = [
        fields(&[("email", "a@b.com"), ("telefono", "612345678")]),
        fields(&[("email", "a@b.com")]),
        fields(&[("telefono", "612345678")]),
        fields(&[]),
    ];
    for input in cases {
        let result = process(input, &registry, &[], &AliasMap::new());
        assert_eq!(result.ok, result.errors.is_empty());
        assert!(result.errors.values().all(|messages| !messages.is_empty()));
    }
}

#[test]
fn test_aliasing_is_a_pure_rename() {
    let registry = build_registry([("email", email_spec()), ("telefono", phone_spec())]);
    let checks = [corporate_check()];

    let mut aliases = AliasMap::new();
    aliases.insert("tel".to_string(), "telefono".to_string());
    aliases.insert("mail".to_string(), "email".to_string());

    let aliased = process(
        fields(&[("mail", "admin@empresa.com"), ("tel", "612 345 678")]),
        &registry,
        &checks,
        &aliases,
    );
    let canonical = process(
        fields(&[("email", "admin@empresa.com"), ("telefono", "612 345 678")]),
        &registry,
        &checks,
        &AliasMap::new(),
    );
    assert_eq!(aliased, canonical);
    assert!(aliased.ok);
}

#[test]
fn test_embedded_rule_set_end_to_end() {
    let rule_set = RuleSet::embedded_registration().unwrap();

    let result = process_with_aliases(
        fields(&[
            ("email", "  Usuario@TEST.com "),
            ("tel", "612 345 678"),
            ("password", "Python123!"),
        ]),
        &rule_set,
    );
    assert!(result.ok, "{:?}", result.errors);
    assert_eq!(result.value("telefono"), Some(&json!("612345678")));

    // Optional phone still runs its validator when empty.
    let result = process_with_aliases(
        fields(&[("email", "admin@empresa.com"), ("password", "Python123!")]),
        &rule_set,
    );
    assert!(!result.ok);
    assert_eq!(result.errors.len(), 2);
    assert!(result.field_errors("telefono").is_some());
    assert_eq!(
        result.global_errors().unwrap(),
        ["Corporate email requires a phone number"]
    );
}

#[test]
#[should_panic(expected = "misconfigured validator")]
fn test_panicking_validator_propagates() {
    let spec = RuleSpec::new().validator(|_| panic!("misconfigured validator"), "never");
    let registry = build_registry([("x", spec)]);
    process(fields(&[("x", "1")]), &registry, &[], &AliasMap::new());
}

#[test]
fn test_registry_shared_across_threads() {
    let rule_set = std::sync::Arc::new(RuleSet::embedded_registration().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rule_set = rule_set.clone();
            std::thread::spawn(move || {
                let email = format!("user{}@test.com", i);
                process_with_aliases(
                    fields(&[
                        ("email", email.as_str()),
                        ("telefono", "612345678"),
                        ("password", "Python123"),
                    ]),
                    &rule_set,
                )
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().ok);
    }
}
