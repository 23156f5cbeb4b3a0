//! Tests for the pure access-control predicates that gate every handler.
//!
//! Run with: `cargo test --test access_test`
use uuid::Uuid;

use lexmarket_backend::auth::access::{
    Identity, Role, is_any_admin, is_self_or_admin, is_super_admin, is_super_or_self_admin,
    require_any_admin, require_role, require_self_or_admin, require_super_admin,
};

fn ident(role: Role) -> Identity {
    Identity {
        id: Uuid::new_v4(),
        role,
    }
}

#[test]
fn test_admin_predicates() {
    assert!(is_any_admin(&ident(Role::Admin)));
    assert!(is_any_admin(&ident(Role::SuperAdmin)));
    assert!(!is_any_admin(&ident(Role::Client)));
    assert!(!is_any_admin(&ident(Role::Lawyer)));

    assert!(is_super_admin(&ident(Role::SuperAdmin)));
    assert!(!is_super_admin(&ident(Role::Admin)));
}

#[test]
fn test_self_or_admin() {
    let me = ident(Role::Client);
    assert!(is_self_or_admin(&me, me.id));
    assert!(!is_self_or_admin(&me, Uuid::new_v4()));

    // Any admin passes regardless of the target.
    assert!(is_self_or_admin(&ident(Role::Admin), Uuid::new_v4()));
    assert!(is_self_or_admin(&ident(Role::SuperAdmin), Uuid::new_v4()));
}

#[test]
fn test_super_or_self_admin() {
    let admin = ident(Role::Admin);

    // An admin may act on their own account but not on another admin's.
    assert!(is_super_or_self_admin(&admin, admin.id));
    assert!(!is_super_or_self_admin(&admin, Uuid::new_v4()));

    // The super-admin may act on anyone.
    assert!(is_super_or_self_admin(&ident(Role::SuperAdmin), Uuid::new_v4()));

    // Non-admin identities never pass, even for their own id.
    let client = ident(Role::Client);
    assert!(!is_super_or_self_admin(&client, client.id));
}

#[test]
fn test_require_companions_reject() {
    assert!(require_any_admin(&ident(Role::Lawyer)).is_err());
    assert!(require_any_admin(&ident(Role::Admin)).is_ok());

    assert!(require_super_admin(&ident(Role::Admin)).is_err());
    assert!(require_super_admin(&ident(Role::SuperAdmin)).is_ok());

    assert!(require_role(&ident(Role::Client), Role::Lawyer).is_err());
    assert!(require_role(&ident(Role::Lawyer), Role::Lawyer).is_ok());

    let me = ident(Role::Client);
    assert!(require_self_or_admin(&me, me.id).is_ok());
    assert!(require_self_or_admin(&me, Uuid::new_v4()).is_err());
}
