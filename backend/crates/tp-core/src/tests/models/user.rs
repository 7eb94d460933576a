use crate::{CoreError, User};

use googletest::prelude::*;

#[test]
fn given_name_when_creating_pending_user_then_has_no_link() {
    let user = User::pending(12346, "Bob").unwrap();

    assert_that!(user.id, eq(12346));
    assert_that!(user.first_name, eq("Bob"));
    assert!(user.is_pending());
}

#[test]
fn given_blank_name_when_creating_pending_user_then_validation_error() {
    let result = User::pending(12346, "   ");

    assert!(matches!(result, Err(CoreError::Validation { .. })));
}
