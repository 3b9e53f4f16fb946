// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property and scenario tests for the classifier's public contract.

use fs_error::{
    ClassifiedError, Classifier, ErrorType, Failure, FailureKind, FieldViolation,
    NULL_DEREFERENCE_FALLBACK, RemoteErrorDescriptor, ServiceStatusCode, StackFrame,
    extract_classification, format_message, format_prefix,
};
use proptest::prelude::*;

fn arb_type() -> impl Strategy<Value = ErrorType> {
    proptest::sample::select(ErrorType::ALL.to_vec())
}

fn arb_reason() -> impl Strategy<Value = ServiceStatusCode> {
    proptest::sample::select(ServiceStatusCode::ALL.to_vec())
}

proptest! {
    #[test]
    fn extractor_recovers_formatted_pair(t in arb_type(), r in arb_reason(), body in ".*") {
        let msg = format_message(t, r, &body);
        prop_assert_eq!(extract_classification(&msg), (t, r));
    }

    #[test]
    fn extractor_is_idempotent(t in arb_type(), r in arb_reason(), body in "[a-z ]{0,40}") {
        let once = ClassifiedError::with_reason(t, r, &body);
        let (t2, r2) = extract_classification(once.message());
        let twice = ClassifiedError::with_reason(t2, r2, once.body());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn remote_hop_preserves_classification_and_body(
        t in arb_type(),
        r in arb_reason(),
        body in "[A-Za-z0-9 .,:]{0,60}",
    ) {
        let upstream = ClassifiedError::with_reason(t, r, &body);
        let local = Classifier::default().classify(upstream.to_descriptor());
        prop_assert_eq!(local.error_type(), t);
        prop_assert_eq!(local.reason(), r);
        prop_assert_eq!(local.body(), body.as_str());
    }

    #[test]
    fn messages_always_start_with_tag(msg in ".*") {
        let err = Classifier::default().classify(RemoteErrorDescriptor::new(msg));
        let prefix = format_prefix(err.error_type(), err.reason());
        prop_assert!(err.message().starts_with(&prefix));
    }

    #[test]
    fn unrecognised_failures_get_default_pair(msg in "[a-z ]{0,40}") {
        let f = Failure::new(FailureKind::Other, "x.Unknown").with_message(msg);
        let err = Classifier::default().classify(f);
        prop_assert_eq!(err.error_type(), ErrorType::System);
        prop_assert_eq!(err.reason(), ServiceStatusCode::SystemException);
    }
}

#[test]
fn every_type_prefix_combination_round_trips() {
    for t in ErrorType::ALL {
        for r in ServiceStatusCode::ALL {
            let msg = format_message(t, r, "body");
            assert_eq!(extract_classification(&msg), (t, r), "{msg}");
        }
    }
}

#[test]
fn remote_descriptor_example() {
    let err = Classifier::default()
        .classify(RemoteErrorDescriptor::new("[FS_SY_1001 Some reason: actual detail"));
    assert_eq!(err.error_type(), ErrorType::System);
    assert_eq!(err.reason().code(), 1001);
    assert_eq!(err.body(), "actual detail");
    assert_eq!(
        err.message(),
        "[FS_SY_1001 Required parameter missing: actual detail"
    );
}

#[test]
fn two_hops_do_not_nest_tags() {
    let c = Classifier::default();
    let first = ClassifiedError::with_reason(ErrorType::Sql, ServiceStatusCode::Insert, "dup key");
    let second = c.classify(first.to_descriptor());
    let third = c.classify(second.to_descriptor());
    assert_eq!(third, first);
    assert_eq!(third.message().matches("FS_SQ_").count(), 1);
}

#[test]
fn hop_with_empty_body_does_not_nest_tags() {
    let first = ClassifiedError::with_reason(ErrorType::System, ServiceStatusCode::NoParam, "");
    let second = Classifier::default().classify(first.to_descriptor());
    assert_eq!(second.message(), "[FS_SY_1001 Required parameter missing: ");
    assert_eq!(second.body(), "");
    assert_eq!(second.message().matches("[FS_").count(), 1);
}

#[test]
fn re_raised_error_keeps_its_tag_and_body() {
    let original =
        ClassifiedError::with_reason(ErrorType::Common, ServiceStatusCode::NotFound, "order 7");
    let failure = Failure::from(original.clone());
    assert_eq!(failure.message(), Some(original.message()));

    let again = Classifier::default().classify(failure);
    assert_eq!(again, original);
}

#[test]
fn nested_conversion_failure_is_param_validity() {
    let f = Failure::new(
        FailureKind::TypeMismatch,
        "org.springframework.web.method.annotation.MethodArgumentTypeMismatchException",
    )
    .with_message("Failed to convert X to Y")
    .with_cause(
        Failure::new(FailureKind::Other, "java.lang.NumberFormatException")
            .with_message("For input string: \"abc\""),
    );
    let err = Classifier::default().classify(f);
    assert_eq!(err.error_type(), ErrorType::System);
    assert_eq!(err.reason(), ServiceStatusCode::ParamValidity);
    assert_eq!(
        err.body(),
        "For input string: \"abc\" (Caused by: \
         org.springframework.web.method.annotation.MethodArgumentTypeMismatchException, \
         java.lang.NumberFormatException)"
    );
}

#[test]
fn bean_validation_message() {
    let f = Failure::new(
        FailureKind::ArgumentNotValid(vec![
            FieldViolation::new("name", "must not be blank"),
            FieldViolation::new("age", "must be positive"),
        ]),
        "org.springframework.web.bind.MethodArgumentNotValidException",
    )
    .with_message("Validation failed for argument [0] with 2 errors");
    let err = Classifier::default().classify(f);
    assert_eq!(err.reason(), ServiceStatusCode::ParamValidity);
    assert_eq!(
        err.body(),
        "Validation failed: name: must not be blank, age: must be positive"
    );
}

#[test]
fn constraint_violation_message() {
    let f = Failure::new(
        FailureKind::ConstraintViolation(vec![FieldViolation::new(
            "list.size",
            "must be less than or equal to 100",
        )]),
        "javax.validation.ConstraintViolationException",
    );
    let err = Classifier::default().classify(f);
    assert_eq!(
        err.message(),
        "[FS_SY_1002 Invalid parameter: Validation failed: list.size: must be less than or equal to 100"
    );
}

#[test]
fn null_dereference_outside_app_uses_fixed_message() {
    let f = Failure::new(FailureKind::NullDereference, "java.lang.NullPointerException")
        .with_frames([StackFrame::new("org.apache.catalina.core.StandardWrapperValve", "invoke")]);
    let err = Classifier::default().classify(f);
    assert_eq!(err.body(), NULL_DEREFERENCE_FALLBACK);
    assert_eq!(
        err.body(),
        "NullPointerException occurred. Please check for uninitialized objects."
    );
}

#[test]
fn null_dereference_without_frames_uses_fixed_message() {
    let f = Failure::new(FailureKind::NullDereference, "java.lang.NullPointerException");
    assert_eq!(
        Classifier::default().classify(f).body(),
        NULL_DEREFERENCE_FALLBACK
    );
}

#[test]
fn sql_precedence_is_pinned() {
    let c = Classifier::default();
    let sql = |msg: &str| {
        c.classify(
            Failure::new(FailureKind::Other, "org.springframework.jdbc.BadSqlGrammarException")
                .with_message(msg)
                .with_cause(Failure::new(FailureKind::Sql, "java.sql.SQLSyntaxErrorException")),
        )
        .reason()
    };
    assert_eq!(sql("select ... update ..."), ServiceStatusCode::Read);
    assert_eq!(sql("update ... select ..."), ServiceStatusCode::Read);
    assert_eq!(sql("update ... delete ..."), ServiceStatusCode::Update);
    assert_eq!(sql("delete ... insert ..."), ServiceStatusCode::Insert);
    assert_eq!(sql("delete only"), ServiceStatusCode::Delete);
    assert_eq!(sql("deadlock"), ServiceStatusCode::Query);
}
