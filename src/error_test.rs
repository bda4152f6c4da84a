use super::*;

#[test]
fn not_found_maps_to_404() {
    let err = ApiError::not_found("bot", "42");
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.error_code(), "E_NOT_FOUND");
    assert_eq!(err.to_string(), "bot not found: 42");
}

#[test]
fn filter_error_maps_to_400() {
    let err = ApiError::from(FilterError::UnknownCategory { key: "color".into(), allowed: "status, plan".into() });
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.error_code(), "E_INVALID_FILTER");
}

#[test]
fn form_error_maps_to_422() {
    let err = ApiError::from(FormError::MissingFields(vec!["description"]));
    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.error_code(), "E_VALIDATION");
}

#[test]
fn wizard_error_maps_to_409() {
    let err = ApiError::from(WizardError::NotOnFinalStep { current: crate::services::wizard::WizardStep::General });
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[test]
fn missing_formats_uuid() {
    let id = Uuid::nil();
    let err = ApiError::missing("action", id);
    assert_eq!(err.to_string(), format!("action not found: {id}"));
}

#[test]
fn closed_scope_maps_to_404() {
    let scope = Uuid::new_v4();
    for err in [
        ApiError::from(ActionError::ScopeClosed(scope)),
        ApiError::from(FormError::Action(ActionError::ScopeClosed(scope))),
        ApiError::from(WordPressError::Action(ActionError::ScopeClosed(scope))),
    ] {
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "E_SCOPE_CLOSED");
    }
}

#[test]
fn wordpress_refusals_map_to_422() {
    for err in [WordPressError::MissingToken, WordPressError::NotValidated] {
        let err = ApiError::from(err);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "E_VALIDATION");
    }
}

#[tokio::test]
async fn into_response_carries_code() {
    use http_body_util::BodyExt;

    let response = ApiError::not_found("bot", "99").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "E_NOT_FOUND");
    assert_eq!(body["message"], "bot not found: 99");
}
